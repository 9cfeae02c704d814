use color_eyre::Result;
use lab_site::{LabDocument, LoadError, MemoryTarget, RenderReport, Renderer};
use std::path::Path;
use tracing::info;

use crate::config::AppConfig;

/// Reads and parses the lab document. A missing or unreadable file is a transport error.
pub async fn load_document(path: &Path) -> Result<LabDocument, LoadError> {
    let body = tokio::fs::read(path)
        .await
        .map_err(|error| LoadError::transport(format!("{}: {error}", path.display())))?;
    LabDocument::from_slice(&body)
}

/// Renders the configured document into a page with every container present.
///
/// Load failures do not error here: they land in the report and in the
/// research container, exactly as on the live page.
pub async fn render_site(config: &AppConfig) -> Result<(RenderReport, MemoryTarget)> {
    let loaded = load_document(&config.data_path).await;

    let mut target = MemoryTarget::with_all_sections();
    let report = Renderer::new(config.rules.clone()).apply(loaded, &mut target);

    if let Some(out_path) = &config.out_path {
        write_bundle(&target, out_path).await?;
        info!("Wrote rendered containers to {}", out_path.display());
    }

    Ok((report, target))
}

/// Writes container id → `{ children, attributes }` as pretty JSON.
pub async fn write_bundle(target: &MemoryTarget, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(&target.to_bundle())?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
