use color_eyre::Result;
use lab_site::{RenderReport, StepOutcome};
use std::io::Write;

use crate::config::AppConfig;

#[derive(Debug, serde::Serialize)]
pub struct RenderSummary {
    pub data_path: String,
    pub author_match: &'static str,
    pub rendered: usize,
    pub load_error: Option<String>,
    pub sections: Vec<SectionSummary>,
}

#[derive(Debug, serde::Serialize)]
pub struct SectionSummary {
    pub container: &'static str,
    pub label: &'static str,
    pub status: &'static str,
    pub entries: Option<usize>,
    pub message: Option<String>,
}

pub fn build_summary(config: &AppConfig, report: &RenderReport) -> RenderSummary {
    let sections = report
        .steps
        .iter()
        .map(|(section, outcome)| {
            let (status, entries, message) = match outcome {
                StepOutcome::Rendered { entries } => ("rendered", Some(*entries), None),
                StepOutcome::MissingContainer => ("missing container", None, None),
                StepOutcome::MissingData => ("no data", None, None),
                StepOutcome::Failed { message } => ("failed", None, Some(message.clone())),
                StepOutcome::NotLoaded => ("fallback message", None, None),
            };
            SectionSummary {
                container: section.container_id(),
                label: section.label(),
                status,
                entries,
                message,
            }
        })
        .collect();

    RenderSummary {
        data_path: config.data_path.display().to_string(),
        author_match: config.rules.author_match.as_str(),
        rendered: report.rendered_count(),
        load_error: report.load_error.clone(),
        sections,
    }
}

pub fn write_text(summary: &RenderSummary, out: &mut impl Write) -> Result<()> {
    writeln!(out, "\nLab Site Render")?;
    writeln!(out, "===============")?;
    writeln!(out, "Data: {}", summary.data_path)?;
    writeln!(out, "Author match: {}", summary.author_match)?;

    if let Some(error) = &summary.load_error {
        writeln!(out, "Load failed: {error}")?;
    }

    writeln!(out, "\nSections:")?;
    for section in &summary.sections {
        let detail = match (&section.entries, &section.message) {
            (Some(entries), _) => format!(" ({entries})"),
            (None, Some(message)) => format!(": {message}"),
            (None, None) => String::new(),
        };
        writeln!(
            out,
            "- {} #{}: {}{detail}",
            section.label, section.container, section.status
        )?;
    }

    writeln!(out, "\nRendered {} of {} sections", summary.rendered, summary.sections.len())?;
    Ok(())
}

pub fn write_json(summary: &RenderSummary, out: &mut impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    writeln!(out, "{json}")?;
    Ok(())
}
