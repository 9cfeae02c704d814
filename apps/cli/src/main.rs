use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use lab_site_cli::cli::CliArgs;
use lab_site_cli::config::init_app_config;
use lab_site_cli::{logging, render, summary};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = match init_app_config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", CliArgs::help_text());
            return Err(error);
        }
    };
    logging::init_tracing(config.debug);

    let (report, _) = render::render_site(&config).await?;
    let summary = summary::build_summary(&config, &report);

    let mut stdout = std::io::stdout().lock();
    if args.json {
        summary::write_json(&summary, &mut stdout)?;
    } else {
        summary::write_text(&summary, &mut stdout)?;
    }

    if let Some(error) = &report.load_error {
        return Err(eyre!("Failed to load lab data: {error}"));
    }
    if report.has_failures() {
        return Err(eyre!("One or more sections failed to render"));
    }

    Ok(())
}
