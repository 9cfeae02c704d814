use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "lab-site", version, about = "Render the lab website data offline")]
pub struct CliArgs {
    /// Path to the lab data document
    #[arg(long, value_name = "PATH")]
    pub data: Option<String>,

    /// Write the rendered containers to this JSON file
    #[arg(long, value_name = "PATH")]
    pub out: Option<String>,

    /// Print the render summary as JSON
    #[arg(long)]
    pub json: bool,

    /// How publication authors are matched against the PI name (substring or exact)
    #[arg(long = "author-match", value_name = "RULE")]
    pub author_match: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.data {
            std::env::set_var("LAB_DATA_PATH", path);
        }
        if let Some(path) = &self.out {
            std::env::set_var("LAB_OUT_PATH", path);
        }
        if let Some(rule) = &self.author_match {
            std::env::set_var("LAB_AUTHOR_MATCH", rule);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = CliArgs::parse_from([
            "lab-site",
            "--data",
            "site/data.json",
            "--out",
            "dist/bundle.json",
            "--json",
            "--author-match",
            "exact",
            "--debug",
        ]);

        assert_eq!(args.data.as_deref(), Some("site/data.json"));
        assert_eq!(args.out.as_deref(), Some("dist/bundle.json"));
        assert_eq!(args.author_match.as_deref(), Some("exact"));
        assert!(args.json);
        assert!(args.debug);
    }

    #[test]
    fn help_mentions_author_rule() {
        assert!(CliArgs::help_text().contains("--author-match"));
    }

    #[test]
    fn command_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }
}
