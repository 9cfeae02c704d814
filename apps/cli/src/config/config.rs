use color_eyre::eyre::eyre;
use dotenv::dotenv;
use lab_site::rules::{AuthorMatch, RenderRules};
use std::env;
use std::path::{Path, PathBuf};

/// Settings for one offline render, resolved from the environment and `.env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub out_path: Option<PathBuf>,
    pub rules: RenderRules,
    pub debug: bool,
}

/// Initializes the application configuration from `.env` and the process environment
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_dir = env::current_dir()?;
    AppConfig::from_lookup(&base_dir, |key| env::var(key).ok())
}

impl AppConfig {
    /// Builds the configuration from `lookup`, resolving relative paths against `base_dir`.
    ///
    /// Keys: `LAB_DATA_PATH` (default `data.json`), `LAB_OUT_PATH`, `LAB_AUTHOR_MATCH`,
    /// `LAB_PLACEHOLDER`, `LAB_HONORIFIC`, `LAB_JOIN_CARD_CLASS`, `DEBUG`.
    pub fn from_lookup(
        base_dir: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> color_eyre::eyre::Result<Self> {
        let data_name = lookup("LAB_DATA_PATH").unwrap_or_else(|| "data.json".to_string());
        let data_path = base_dir.join(data_name);
        let out_path = lookup("LAB_OUT_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(|path| base_dir.join(path));

        let mut rules = RenderRules::default();
        if let Some(value) = lookup("LAB_AUTHOR_MATCH") {
            rules.author_match = AuthorMatch::parse(&value).ok_or_else(|| {
                eyre!("Unknown author match rule: {value} (expected substring or exact)")
            })?;
        }
        if let Some(placeholder) = lookup("LAB_PLACEHOLDER") {
            rules.placeholder = placeholder;
        }
        if let Some(honorific) = lookup("LAB_HONORIFIC") {
            rules.honorific = honorific;
        }
        if let Some(class) =
            lookup("LAB_JOIN_CARD_CLASS").filter(|class| !class.trim().is_empty())
        {
            rules.join_card_class = class;
        }

        let debug = lookup("DEBUG").is_some_and(|value| matches!(value.as_str(), "1" | "true"));

        Ok(Self {
            data_path,
            out_path,
            rules,
            debug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> color_eyre::eyre::Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        AppConfig::from_lookup(Path::new("/srv/lab"), |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() -> color_eyre::eyre::Result<()> {
        let config = config_from(&[])?;
        assert_eq!(config.data_path, PathBuf::from("/srv/lab/data.json"));
        assert_eq!(config.out_path, None);
        assert_eq!(config.rules, RenderRules::default());
        assert!(!config.debug);
        Ok(())
    }

    #[test]
    fn environment_overrides_rules_and_paths() -> color_eyre::eyre::Result<()> {
        let config = config_from(&[
            ("LAB_DATA_PATH", "public/data.json"),
            ("LAB_OUT_PATH", "dist/bundle.json"),
            ("LAB_AUTHOR_MATCH", "exact"),
            ("LAB_HONORIFIC", "Prof."),
            ("DEBUG", "1"),
        ])?;
        assert_eq!(config.data_path, PathBuf::from("/srv/lab/public/data.json"));
        assert_eq!(
            config.out_path,
            Some(PathBuf::from("/srv/lab/dist/bundle.json"))
        );
        assert_eq!(config.rules.author_match, AuthorMatch::Exact);
        assert_eq!(config.rules.honorific, "Prof.");
        assert!(config.debug);
        Ok(())
    }

    #[test]
    fn absolute_data_path_is_kept() -> color_eyre::eyre::Result<()> {
        let config = config_from(&[("LAB_DATA_PATH", "/data/lab.json")])?;
        assert_eq!(config.data_path, PathBuf::from("/data/lab.json"));
        Ok(())
    }

    #[test]
    fn unknown_author_rule_is_an_error() {
        let error = config_from(&[("LAB_AUTHOR_MATCH", "fuzzy")]);
        assert!(error.is_err());
    }
}
