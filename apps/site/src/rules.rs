use serde::{Deserialize, Serialize};

/// How a publication author is recognised as the PI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorMatch {
    /// The author string contains `piName` anywhere.
    ///
    /// Known limitation: a PI name that is a substring of a co-author's name
    /// ("Lovelace" in "Ada Lovelaceson") also matches. An empty PI name
    /// matches nobody, although every author string contains "".
    #[default]
    Substring,
    /// The author string equals `piName` after trimming.
    Exact,
}

impl AuthorMatch {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::Exact => "exact",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "substring" | "contains" => Some(Self::Substring),
            "exact" | "equals" => Some(Self::Exact),
            _ => None,
        }
    }

    /// An empty PI name never matches, so every author stays plain.
    pub fn matches(self, author: &str, pi_name: &str) -> bool {
        let pi_name = pi_name.trim();
        if pi_name.is_empty() {
            return false;
        }
        match self {
            Self::Substring => author.contains(pi_name),
            Self::Exact => author.trim() == pi_name,
        }
    }
}

/// The business rules applied while rendering a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderRules {
    pub author_match: AuthorMatch,
    /// Token in event descriptions replaced with the PI short name.
    pub placeholder: String,
    /// Prefix of the PI short name, e.g. "Dr." in "Dr. Lovelace".
    pub honorific: String,
    /// Class of the call-to-action card that team members are inserted before.
    pub join_card_class: String,
}

pub const DEFAULT_PLACEHOLDER: &str = "[[PI_NAME]]";
pub const DEFAULT_HONORIFIC: &str = "Dr.";
pub const DEFAULT_JOIN_CARD_CLASS: &str = "bg-blue-50";

impl Default for RenderRules {
    fn default() -> Self {
        Self {
            author_match: AuthorMatch::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            honorific: DEFAULT_HONORIFIC.to_string(),
            join_card_class: DEFAULT_JOIN_CARD_CLASS.to_string(),
        }
    }
}

impl RenderRules {
    #[must_use]
    pub fn with_author_match(mut self, author_match: AuthorMatch) -> Self {
        self.author_match = author_match;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_rule_matches_inside_longer_names() {
        assert!(AuthorMatch::Substring.matches("A. Lovelace", "Lovelace"));
        assert!(AuthorMatch::Substring.matches("Ada Lovelaceson", "Lovelace"));
        assert!(AuthorMatch::Substring.matches("Oliver Twist", "li"));
        assert!(!AuthorMatch::Substring.matches("Oliver Twist", "Li"));
        assert!(!AuthorMatch::Substring.matches("C. Babbage", "Lovelace"));
    }

    #[test]
    fn exact_rule_requires_whole_name() {
        assert!(AuthorMatch::Exact.matches(" Ada Lovelace ", "Ada Lovelace"));
        assert!(!AuthorMatch::Exact.matches("A. Lovelace", "Lovelace"));
    }

    #[test]
    fn empty_pi_name_matches_nobody() {
        assert!(!AuthorMatch::Substring.matches("Anyone", ""));
        assert!(!AuthorMatch::Exact.matches("", "  "));
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(AuthorMatch::parse("Exact"), Some(AuthorMatch::Exact));
        assert_eq!(AuthorMatch::parse("contains"), Some(AuthorMatch::Substring));
        assert_eq!(AuthorMatch::parse("fuzzy"), None);
    }

    #[test]
    fn rules_deserialize_with_defaults() -> Result<(), serde_json::Error> {
        let rules: RenderRules = serde_json::from_str(r#"{ "authorMatch": "exact" }"#)?;
        assert_eq!(rules.author_match, AuthorMatch::Exact);
        assert_eq!(rules.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(rules.join_card_class, DEFAULT_JOIN_CARD_CLASS);
        Ok(())
    }
}
