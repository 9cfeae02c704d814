use serde::{Deserialize, Deserializer};

use crate::error::LoadError;

/// The lab's `data.json` document, limited to the fields the site consumes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabDocument {
    pub pi_name: String,
    pub research_pillars: Vec<ResearchPillar>,
    pub publications: Vec<Publication>,
    pub events: Vec<LabEvent>,
    pub team: Team,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
}

impl LabDocument {
    pub fn from_json(body: &str) -> Result<Self, LoadError> {
        serde_json::from_str(body).map_err(Into::into)
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, LoadError> {
        serde_json::from_slice(body).map_err(Into::into)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchPillar {
    /// Trusted inline SVG markup, rendered verbatim.
    pub icon_svg: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub title: String,
    pub authors: Vec<String>,
    pub journal: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabEvent {
    #[serde(deserialize_with = "string_or_number")]
    pub day: String,
    pub month: String,
    pub title: String,
    pub description: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub principal_investigator: PrincipalInvestigator,
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalInvestigator {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub image_url: String,
    pub bio_url: String,
    #[serde(default)]
    pub scholar_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub scholar_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub address: Vec<String>,
    pub email: String,
}

/// Profile links shared by the PI card and member cards.
pub trait ProfileLinks {
    fn scholar_url(&self) -> Option<&str>;
    fn github_url(&self) -> Option<&str>;
}

impl ProfileLinks for PrincipalInvestigator {
    fn scholar_url(&self) -> Option<&str> {
        non_empty(self.scholar_url.as_deref())
    }

    fn github_url(&self) -> Option<&str> {
        non_empty(self.github_url.as_deref())
    }
}

impl ProfileLinks for TeamMember {
    fn scholar_url(&self) -> Option<&str> {
        non_empty(self.scholar_url.as_deref())
    }

    fn github_url(&self) -> Option<&str> {
        non_empty(self.github_url.as_deref())
    }
}

// Empty strings in data.json mean "no link", same as an absent key.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|url| !url.trim().is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Day {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Day::deserialize(deserializer)? {
        Day::Text(text) => text,
        Day::Number(number) => display_number(&number),
    })
}

// `f64` display drops a zero fraction, so `10.0` shows as "10".
fn display_number(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() => format!("{value}"),
        _ => number.to_string(),
    }
}
