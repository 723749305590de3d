//! Static content records shown as cards.

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// One project or research entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Icon class name, e.g. `fas fa-brain`.
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub description: String,
    /// Headline figure such as "94% accuracy".
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub supervisor: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// All card content for the page, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentStore {
    #[serde(default)]
    pub projects: Vec<Record>,
    #[serde(default)]
    pub research: Vec<Record>,
}

impl ContentStore {
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let store: Self = serde_json::from_str(json)?;
        store.validate()?;
        Ok(store)
    }

    fn validate(&self) -> Result<(), ContentError> {
        for (section, records) in [("projects", &self.projects), ("research", &self.research)] {
            if let Some(index) = records.iter().position(|r| r.title.trim().is_empty()) {
                return Err(ContentError::MissingTitle { section, index });
            }
        }
        Ok(())
    }
}
