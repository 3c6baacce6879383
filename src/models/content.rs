//! Page content shared by every composition.
//!
//! The compositions only rearrange this data; they never own copies of it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A case study shown in the project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Case study title
    pub title: String,
    /// One or two sentence summary
    pub summary: String,
    /// Short topic tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// All content the site renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    /// Consultant name shown in navigation and hero
    pub owner_name: String,
    /// Role line under the name
    pub headline: String,
    /// Hero tagline
    pub tagline: String,
    /// Short biography
    pub bio: String,
    /// Direct address used as the contact fallback
    pub contact_email: String,
    /// Case studies
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Skill list
    #[serde(default)]
    pub skills: Vec<String>,
    /// Freelance availability pitch
    pub freelance_pitch: String,
    /// Service offerings listed under the pitch
    #[serde(default)]
    pub services: Vec<String>,
}

impl SiteContent {
    /// Loads the content bundled with the binary.
    ///
    /// # Errors
    /// Returns an error if the embedded JSON cannot be parsed.
    pub fn load_embedded() -> Result<Self> {
        let json_data = include_str!("../data/content.json");
        let content: Self =
            serde_json::from_str(json_data).context("Failed to parse embedded site content")?;
        Ok(content)
    }

    /// Loads content from a JSON file on disk.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .context(format!("Failed to read content file: {}", path.display()))?;
        serde_json::from_str(&data)
            .context(format!("Failed to parse content file: {}", path.display()))
    }

    /// Loads content from `path` when given, otherwise the embedded copy.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_embedded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_embedded() {
        let content = SiteContent::load_embedded().expect("embedded content should parse");
        assert!(!content.owner_name.is_empty());
        assert!(content.contact_email.contains('@'));
        assert!(!content.projects.is_empty());
        assert!(!content.skills.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("content.json");
        fs::write(
            &path,
            r#"{
                "owner_name": "Sam",
                "headline": "Consultant",
                "tagline": "t",
                "bio": "b",
                "contact_email": "sam@example.org",
                "freelance_pitch": "p"
            }"#,
        )
        .unwrap();

        let content = SiteContent::load(Some(&path)).unwrap();
        assert_eq!(content.owner_name, "Sam");
        assert!(content.projects.is_empty());
        assert!(content.services.is_empty());
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = SiteContent::load_from(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read content file"));
    }
}
