//! Front-matter parsing

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::Resource;

/// Front-matter could not be read
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front-matter is missing its closing '---'")]
    Unterminated,
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Front-matter of a day's article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub lead: Option<String>,
    pub resources: Vec<Resource>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if !is_delimiter(content.lines().next()) {
            return Ok((FrontMatter::default(), content));
        }

        // Skip the opening --- line
        let rest = match content.find('\n') {
            Some(pos) => &content[pos + 1..],
            None => return Err(FrontMatterError::Unterminated),
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if is_delimiter(Some(line)) {
                let yaml_content = &rest[..offset];
                let remaining = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);

                if yaml_content.trim().is_empty() {
                    return Ok((FrontMatter::default(), remaining));
                }

                let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
                return Ok((fm, remaining));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }

    /// The lead paragraph with runs of whitespace collapsed
    pub fn normalized_lead(&self) -> String {
        self.lead
            .as_deref()
            .map(collapse_whitespace)
            .unwrap_or_default()
    }
}

fn is_delimiter(line: Option<&str>) -> bool {
    matches!(line, Some(l) if l.trim_end() == "---")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
