//! Per-day article payloads

use serde::{Deserialize, Serialize};

/// One entry in an article's "further reading" list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub body: String,
}

/// The content shown behind one door of the calendar.
///
/// Built once when the day's source is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPayload {
    pub title: String,
    pub lead: String,
    /// Pre-rendered HTML
    pub body: String,
    pub resources: Vec<Resource>,
}

impl ContentPayload {
    pub fn new(
        title: impl Into<String>,
        lead: impl Into<String>,
        body: impl Into<String>,
        resources: Vec<Resource>,
    ) -> Self {
        Self {
            title: title.into(),
            lead: lead.into(),
            body: body.into(),
            resources,
        }
    }
}
