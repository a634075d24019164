//! Glossary click → visual module highlight
//!
//! Clicking an annotated term scrolls the page to the matching visual,
//! flashes it, and pulses the embedded frame. The page does the DOM work;
//! this builds the command it follows.

use super::VisualTagId;
use serde::{Deserialize, Serialize};

/// Message posted into the embedded frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightMessage {
    pub action: String,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightCommand {
    pub element_id: String,
    pub message: HighlightMessage,
}

impl HighlightCommand {
    pub fn for_tag(tag: VisualTagId) -> Self {
        Self {
            element_id: tag.highlight_anchor().to_string(),
            message: HighlightMessage {
                action: "pulse".to_string(),
                term: tag.as_str().to_string(),
            },
        }
    }
}
