//! Page navigation derived from level-2 headings

use super::section::{SectionId, SectionKind};
use super::ParsedContent;
use serde::{Deserialize, Serialize};

/// Heading level that produces navigation entries
pub const NAVIGATION_LEVEL: u8 = 2;

/// Label used for a heading with no text
const FALLBACK_LABEL: &str = "Section";

/// One entry of a page's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// Id of the heading section the entry points at
    pub id: SectionId,
    /// Text shown for the entry
    pub label: String,
    /// Heading level (always [`NAVIGATION_LEVEL`])
    pub level: u8,
}

/// Build navigation entries from the level-2 headings of a parse result
///
/// # Parameters
/// * `parsed` - Output of a previous parse; nothing is re-parsed
///
/// # Returns
/// * `Vec<NavigationEntry>` - One entry per level-2 heading, in document order
pub fn extract_navigation(parsed: &ParsedContent) -> Vec<NavigationEntry> {
    parsed
        .sections
        .iter()
        .filter_map(|section| match &section.kind {
            SectionKind::Heading { level, content } if *level == NAVIGATION_LEVEL => {
                let label = if content.is_empty() {
                    FALLBACK_LABEL.to_string()
                } else {
                    content.clone()
                };
                Some(NavigationEntry {
                    id: section.id,
                    label,
                    level: *level,
                })
            }
            _ => None,
        })
        .collect()
}
