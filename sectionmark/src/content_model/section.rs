//! Typed content sections
//!
//! A section is one classified block of parsed markdown. Each section carries
//! an identifier plus exactly one [`SectionKind`] variant, so fields that only
//! make sense for one block type (a heading level, list items, an image source)
//! cannot appear on any other.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Prefix used when rendering a [`SectionId`] as text
const ID_PREFIX: &str = "section-";

/// Identifier of a section within one parse result
///
/// Ids count up from 1 in emission order and are rendered as `section-<n>`.
/// They are only unique within the result that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SectionId(u32);

impl SectionId {
    /// Create an id from its sequence number
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// The sequence number (1 for the first emitted section)
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ID_PREFIX, self.0)
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.to_string()
    }
}

/// Error returned when a string is not a valid section id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid section id '{0}': expected 'section-<number>'")]
pub struct InvalidSectionId(pub String);

impl TryFrom<String> for SectionId {
    type Error = InvalidSectionId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .strip_prefix(ID_PREFIX)
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .map(SectionId)
            .ok_or(InvalidSectionId(value))
    }
}

impl std::str::FromStr for SectionId {
    type Err = InvalidSectionId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

/// Block-level content of a section
///
/// Serialized with an internal `type` tag so the JSON form reads
/// `{"type": "heading", "level": 2, "content": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectionKind {
    /// A heading line (`#` to `######`)
    Heading {
        /// Heading level, the number of leading `#` characters (1-6)
        level: u8,
        /// Heading text with surrounding whitespace removed
        content: String,
    },

    /// A run of plain lines between block boundaries
    Paragraph {
        /// Newline-joined lines, trimmed as a whole
        content: String,
    },

    /// Consecutive list lines of one list type
    List {
        /// Item text with the marker removed, in document order
        items: Vec<String>,
        /// `true` for `1.` style markers, `false` for `-`, `*` or `+`
        ordered: bool,
    },

    /// A line consisting solely of `![alt](src)`
    Image {
        /// Image location as written
        src: String,
        /// Alternative text
        alt: String,
        /// Text of a `*caption*` line directly below the image
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },

    /// A fenced code block
    Code {
        /// Lines between the fences, verbatim and newline-joined
        content: String,
        /// Tag after the opening fence, `plaintext` when absent
        language: String,
    },

    /// Consecutive `>` lines
    Blockquote {
        /// Quote lines with the marker stripped, newline-joined
        content: String,
    },

    /// A horizontal rule (`---`, `***` or `___`)
    Separator,
}

impl SectionKind {
    /// The tag for this variant
    pub fn section_type(&self) -> SectionType {
        match self {
            Self::Heading { .. } => SectionType::Heading,
            Self::Paragraph { .. } => SectionType::Paragraph,
            Self::List { .. } => SectionType::List,
            Self::Image { .. } => SectionType::Image,
            Self::Code { .. } => SectionType::Code,
            Self::Blockquote { .. } => SectionType::Blockquote,
            Self::Separator => SectionType::Separator,
        }
    }

    /// Textual payload for the variants that have one
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Heading { content, .. }
            | Self::Paragraph { content }
            | Self::Code { content, .. }
            | Self::Blockquote { content } => Some(content),
            Self::List { .. } | Self::Image { .. } | Self::Separator => None,
        }
    }
}

/// Tag identifying a [`SectionKind`] variant without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Heading,
    Paragraph,
    List,
    Image,
    Code,
    Blockquote,
    Separator,
}

impl SectionType {
    /// Every section type, in declaration order
    pub const ALL: [SectionType; 7] = [
        SectionType::Heading,
        SectionType::Paragraph,
        SectionType::List,
        SectionType::Image,
        SectionType::Code,
        SectionType::Blockquote,
        SectionType::Separator,
    ];

    /// Lowercase tag as used in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Heading => "heading",
            SectionType::Paragraph => "paragraph",
            SectionType::List => "list",
            SectionType::Image => "image",
            SectionType::Code => "code",
            SectionType::Blockquote => "blockquote",
            SectionType::Separator => "separator",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One classified block of parsed markdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    /// Identifier unique within the parse result
    pub id: SectionId,

    /// Block content
    #[serde(flatten)]
    pub kind: SectionKind,
}

impl ContentSection {
    /// Create a section
    pub fn new(id: SectionId, kind: SectionKind) -> Self {
        Self { id, kind }
    }

    /// Tag of this section's variant
    pub fn section_type(&self) -> SectionType {
        self.kind.section_type()
    }
}
