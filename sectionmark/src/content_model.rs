//! Content model produced by parsing markdown
//!
//! This module defines the parse result handed to the content store and the
//! page renderer: an ordered list of typed sections plus summary metadata,
//! along with the queries both collaborators run over it.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Submodules
mod line_cursor;
mod navigation;
mod parser;
mod patterns;
mod section;

// Re-export public types
pub use navigation::{extract_navigation, NavigationEntry, NAVIGATION_LEVEL};
pub use parser::{MarkdownParser, ParseOptions};
pub use section::{ContentSection, InvalidSectionId, SectionId, SectionKind, SectionType};

/// Summary figures computed while parsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    /// Whitespace-delimited tokens across paragraph sections only
    pub word_count: usize,

    /// Whether any section is an image
    pub has_images: bool,

    /// Text of every heading, all levels, in document order
    pub headings: Vec<String>,
}

/// Result of parsing one markdown document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContent {
    /// Sections in document order
    pub sections: Vec<ContentSection>,

    /// Figures derived from the sections
    pub metadata: ContentMetadata,
}

impl ParsedContent {
    /// Build a result from sections assembled elsewhere, deriving the metadata
    ///
    /// The metadata follows the same rules the parser applies, so a result
    /// built here from parser output equals the parser's own result.
    pub fn from_sections(sections: Vec<ContentSection>) -> Self {
        let word_count = sections
            .iter()
            .filter_map(|section| match &section.kind {
                SectionKind::Paragraph { content } => Some(content.split_whitespace().count()),
                _ => None,
            })
            .sum();

        let has_images = sections
            .iter()
            .any(|section| section.section_type() == SectionType::Image);

        let headings = sections
            .iter()
            .filter_map(|section| match &section.kind {
                SectionKind::Heading { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect();

        Self {
            sections,
            metadata: ContentMetadata {
                word_count,
                has_images,
                headings,
            },
        }
    }

    /// Whether the document produced no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by id
    pub fn section(&self, id: SectionId) -> Option<&ContentSection> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Number of sections of each type present
    pub fn section_type_counts(&self) -> BTreeMap<SectionType, usize> {
        self.sections
            .iter()
            .map(ContentSection::section_type)
            .counts()
            .into_iter()
            .collect()
    }
}

/// Parse markdown with default options
///
/// # Parameters
/// * `markdown` - Raw markdown text
///
/// # Returns
/// * `ParsedContent` - Sections and metadata. Never fails.
pub fn parse(markdown: &str) -> ParsedContent {
    MarkdownParser::default().parse(markdown)
}

/// Parse markdown with explicit options
pub fn parse_with_options(markdown: &str, options: &ParseOptions) -> ParsedContent {
    MarkdownParser::new(*options).parse(markdown)
}

/// Sections of one type, in document order
///
/// # Parameters
/// * `parsed` - Output of a previous parse
/// * `section_type` - Type to keep
///
/// # Returns
/// * `Vec<&ContentSection>` - Matching sections, order preserved
pub fn find_sections_by_type(
    parsed: &ParsedContent,
    section_type: SectionType,
) -> Vec<&ContentSection> {
    parsed
        .sections
        .iter()
        .filter(|section| section.section_type() == section_type)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSE_PAGE: &str = r#"# Rust for Beginners

An eight week course on systems programming.

## What you will learn

- Ownership and borrowing
- Traits and generics
- Error handling

![Classroom](classroom.jpg)
*Our teaching space*

## Schedule

1. Week one
2. Week two

```rust
fn main() {}
```

> Best course I have taken.

---

Enrol today."#;

    #[test]
    fn test_parse_empty_input() {
        let parsed = parse("");

        assert!(parsed.is_empty());
        assert_eq!(parsed.metadata, ContentMetadata::default());
        assert_eq!(parsed, ParsedContent::default());
    }

    #[test]
    fn test_parse_whitespace_only() {
        let parsed = parse("   \n\n\t\n");

        assert!(parsed.is_empty());
        assert_eq!(parsed.metadata.word_count, 0);
    }

    #[test]
    fn test_course_page_section_order() {
        // Arrange: A representative page
        let markdown = COURSE_PAGE;

        // Act: Parse the page
        let parsed = parse(markdown);

        // Assert: Section types follow document order
        let types: Vec<SectionType> = parsed
            .sections
            .iter()
            .map(ContentSection::section_type)
            .collect();
        assert_eq!(
            types,
            vec![
                SectionType::Heading,
                SectionType::Paragraph,
                SectionType::Heading,
                SectionType::List,
                SectionType::Image,
                SectionType::Heading,
                SectionType::List,
                SectionType::Code,
                SectionType::Blockquote,
                SectionType::Separator,
                SectionType::Paragraph,
            ]
        );
        assert_eq!(
            parsed.metadata.headings,
            vec!["Rust for Beginners", "What you will learn", "Schedule"]
        );
        assert_eq!(parsed.metadata.word_count, 9);
        assert!(parsed.metadata.has_images);
    }

    #[test]
    fn test_find_sections_by_type_preserves_order() {
        let parsed = parse(COURSE_PAGE);

        let lists = find_sections_by_type(&parsed, SectionType::List);

        assert_eq!(lists.len(), 2);
        assert!(lists[0].id < lists[1].id);
        assert!(matches!(
            lists[1].kind,
            SectionKind::List { ordered: true, .. }
        ));
    }

    #[test]
    fn test_find_sections_by_type_none_present() {
        let parsed = parse("plain");
        assert!(find_sections_by_type(&parsed, SectionType::Image).is_empty());
    }

    #[test]
    fn test_from_sections_matches_parser_metadata() {
        let parsed = parse(COURSE_PAGE);

        let rebuilt = ParsedContent::from_sections(parsed.sections.clone());

        assert_eq!(rebuilt, parsed);
    }

    #[test]
    fn test_section_lookup_by_id() {
        let parsed = parse("# A\n\nB");

        let section = parsed.section(SectionId::new(2)).unwrap();

        assert_eq!(section.kind.content(), Some("B"));
        assert!(parsed.section(SectionId::new(3)).is_none());
    }

    #[test]
    fn test_section_type_counts() {
        let parsed = parse(COURSE_PAGE);

        let counts = parsed.section_type_counts();

        assert_eq!(counts.get(&SectionType::Heading), Some(&3));
        assert_eq!(counts.get(&SectionType::List), Some(&2));
        assert_eq!(counts.get(&SectionType::Separator), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), parsed.sections.len());
    }

    #[test]
    fn test_parse_with_options_default_matches_parse() {
        let options = ParseOptions::default();
        assert_eq!(parse_with_options(COURSE_PAGE, &options), parse(COURSE_PAGE));
    }
}
