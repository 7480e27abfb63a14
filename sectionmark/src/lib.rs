//! sectionmark - markdown content to typed sections
//!
//! Converts author-written markdown (course pages, essays, project write-ups)
//! into an ordered list of typed content sections with summary metadata,
//! ready to be stored as JSON and rendered by a page template.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::enum_variant_names)]

pub mod cli;
pub mod content_config;
pub mod content_model;
pub mod json_exporter;
pub mod pipeline;

pub use content_model::{
    extract_navigation, find_sections_by_type, parse, parse_with_options, ContentMetadata,
    ContentSection, NavigationEntry, ParseOptions, ParsedContent, SectionId, SectionKind,
    SectionType,
};
