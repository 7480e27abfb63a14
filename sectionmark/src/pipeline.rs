//! Batch content pipeline
//!
//! Processes a directory tree of markdown content in two stages:
//! 1. **Parsing**: discover source files and parse each into sections
//! 2. **Export**: write one JSON result per source into an output tree

use crate::content_config::ContentConfig;
use crate::content_model::{MarkdownParser, ParsedContent};
use crate::json_exporter::{self, JsonExportError};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Errors that can occur while running the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Content root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to walk {}: {source}", .path.display())]
    WalkError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to export {}: {source}", .path.display())]
    ExportError {
        path: PathBuf,
        #[source]
        source: JsonExportError,
    },
}

/// A parsed source file
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSource {
    /// Path relative to the content root
    pub path: PathBuf,

    /// Parse result for the file
    pub content: ParsedContent,
}

/// Totals across a set of parsed sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSummary {
    /// Number of source files
    pub files: usize,
    /// Sections across all files
    pub sections: usize,
    /// Paragraph words across all files
    pub words: usize,
    /// Files containing at least one image
    pub files_with_images: usize,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Find all markdown sources under a content root
///
/// # Parameters
/// * `root` - Directory to search
/// * `config` - Supplies the accepted file extensions
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - Absolute source paths, sorted
/// * `Err(PipelineError)` - Root is not a directory or the walk failed
pub fn discover_sources(root: &Path, config: &ContentConfig) -> Result<Vec<PathBuf>, PipelineError> {
    if !root.is_dir() {
        return Err(PipelineError::NotADirectory(root.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry.map_err(|source| PipelineError::WalkError {
            path: root.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() && config.is_source(entry.path()) {
            log::debug!("Discovered {}", entry.path().display());
            paths.push(entry.into_path());
        }
    }

    Ok(paths.into_iter().sorted().collect())
}

/// Stage 1: Parse every source under a content root
///
/// # Parameters
/// * `root` - Content root directory
/// * `config` - Discovery and parser settings
///
/// # Returns
/// * `Ok(Vec<ParsedSource>)` - One entry per source, sorted by relative path
/// * `Err(PipelineError)` - Discovery failed or a file could not be read
pub fn parse_sources(root: &Path, config: &ContentConfig) -> Result<Vec<ParsedSource>, PipelineError> {
    let paths = discover_sources(root, config)?;
    log::info!("Parsing {} source files from {}", paths.len(), root.display());

    let parser = MarkdownParser::new(config.parse_options());

    // Parse markdown files (optionally in parallel)
    #[cfg(feature = "parallel")]
    let sources: Result<Vec<_>, _> = paths
        .par_iter()
        .map(|path| parse_source_file(path, root, &parser))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let sources: Result<Vec<_>, _> = paths
        .iter()
        .map(|path| parse_source_file(path, root, &parser))
        .collect();

    let mut sources = sources?;
    sources.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(sources)
}

/// Parse a single markdown file
fn parse_source_file(
    path: &Path,
    root: &Path,
    parser: &MarkdownParser,
) -> Result<ParsedSource, PipelineError> {
    let markdown = std::fs::read_to_string(path).map_err(|source| PipelineError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    let relative_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();

    Ok(ParsedSource {
        path: relative_path,
        content: parser.parse(&markdown),
    })
}

/// Output location for a source's JSON result
pub fn output_path(source: &Path, out_dir: &Path, config: &ContentConfig) -> PathBuf {
    out_dir
        .join(source)
        .with_extension(config.output.extension.as_str())
}

/// Stage 2: Write each parsed source as JSON under `out_dir`
///
/// The relative directory layout of the sources is kept.
///
/// # Returns
/// * `Ok(usize)` - Number of files written
/// * `Err(PipelineError)` - A file could not be written
pub fn export_sources(
    sources: &[ParsedSource],
    out_dir: &Path,
    config: &ContentConfig,
) -> Result<usize, PipelineError> {
    log::info!("Writing {} results to {}", sources.len(), out_dir.display());

    for source in sources {
        let path = output_path(&source.path, out_dir, config);
        json_exporter::write_json(&source.content, &path, config.output.pretty)
            .map_err(|e| PipelineError::ExportError { path, source: e })?;
    }

    Ok(sources.len())
}

/// Aggregate totals over parsed sources
pub fn summarize(sources: &[ParsedSource]) -> ContentSummary {
    sources
        .iter()
        .fold(ContentSummary::default(), |mut summary, source| {
            summary.files += 1;
            summary.sections += source.content.sections.len();
            summary.words += source.content.metadata.word_count;
            if source.content.metadata.has_images {
                summary.files_with_images += 1;
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_discover_filters_extension_and_hidden() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "courses/rust.md", "# Rust");
        write(dir.path(), "essays/why.markdown", "Why");
        write(dir.path(), "data/prices.csv", "a,b");
        write(dir.path(), ".drafts/secret.md", "# Hidden");

        let paths = discover_sources(dir.path(), &ContentConfig::default()).unwrap();

        let relative: Vec<PathBuf> = paths
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("courses/rust.md"),
                PathBuf::from("essays/why.markdown")
            ]
        );
    }

    #[test]
    fn test_discover_rejects_file_root() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "page.md", "x");

        let result = discover_sources(&dir.path().join("page.md"), &ContentConfig::default());

        assert!(matches!(result, Err(PipelineError::NotADirectory(_))));
    }

    #[test]
    fn test_parse_sources_sorted_relative() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.md", "# B\n\nbody text");
        write(dir.path(), "a.md", "## A");

        let sources = parse_sources(dir.path(), &ContentConfig::default()).unwrap();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].path, PathBuf::from("a.md"));
        assert_eq!(sources[1].path, PathBuf::from("b.md"));
        assert_eq!(sources[1].content.metadata.word_count, 2);
    }

    #[test]
    fn test_parse_sources_uses_parser_settings() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "open.md", "```py\nprint(1)");
        let mut config = ContentConfig::default();

        let dropped = parse_sources(dir.path(), &config).unwrap();
        config.parser.flush_unterminated_code = true;
        let flushed = parse_sources(dir.path(), &config).unwrap();

        assert!(dropped[0].content.is_empty());
        assert_eq!(flushed[0].content.sections.len(), 1);
    }

    #[test]
    fn test_export_mirrors_layout() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(dir.path(), "courses/rust.md", "# Rust");
        let config = ContentConfig::default();

        let sources = parse_sources(dir.path(), &config).unwrap();
        let written = export_sources(&sources, out.path(), &config).unwrap();

        assert_eq!(written, 1);
        let result = json_exporter::read_json(&out.path().join("courses/rust.json")).unwrap();
        assert_eq!(result, sources[0].content);
    }

    #[test]
    fn test_output_path_uses_configured_extension() {
        let mut config = ContentConfig::default();
        config.output.extension = "sections.json".to_string();

        let path = output_path(Path::new("essays/why.md"), Path::new("out"), &config);

        assert_eq!(path, PathBuf::from("out/essays/why.sections.json"));
    }

    #[test]
    fn test_summarize_totals() {
        let sources = vec![
            ParsedSource {
                path: PathBuf::from("a.md"),
                content: crate::content_model::parse("one two\n\n![x](y.png)"),
            },
            ParsedSource {
                path: PathBuf::from("b.md"),
                content: crate::content_model::parse("# H\n\nthree"),
            },
        ];

        let summary = summarize(&sources);

        assert_eq!(
            summary,
            ContentSummary {
                files: 2,
                sections: 4,
                words: 3,
                files_with_images: 1,
            }
        );
    }
}
