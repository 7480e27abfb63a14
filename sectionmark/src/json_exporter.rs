//! JSON exporter for parse results
//!
//! The content store keeps parse results as JSON documents and the page
//! renderer reads them back. This module owns both directions so the wire
//! shape is defined in one place.

use crate::content_model::{NavigationEntry, ParsedContent};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during JSON export or loading
#[derive(Error, Debug)]
pub enum JsonExportError {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error for {path}: {source}", path = .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn serialize<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, JsonExportError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Serialize a parse result
///
/// # Parameters
/// * `parsed` - The parse result to serialize
/// * `pretty` - Indent the output
///
/// # Returns
/// * `Ok(String)` - JSON text
/// * `Err(JsonExportError)` - Serialization failed
pub fn to_json(parsed: &ParsedContent, pretty: bool) -> Result<String, JsonExportError> {
    serialize(parsed, pretty)
}

/// Serialize navigation entries
pub fn navigation_to_json(
    entries: &[NavigationEntry],
    pretty: bool,
) -> Result<String, JsonExportError> {
    serialize(&entries, pretty)
}

/// Write a parse result to a file, creating parent directories as needed
///
/// # Parameters
/// * `parsed` - The parse result to export
/// * `output_path` - Path where the JSON file will be written
/// * `pretty` - Indent the output
///
/// # Returns
/// * `Ok(())` - Successfully written
/// * `Err(JsonExportError)` - Error during serialization or writing
pub fn write_json(
    parsed: &ParsedContent,
    output_path: &Path,
    pretty: bool,
) -> Result<(), JsonExportError> {
    let json = to_json(parsed, pretty)?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|source| JsonExportError::IoError {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(output_path, json).map_err(|source| JsonExportError::IoError {
        path: output_path.to_path_buf(),
        source,
    })?;

    log::debug!("Wrote {}", output_path.display());
    Ok(())
}

/// Load a parse result previously written by this module
///
/// Rejects unknown section types and malformed section ids.
pub fn from_json(json: &str) -> Result<ParsedContent, JsonExportError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and load a parse result from a file
pub fn read_json(path: &Path) -> Result<ParsedContent, JsonExportError> {
    let json = fs::read_to_string(path).map_err(|source| JsonExportError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&json)
}
