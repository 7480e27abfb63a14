//! Line patterns recognised by the scanner
//!
//! Heading, image and caption matchers take a line with only trailing
//! whitespace removed and must match from its first column; every other
//! matcher takes a fully trimmed line.

use regex::Regex;
use std::sync::OnceLock;

/// Opening and closing delimiter of a code block
const FENCE: &str = "```";

/// Horizontal rule spellings
const RULES: [&str; 3] = ["---", "***", "___"];

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("line pattern is a valid regex"))
}

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, r"^(#{1,6})\s+(.+)$")
}

fn image_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, r"^!\[([^\]]*)\]\(([^)]+)\)$")
}

fn caption_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, r"^\*([^*]+)\*$")
}

fn unordered_item_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, r"^[-*+]\s+(.+)$")
}

fn ordered_item_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, r"^[0-9]+\.\s+(.+)$")
}

/// Whether the line opens or closes a code block
pub fn is_fence(line: &str) -> bool {
    line.starts_with(FENCE)
}

/// Language tag following an opening fence, empty when absent
pub fn fence_language(line: &str) -> &str {
    line.strip_prefix(FENCE).unwrap_or_default().trim()
}

/// Whether the line is a horizontal rule
pub fn is_rule(line: &str) -> bool {
    RULES.contains(&line)
}

/// Heading level and text
pub fn heading(line: &str) -> Option<(u8, &str)> {
    let caps = heading_regex().captures(line)?;
    let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
    Some((level, caps.get(2)?.as_str().trim()))
}

/// Alt text and source of a line that is exactly one image
pub fn image(line: &str) -> Option<(&str, &str)> {
    let caps = image_regex().captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Caption text of a line that is exactly one `*emphasis*` span
pub fn caption(line: &str) -> Option<&str> {
    let caps = caption_regex().captures(line)?;
    Some(caps.get(1)?.as_str())
}

/// Whether the line begins a blockquote
pub fn is_blockquote(line: &str) -> bool {
    line.starts_with('>')
}

/// Quote text with one leading `>` removed
pub fn blockquote_text(line: &str) -> &str {
    line.strip_prefix('>').unwrap_or(line).trim()
}

/// Item text of a `-`, `*` or `+` list line
pub fn unordered_item(line: &str) -> Option<&str> {
    let caps = unordered_item_regex().captures(line)?;
    Some(caps.get(1)?.as_str())
}

/// Item text of a `1.` style list line
pub fn ordered_item(line: &str) -> Option<&str> {
    let caps = ordered_item_regex().captures(line)?;
    Some(caps.get(1)?.as_str())
}
