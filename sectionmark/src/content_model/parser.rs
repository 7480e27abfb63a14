//! Line scanner that converts markdown into content sections
//!
//! The scan makes one left-to-right pass over the input lines. Each line is
//! tested against the block rules in priority order; a rule that matches may
//! claim further lines below it (a caption, list continuation, quote lines)
//! and reports how many it took so the driver can advance the cursor.

use super::line_cursor::LineCursor;
use super::patterns;
use super::section::{ContentSection, SectionId, SectionKind};
use super::{ContentMetadata, ParsedContent};

/// Language recorded for fences without a tag
const DEFAULT_LANGUAGE: &str = "plaintext";

/// Options controlling edge-case behaviour of the scanner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Emit a code block that is still open at end of input
    ///
    /// When `false` (the default) an unterminated fence and every line after
    /// it are dropped from the output.
    pub flush_unterminated_code: bool,
}

/// Markdown to sections parser
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser {
    options: ParseOptions,
}

/// A block rule that matched at the cursor
#[derive(Debug, PartialEq)]
struct RuleMatch {
    /// Section produced by the rule
    kind: SectionKind,
    /// Lines taken after the current one
    consumed: usize,
}

impl RuleMatch {
    fn single(kind: SectionKind) -> Self {
        Self { kind, consumed: 0 }
    }
}

/// A fenced code block that has been opened but not yet closed
#[derive(Debug)]
struct OpenCodeBlock<'a> {
    language: String,
    lines: Vec<&'a str>,
}

/// Running totals threaded through the scan
#[derive(Debug, Default)]
struct ScanState<'a> {
    /// Sections emitted so far
    sections: Vec<ContentSection>,
    /// Number of sections emitted, used for the next id
    emitted: u32,
    /// Whitespace tokens across all paragraphs
    word_count: usize,
    /// Heading texts in document order
    headings: Vec<String>,
    /// Unclassified lines forming the pending paragraph
    pending: Vec<&'a str>,
    /// Code block currently being collected
    code: Option<OpenCodeBlock<'a>>,
}

impl<'a> ScanState<'a> {
    /// Append a section with the next id
    fn emit(&mut self, kind: SectionKind) {
        match &kind {
            SectionKind::Heading { content, .. } => self.headings.push(content.clone()),
            SectionKind::Paragraph { content } => {
                self.word_count += content.split_whitespace().count();
            }
            _ => {}
        }

        self.emitted += 1;
        self.sections
            .push(ContentSection::new(SectionId::new(self.emitted), kind));
    }

    /// Turn the pending lines into a paragraph, dropping blank buffers
    fn flush_paragraph(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let text = self.pending.join("\n");
        self.pending.clear();

        let content = text.trim();
        if content.is_empty() {
            return;
        }

        self.emit(SectionKind::Paragraph {
            content: content.to_string(),
        });
    }

    /// Open a code block, or close the one in progress
    fn toggle_fence(&mut self, trimmed: &str) {
        match self.code.take() {
            Some(block) => self.emit(code_section(block)),
            None => {
                self.flush_paragraph();
                self.code = Some(OpenCodeBlock {
                    language: patterns::fence_language(trimmed).to_string(),
                    lines: Vec::new(),
                });
            }
        }
    }

    /// Flush what is left at end of input and assemble the result
    fn finish(mut self, options: &ParseOptions) -> ParsedContent {
        self.flush_paragraph();

        if let Some(block) = self.code.take() {
            if options.flush_unterminated_code {
                self.emit(code_section(block));
            } else {
                log::warn!(
                    "Dropping unterminated code block ({} lines, language '{}')",
                    block.lines.len(),
                    block.language
                );
            }
        }

        let has_images = self
            .sections
            .iter()
            .any(|section| matches!(section.kind, SectionKind::Image { .. }));

        ParsedContent {
            sections: self.sections,
            metadata: ContentMetadata {
                word_count: self.word_count,
                has_images,
                headings: self.headings,
            },
        }
    }
}

fn code_section(block: OpenCodeBlock<'_>) -> SectionKind {
    let language = if block.language.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        block.language
    };

    SectionKind::Code {
        content: block.lines.join("\n"),
        language,
    }
}

impl MarkdownParser {
    /// Create a parser with the given options
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse markdown into sections and metadata
    ///
    /// # Parameters
    /// * `markdown` - Raw markdown text
    ///
    /// # Returns
    /// * `ParsedContent` - Sections in document order plus summary metadata.
    ///   Parsing never fails; text no rule recognises becomes paragraph content.
    pub fn parse(&self, markdown: &str) -> ParsedContent {
        let mut cursor = LineCursor::new(markdown);
        let mut state = ScanState::default();

        while !cursor.is_at_end() {
            let taken = step(&mut state, &cursor);
            cursor.advance(taken);
        }

        let parsed = state.finish(&self.options);
        log::debug!(
            "Parsed {} sections ({} words)",
            parsed.sections.len(),
            parsed.metadata.word_count
        );
        parsed
    }
}

/// Process the line under the cursor, returning how many lines were used
fn step<'a>(state: &mut ScanState<'a>, cursor: &LineCursor<'a>) -> usize {
    let Some(line) = cursor.current() else {
        return 1;
    };
    let trimmed = line.trim();

    if patterns::is_fence(trimmed) {
        state.toggle_fence(trimmed);
        return 1;
    }

    if let Some(block) = state.code.as_mut() {
        block.lines.push(line);
        return 1;
    }

    if let Some(matched) = match_block(line, trimmed, cursor) {
        state.flush_paragraph();
        state.emit(matched.kind);
        return 1 + matched.consumed;
    }

    if trimmed.is_empty() {
        state.flush_paragraph();
    } else {
        state.pending.push(line);
    }

    1
}

/// Try each block rule in priority order
///
/// Headings and images must start at the first column, so those rules keep
/// leading whitespace; the others see the fully trimmed line.
fn match_block(line: &str, trimmed: &str, cursor: &LineCursor<'_>) -> Option<RuleMatch> {
    let right_trimmed = line.trim_end();

    match_rule(trimmed)
        .or_else(|| match_heading(right_trimmed))
        .or_else(|| match_image(right_trimmed, cursor))
        .or_else(|| match_blockquote(trimmed, cursor))
        .or_else(|| match_unordered_list(trimmed, cursor))
        .or_else(|| match_ordered_list(trimmed, cursor))
}

fn match_rule(trimmed: &str) -> Option<RuleMatch> {
    patterns::is_rule(trimmed).then(|| RuleMatch::single(SectionKind::Separator))
}

fn match_heading(line: &str) -> Option<RuleMatch> {
    let (level, text) = patterns::heading(line)?;
    Some(RuleMatch::single(SectionKind::Heading {
        level,
        content: text.to_string(),
    }))
}

/// Image line, taking the next line as its caption when it is `*text*`
fn match_image(line: &str, cursor: &LineCursor<'_>) -> Option<RuleMatch> {
    let (alt, src) = patterns::image(line)?;
    let caption = cursor
        .peek(1)
        .and_then(|next| patterns::caption(next.trim_end()))
        .map(str::to_string);
    let consumed = usize::from(caption.is_some());

    Some(RuleMatch {
        kind: SectionKind::Image {
            src: src.to_string(),
            alt: alt.to_string(),
            caption,
        },
        consumed,
    })
}

fn match_blockquote(trimmed: &str, cursor: &LineCursor<'_>) -> Option<RuleMatch> {
    if !patterns::is_blockquote(trimmed) {
        return None;
    }

    let mut lines = vec![patterns::blockquote_text(trimmed)];
    while let Some(next) = cursor.peek(lines.len()).map(str::trim) {
        if !patterns::is_blockquote(next) {
            break;
        }
        lines.push(patterns::blockquote_text(next));
    }

    Some(RuleMatch {
        consumed: lines.len() - 1,
        kind: SectionKind::Blockquote {
            content: lines.join("\n"),
        },
    })
}

fn match_unordered_list(trimmed: &str, cursor: &LineCursor<'_>) -> Option<RuleMatch> {
    collect_list(trimmed, cursor, patterns::unordered_item, false)
}

fn match_ordered_list(trimmed: &str, cursor: &LineCursor<'_>) -> Option<RuleMatch> {
    collect_list(trimmed, cursor, patterns::ordered_item, true)
}

/// Gather consecutive lines accepted by `item` into one list
fn collect_list(
    trimmed: &str,
    cursor: &LineCursor<'_>,
    item: fn(&str) -> Option<&str>,
    ordered: bool,
) -> Option<RuleMatch> {
    let first = item(trimmed)?;

    let mut items = vec![first.to_string()];
    while let Some(next) = cursor.peek(items.len()).and_then(|line| item(line.trim())) {
        items.push(next.to_string());
    }

    Some(RuleMatch {
        consumed: items.len() - 1,
        kind: SectionKind::List { items, ordered },
    })
}
