//! Cursor over the lines of a markdown document

/// Read position into a sequence of lines
///
/// The scanner looks at the line under the cursor, may peek further ahead,
/// and then advances by however many lines the matching rule consumed.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> LineCursor<'a> {
    /// Split `text` on `\n` and place the cursor on the first line
    ///
    /// An empty input has no lines at all. A trailing `\r` is kept on each
    /// line; rules that need it trim the line before matching.
    pub fn new(text: &'a str) -> Self {
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').collect()
        };

        Self { lines, position: 0 }
    }

    /// The line under the cursor, or `None` past the end
    pub fn current(&self) -> Option<&'a str> {
        self.peek(0)
    }

    /// The line `offset` lines after the cursor
    pub fn peek(&self, offset: usize) -> Option<&'a str> {
        self.lines.get(self.position + offset).copied()
    }

    /// Move forward by `count` lines
    pub fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.lines.len());
    }

    /// Whether every line has been consumed
    pub fn is_at_end(&self) -> bool {
        self.position >= self.lines.len()
    }
}
