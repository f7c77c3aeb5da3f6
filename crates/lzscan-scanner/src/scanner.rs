//! Text scanner with position, line and column tracking.
//!
//! Positions are byte offsets into the UTF-8 source and always sit on a char
//! boundary. Lines and columns are zero-based; columns count chars.
//!
//! Sequential reads keep line and column up to date incrementally. Moving the
//! cursor directly (`set_position`, or `back` across a line start) marks them
//! stale, and the next `line()`/`column()` call replays the source from the
//! start to recompute them, which costs O(position).

use std::cell::Cell;
use std::fmt;

use lzscan_core::{LineBreakOptions, ScannerConfig};

use crate::error::{Result, ScanError};

/// Line and column reached by replaying `source[start..end]` from `(line, column)`.
///
/// `\r\n`, a lone `\r` and a lone `\n` each count as one line break. A `\r\n`
/// pair is counted on its `\n`, so a position between the two is still on
/// the line of the `\r`.
fn replay(source: &str, start: usize, end: usize, mut line: usize, mut column: usize) -> (usize, usize) {
    for (i, c) in source[start..end].char_indices() {
        match c {
            '\r' if source[start + i + 1..].starts_with('\n') => column += 1,
            '\r' | '\n' => {
                line += 1;
                column = 0;
            }
            _ => column += 1,
        }
    }
    (line, column)
}

#[derive(Debug, Clone)]
pub struct Scanner {
    source: String,
    line_breaks: LineBreakOptions,
    position: usize,
    line: Cell<usize>,
    column: Cell<usize>,
    /// `false` once line/column no longer match `position`.
    accurate: Cell<bool>,
    previous_position: usize,
    previous_line: usize,
    previous_column: usize,
}

impl Scanner {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_options(source, LineBreakOptions::empty())
    }

    pub fn with_options(source: impl Into<String>, line_breaks: LineBreakOptions) -> Self {
        Self {
            source: source.into(),
            line_breaks,
            position: 0,
            line: Cell::new(0),
            column: Cell::new(0),
            accurate: Cell::new(true),
            previous_position: 0,
            previous_line: 0,
            previous_column: 0,
        }
    }

    pub fn with_config(source: impl Into<String>, config: &ScannerConfig) -> Self {
        Self::with_options(source, config.line_breaks)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Unread remainder of the source.
    pub fn left(&self) -> &str {
        &self.source[self.position..]
    }

    pub fn line_breaks(&self) -> LineBreakOptions {
        self.line_breaks
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn is_eof(&self) -> bool {
        self.position >= self.source.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor. Line and column are recomputed lazily on next access.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        self.check_offset(position)?;
        self.position = position;
        self.accurate.set(false);
        Ok(())
    }

    pub fn line(&self) -> usize {
        self.sync();
        self.line.get()
    }

    pub fn column(&self) -> usize {
        self.sync();
        self.column.get()
    }

    pub fn previous_position(&self) -> usize {
        self.previous_position
    }

    pub fn previous_line(&self) -> usize {
        self.previous_line
    }

    pub fn previous_column(&self) -> usize {
        self.previous_column
    }

    /// Whether the whole source (not the unread remainder) starts with `pattern`.
    pub fn starts_with(&self, pattern: &str) -> bool {
        self.source.starts_with(pattern)
    }

    pub fn peek_char(&self) -> Option<char> {
        self.left().chars().next()
    }

    /// Consume one char. `\n`, and a `\r` that ends the source, start a new line.
    ///
    /// A lone `\r` in the middle of the source only advances the column here,
    /// while [`Scanner::line`] after a direct cursor move counts it as a break.
    pub fn read_char(&mut self) -> Option<char> {
        self.mark_previous();
        let c = self.peek_char()?;
        self.position += c.len_utf8();
        if c == '\n' || (c == '\r' && self.is_eof()) {
            self.new_line();
        } else {
            *self.column.get_mut() += 1;
        }
        Some(c)
    }

    /// Step back `count` chars, stopping at the start of the source.
    pub fn back(&mut self, count: usize) {
        for _ in 0..count {
            let Some(c) = self.source[..self.position].chars().next_back() else {
                break;
            };
            self.position -= c.len_utf8();
            if self.accurate.get() {
                let column = self.column.get_mut();
                if *column == 0 {
                    // Crossed into the previous line; its length is unknown here.
                    self.accurate.set(false);
                } else {
                    *column -= 1;
                }
            }
        }
    }

    /// Independent scanner over `length` bytes starting at `start`.
    pub fn substring(&self, start: usize, length: usize) -> Result<Scanner> {
        let end = start.checked_add(length).ok_or(ScanError::OutOfRange {
            position: usize::MAX,
            length: self.len(),
        })?;
        self.check_offset(start)?;
        self.check_offset(end)?;
        Ok(Scanner::with_options(&self.source[start..end], self.line_breaks))
    }

    /// Independent scanner over everything from `start` on.
    pub fn substring_from(&self, start: usize) -> Result<Scanner> {
        self.substring(start, self.len().saturating_sub(start))
    }

    /// Read up to `terminator`, with no escape.
    pub fn read_to(&mut self, terminator: &str, trim_pattern: bool) -> Result<String> {
        self.read_to_escaped(trim_pattern, "", &[terminator])
    }

    /// [`Scanner::read_to_matched`] without reporting the terminator.
    pub fn read_to_escaped(&mut self, trim_pattern: bool, escape: &str, terminators: &[&str]) -> Result<String> {
        self.read_to_matched(trim_pattern, escape, terminators)
            .map(|(text, _)| text)
    }

    /// Read until one of `terminators` is found, returning the text read and
    /// the terminator that stopped the scan (`None` when the source ran out).
    ///
    /// Terminators are tried in order at each position and the first one that
    /// matches wins. With `trim_pattern` the terminator is consumed but left
    /// out of the returned text.
    ///
    /// An empty `escape` disables escaping. Otherwise a terminator or escape
    /// right after `escape` is copied as plain text and scanning goes on; an
    /// escape followed by anything else is copied as is.
    ///
    /// Line breaks copied into the result are rewritten per the scanner's
    /// [`LineBreakOptions`].
    pub fn read_to_matched<'t>(
        &mut self,
        trim_pattern: bool,
        escape: &str,
        terminators: &[&'t str],
    ) -> Result<(String, Option<&'t str>)> {
        if terminators.is_empty() {
            return Err(ScanError::NoTerminators);
        }
        if terminators.iter().any(|t| t.is_empty()) {
            return Err(ScanError::EmptyTerminator);
        }
        if terminators.iter().any(|t| *t == escape) {
            return Err(ScanError::EscapeIsTerminator(escape.to_string()));
        }
        let escape = (!escape.is_empty()).then_some(escape);

        self.mark_previous();
        let mut text = String::new();

        while !self.is_eof() {
            let escaping = match escape {
                Some(esc) if self.left().starts_with(esc) => {
                    self.advance_over(esc);
                    true
                }
                _ => false,
            };

            let left = self.left();
            let matched = terminators.iter().copied().find(|t| left.starts_with(*t));
            if let Some(terminator) = matched {
                self.advance_over(terminator);
                if escaping || !trim_pattern {
                    text.push_str(terminator);
                }
                if !escaping {
                    return Ok((text, Some(terminator)));
                }
                continue;
            }

            if let Some(esc) = escape.filter(|_| escaping) {
                if self.left().starts_with(esc) {
                    self.advance_over(esc);
                }
                text.push_str(esc);
                continue;
            }

            self.append_translated(&mut text);
        }

        Ok((text, None))
    }

    fn check_offset(&self, position: usize) -> Result<()> {
        if position > self.source.len() {
            return Err(ScanError::OutOfRange {
                position,
                length: self.source.len(),
            });
        }
        if !self.source.is_char_boundary(position) {
            return Err(ScanError::NotCharBoundary(position));
        }
        Ok(())
    }

    fn sync(&self) {
        if self.accurate.get() {
            return;
        }
        let (line, column) = replay(&self.source, 0, self.position, 0, 0);
        tracing::trace!(position = self.position, line, column, "recomputed line/column");
        self.line.set(line);
        self.column.set(column);
        self.accurate.set(true);
    }

    fn mark_previous(&mut self) {
        self.sync();
        self.previous_position = self.position;
        self.previous_line = self.line.get();
        self.previous_column = self.column.get();
    }

    fn new_line(&mut self) {
        *self.line.get_mut() += 1;
        *self.column.get_mut() = 0;
    }

    /// Consume `text`, which the caller has checked is next in the source.
    fn advance_over(&mut self, text: &str) {
        self.sync();
        let end = self.position + text.len();
        let (line, column) = replay(&self.source, self.position, end, self.line.get(), self.column.get());
        self.line.set(line);
        self.column.set(column);
        self.position = end;
    }

    /// Consume one char, or a `\r\n` pair, and append it with line breaks translated.
    fn append_translated(&mut self, text: &mut String) {
        let Some(c) = self.peek_char() else {
            return;
        };
        self.position += c.len_utf8();
        match c {
            '\r' if self.peek_char() == Some('\n') => {
                self.position += 1;
                text.push_str(self.line_breaks.translate_crlf());
                self.new_line();
            }
            '\r' => {
                text.push_str(self.line_breaks.translate_cr());
                self.new_line();
            }
            '\n' => {
                text.push_str(self.line_breaks.translate_lf());
                self.new_line();
            }
            _ => {
                text.push(c);
                *self.column.get_mut() += 1;
            }
        }
    }
}

impl fmt::Display for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
