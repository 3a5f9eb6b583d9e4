#![forbid(unsafe_code)]

//! Fixed-column line wrapping over char offsets.
//!
//! Wrapping produces `(start, len)` spans into the original char stream
//! rather than owned strings, so layout, hit-testing, and selection all
//! share one addressing scheme.
//!
//! Rules:
//! - `columns == 0` or empty text yields a single zero-length span.
//! - `\n`, `\r`, and `\r\n` each end a line and are excluded from spans
//!   (`\r\n` is consumed as one terminator).
//! - Within a logical line, a span flushes when its length reaches
//!   `columns`; the wrap char becomes the first char of the next span.
//!   A wrap opens the next span lazily, so text ending exactly at a
//!   column boundary does not produce a trailing empty row.
//! - A terminator always opens a new line, even an empty trailing one.
//!
//! Round-trip guarantee: rejoining all spans' substrings in row order,
//! with terminators reinserted at their original split points, reproduces
//! the input exactly.

use smallvec::SmallVec;

/// One wrapped line: a char range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// Char offset of the first char of the line.
    pub start: usize,
    /// Line length in chars.
    pub len: usize,
}

impl LineSpan {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Char offset one past the last char of the line.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Wrap `text` at `columns` chars per line.
#[must_use]
pub fn wrap(text: &str, columns: usize) -> SmallVec<[LineSpan; 4]> {
    let mut spans = SmallVec::new();

    if columns == 0 || text.is_empty() {
        spans.push(LineSpan::new(0, 0));
        return spans;
    }

    let mut start = 0usize;
    let mut len = 0usize;
    // False right after a wrap flush: the next line exists only once it
    // receives a char. Terminators always open a line.
    let mut line_open = true;

    let mut chars = text.chars().enumerate().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\n' => {
                // A terminator right after a wrap flush ends the line the
                // flush already emitted; no empty span in between.
                if line_open {
                    spans.push(LineSpan::new(start, len));
                }
                start = i + 1;
                len = 0;
                line_open = true;
            }
            '\r' => {
                if line_open {
                    spans.push(LineSpan::new(start, len));
                }
                // \r\n is one terminator
                if matches!(chars.peek(), Some(&(_, '\n'))) {
                    chars.next();
                    start = i + 2;
                } else {
                    start = i + 1;
                }
                len = 0;
                line_open = true;
            }
            _ => {
                if !line_open {
                    start = i;
                    line_open = true;
                }
                len += 1;
                if len == columns {
                    spans.push(LineSpan::new(start, len));
                    start = i + 1;
                    len = 0;
                    line_open = false;
                }
            }
        }
    }

    if line_open {
        spans.push(LineSpan::new(start, len));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str, columns: usize) -> Vec<(usize, usize)> {
        wrap(text, columns).iter().map(|s| (s.start, s.len)).collect()
    }

    #[test]
    fn empty_text_single_zero_span() {
        assert_eq!(spans("", 10), vec![(0, 0)]);
    }

    #[test]
    fn zero_columns_single_zero_span() {
        assert_eq!(spans("hello", 0), vec![(0, 0)]);
    }

    #[test]
    fn short_line_is_one_span() {
        assert_eq!(spans("hello", 10), vec![(0, 5)]);
    }

    #[test]
    fn wraps_at_column_boundary() {
        assert_eq!(spans("hello world", 5), vec![(0, 5), (5, 5), (10, 1)]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_row() {
        assert_eq!(spans("abcdef", 3), vec![(0, 3), (3, 3)]);
    }

    #[test]
    fn newline_ends_line_and_is_excluded() {
        assert_eq!(spans("ab\ncd", 10), vec![(0, 2), (3, 2)]);
    }

    #[test]
    fn trailing_newline_opens_empty_line() {
        assert_eq!(spans("ab\n", 10), vec![(0, 2), (3, 0)]);
    }

    #[test]
    fn bare_carriage_return_is_a_terminator() {
        assert_eq!(spans("ab\rcd", 10), vec![(0, 2), (3, 2)]);
    }

    #[test]
    fn crlf_is_one_terminator() {
        assert_eq!(spans("ab\r\ncd", 10), vec![(0, 2), (4, 2)]);
    }

    #[test]
    fn lone_newline_is_two_empty_lines() {
        assert_eq!(spans("\n", 10), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn wrap_then_terminator_keeps_one_empty_line() {
        // "abc" flushes at the column boundary; the \n then terminates the
        // (unopened) next line, and the trailing line after it is empty.
        assert_eq!(spans("abc\n", 3), vec![(0, 3), (4, 0)]);
    }

    #[test]
    fn multibyte_chars_count_as_one_column() {
        assert_eq!(spans("héllo", 3), vec![(0, 3), (3, 2)]);
    }

    #[test]
    fn single_column_wraps_every_char() {
        assert_eq!(spans("abc", 1), vec![(0, 1), (1, 1), (2, 1)]);
    }
}
