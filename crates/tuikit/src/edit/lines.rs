//! Display lines for multi-line editing
//!
//! The buffer is cut at each linefeed (the linefeed stays on the line it
//! ends) and each piece is wrapped to the wrap width. The piece after the
//! last linefeed is always a line, even when empty, so the cursor has
//! somewhere to sit.

use crate::rich_text::word_break;

/// One display line: `len` characters of the buffer starting at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLine {
    pub start: usize,
    pub len: usize,
}

impl DisplayLine {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Lay `text` out in lines of at most `width` characters
pub fn layout(text: &[char], width: usize, word_wrap: bool) -> Vec<DisplayLine> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut start = 0;
    loop {
        let end = text[start..]
            .iter()
            .position(|&c| c == '\n')
            .map(|i| start + i + 1);
        let piece_end = end.unwrap_or(text.len());
        let mut at = start;
        while piece_end - at > width {
            let piece = &text[at..piece_end];
            let n = if word_wrap {
                word_break(piece, width).unwrap_or(width)
            } else {
                width
            };
            lines.push(DisplayLine { start: at, len: n });
            at += n;
        }
        if at < piece_end || end.is_none() {
            lines.push(DisplayLine {
                start: at,
                len: piece_end - at,
            });
        }
        match end {
            Some(next) => start = next,
            None => break,
        }
    }
    lines
}

/// The display row holding `pos`, and the column inside it. The end of a
/// line belongs to the line that follows it.
pub fn locate(lines: &[DisplayLine], pos: usize) -> (usize, usize) {
    for (row, line) in lines.iter().enumerate() {
        if pos < line.end() {
            return (row, pos.saturating_sub(line.start));
        }
    }
    let row = lines.len().saturating_sub(1);
    let start = lines.get(row).map(|l| l.start).unwrap_or(0);
    (row, pos.saturating_sub(start))
}

/// Where the text on `row` ends. A linefeed or the break character a word
/// wrap cut after stays out; a hard-wrapped row keeps every character.
pub fn line_end(text: &[char], lines: &[DisplayLine], row: usize) -> usize {
    match lines.get(row) {
        Some(line) if row + 1 < lines.len() => {
            let last = line.end().checked_sub(1).and_then(|i| text.get(i));
            match last {
                Some(&c) if line.len > 0 && is_break(c) => line.end() - 1,
                _ => line.end(),
            }
        }
        Some(line) => line.end(),
        None => 0,
    }
}

/// The last position that still draws on `row`
pub fn last_on_row(lines: &[DisplayLine], row: usize) -> usize {
    match lines.get(row) {
        Some(line) if row + 1 < lines.len() => line.end().saturating_sub(1).max(line.start),
        Some(line) => line.end(),
        None => 0,
    }
}

fn is_break(c: char) -> bool {
    c == '\n' || c == '-' || c.is_whitespace()
}
