//! Text made of differently-colored segments
//!
//! A [`RichText`] is a color plus a list of spans, each either plain text or
//! another `RichText`. Rendering walks the tree and each span is drawn in
//! the color of its nearest enclosing node. Values are immutable: `split`,
//! `slice`, `append` and `wrap` all return new values.
//!
//! All positions are counted in characters.

mod parse;

use crate::buffer::Region;
use crate::style::Color;
use std::collections::HashMap;
use std::fmt;

/// One segment of a [`RichText`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Nested(RichText),
}

impl Span {
    pub fn len(&self) -> usize {
        match self {
            Span::Text(s) => s.chars().count(),
            Span::Nested(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn split(&self, n: usize) -> (Span, Span) {
        match self {
            Span::Text(s) => {
                let at = byte_offset(s, n);
                (Span::Text(s[..at].to_string()), Span::Text(s[at..].to_string()))
            }
            Span::Nested(r) => {
                let (left, right) = r.split(n);
                (Span::Nested(left), Span::Nested(right))
            }
        }
    }
}

impl From<&str> for Span {
    fn from(s: &str) -> Self {
        Span::Text(s.to_string())
    }
}

impl From<String> for Span {
    fn from(s: String) -> Self {
        Span::Text(s)
    }
}

impl From<RichText> for Span {
    fn from(r: RichText) -> Self {
        Span::Nested(r)
    }
}

/// A string whose segments can each have their own foreground color
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichText {
    color: String,
    spans: Vec<Span>,
}

impl RichText {
    pub fn new(color: impl Into<String>, spans: Vec<Span>) -> Self {
        Self {
            color: color.into(),
            spans,
        }
    }

    /// Plain text in a single color
    pub fn string(color: impl Into<String>, s: impl Into<String>) -> Self {
        Self::new(color, vec![Span::Text(s.into())])
    }

    /// Parse `{color:...}` markup; text outside any group gets
    /// `default_color`
    pub fn parse(markup: &str, default_color: &str) -> Self {
        parse::parse(markup, default_color)
    }

    /// Escape `\`, `{` and `}` so that `s` parses back as plain text
    pub fn quote(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            if matches!(c, '\\' | '{' | '}') {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.iter().map(Span::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The text with all colors dropped
    pub fn plain(&self) -> String {
        let mut out = String::new();
        self.push_plain(&mut out);
        out
    }

    fn push_plain(&self, out: &mut String) {
        for span in &self.spans {
            match span {
                Span::Text(s) => out.push_str(s),
                Span::Nested(r) => r.push_plain(out),
            }
        }
    }

    /// `(span index, offset inside that span)` for position `n`. The very
    /// end maps to the end of the last span.
    fn find_index(&self, n: usize) -> Option<(usize, usize)> {
        let mut sum = 0;
        for (i, span) in self.spans.iter().enumerate() {
            let len = span.len();
            if n < sum + len {
                return Some((i, n - sum));
            }
            sum += len;
        }
        if n == sum && !self.spans.is_empty() {
            let last = self.spans.len() - 1;
            return Some((last, self.spans[last].len()));
        }
        None
    }

    /// The character at `n`, if any
    pub fn at(&self, n: usize) -> Option<char> {
        let (index, offset) = self.find_index(n)?;
        match &self.spans[index] {
            Span::Text(s) => s.chars().nth(offset),
            Span::Nested(r) => r.at(offset),
        }
    }

    /// A new value with `other` added at the end, in its own color
    pub fn append(&self, other: RichText) -> RichText {
        let mut spans = self.spans.clone();
        spans.push(Span::Nested(other));
        RichText::new(self.color.clone(), spans)
    }

    /// Split into the first `n` characters and the rest. Past the end the
    /// right side is empty.
    pub fn split(&self, n: usize) -> (RichText, RichText) {
        let Some((index, offset)) = self.find_index(n) else {
            return (self.clone(), RichText::string(self.color.clone(), ""));
        };
        let (left, right) = self.spans[index].split(offset);
        let mut left_spans: Vec<Span> = self.spans[..index].to_vec();
        let mut right_spans: Vec<Span> = Vec::with_capacity(self.spans.len() - index);
        if !left.is_empty() {
            left_spans.push(left);
        }
        if !right.is_empty() {
            right_spans.push(right);
        }
        right_spans.extend_from_slice(&self.spans[index + 1..]);
        (
            RichText::new(self.color.clone(), left_spans),
            RichText::new(self.color.clone(), right_spans),
        )
    }

    /// The characters in `start..end`, clamped to the text
    pub fn slice(&self, start: usize, end: usize) -> RichText {
        let end = end.min(self.len());
        if start > end {
            return RichText::string(self.color.clone(), "");
        }
        let (head, _) = self.split(end);
        head.split(start).1
    }

    /// Where to break a line so it fits in `width` columns: one past the
    /// last space or hyphen at or before `width`. Text that already fits
    /// gives `width`; text with no break point gives `None`.
    pub fn find_word_wrap(&self, width: usize) -> Option<usize> {
        let chars: Vec<char> = self.plain().chars().collect();
        word_break(&chars, width)
    }

    /// Break into lines of at most `width` characters, at word boundaries
    /// when `word_wrap` is set. Always returns at least one line.
    pub fn wrap(&self, width: usize, word_wrap: bool) -> Vec<RichText> {
        let width = width.max(1);
        let mut lines = Vec::new();
        let mut text = self.clone();
        while text.len() > width {
            let at = if word_wrap {
                text.find_word_wrap(width).unwrap_or(width)
            } else {
                width
            };
            let (left, right) = text.split(at);
            lines.push(left);
            text = right;
        }
        if !text.is_empty() || lines.is_empty() {
            lines.push(text);
        }
        lines
    }

    /// Draw at the region's pen. Color names are looked up in `aliases`
    /// first; the name `default` means `default_color` (or the pen's current
    /// color when there is none).
    pub fn render(
        &self,
        region: &mut Region<'_>,
        aliases: &HashMap<String, String>,
        default_color: Option<&str>,
    ) {
        let name = aliases.get(&self.color).map(String::as_str).unwrap_or(&self.color);
        let name = if name == "default" { default_color } else { Some(name) };
        for span in &self.spans {
            if let Some(name) = name {
                region.color(Color::parse_or_reset(name));
            }
            match span {
                Span::Text(s) => {
                    region.write(s);
                }
                Span::Nested(r) => r.render(region, aliases, default_color),
            }
        }
    }
}

/// Plain text drawn in whatever color the pen already has
impl From<&str> for RichText {
    fn from(s: &str) -> Self {
        RichText::string("default", s)
    }
}

impl From<String> for RichText {
    fn from(s: String) -> Self {
        RichText::string("default", s)
    }
}

impl fmt::Display for RichText {
    /// Markup that parses back into the same value
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}:", self.color)?;
        for span in &self.spans {
            match span {
                Span::Text(s) => f.write_str(&RichText::quote(s))?,
                Span::Nested(r) => write!(f, "{}", r)?,
            }
        }
        f.write_str("}")
    }
}

/// Wrap a log line at `width`, breaking at word boundaries
pub fn wrap_text(text: &RichText, width: usize) -> Vec<RichText> {
    text.wrap(width, true)
}

/// Right-justify `s` in `len` columns. Longer strings are returned whole.
pub fn lpad(s: &str, len: usize) -> String {
    format!("{:>len$}", s, len = len)
}

/// Break point for `chars` in `width` columns, by the same rule as
/// [`RichText::find_word_wrap`]
pub(crate) fn word_break(chars: &[char], width: usize) -> Option<usize> {
    if width >= chars.len() {
        return Some(width);
    }
    (0..=width)
        .rev()
        .find(|&i| chars[i] == '-' || chars[i].is_whitespace())
        .map(|i| i + 1)
}

fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}
