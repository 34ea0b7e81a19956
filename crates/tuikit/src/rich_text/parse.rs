//! Color markup: `{color:text}`, nestable, with `\` quoting the next
//! character. Braces that don't form a group are kept as literal text.

use super::{RichText, Span};

const MAX_COLOR_NAME: usize = 9;

struct Parser {
    chars: Vec<char>,
    i: usize,
}

impl Parser {
    /// Text up to the next unquoted brace, with quoting removed. When
    /// `quoting` is set the first character is taken literally.
    fn next_text(&mut self, mut quoting: bool) -> Option<String> {
        let start = self.i;
        while self.i < self.chars.len() && (quoting || !matches!(self.chars[self.i], '{' | '}')) {
            quoting = !quoting && self.chars[self.i] == '\\';
            self.i += 1;
        }
        if start == self.i {
            return None;
        }
        Some(unquote(&self.chars[start..self.i]))
    }

    /// The name in a `{name:` opener at the cursor, consuming it
    fn next_color(&mut self) -> Option<String> {
        let start = self.i;
        let mut end = start + 1;
        while end < self.chars.len()
            && end - start <= MAX_COLOR_NAME
            && self.chars[end].is_ascii_alphanumeric()
        {
            end += 1;
        }
        if end == start + 1 || self.chars.get(end) != Some(&':') {
            return None;
        }
        self.i = end + 1;
        Some(self.chars[start + 1..end].iter().collect())
    }
}

fn unquote(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut iter = chars.iter().peekable();
    while let Some(&c) = iter.next() {
        match (c, iter.peek()) {
            ('\\', Some(&&next)) => {
                out.push(next);
                iter.next();
            }
            _ => out.push(c),
        }
    }
    out
}

pub(super) fn parse(markup: &str, default_color: &str) -> RichText {
    let mut parser = Parser {
        chars: markup.chars().collect(),
        i: 0,
    };
    let mut spans: Vec<Span> = Vec::new();
    // enclosing groups: their color and the spans collected before them
    let mut stack: Vec<(String, Vec<Span>)> = Vec::new();

    let close = |stack: &mut Vec<(String, Vec<Span>)>, spans: &mut Vec<Span>| {
        if let Some((color, outer)) = stack.pop() {
            let inner = std::mem::replace(spans, outer);
            spans.push(Span::Nested(RichText::new(color, inner)));
        }
    };

    let mut quoting = false;
    while parser.i < parser.chars.len() {
        if let Some(text) = parser.next_text(quoting) {
            spans.push(Span::Text(text));
        }
        quoting = false;
        match parser.chars.get(parser.i).copied() {
            None => {}
            Some('}') if stack.is_empty() => quoting = true,
            Some('}') => {
                close(&mut stack, &mut spans);
                parser.i += 1;
            }
            Some(_) => match parser.next_color() {
                Some(color) => stack.push((color, std::mem::take(&mut spans))),
                None => quoting = true,
            },
        }
    }

    // unclosed groups end with the text
    while !stack.is_empty() {
        close(&mut stack, &mut spans);
    }

    // a lone group keeps its own color
    if let [Span::Nested(_)] = spans.as_slice() {
        if let Some(Span::Nested(only)) = spans.pop() {
            return only;
        }
    }
    RichText::new(default_color, spans)
}

#[cfg(test)]
mod tests {
    use super::super::RichText;

    fn round(markup: &str) -> String {
        RichText::parse(markup, "777").to_string()
    }

    #[test]
    fn test_plain_and_groups() {
        assert_eq!(round("days of abandon"), "{777:days of abandon}");
        assert_eq!(round("days {blue:of} abandon"), "{777:days {blue:of} abandon}");
        assert_eq!(round("days {blue:of} a{red:band}on"), "{777:days {blue:of} a{red:band}on}");
        assert_eq!(round("days {blue:{red:of} aband}on"), "{777:days {blue:{red:of} aband}on}");
    }

    #[test]
    fn test_quoting_and_spurious_braces() {
        assert_eq!(round("days \\{blue:of} abandon"), "{777:days \\{blue:of\\} abandon}");
        assert_eq!(round("days {of} abandon"), "{777:days \\{of\\} abandon}");
        assert_eq!(round("days {of abandon"), "{777:days \\{of abandon}");
        assert_eq!(round("days }of abandon"), "{777:days \\}of abandon}");
        assert_eq!(round("}}}}"), "{777:\\}\\}\\}\\}}");
        assert_eq!(round("hello {{name}}"), "{777:hello \\{\\{name\\}\\}}");
    }

    #[test]
    fn test_unclosed_groups_close_at_end() {
        assert_eq!(round("days {blue:of abandon"), "{777:days {blue:of abandon}}");
        assert_eq!(
            round("{888:days {blue:of a{red:band{green:on"),
            "{888:days {blue:of a{red:band{green:on}}}}"
        );
    }

    #[test]
    fn test_single_group_drops_default_color() {
        assert_eq!(round("{888:days of abandon}"), "{888:days of abandon}");
        assert_eq!(round("{888:days of aband}on"), "{777:{888:days of aband}on}");
        assert_eq!(
            round("{888:days {blue:of} a{red:band}}on"),
            "{777:{888:days {blue:of} a{red:band}}on}"
        );
    }

    #[test]
    fn test_long_names_are_not_colors() {
        assert_eq!(round("{abcdefghijk:x}"), "{777:\\{abcdefghijk:x\\}}");
        assert_eq!(RichText::parse("", "777").len(), 0);
    }
}
