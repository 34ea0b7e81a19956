//! Terminal colors and the color names used in markup and config

use crossterm::style::Color as CrosstermColor;

/// Terminal color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Color {
    /// Terminal default
    #[default]
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Grey,
    /// 24-bit color
    Rgb(u8, u8, u8),
    /// ANSI 256-color palette index
    Indexed(u8),
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// Parse a hex color: `"f00"`, `"#ccc"`, `"ff0000"` or `"#ff0000"`.
    ///
    /// Three-digit forms expand each digit (`"7"` → `0x77`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
                Some(Self::Rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::Rgb(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => None,
        }
    }

    /// Parse a color name as used in rich-text markup and configuration.
    ///
    /// Names are checked before hex so that `"red"` is never read as digits.
    pub fn parse(name: &str) -> Option<Self> {
        let named = match name.to_ascii_lowercase().as_str() {
            "default" | "reset" => Some(Self::Reset),
            "black" => Some(Self::Black),
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            "blue" => Some(Self::Blue),
            "magenta" => Some(Self::Magenta),
            "cyan" => Some(Self::Cyan),
            "white" => Some(Self::White),
            "gray" | "grey" => Some(Self::Grey),
            _ => None,
        };
        named.or_else(|| Self::from_hex(name))
    }

    /// Like [`Color::parse`], falling back to the terminal default
    pub fn parse_or_reset(name: &str) -> Self {
        Self::parse(name).unwrap_or(Self::Reset)
    }
}

impl From<Color> for CrosstermColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Reset => CrosstermColor::Reset,
            Color::Black => CrosstermColor::Black,
            Color::Red => CrosstermColor::Red,
            Color::Green => CrosstermColor::Green,
            Color::Yellow => CrosstermColor::Yellow,
            Color::Blue => CrosstermColor::Blue,
            Color::Magenta => CrosstermColor::Magenta,
            Color::Cyan => CrosstermColor::Cyan,
            Color::White => CrosstermColor::White,
            Color::Grey => CrosstermColor::Grey,
            Color::Rgb(r, g, b) => CrosstermColor::Rgb { r, g, b },
            Color::Indexed(i) => CrosstermColor::AnsiValue(i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(Color::from_hex("777"), Some(Color::Rgb(0x77, 0x77, 0x77)));
        assert_eq!(Color::from_hex("#ccc"), Some(Color::Rgb(0xcc, 0xcc, 0xcc)));
        assert_eq!(Color::from_hex("invalid"), None);
        assert_eq!(Color::from_hex("12"), None);
    }

    #[test]
    fn test_color_parse_names() {
        assert_eq!(Color::parse("blue"), Some(Color::Blue));
        assert_eq!(Color::parse("White"), Some(Color::White));
        assert_eq!(Color::parse("default"), Some(Color::Reset));
        assert_eq!(Color::parse("f00"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(Color::parse("mars"), None);
        assert_eq!(Color::parse_or_reset("mars"), Color::Reset);
    }

    #[test]
    fn test_color_to_crossterm() {
        let c: CrosstermColor = Color::Rgb(1, 2, 3).into();
        assert_eq!(c, CrosstermColor::Rgb { r: 1, g: 2, b: 3 });
    }
}
