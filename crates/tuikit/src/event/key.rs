//! Key events as widgets see them
//!
//! Widgets only care about a handful of key kinds plus Control and Shift.
//! Hosts reading the terminal through crossterm can convert its events with
//! [`Key::from_crossterm`] or `Key::try_from`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::ops::{BitOr, BitOrAssign};

/// The semantic kind of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// A printable character, carried in [`Key::ch`]
    Normal,
    Backspace,
    Delete,
    Tab,
    Return,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Escape,
    PageUp,
    PageDown,
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const CONTROL: Self = Self(1 << 0);
    pub const SHIFT: Self = Self(1 << 1);

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A decoded key press
#[derive(Debug, Clone, Copy, Eq)]
pub struct Key {
    pub kind: KeyType,
    pub modifiers: Modifiers,
    /// The character, for [`KeyType::Normal`]
    pub ch: Option<char>,
}

impl Key {
    /// A non-character key with no modifiers
    pub const fn new(kind: KeyType) -> Self {
        Self {
            kind,
            modifiers: Modifiers::NONE,
            ch: None,
        }
    }

    /// A printable character
    pub const fn normal(ch: char) -> Self {
        Self {
            kind: KeyType::Normal,
            modifiers: Modifiers::NONE,
            ch: Some(ch),
        }
    }

    /// Control plus a character
    pub const fn ctrl(ch: char) -> Self {
        Self::normal(ch).with_modifiers(Modifiers::CONTROL)
    }

    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_plain(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn is_ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CONTROL)
    }

    pub fn is_shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Convert a crossterm key event; key releases and keys with no
    /// counterpart here (function keys, media keys...) give `None`
    pub fn from_crossterm(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let mut modifiers = Modifiers::NONE;
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            modifiers |= Modifiers::CONTROL;
        }
        if event.modifiers.contains(KeyModifiers::SHIFT) {
            modifiers |= Modifiers::SHIFT;
        }
        let key = match event.code {
            KeyCode::Char(c) => {
                // shifted letters already arrive upper-cased
                if !modifiers.contains(Modifiers::CONTROL) {
                    modifiers = Modifiers::NONE;
                }
                Key::normal(c)
            }
            KeyCode::Backspace => Key::new(KeyType::Backspace),
            KeyCode::Delete => Key::new(KeyType::Delete),
            KeyCode::Tab => Key::new(KeyType::Tab),
            KeyCode::BackTab => {
                modifiers |= Modifiers::SHIFT;
                Key::new(KeyType::Tab)
            }
            KeyCode::Enter => Key::new(KeyType::Return),
            KeyCode::Left => Key::new(KeyType::Left),
            KeyCode::Right => Key::new(KeyType::Right),
            KeyCode::Up => Key::new(KeyType::Up),
            KeyCode::Down => Key::new(KeyType::Down),
            KeyCode::Home => Key::new(KeyType::Home),
            KeyCode::End => Key::new(KeyType::End),
            KeyCode::Esc => Key::new(KeyType::Escape),
            KeyCode::PageUp => Key::new(KeyType::PageUp),
            KeyCode::PageDown => Key::new(KeyType::PageDown),
            _ => return None,
        };
        Some(key.with_modifiers(modifiers))
    }
}

impl PartialEq for Key {
    /// Control-letters compare case-insensitively, since terminals disagree
    /// on whether Ctrl-A arrives as `a` or `A`.
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind || self.modifiers != other.modifiers {
            return false;
        }
        match (self.ch, other.ch) {
            (Some(a), Some(b)) if self.is_ctrl() => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        }
    }
}

impl TryFrom<KeyEvent> for Key {
    type Error = KeyEvent;

    fn try_from(event: KeyEvent) -> Result<Self, Self::Error> {
        Key::from_crossterm(&event).ok_or(event)
    }
}
