//! Input normalization
//!
//! The key list is the append/backspace-only log of what the user typed.
//! Keys are normalized as they arrive so that splitting the list on the
//! separator always yields the calculator's tokens:
//! - `*`, `x`, `X` become `×` and `:` becomes `/`
//! - characters outside the calculator alphabet are dropped
//! - a separator is inserted where a number and an operator (or two
//!   operators) would otherwise touch
//! - repeated or leading separators are dropped
//! - `.` is only accepted straight after a digit

use crate::lexer::{split_words, Operator, SEPARATOR};
use std::fmt;
use tracing::trace;

/// A single keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
}

impl Key {
    /// Map a keyboard key name to a key ("Backspace", "7", "+", ...)
    ///
    /// Multi-character names other than "Backspace" (Shift, Enter, ...)
    /// have no meaning to the calculator.
    pub fn from_name(name: &str) -> Option<Key> {
        if name == "Backspace" {
            return Some(Key::Backspace);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Key::from(c)),
            _ => None,
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        match c {
            '\u{8}' | '\u{7f}' => Key::Backspace,
            c => Key::Char(c),
        }
    }
}

/// Map visually distinct synonyms onto the canonical glyphs
fn canonical(c: char) -> char {
    match c {
        '*' | 'x' | 'X' => '×',
        ':' => '/',
        '\u{2212}' => '-',
        other => other,
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == SEPARATOR || Operator::is_glyph(c)
}

/// Part of a number literal (a trailing `.` still belongs to its number)
fn is_numeric(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// The normalized key log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyList {
    keys: Vec<char>,
}

impl KeyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one keystroke. Returns true when the list changed.
    pub fn add_key(&mut self, key: Key) -> bool {
        let key = match key {
            Key::Backspace => return self.keys.pop().is_some(),
            Key::Char(c) => canonical(c),
        };

        if !is_allowed(key) {
            trace!(?key, "ignoring key outside the calculator alphabet");
            return false;
        }

        let previous = self.keys.last().copied();

        if key == SEPARATOR && matches!(previous, None | Some(SEPARATOR)) {
            return false;
        }
        if key == '.' && !previous.is_some_and(|p| p.is_ascii_digit()) {
            return false;
        }

        let previous_is_number = previous.is_some_and(is_numeric);
        let previous_is_operator = previous.is_some_and(Operator::is_glyph);
        let key_is_number = key.is_ascii_digit();
        let key_is_operator = Operator::is_glyph(key);

        // A '-' followed by a digit stays glued: that is a negative literal
        if (previous_is_number && key_is_operator)
            || (previous_is_operator && key_is_operator)
            || (previous_is_operator && previous != Some('-') && key_is_number)
        {
            self.keys.push(SEPARATOR);
        }
        self.keys.push(key);
        true
    }

    /// Feed every character of `text` through [`KeyList::add_key`]
    pub fn push_str(&mut self, text: &str) {
        for c in text.chars() {
            self.add_key(Key::from(c));
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Freeze the list into its token words
    pub fn tokens(&self) -> Vec<String> {
        split_words(&self.to_clipboard_string())
    }

    /// Plain concatenation of the keys, the format used for copy
    pub fn to_clipboard_string(&self) -> String {
        self.keys.iter().collect()
    }
}

impl fmt::Display for KeyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.keys {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
