//! Tokenization for polstep
//!
//! A frozen key string is split on the separator into words. Each word is
//! either one of the operator glyphs or a number literal.

use nom::{
    bytes::complete::{take_till1, take_while},
    multi::many0,
    number::complete::double,
    sequence::preceded,
    IResult,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The word separator inside a key list
pub const SEPARATOR: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,       // +
    Subtract,  // -
    Multiply,  // ×
    Divide,    // /
    Remainder, // %
}

impl Operator {
    /// Look up an operator word, accepting the ASCII and typographic synonyms
    pub fn from_symbol(word: &str) -> Option<Operator> {
        match word {
            "+" => Some(Operator::Add),
            "-" | "\u{2212}" => Some(Operator::Subtract),
            "×" | "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            "%" => Some(Operator::Remainder),
            _ => None,
        }
    }

    /// The canonical glyph shown to the user
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "/",
            Operator::Remainder => "%",
        }
    }

    /// True for the canonical single-character glyphs a key list may hold
    pub fn is_glyph(c: char) -> bool {
        matches!(c, '+' | '-' | '×' | '/' | '%')
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A number literal, with the text it was read from
    Number { text: String, value: f64 },
    /// One of the five binary operators
    Operator(Operator),
}

impl Token {
    /// Classify a single word
    ///
    /// Number words are read leniently: the longest float prefix wins, so
    /// `1.2.3` reads as `1.2` and `5.` as `5`.
    pub fn classify(word: &str) -> Result<Token, LexError> {
        if let Some(op) = Operator::from_symbol(word) {
            return Ok(Token::Operator(op));
        }
        if word.is_empty() {
            return Err(LexError::EmptyWord);
        }
        let (_, value) = number_prefix(word)
            .map_err(|_| LexError::InvalidNumber(word.to_string()))?;
        Ok(Token::Number {
            text: word.to_string(),
            value,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),
    #[error("Empty word")]
    EmptyWord,
}

fn is_separator(c: char) -> bool {
    c == SEPARATOR
}

/// Parse the float at the start of a word
fn number_prefix(input: &str) -> IResult<&str, f64> {
    double(input)
}

/// Parse one separator-delimited word
fn word(input: &str) -> IResult<&str, &str> {
    preceded(take_while(is_separator), take_till1(is_separator))(input)
}

/// Split a key string into its words, discarding empties
pub fn split_words(input: &str) -> Vec<String> {
    match many0(word)(input) {
        Ok((_, words)) => words.into_iter().map(String::from).collect(),
        Err(_) => Vec::new(),
    }
}
