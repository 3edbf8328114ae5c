//! Evaluation for polstep - stepwise reduction of Polish notation
//!
//! A [`Calculator`] is the evaluation context: it owns the normalized key
//! list, the notation mode and the step records of the last calculation.
//! Calculating freezes the key list into tokens and hands them to the
//! reducer, which walks them once:
//! - postfix (reverse Polish) left to right
//! - prefix (normal Polish) right to left
//!
//! Each operator application is recorded as one [`StepRecord`]; a successful
//! calculation ends with the result record and the infix record. Failures
//! are data too: the reducer ends the list with an error record rather than
//! returning `Err`.

mod math;
mod reduce;
mod tests;

pub use math::round4;
pub use reduce::reduce;

use crate::keys::{Key, KeyList};
use crate::lexer::Operator;
use crate::step::StepRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Why a calculation stopped early
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Stack underflow: {operator} needs two operands")]
    StackUnderflow {
        operator: Operator,
        left: Option<f64>,
        right: Option<f64>,
    },
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    /// Values left over at the end, in display order
    #[error("Expression did not reduce to a single value ({} left)", .0.len())]
    UnresolvedStack(Vec<f64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// Normal Polish: operators precede their operands (`+ 3 4`)
    #[default]
    #[serde(alias = "normal", alias = "polish", alias = "pn")]
    Prefix,
    /// Reverse Polish: operators follow their operands (`3 4 +`)
    #[serde(alias = "reverse", alias = "rpn")]
    Postfix,
}

impl Notation {
    pub fn toggled(self) -> Notation {
        match self {
            Notation::Prefix => Notation::Postfix,
            Notation::Postfix => Notation::Prefix,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Notation::Prefix => "prefix",
            Notation::Postfix => "postfix",
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" | "normal" | "polish" | "pn" => Ok(Notation::Prefix),
            "postfix" | "reverse" | "rpn" => Ok(Notation::Postfix),
            other => Err(format!(
                "unknown notation \"{}\": expected \"prefix\" or \"postfix\"",
                other
            )),
        }
    }
}

/// The evaluation context, owned by whoever drives the calculator
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    keys: KeyList,
    notation: Notation,
    steps: Vec<StepRecord>,
}

impl Calculator {
    pub fn new(notation: Notation) -> Self {
        Calculator {
            keys: KeyList::new(),
            notation,
            steps: Vec::new(),
        }
    }

    /// Apply one keystroke to the key list
    pub fn add_key(&mut self, key: Key) -> bool {
        self.keys.add_key(key)
    }

    /// Type a whole string, one key at a time
    pub fn add_keys(&mut self, text: &str) {
        self.keys.push_str(text);
    }

    pub fn keys(&self) -> &KeyList {
        &self.keys
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn set_notation(&mut self, notation: Notation) {
        self.notation = notation;
    }

    pub fn toggle_notation(&mut self) -> Notation {
        self.notation = self.notation.toggled();
        self.notation
    }

    /// Reduce the current key list, replacing the previous step list
    ///
    /// Returns `None` (and leaves the previous steps alone) when there is
    /// nothing to calculate.
    pub fn calculate(&mut self) -> Option<&[StepRecord]> {
        if self.keys.is_empty() {
            return None;
        }
        let tokens = self.keys.tokens();
        debug!(notation = %self.notation, ?tokens, "calculating");
        self.steps = reduce(&tokens, self.notation);
        Some(&self.steps)
    }

    /// Steps of the last calculation (empty after a reset)
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn reset_calculation(&mut self) {
        self.steps.clear();
    }

    /// Empty the key list
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// The key list serialized for the clipboard
    pub fn copy(&self) -> String {
        self.keys.to_clipboard_string()
    }
}
