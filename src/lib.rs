//! polstep - stepwise Polish notation calculator
//!
//! # Overview
//!
//! polstep evaluates arithmetic written in prefix (normal Polish) or postfix
//! (reverse Polish) notation. Besides the final value it records every
//! intermediate reduction so a front end can replay the calculation one
//! step at a time, and it renders the same expression in fully
//! parenthesized infix form.
//!
//! ```text
//! postfix:  3 4 + 2 ×      prefix:  × + 3 4 2
//!
//! [1/4] 3 4 + 2 ×          3 + 4 = 7
//! [2/4] 7 2 ×              7 × 2 = 14
//! [3/4] 14                 Result: 14
//! [4/4] ((3 + 4) × 2) = 14 Infix form
//! ```
//!
//! # Pipeline
//!
//! - [`keys::KeyList`] normalizes raw keystrokes into a space-delimited
//!   token stream
//! - [`eval::reduce`] walks the tokens once and produces [`StepRecord`]s
//! - [`ast::ExprTree`] rebuilds the expression for the infix record
//!
//! Malformed input never panics or returns `Err`: the step list simply ends
//! in an error record.
//!
//! # Example
//!
//! ```rust
//! use polstep::{Calculator, Notation};
//!
//! let mut calc = Calculator::new(Notation::Postfix);
//! calc.add_keys("3 4+");
//! let steps = calc.calculate().unwrap();
//! assert_eq!(steps.len(), 3);
//! assert_eq!(polstep::final_value(steps), Some(7.0));
//! ```

pub mod ast;
pub mod clipboard;
pub mod config;
pub mod display;
pub mod eval;
pub mod keys;
pub mod lexer;
pub mod paste;
pub mod playback;
pub mod signals;
pub mod step;

// Re-export commonly used items
pub use ast::{to_infix, ExprTree, NodeId};
pub use config::{Config, ConfigError};
pub use eval::{reduce, Calculator, EvalError, Notation};
pub use keys::{Key, KeyList};
pub use lexer::{LexError, Operator, Token};
pub use paste::{PasteFeeder, PasteOutcome};
pub use playback::Playback;
pub use step::{final_value, Cell, Color, Outcome, StepKind, StepRecord};

/// Convenience function: type `input` into a fresh key list and calculate
pub fn calculate_str(input: &str, notation: Notation) -> Vec<StepRecord> {
    let mut keys = KeyList::new();
    keys.push_str(input);
    reduce(&keys.tokens(), notation)
}
