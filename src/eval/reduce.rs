//! The stepwise reducer shared by both notations
//!
//! Postfix walks the tokens left to right and pops `right` before `left`.
//! Prefix walks right to left and pops `left` before `right`, because the
//! stack was filled in reverse. Snapshots are always laid out in the
//! forward (as typed) order, so the prefix walk maps its stack back onto
//! the display with `raw_data.len() - stack.len() - 3`.

use super::{EvalError, Notation};
use crate::ast::ExprTree;
use crate::lexer::{Operator, Token};
use crate::step::{Cell, Color, StepRecord};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Width of a reduction window: two operands and the operator
const WINDOW: usize = 3;

impl Notation {
    /// Token indices in the order this notation consumes them
    fn traversal(self, len: usize) -> Vec<usize> {
        match self {
            Notation::Postfix => (0..len).collect(),
            Notation::Prefix => (0..len).rev().collect(),
        }
    }

    /// Pop the two operands of an operator as `(left, right)`
    fn pop_operands(self, stack: &mut Vec<f64>) -> (Option<f64>, Option<f64>) {
        match self {
            Notation::Postfix => {
                let right = stack.pop();
                let left = stack.pop();
                (left, right)
            }
            Notation::Prefix => {
                let left = stack.pop();
                let right = stack.pop();
                (left, right)
            }
        }
    }

    /// Offset of the operator inside the reduction window
    fn operator_slot(self) -> usize {
        match self {
            Notation::Postfix => 2,
            Notation::Prefix => 0,
        }
    }

    /// Index in `raw_data` where the reduction window begins
    fn window_start(self, raw_len: usize, stack_len: usize) -> usize {
        match self {
            Notation::Postfix => stack_len,
            Notation::Prefix => raw_len - stack_len - WINDOW,
        }
    }

    /// Remaining stack values in display order
    fn display_stack(self, stack: &[f64]) -> Vec<f64> {
        match self {
            Notation::Postfix => stack.to_vec(),
            Notation::Prefix => stack.iter().rev().copied().collect(),
        }
    }
}

struct Reducer<'a> {
    tokens: &'a [String],
    notation: Notation,
    stack: Vec<f64>,
    steps: Vec<StepRecord>,
}

impl<'a> Reducer<'a> {
    fn new(tokens: &'a [String], notation: Notation) -> Self {
        Reducer {
            tokens,
            notation,
            stack: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Walk every token; on success the single remaining value
    fn run(&mut self) -> Result<f64, EvalError> {
        for index in self.notation.traversal(self.tokens.len()) {
            let word = &self.tokens[index];
            match Token::classify(word) {
                Ok(Token::Number { value, .. }) => self.stack.push(value),
                Ok(Token::Operator(op)) => self.apply(index, op)?,
                Err(_) => return Err(EvalError::InvalidNumber(word.clone())),
            }
        }

        match self.stack.as_slice() {
            [value] => Ok(*value),
            _ => Err(EvalError::UnresolvedStack(
                self.notation.display_stack(&self.stack),
            )),
        }
    }

    fn apply(&mut self, index: usize, op: Operator) -> Result<(), EvalError> {
        let (left, right) = match self.notation.pop_operands(&mut self.stack) {
            (Some(left), Some(right)) => (left, right),
            (left, right) => {
                return Err(EvalError::StackUnderflow {
                    operator: op,
                    left,
                    right,
                })
            }
        };

        let result = op.evaluate(left, right);
        let record = self.snapshot(index, op, left, right, result);
        debug!(
            step = self.steps.len() + 1,
            %op,
            left,
            right,
            result,
            starts_at = record.calculation_starts_at,
            "reduced"
        );
        self.steps.push(record);
        self.stack.push(result);
        Ok(())
    }

    /// The whole expression as it looks mid-reduction
    fn snapshot(
        &self,
        index: usize,
        op: Operator,
        left: f64,
        right: f64,
        result: f64,
    ) -> StepRecord {
        let words = |range: &[String]| {
            range
                .iter()
                .map(|w| Cell::Text(w.clone()))
                .collect::<Vec<_>>()
        };
        let numbers =
            |values: Vec<f64>| values.into_iter().map(Cell::Number).collect::<Vec<_>>();
        let stack = self.notation.display_stack(&self.stack);

        let (before, window, after) = match self.notation {
            Notation::Postfix => (
                numbers(stack),
                [Cell::Number(left), Cell::Number(right), Cell::from(op)],
                words(&self.tokens[index + 1..]),
            ),
            Notation::Prefix => (
                words(&self.tokens[..index]),
                [Cell::from(op), Cell::Number(left), Cell::Number(right)],
                numbers(stack),
            ),
        };

        let mut raw_data = before;
        raw_data.extend(window);
        raw_data.extend(after);

        let start = self.notation.window_start(raw_data.len(), self.stack.len());
        let highlight: BTreeMap<usize, Color> = (0..WINDOW)
            .map(|slot| {
                let color = if slot == self.notation.operator_slot() {
                    Color::for_operator(op)
                } else {
                    Color::Green
                };
                (start + slot, color)
            })
            .collect();

        let hint = vec![
            Cell::Number(left),
            Cell::from(op),
            Cell::Number(right),
            Cell::text("="),
            Cell::Number(result),
        ];

        StepRecord::reduction(raw_data, start, result, highlight, hint)
    }
}

impl EvalError {
    /// The terminal record that stands in for this error
    pub fn to_record(&self) -> StepRecord {
        match self {
            EvalError::StackUnderflow { operator, left, right } => StepRecord::error(
                vec![Cell::Missing],
                vec![
                    Cell::from(*left),
                    Cell::from(*operator),
                    Cell::from(*right),
                    Cell::text("="),
                    Cell::text("Error"),
                ],
            ),
            EvalError::InvalidNumber(word) => StepRecord::error(
                vec![Cell::Text(word.clone())],
                vec![Cell::text("Error"), Cell::Text(word.clone())],
            ),
            EvalError::UnresolvedStack(values) => StepRecord::error(
                values.iter().copied().map(Cell::Number).collect(),
                vec![Cell::text("Error"), Cell::text(self.to_string())],
            ),
        }
    }
}

/// Reduce `tokens` step by step
///
/// Pure over its input. The returned list always ends in either the
/// result and infix records or a single error record.
pub fn reduce(tokens: &[String], notation: Notation) -> Vec<StepRecord> {
    let mut reducer = Reducer::new(tokens, notation);

    match reducer.run() {
        Ok(value) => {
            let infix = ExprTree::build(tokens, notation).render();
            debug!(%infix, value, "calculation finished");
            reducer.steps.push(StepRecord::result(value));
            reducer.steps.push(StepRecord::infix(infix, value));
        }
        Err(err) => {
            warn!(%err, %notation, "calculation halted");
            reducer.steps.push(err.to_record());
        }
    }

    reducer.steps
}
