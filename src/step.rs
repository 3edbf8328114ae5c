//! Step records: the unit of replay
//!
//! A calculation produces an ordered list of records. Every record but the
//! last two is one binary reduction; the second-to-last holds the final
//! value and the last holds the parenthesized infix form. A calculation
//! that fails ends with a single error record instead.

use crate::lexer::Operator;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Format a number the way the calculator shows it: no trailing `.0`
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Non-finite numbers serialize as their display strings (`"Infinity"`, `"NaN"`)
fn serialize_number<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.is_finite() {
        serializer.serialize_f64(*n)
    } else {
        serializer.serialize_str(&format_number(*n))
    }
}

/// One slot of a snapshot or hint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    #[serde(serialize_with = "serialize_number")]
    Number(f64),
    Text(String),
    /// An operand that could not be popped
    Missing,
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<Option<f64>> for Cell {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Cell::Missing, Cell::Number)
    }
}

impl From<Operator> for Cell {
    fn from(op: Operator) -> Self {
        Cell::Text(op.symbol().to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => f.write_str(&format_number(*n)),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => f.write_str("undefined"),
        }
    }
}

/// Semantic highlight tag for a snapshot slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Blue,
    Red,
    Orange,
    Purple,
}

impl Color {
    pub fn for_operator(op: Operator) -> Color {
        match op {
            Operator::Add => Color::Blue,
            Operator::Subtract => Color::Red,
            Operator::Multiply => Color::Orange,
            Operator::Divide | Operator::Remainder => Color::Purple,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Outcome {
    #[serde(serialize_with = "serialize_number")]
    Value(f64),
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Reduction,
    Result,
    Infix,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub kind: StepKind,
    /// Snapshot of the whole expression at this point, in display order
    pub raw_data: Vec<Cell>,
    /// Where the sub-expression about to be computed begins
    pub calculation_starts_at: usize,
    pub calculation_result: Outcome,
    pub highlight: BTreeMap<usize, Color>,
    /// `[left, op, right, "=", result]` for reductions, a tag otherwise
    pub hint: Vec<Cell>,
}

impl StepRecord {
    pub fn reduction(
        raw_data: Vec<Cell>,
        calculation_starts_at: usize,
        result: f64,
        highlight: BTreeMap<usize, Color>,
        hint: Vec<Cell>,
    ) -> Self {
        StepRecord {
            kind: StepKind::Reduction,
            raw_data,
            calculation_starts_at,
            calculation_result: Outcome::Value(result),
            highlight,
            hint,
        }
    }

    /// The scalar final value
    pub fn result(value: f64) -> Self {
        StepRecord {
            kind: StepKind::Result,
            raw_data: vec![Cell::Number(value)],
            calculation_starts_at: 0,
            calculation_result: Outcome::Value(value),
            highlight: BTreeMap::from([(0, Color::Green)]),
            hint: vec![Cell::text("Result:"), Cell::Number(value)],
        }
    }

    /// The parenthesized infix form paired with the final value
    pub fn infix(infix: String, value: f64) -> Self {
        StepRecord {
            kind: StepKind::Infix,
            raw_data: vec![Cell::Text(infix), Cell::text("="), Cell::Number(value)],
            calculation_starts_at: 0,
            calculation_result: Outcome::Value(value),
            highlight: BTreeMap::from([(2, Color::Green)]),
            hint: vec![Cell::text("Infix form")],
        }
    }

    /// A terminal error record; every slot of `raw_data` is marked red
    pub fn error(raw_data: Vec<Cell>, hint: Vec<Cell>) -> Self {
        let raw_data = if raw_data.is_empty() {
            vec![Cell::Missing]
        } else {
            raw_data
        };
        let highlight = (0..raw_data.len()).map(|i| (i, Color::Red)).collect();
        StepRecord {
            kind: StepKind::Error,
            raw_data,
            calculation_starts_at: 0,
            calculation_result: Outcome::Error,
            highlight,
            hint,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StepKind::Error
    }

    pub fn value(&self) -> Option<f64> {
        match self.calculation_result {
            Outcome::Value(v) => Some(v),
            Outcome::Error => None,
        }
    }

    /// True when every highlight key points into `raw_data`
    pub fn highlight_in_bounds(&self) -> bool {
        self.highlight.keys().all(|&i| i < self.raw_data.len())
    }
}

/// The final value of a finished calculation, if it succeeded
pub fn final_value(steps: &[StepRecord]) -> Option<f64> {
    match steps {
        [.., result, infix]
            if result.kind == StepKind::Result && infix.kind == StepKind::Infix =>
        {
            result.value()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_format_without_trailing_zero() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(3.3333), "3.3333");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn missing_cell_displays_as_undefined() {
        assert_eq!(Cell::from(None).to_string(), "undefined");
        assert_eq!(Cell::from(Some(2.5)).to_string(), "2.5");
    }

    #[test]
    fn operator_colors() {
        assert_eq!(Color::for_operator(Operator::Add), Color::Blue);
        assert_eq!(Color::for_operator(Operator::Subtract), Color::Red);
        assert_eq!(Color::for_operator(Operator::Multiply), Color::Orange);
        assert_eq!(Color::for_operator(Operator::Divide), Color::Purple);
        assert_eq!(Color::for_operator(Operator::Remainder), Color::Purple);
    }

    #[test]
    fn empty_error_record_still_has_a_slot() {
        let record = StepRecord::error(Vec::new(), vec![Cell::text("Error")]);
        assert_eq!(record.raw_data, vec![Cell::Missing]);
        assert!(record.highlight_in_bounds());
        assert!(record.is_error());
    }

    #[test]
    fn final_value_needs_result_and_infix() {
        let steps = vec![StepRecord::result(7.0), StepRecord::infix("(3 + 4)".into(), 7.0)];
        assert_eq!(final_value(&steps), Some(7.0));
        assert_eq!(final_value(&steps[..1]), None);
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(StepRecord::result(7.0)).unwrap();
        assert_eq!(json["kind"], "result");
        assert_eq!(json["raw_data"][0], 7.0);
        assert_eq!(json["highlight"]["0"], "green");
    }

    #[test]
    fn non_finite_numbers_serialize_as_text() {
        let json = serde_json::to_value(StepRecord::result(f64::INFINITY)).unwrap();
        assert_eq!(json["raw_data"][0], "Infinity");
        assert_eq!(json["calculation_result"]["Value"], "Infinity");
        assert_eq!(json["hint"][1], "Infinity");

        let json = serde_json::to_value(Outcome::Value(f64::NAN)).unwrap();
        assert_eq!(json["Value"], "NaN");
        assert_eq!(serde_json::to_value(Cell::Number(f64::NEG_INFINITY)).unwrap(), "-Infinity");
        assert_eq!(serde_json::to_value(Cell::Number(2.5)).unwrap(), 2.5);
    }
}
