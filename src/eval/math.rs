use crate::lexer::Operator;

/// Round to 4 decimal places, halves rounding up
///
/// Keeps float noise (`0.1 + 0.2`) out of the displayed steps.
pub fn round4(x: f64) -> f64 {
    (x * 10000.0 + 0.5).floor() / 10000.0
}

impl Operator {
    /// Apply the operator to `left` and `right` without rounding
    ///
    /// Division and remainder by zero follow IEEE 754 (`inf` / `NaN`).
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            // Sign follows the dividend
            Operator::Remainder => left % right,
        }
    }

    /// Apply and round, the value a reduction step records
    pub fn evaluate(self, left: f64, right: f64) -> f64 {
        round4(self.apply(left, right))
    }
}
