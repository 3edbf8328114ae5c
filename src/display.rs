//! Display formatting for step records
//!
//! A step renders as up to three lines:
//! - the snapshot, highlighted slots colored
//! - a caret under the sub-expression about to be computed
//! - the hint (`3 + 4 = 7`, `Result: 7`, ...)

use crate::step::{Color, StepKind, StepRecord};

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[90m";

/// ANSI escape for a highlight color
pub fn ansi(color: Color) -> &'static str {
    match color {
        Color::Green => "\x1b[32m",
        Color::Blue => "\x1b[34m",
        Color::Red => "\x1b[31m",
        Color::Orange => "\x1b[38;5;208m",
        Color::Purple => "\x1b[38;5;171m",
    }
}

fn paint(text: &str, escape: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", escape, text, RESET)
    } else {
        text.to_string()
    }
}

/// The snapshot on one line
pub fn format_snapshot(step: &StepRecord, color: bool) -> String {
    step.raw_data
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let text = cell.to_string();
            match step.highlight.get(&i) {
                Some(c) => paint(&text, ansi(*c), color),
                None => text,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A caret under `calculation_starts_at`
pub fn format_marker(step: &StepRecord) -> String {
    let offset: usize = step
        .raw_data
        .iter()
        .take(step.calculation_starts_at)
        .map(|cell| cell.to_string().chars().count() + 1)
        .sum();
    format!("{}^", " ".repeat(offset))
}

pub fn format_hint(step: &StepRecord) -> String {
    step.hint
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A numbered step: `[index+1/total] snapshot`, marker and hint
pub fn format_step(step: &StepRecord, index: usize, total: usize, color: bool) -> String {
    let label = format!("[{}/{}] ", index + 1, total);
    let indent = " ".repeat(label.chars().count());

    let mut out = format!("{}{}", label, format_snapshot(step, color));
    if step.kind == StepKind::Reduction {
        out.push('\n');
        out.push_str(&indent);
        out.push_str(&format_marker(step));
    }

    let hint = format_hint(step);
    let hint_escape = if step.is_error() { ansi(Color::Red) } else { DIM };
    out.push('\n');
    out.push_str(&indent);
    out.push_str(&paint(&hint, hint_escape, color));
    out
}

/// Every step, separated by blank lines
pub fn format_steps(steps: &[StepRecord], color: bool) -> String {
    let total = steps.len();
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format_step(step, i, total, color))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// A horizontal rule for separating calculations
pub fn rule(width: usize, color: bool) -> String {
    paint(&"─".repeat(width.min(60)), DIM, color)
}
