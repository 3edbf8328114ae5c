//! Common test utilities for polstep integration tests

#[allow(unused_imports)]
pub use polstep::{
    calculate_str, final_value, reduce, to_infix, Calculator, Cell, Color, ExprTree, KeyList,
    Notation, Outcome, StepKind, StepRecord,
};

/// Reduce already-split tokens
pub fn steps(tokens: &[&str], notation: Notation) -> Vec<StepRecord> {
    let words: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    reduce(&words, notation)
}

/// The final value of a successful calculation
#[allow(dead_code)]
pub fn value(tokens: &[&str], notation: Notation) -> Option<f64> {
    final_value(&steps(tokens, notation))
}

/// The infix string of a successful calculation
#[allow(dead_code)]
pub fn infix(tokens: &[&str], notation: Notation) -> Option<String> {
    let steps = steps(tokens, notation);
    let last = steps.last()?;
    if last.kind != StepKind::Infix {
        return None;
    }
    match last.raw_data.first() {
        Some(Cell::Text(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Assert a step list is a single error record
#[allow(dead_code)]
pub fn assert_single_error(steps: &[StepRecord]) {
    assert_eq!(steps.len(), 1, "expected one record, got {:?}", steps);
    assert!(steps[0].is_error());
    assert_eq!(steps[0].calculation_result, Outcome::Error);
}

/// Split a fully parenthesized infix string into tokens
#[allow(dead_code)]
pub fn infix_tokens(infix: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in infix.chars() {
        match c {
            '(' | ')' | ' ' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                if c != ' ' {
                    tokens.push(c.to_string());
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Convert fully parenthesized infix to postfix tokens (shunting-yard over
/// explicit parentheses only)
#[allow(dead_code)]
pub fn infix_to_postfix(infix: &str) -> Vec<String> {
    let mut output = Vec::new();
    let mut ops: Vec<String> = Vec::new();
    for token in infix_tokens(infix) {
        match token.as_str() {
            "(" => ops.push(token),
            ")" => {
                while let Some(op) = ops.pop() {
                    if op == "(" {
                        break;
                    }
                    output.push(op);
                }
            }
            "+" | "-" | "×" | "/" | "%" => ops.push(token),
            _ => output.push(token),
        }
    }
    while let Some(op) = ops.pop() {
        output.push(op);
    }
    output
}
