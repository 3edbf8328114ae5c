#[cfg(test)]
mod tests {
    use crate::eval::*;
    use crate::keys::Key;
    use crate::step::{final_value, Cell, Color, Outcome, StepKind, StepRecord};
    use std::collections::BTreeMap;

    fn words(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn postfix(tokens: &[&str]) -> Vec<StepRecord> {
        reduce(&words(tokens), Notation::Postfix)
    }

    fn prefix(tokens: &[&str]) -> Vec<StepRecord> {
        reduce(&words(tokens), Notation::Prefix)
    }

    fn n(v: f64) -> Cell {
        Cell::Number(v)
    }

    fn t(s: &str) -> Cell {
        Cell::text(s)
    }

    #[test]
    fn postfix_single_addition() {
        let steps = postfix(&["3", "4", "+"]);
        assert_eq!(steps.len(), 3);

        let step = &steps[0];
        assert_eq!(step.kind, StepKind::Reduction);
        assert_eq!(step.raw_data, vec![n(3.0), n(4.0), t("+")]);
        assert_eq!(step.calculation_starts_at, 0);
        assert_eq!(step.calculation_result, Outcome::Value(7.0));
        assert_eq!(
            step.highlight,
            BTreeMap::from([(0, Color::Green), (1, Color::Green), (2, Color::Blue)])
        );
        assert_eq!(step.hint, vec![n(3.0), t("+"), n(4.0), t("="), n(7.0)]);

        assert_eq!(steps[1].raw_data, vec![n(7.0)]);
        assert_eq!(steps[1].hint, vec![t("Result:"), n(7.0)]);
        assert_eq!(steps[2].raw_data, vec![t("(3 + 4)"), t("="), n(7.0)]);
        assert_eq!(steps[2].hint, vec![t("Infix form")]);
        assert_eq!(steps[2].highlight, BTreeMap::from([(2, Color::Green)]));
    }

    #[test]
    fn postfix_snapshot_keeps_stack_and_pending_tokens() {
        let steps = postfix(&["5", "1", "2", "+", "4", "×", "+", "3", "-"]);
        assert_eq!(steps.len(), 6);

        assert_eq!(
            steps[0].raw_data,
            vec![n(5.0), n(1.0), n(2.0), t("+"), t("4"), t("×"), t("+"), t("3"), t("-")]
        );
        assert_eq!(steps[0].calculation_starts_at, 1);

        assert_eq!(
            steps[1].raw_data,
            vec![n(5.0), n(3.0), n(4.0), t("×"), t("+"), t("3"), t("-")]
        );
        assert_eq!(steps[1].calculation_starts_at, 1);
        assert_eq!(steps[1].highlight.get(&3), Some(&Color::Orange));

        assert_eq!(steps[2].raw_data, vec![n(5.0), n(12.0), t("+"), t("3"), t("-")]);
        assert_eq!(steps[3].raw_data, vec![n(17.0), n(3.0), t("-")]);
        assert_eq!(steps[3].highlight.get(&2), Some(&Color::Red));

        assert_eq!(final_value(&steps), Some(14.0));
    }

    #[test]
    fn prefix_single_addition() {
        let steps = prefix(&["+", "3", "4"]);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].raw_data, vec![t("+"), n(3.0), n(4.0)]);
        assert_eq!(steps[0].calculation_starts_at, 0);
        assert_eq!(
            steps[0].highlight,
            BTreeMap::from([(0, Color::Blue), (1, Color::Green), (2, Color::Green)])
        );
        assert_eq!(steps[0].hint, vec![n(3.0), t("+"), n(4.0), t("="), n(7.0)]);
        assert_eq!(steps[2].raw_data[0], t("(3 + 4)"));
    }

    #[test]
    fn prefix_operand_order() {
        let steps = prefix(&["-", "10", "4"]);
        assert_eq!(steps[0].hint, vec![n(10.0), t("-"), n(4.0), t("="), n(6.0)]);
        assert_eq!(final_value(&steps), Some(6.0));
    }

    #[test]
    fn prefix_maps_window_back_to_display_order() {
        let steps = prefix(&["-", "×", "2", "3", "4"]);
        assert_eq!(steps.len(), 4);

        assert_eq!(
            steps[0].raw_data,
            vec![t("-"), t("×"), n(2.0), n(3.0), n(4.0)]
        );
        assert_eq!(steps[0].calculation_starts_at, 1);
        assert_eq!(
            steps[0].highlight,
            BTreeMap::from([(1, Color::Orange), (2, Color::Green), (3, Color::Green)])
        );

        assert_eq!(steps[1].raw_data, vec![t("-"), n(6.0), n(4.0)]);
        assert_eq!(steps[1].calculation_starts_at, 0);

        assert_eq!(steps[3].raw_data[0], t("((2 × 3) - 4)"));
        assert_eq!(final_value(&steps), Some(2.0));
    }

    #[test]
    fn prefix_right_operand_subtree() {
        // 2 × (3 + 4)
        let steps = prefix(&["×", "2", "+", "3", "4"]);
        assert_eq!(steps[0].raw_data, vec![t("×"), t("2"), t("+"), n(3.0), n(4.0)]);
        assert_eq!(steps[0].calculation_starts_at, 2);
        assert_eq!(steps[1].raw_data, vec![t("×"), n(2.0), n(7.0)]);
        assert_eq!(final_value(&steps), Some(14.0));
        assert_eq!(steps[3].raw_data[0], t("(2 × (3 + 4))"));
    }

    #[test]
    fn results_are_rounded() {
        assert_eq!(final_value(&postfix(&["10", "3", "/"])), Some(3.3333));
        assert_eq!(final_value(&postfix(&["0.1", "0.2", "+"])), Some(0.3));
    }

    #[test]
    fn division_by_zero_yields_infinity() {
        let steps = postfix(&["5", "0", "/"]);
        assert_eq!(steps.len(), 3);
        assert_eq!(final_value(&steps), Some(f64::INFINITY));
    }

    #[test]
    fn zero_operands_are_valid() {
        assert_eq!(final_value(&postfix(&["0", "5", "+"])), Some(5.0));
        assert_eq!(final_value(&prefix(&["×", "0", "0"])), Some(0.0));
    }

    #[test]
    fn underflow_alone_is_one_error_record() {
        let steps = postfix(&["+"]);
        assert_eq!(steps.len(), 1);
        let error = &steps[0];
        assert!(error.is_error());
        assert_eq!(error.calculation_result, Outcome::Error);
        assert_eq!(error.raw_data, vec![Cell::Missing]);
        assert_eq!(error.highlight, BTreeMap::from([(0, Color::Red)]));
        assert_eq!(
            error.hint,
            vec![Cell::Missing, t("+"), Cell::Missing, t("="), t("Error")]
        );
    }

    #[test]
    fn underflow_keeps_partial_operands() {
        let steps = postfix(&["5", "+"]);
        assert_eq!(
            steps[0].hint,
            vec![Cell::Missing, t("+"), n(5.0), t("="), t("Error")]
        );

        let steps = prefix(&["+", "5"]);
        assert_eq!(
            steps[0].hint,
            vec![n(5.0), t("+"), Cell::Missing, t("="), t("Error")]
        );
    }

    #[test]
    fn underflow_after_successful_steps_keeps_them() {
        let steps = postfix(&["1", "2", "+", "-"]);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].kind, StepKind::Reduction);
        assert!(steps[1].is_error());
        assert_eq!(final_value(&steps), None);
    }

    #[test]
    fn leftover_values_end_in_error() {
        let steps = postfix(&["3", "4"]);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].is_error());
        assert_eq!(steps[0].raw_data, vec![n(3.0), n(4.0)]);
        assert_eq!(
            steps[0].highlight,
            BTreeMap::from([(0, Color::Red), (1, Color::Red)])
        );

        let steps = prefix(&["+", "1", "2", "3"]);
        let last = steps.last().unwrap();
        assert!(last.is_error());
        assert_eq!(last.raw_data, vec![n(3.0), n(3.0)]);
    }

    #[test]
    fn invalid_literal_ends_in_error() {
        let steps = postfix(&["3", ".", "+"]);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].is_error());
        assert_eq!(steps[0].raw_data, vec![t(".")]);
    }

    #[test]
    fn empty_tokens_end_in_error() {
        let steps = postfix(&[]);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].is_error());
        assert!(steps[0].highlight_in_bounds());
    }

    #[test]
    fn highlights_stay_in_bounds() {
        fn check(tokens: &[&str], notation: Notation) {
            for step in reduce(&words(tokens), notation) {
                assert!(step.highlight_in_bounds(), "{:?} {:?}", tokens, step);
            }
        }

        check(&["5", "1", "2", "+", "4", "×", "+", "3", "-"], Notation::Postfix);
        check(&["-", "×", "2", "3", "4"], Notation::Prefix);
        check(&["×", "2", "+", "3", "4"], Notation::Prefix);
        check(&["+"], Notation::Postfix);
        check(&["1", "2"], Notation::Prefix);
    }

    #[test]
    fn error_messages() {
        let err = EvalError::StackUnderflow {
            operator: crate::lexer::Operator::Add,
            left: None,
            right: Some(1.0),
        };
        assert_eq!(err.to_string(), "Stack underflow: + needs two operands");
        assert_eq!(
            EvalError::UnresolvedStack(vec![1.0, 2.0]).to_string(),
            "Expression did not reduce to a single value (2 left)"
        );
    }

    #[test]
    fn calculator_calculates_typed_keys() {
        let mut calc = Calculator::new(Notation::Postfix);
        calc.add_keys("3 4+");
        let steps = calc.calculate().unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(final_value(calc.steps()), Some(7.0));
    }

    #[test]
    fn calculator_ignores_empty_key_list() {
        let mut calc = Calculator::default();
        assert!(calc.calculate().is_none());
        assert!(calc.steps().is_empty());
    }

    #[test]
    fn calculator_reset_and_clear() {
        let mut calc = Calculator::new(Notation::Prefix);
        calc.add_keys("+ 1 2");
        calc.calculate();
        assert!(!calc.steps().is_empty());

        calc.reset_calculation();
        assert!(calc.steps().is_empty());
        assert_eq!(calc.copy(), "+ 1 2");

        calc.clear();
        assert!(calc.keys().is_empty());
    }

    #[test]
    fn calculator_backspace_and_toggle() {
        let mut calc = Calculator::new(Notation::Prefix);
        calc.add_keys("3 4 +5");
        calc.add_key(Key::Backspace);
        calc.add_key(Key::Backspace);
        assert_eq!(calc.copy(), "3 4 +");
        assert_eq!(calc.toggle_notation(), Notation::Postfix);
        calc.calculate();
        assert_eq!(final_value(calc.steps()), Some(7.0));
    }

    #[test]
    fn notation_from_str() {
        assert_eq!("postfix".parse::<Notation>(), Ok(Notation::Postfix));
        assert_eq!("RPN".parse::<Notation>(), Ok(Notation::Postfix));
        assert_eq!("prefix".parse::<Notation>(), Ok(Notation::Prefix));
        assert!("infix".parse::<Notation>().is_err());
    }
}
