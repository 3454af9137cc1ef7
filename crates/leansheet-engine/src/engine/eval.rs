//! Formula classification and evaluation.
//!
//! Raw cell text is split on whitespace and classified in a single pass:
//!
//! - `left op right` with `op` one of `+ - * / ^` is a binary formula
//! - a first token matching an aggregate keyword (`sum=`, `median=`, ...)
//!   applies that keyword to the remaining tokens
//! - anything else is shown as typed
//!
//! There is no grammar beyond this: no precedence, no nesting, one operator
//! per formula.

use log::debug;

use super::{CellRef, CycleGuard, GridView, Range, Value};
use crate::functions::{Aggregate, Operator};

/// Classified raw text. Tokens borrow from the raw string.
#[derive(Clone, Debug, PartialEq)]
pub enum Formula<'a> {
    /// Not a formula; displayed verbatim.
    Plain,
    Binary {
        left: &'a str,
        op: Operator,
        right: &'a str,
    },
    Aggregate {
        function: Aggregate,
        operands: Vec<&'a str>,
    },
}

impl<'a> Formula<'a> {
    pub fn parse(raw: &'a str) -> Formula<'a> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();

        if let &[left, middle, right] = tokens.as_slice()
            && let Some(op) = Operator::from_symbol(middle)
        {
            return Formula::Binary { left, op, right };
        }

        let Some((first, operands)) = tokens.split_first() else {
            return Formula::Plain;
        };
        match Aggregate::from_keyword(first) {
            Some(function) => Formula::Aggregate {
                function,
                operands: operands.to_vec(),
            },
            None => Formula::Plain,
        }
    }
}

/// Evaluates cells of one grid.
#[derive(Clone, Copy)]
pub struct Evaluator<'g> {
    pub(crate) grid: &'g dyn GridView,
}

impl<'g> Evaluator<'g> {
    pub fn new(grid: &'g dyn GridView) -> Self {
        Evaluator { grid }
    }

    /// Evaluate `raw` as the contents of the cell at `at`.
    pub fn evaluate(&self, raw: &str, at: &CellRef) -> Value {
        let mut guard = CycleGuard::new();
        let Some(mut entered) = guard.enter(at) else {
            return Value::Empty;
        };
        self.evaluate_raw(raw, at, &mut entered)
    }

    /// Evaluate the cell at `at` from its stored text.
    pub fn evaluate_cell(&self, at: &CellRef) -> Value {
        self.cell_value(at, &mut CycleGuard::new())
    }

    /// Guarded recursion into another cell. Unpopulated cells and cells
    /// already on the evaluation stack are empty.
    pub(crate) fn cell_value(&self, at: &CellRef, guard: &mut CycleGuard) -> Value {
        let Some(raw) = self.grid.cell_text(at) else {
            return Value::Empty;
        };
        let Some(mut entered) = guard.enter(at) else {
            log::trace!("circular reference to {} resolved as empty", at);
            return Value::Empty;
        };
        self.evaluate_raw(&raw, at, &mut entered)
    }

    fn evaluate_raw(&self, raw: &str, at: &CellRef, guard: &mut CycleGuard) -> Value {
        match Formula::parse(raw) {
            Formula::Plain => Value::Text(raw.to_string()),
            Formula::Binary { left, op, right } => self.evaluate_binary(left, op, right, guard),
            Formula::Aggregate { function, operands } => {
                self.evaluate_aggregate(function, &operands, at, guard)
            }
        }
    }

    fn evaluate_binary(
        &self,
        left: &str,
        op: Operator,
        right: &str,
        guard: &mut CycleGuard,
    ) -> Value {
        let lhs = self.resolve(left, guard);
        let rhs = self.resolve(right, guard);
        let result = op.apply(lhs, rhs);
        if result.is_none() {
            debug!("{} {} {}: zero divisor, no result", left, op.symbol(), right);
        }
        result.into()
    }

    fn evaluate_aggregate(
        &self,
        function: Aggregate,
        operands: &[&str],
        at: &CellRef,
        guard: &mut CycleGuard,
    ) -> Value {
        if !function.is_range_based() {
            let operand = operands.first().copied().unwrap_or_default();
            return Value::Number(self.resolve(operand, guard).sqrt());
        }

        let Some(range) = Range::derive(operands.iter().copied(), self.grid) else {
            debug!("{}: no operand addresses a cell", function.keyword());
            return function.reduce(&[]);
        };

        let mut values = Vec::new();
        for cell in self.grid.populated_in(&range) {
            if &cell == at {
                continue;
            }
            values.push(self.cell_value(&cell, guard).as_number());
        }
        function.reduce(&values)
    }
}

/// Evaluate `raw` as the contents of the cell at `at` in `grid`.
pub fn evaluate(raw: &str, grid: &dyn GridView, at: &CellRef) -> Value {
    Evaluator::new(grid).evaluate(raw, at)
}

/// Evaluate the stored contents of the cell at `at` in `grid`.
pub fn evaluate_cell(grid: &dyn GridView, at: &CellRef) -> Value {
    Evaluator::new(grid).evaluate_cell(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Cell, Grid};
    use dashmap::DashMap;
    use pretty_assertions::assert_eq;

    fn cell(label: &str) -> CellRef {
        CellRef::from_str(label).unwrap()
    }

    fn grid(cells: &[(&str, &str)]) -> Grid {
        let grid: Grid = DashMap::new();
        for (label, raw) in cells {
            grid.insert(cell(label), Cell::new(raw));
        }
        grid
    }

    fn number(value: Value) -> f64 {
        match value {
            Value::Number(n) => n,
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_classification() {
        assert_eq!(Formula::parse(""), Formula::Plain);
        assert_eq!(Formula::parse("   "), Formula::Plain);
        assert_eq!(Formula::parse("5"), Formula::Plain);
        assert_eq!(Formula::parse("hello there"), Formula::Plain);
        assert_eq!(
            Formula::parse("A1 + 3"),
            Formula::Binary {
                left: "A1",
                op: Operator::Add,
                right: "3",
            }
        );
        assert_eq!(
            Formula::parse("  2   ^  B1 "),
            Formula::Binary {
                left: "2",
                op: Operator::Power,
                right: "B1",
            }
        );
        assert_eq!(
            Formula::parse("Median= A1 A4"),
            Formula::Aggregate {
                function: Aggregate::Median,
                operands: vec!["A1", "A4"],
            }
        );
        assert_eq!(
            Formula::parse("sum="),
            Formula::Aggregate {
                function: Aggregate::Sum,
                operands: vec![],
            }
        );
    }

    #[test]
    fn test_parse_operator_needs_exactly_three_tokens() {
        assert_eq!(Formula::parse("1 + 2 3"), Formula::Plain);
        assert_eq!(Formula::parse("+ 2"), Formula::Plain);
        assert_eq!(Formula::parse("A1 % 2"), Formula::Plain);
    }

    #[test]
    fn test_passthrough_returns_text_as_typed() {
        let grid = grid(&[]);
        let at = cell("C1");
        assert_eq!(evaluate("5", &grid, &at), Value::Text("5".into()));
        assert_eq!(evaluate("", &grid, &at), Value::Text(String::new()));
        assert_eq!(
            evaluate("  two  spaces ", &grid, &at),
            Value::Text("  two  spaces ".into())
        );
        assert_eq!(evaluate("avg= A1 A2", &grid, &at), Value::Text("avg= A1 A2".into()));
    }

    #[test]
    fn test_binary_with_reference() {
        let grid = grid(&[("A1", "4")]);
        assert_eq!(evaluate("A1 + 3", &grid, &cell("B1")), Value::Number(7.0));
        assert_eq!(evaluate("a1 ^ 2", &grid, &cell("B1")), Value::Number(16.0));
        assert_eq!(evaluate("10 - A1", &grid, &cell("B1")), Value::Number(6.0));
    }

    #[test]
    fn test_binary_division_by_zero_is_empty() {
        let grid = grid(&[("A1", "5"), ("A2", "0")]);
        assert_eq!(evaluate("A1 / 0", &grid, &cell("B1")), Value::Empty);
        assert_eq!(evaluate("A1 / A2", &grid, &cell("B1")), Value::Empty);
        assert_eq!(evaluate("A1 / 2", &grid, &cell("B1")), Value::Number(2.5));
    }

    #[test]
    fn test_binary_fallbacks_to_zero() {
        let grid = grid(&[("A1", "apple")]);
        let at = cell("B1");
        // Populated non-numeric cell and absent cell both read as zero.
        assert_eq!(evaluate("A1 + 1", &grid, &at), Value::Number(1.0));
        assert_eq!(evaluate("A2 + 1", &grid, &at), Value::Number(1.0));
        assert_eq!(evaluate("pear * 3", &grid, &at), Value::Number(0.0));
    }

    #[test]
    fn test_binary_chains_through_formulas() {
        let grid = grid(&[("A1", "2"), ("A2", "A1 * 3"), ("A3", "A2 + 1")]);
        assert_eq!(evaluate_cell(&grid, &cell("A3")), Value::Number(7.0));
    }

    #[test]
    fn test_sum_and_product() {
        let grid = grid(&[("A1", "2"), ("A2", "3")]);
        let at = cell("B1");
        assert_eq!(evaluate("sum= A1 A2", &grid, &at), Value::Number(5.0));
        assert_eq!(evaluate("product= A1 A2", &grid, &at), Value::Number(6.0));
    }

    #[test]
    fn test_aggregate_range_spans_rectangle() {
        let grid = grid(&[("A1", "1"), ("B1", "2"), ("A2", "3"), ("B2", "4"), ("C3", "100")]);
        let at = cell("D1");
        assert_eq!(evaluate("sum= B2 A1", &grid, &at), Value::Number(10.0));
        // Literal operands neither widen the range nor add to it.
        assert_eq!(evaluate("sum= A1 7 B2", &grid, &at), Value::Number(10.0));
    }

    #[test]
    fn test_aggregate_skips_self() {
        let grid = grid(&[("A1", "2"), ("A2", "3"), ("A3", "sum= A1 A3")]);
        assert_eq!(evaluate_cell(&grid, &cell("A3")), Value::Number(5.0));
    }

    #[test]
    fn test_aggregate_operand_past_last_populated_row() {
        let grid = grid(&[("A1", "1"), ("A2", "2"), ("A3", "3")]);
        let at = cell("B1");
        assert_eq!(evaluate("sum= A1 A10", &grid, &at), Value::Number(6.0));
        assert_eq!(evaluate("sum= A10 A1", &grid, &at), Value::Number(6.0));
        assert_eq!(evaluate("max= A1 A999999999", &grid, &at), Value::Number(3.0));
        assert!(number(evaluate("average= A5 A9", &grid, &at)).is_nan());
    }

    #[test]
    fn test_aggregate_same_whether_own_cell_is_stored() {
        let unstored = grid(&[("A1", "1"), ("A2", "2"), ("A3", "3")]);
        let at = cell("A4");
        assert_eq!(evaluate("average= A1 A4", &unstored, &at), Value::Number(2.0));

        let stored = grid(&[("A1", "1"), ("A2", "2"), ("A3", "3"), ("A4", "average= A1 A4")]);
        assert_eq!(evaluate_cell(&stored, &at), Value::Number(2.0));
        assert_eq!(evaluate("average= A1 A4", &stored, &at), Value::Number(2.0));
    }

    #[test]
    fn test_aggregate_without_references() {
        let grid = grid(&[("A1", "2")]);
        let at = cell("B1");
        assert_eq!(evaluate("sum=", &grid, &at), Value::Number(0.0));
        assert_eq!(evaluate("product= 4 5", &grid, &at), Value::Number(1.0));
        assert_eq!(evaluate("max= 4 5", &grid, &at), Value::Empty);
    }

    #[test]
    fn test_average_of_absent_cells_is_nan() {
        let grid = grid(&[("C9", "x")]);
        assert!(number(evaluate("average= A1 A2", &grid, &cell("B1"))).is_nan());
    }

    #[test]
    fn test_average_min_max() {
        let grid = grid(&[("A1", "4"), ("A2", "-2"), ("A3", "7")]);
        let at = cell("B1");
        assert_eq!(evaluate("average= A1 A3", &grid, &at), Value::Number(3.0));
        assert_eq!(evaluate("MIN= A1 A3", &grid, &at), Value::Number(-2.0));
        assert_eq!(evaluate("max= A3 A1", &grid, &at), Value::Number(7.0));
    }

    #[test]
    fn test_median_index_arithmetic() {
        let grid = grid(&[("A1", "2"), ("A2", "4")]);
        assert_eq!(evaluate("median= A1 A2", &grid, &cell("B1")), Value::Empty);

        let grid = self::grid(&[("A1", "4"), ("A2", "1"), ("A3", "3"), ("A4", "2")]);
        assert_eq!(evaluate("median= A1 A4", &grid, &cell("B1")), Value::Number(3.5));

        let grid = self::grid(&[("A1", "9"), ("A2", "1"), ("A3", "5")]);
        assert_eq!(evaluate("median= A1 A3", &grid, &cell("B1")), Value::Number(5.0));
    }

    #[test]
    fn test_stdev() {
        let grid = grid(&[("A1", "2"), ("A2", "4"), ("A3", "6")]);
        assert_eq!(evaluate("stdev= A1 A3", &grid, &cell("B1")), Value::Number(2.0));
        assert!(number(evaluate("stdev= A1 A1", &grid, &cell("B1"))).is_nan());
    }

    #[test]
    fn test_sqrt_single_operand() {
        let grid = grid(&[("A1", "16"), ("A2", "9")]);
        let at = cell("B1");
        assert_eq!(evaluate("sqrt= A1", &grid, &at), Value::Number(4.0));
        // Only the first operand counts.
        assert_eq!(evaluate("sqrt= A2 A1", &grid, &at), Value::Number(3.0));
        assert_eq!(evaluate("sqrt= 25", &grid, &at), Value::Number(5.0));
        assert_eq!(evaluate("sqrt=", &grid, &at), Value::Number(0.0));
        assert!(number(evaluate("sqrt= -4", &grid, &at)).is_nan());
    }

    #[test]
    fn test_self_reference_breaks_cycle() {
        let grid = grid(&[("A1", "A1 + 1")]);
        assert_eq!(evaluate_cell(&grid, &cell("A1")), Value::Number(1.0));
        assert_eq!(evaluate("A1 + 1", &grid, &cell("A1")), Value::Number(1.0));
    }

    #[test]
    fn test_mutual_reference_breaks_cycle() {
        let grid = grid(&[("A1", "B1 + 1"), ("B1", "A1 * 2")]);
        // A1 -> B1 -> A1 (empty, 0) => B1 = 0, A1 = 1.
        assert_eq!(evaluate_cell(&grid, &cell("A1")), Value::Number(1.0));
        // B1 -> A1 -> B1 (empty, 0) => A1 = 1, B1 = 2.
        assert_eq!(evaluate_cell(&grid, &cell("B1")), Value::Number(2.0));
    }

    #[test]
    fn test_division_by_cyclic_operand_is_empty() {
        let grid = grid(&[("A1", "5 / A1")]);
        assert_eq!(evaluate_cell(&grid, &cell("A1")), Value::Empty);
    }

    #[test]
    fn test_range_including_cycle_counts_it_as_zero() {
        let grid = grid(&[("A1", "3"), ("A2", "A3 + 1"), ("A3", "average= A1 A2")]);
        // A3 -> A2 -> A3 (empty) => A2 = 1; average(3, 1) = 2.
        assert_eq!(evaluate_cell(&grid, &cell("A3")), Value::Number(2.0));
    }

    #[test]
    fn test_evaluate_cell_unpopulated_is_empty() {
        let grid = grid(&[]);
        assert_eq!(evaluate_cell(&grid, &cell("A1")), Value::Empty);
    }

    #[test]
    fn test_repeated_evaluation_is_stable() {
        let grid = grid(&[("A1", "B1 + 1"), ("B1", "A1 + 1")]);
        let evaluator = Evaluator::new(&grid);
        let first = evaluator.evaluate_cell(&cell("A1"));
        let second = evaluator.evaluate_cell(&cell("A1"));
        assert_eq!(first, second);
    }
}
