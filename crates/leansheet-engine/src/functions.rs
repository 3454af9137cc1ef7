//! Built-in operators and aggregate keywords, with their metadata.
//!
//! Conventions:
//! - Operators are single symbols written between two operands (`A1 + 3`).
//! - Aggregate keywords are lower-case and end in `=` (`sum= A1 A5`); they
//!   are matched case-insensitively.
//! - If you add a keyword, add it to `AGGREGATE_BUILTINS` and give it a
//!   reduction in `Aggregate::reduce`.

use crate::engine::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Sum,
    Product,
    Sqrt,
    Median,
    Min,
    Max,
    Average,
    Stdev,
}

pub struct OperatorBuiltin {
    pub symbol: &'static str,
    pub operator: Operator,
    pub usage: &'static str,
    pub description: &'static str,
}

pub struct AggregateBuiltin {
    pub keyword: &'static str,
    pub aggregate: Aggregate,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const OPERATOR_BUILTINS: &[OperatorBuiltin] = &[
    OperatorBuiltin {
        symbol: "+",
        operator: Operator::Add,
        usage: "Cell/Number + Cell/Number",
        description: "Adds any two cells or numbers",
    },
    OperatorBuiltin {
        symbol: "-",
        operator: Operator::Subtract,
        usage: "Cell/Number - Cell/Number",
        description: "Subtracts any two cells or numbers",
    },
    OperatorBuiltin {
        symbol: "*",
        operator: Operator::Multiply,
        usage: "Cell/Number * Cell/Number",
        description: "Multiplies any two cells or numbers",
    },
    OperatorBuiltin {
        symbol: "/",
        operator: Operator::Divide,
        usage: "Cell/Number / Cell/Number",
        description: "Divides any two cells or numbers; blank when dividing by zero",
    },
    OperatorBuiltin {
        symbol: "^",
        operator: Operator::Power,
        usage: "Cell/Number ^ Cell/Number",
        description: "Raises any cell or number to the power of any cell or number",
    },
];

pub const AGGREGATE_BUILTINS: &[AggregateBuiltin] = &[
    AggregateBuiltin {
        keyword: "sum=",
        aggregate: Aggregate::Sum,
        usage: "sum= Cell Cell",
        description: "Sum of the cells spanned by the references",
    },
    AggregateBuiltin {
        keyword: "product=",
        aggregate: Aggregate::Product,
        usage: "product= Cell Cell",
        description: "Product of the cells spanned by the references",
    },
    AggregateBuiltin {
        keyword: "sqrt=",
        aggregate: Aggregate::Sqrt,
        usage: "sqrt= Cell/Number",
        description: "Square root of a cell or number",
    },
    AggregateBuiltin {
        keyword: "median=",
        aggregate: Aggregate::Median,
        usage: "median= Cell Cell",
        description: "Median of the cells spanned by the references",
    },
    AggregateBuiltin {
        keyword: "min=",
        aggregate: Aggregate::Min,
        usage: "min= Cell Cell",
        description: "Minimum of the cells spanned by the references",
    },
    AggregateBuiltin {
        keyword: "max=",
        aggregate: Aggregate::Max,
        usage: "max= Cell Cell",
        description: "Maximum of the cells spanned by the references",
    },
    AggregateBuiltin {
        keyword: "average=",
        aggregate: Aggregate::Average,
        usage: "average= Cell Cell",
        description: "Average of the cells spanned by the references",
    },
    AggregateBuiltin {
        keyword: "stdev=",
        aggregate: Aggregate::Stdev,
        usage: "stdev= Cell Cell",
        description: "Sample standard deviation of the cells spanned by the references",
    },
];

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        OPERATOR_BUILTINS
            .iter()
            .find(|b| b.symbol == symbol)
            .map(|b| b.operator)
    }

    pub fn symbol(self) -> &'static str {
        OPERATOR_BUILTINS
            .iter()
            .find(|b| b.operator == self)
            .map_or("?", |b| b.symbol)
    }

    /// Apply the operator. Division by exactly zero has no result.
    pub fn apply(self, left: f64, right: f64) -> Option<f64> {
        match self {
            Operator::Add => Some(left + right),
            Operator::Subtract => Some(left - right),
            Operator::Multiply => Some(left * right),
            Operator::Divide if right == 0.0 => None,
            Operator::Divide => Some(left / right),
            Operator::Power => Some(left.powf(right)),
        }
    }
}

impl Aggregate {
    /// Look up a keyword such as `SUM=`; matching ignores case.
    pub fn from_keyword(keyword: &str) -> Option<Aggregate> {
        let keyword = keyword.to_lowercase();
        AGGREGATE_BUILTINS
            .iter()
            .find(|b| b.keyword == keyword)
            .map(|b| b.aggregate)
    }

    pub fn keyword(self) -> &'static str {
        AGGREGATE_BUILTINS
            .iter()
            .find(|b| b.aggregate == self)
            .map_or("?", |b| b.keyword)
    }

    /// Whether the keyword reduces a derived range (everything but `sqrt=`).
    pub fn is_range_based(self) -> bool {
        self != Aggregate::Sqrt
    }

    /// Reduce the values of the cells in a range.
    ///
    /// `sqrt=` is not range-based; here it takes the first value, if any.
    pub fn reduce(self, values: &[f64]) -> Value {
        match self {
            Aggregate::Sum => Value::Number(values.iter().sum()),
            Aggregate::Product => Value::Number(values.iter().product()),
            Aggregate::Sqrt => values.first().map(|v| v.sqrt()).into(),
            Aggregate::Median => median(values).into(),
            Aggregate::Min => sorted(values).first().copied().into(),
            Aggregate::Max => sorted(values).last().copied().into(),
            Aggregate::Average => Value::Number(average(values)),
            Aggregate::Stdev => Value::Number(sample_stdev(values)),
        }
    }
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Odd counts take the middle element. Even counts average the elements at
/// `n / 2` and `n / 2 + 1`, which is one slot past the textbook pair; None
/// when the second index runs off the end.
fn median(values: &[f64]) -> Option<f64> {
    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        return Some(sorted[mid]);
    }
    let upper = sorted.get(mid)?;
    let next = sorted.get(mid + 1)?;
    Some((upper + next) / 2.0)
}

/// NaN for an empty slice.
fn average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_stdev(values: &[f64]) -> f64 {
    // Undefined below two samples.
    if values.len() < 2 {
        return f64::NAN;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let squares: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    (squares / (count - 1.0)).sqrt()
}
