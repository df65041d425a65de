use std::fmt;

/// Reasons a formula fails to produce a number.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// A user variable referenced by the formula is not defined.
    UnknownVariable(String),
    /// Right-hand side of a division evaluated to zero.
    DivisionByZero,
    /// The final result of the formula is NaN or infinite.
    NotFinite,
    /// A function was called with the wrong number of arguments.
    Arity {
        function: &'static str,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::UnknownVariable(name) => write!(f, "unknown user variable '{}'", name),
            FormulaError::DivisionByZero => write!(f, "division by zero"),
            FormulaError::NotFinite => write!(f, "formula result is not a finite number"),
            FormulaError::Arity {
                function,
                expected,
                found,
            } => write!(
                f,
                "function {} expects {} argument(s), got {}",
                function, expected, found
            ),
        }
    }
}

impl std::error::Error for FormulaError {}
