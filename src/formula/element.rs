//! Expression tree nodes for [`Formula`](super::Formula).

use serde::{Deserialize, Serialize};

use super::FormulaContext;
use super::error::FormulaError;

/// Sprite state a formula can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensor {
    /// Current size of the sprite in percent.
    ObjectSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Plus,
    Minus,
    Mult,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    Abs,
    Round,
    Min,
    Max,
    /// Random number between two bounds (inclusive).
    ///
    /// If both bounds are whole numbers the result is a whole number too.
    Rand,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Abs => "abs",
            Function::Round => "round",
            Function::Min => "min",
            Function::Max => "max",
            Function::Rand => "rand",
        }
    }

    fn arity(self) -> usize {
        match self {
            Function::Abs | Function::Round => 1,
            Function::Min | Function::Max | Function::Rand => 2,
        }
    }
}

/// A node of the formula tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormulaElement {
    Number {
        value: f64,
    },
    UserVariable {
        name: String,
    },
    Sensor {
        sensor: Sensor,
    },
    Unary {
        op: UnaryOp,
        operand: Box<FormulaElement>,
    },
    Binary {
        op: BinaryOp,
        left: Box<FormulaElement>,
        right: Box<FormulaElement>,
    },
    Function {
        function: Function,
        args: Vec<FormulaElement>,
    },
}

impl FormulaElement {
    pub fn number(value: f64) -> Self {
        FormulaElement::Number { value }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        FormulaElement::UserVariable { name: name.into() }
    }

    pub fn sensor(sensor: Sensor) -> Self {
        FormulaElement::Sensor { sensor }
    }

    pub fn negate(operand: FormulaElement) -> Self {
        FormulaElement::Unary {
            op: UnaryOp::Minus,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: FormulaElement, right: FormulaElement) -> Self {
        FormulaElement::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(function: Function, args: Vec<FormulaElement>) -> Self {
        FormulaElement::Function { function, args }
    }

    /// Recursively evaluate this node.
    pub fn interpret(&self, ctx: &FormulaContext<'_>) -> Result<f64, FormulaError> {
        match self {
            FormulaElement::Number { value } => Ok(*value),
            FormulaElement::UserVariable { name } => ctx
                .variable(name)
                .ok_or_else(|| FormulaError::UnknownVariable(name.clone())),
            FormulaElement::Sensor { sensor } => match sensor {
                Sensor::ObjectSize => Ok(ctx.size_percent),
            },
            FormulaElement::Unary { op, operand } => {
                let v = operand.interpret(ctx)?;
                match op {
                    UnaryOp::Minus => Ok(-v),
                }
            }
            FormulaElement::Binary { op, left, right } => {
                let l = left.interpret(ctx)?;
                let r = right.interpret(ctx)?;
                match op {
                    BinaryOp::Plus => Ok(l + r),
                    BinaryOp::Minus => Ok(l - r),
                    BinaryOp::Mult => Ok(l * r),
                    BinaryOp::Divide => {
                        if r == 0.0 {
                            Err(FormulaError::DivisionByZero)
                        } else {
                            Ok(l / r)
                        }
                    }
                }
            }
            FormulaElement::Function { function, args } => {
                if args.len() != function.arity() {
                    return Err(FormulaError::Arity {
                        function: function.name(),
                        expected: function.arity(),
                        found: args.len(),
                    });
                }
                let values = args
                    .iter()
                    .map(|a| a.interpret(ctx))
                    .collect::<Result<Vec<f64>, FormulaError>>()?;
                Ok(apply_function(*function, &values))
            }
        }
    }
}

fn apply_function(function: Function, v: &[f64]) -> f64 {
    match function {
        Function::Abs => v[0].abs(),
        Function::Round => v[0].round(),
        Function::Min => v[0].min(v[1]),
        Function::Max => v[0].max(v[1]),
        Function::Rand => random_between(v[0], v[1]),
    }
}

fn random_between(a: f64, b: f64) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo == hi {
        return lo;
    }
    // i64::MAX as f64 rounds up to 2^63, so the upper check is strict
    let fits_i64 = lo >= i64::MIN as f64 && hi < i64::MAX as f64;
    let whole = lo.fract() == 0.0 && hi.fract() == 0.0;
    if whole && fits_i64 {
        fastrand::i64(lo as i64..=hi as i64) as f64
    } else {
        let t = fastrand::f64();
        (lo * (1.0 - t) + hi * t).clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::uservariables::UserVariables;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_arithmetic_precedence_is_tree_shaped() {
        // (2 + 3) * 4
        let e = FormulaElement::binary(
            BinaryOp::Mult,
            FormulaElement::binary(
                BinaryOp::Plus,
                FormulaElement::number(2.0),
                FormulaElement::number(3.0),
            ),
            FormulaElement::number(4.0),
        );
        let v = e.interpret(&FormulaContext::default()).unwrap();
        assert!(approx_eq(v, 20.0));
    }

    #[test]
    fn test_unary_minus() {
        let e = FormulaElement::negate(FormulaElement::number(7.5));
        assert!(approx_eq(
            e.interpret(&FormulaContext::default()).unwrap(),
            -7.5
        ));
    }

    #[test]
    fn test_division_by_zero() {
        let e = FormulaElement::binary(
            BinaryOp::Divide,
            FormulaElement::number(1.0),
            FormulaElement::number(0.0),
        );
        assert_eq!(
            e.interpret(&FormulaContext::default()),
            Err(FormulaError::DivisionByZero)
        );
    }

    #[test]
    fn test_sensor_reads_size() {
        let e = FormulaElement::sensor(Sensor::ObjectSize);
        let ctx = FormulaContext::default().with_size(42.0);
        assert!(approx_eq(e.interpret(&ctx).unwrap(), 42.0));
    }

    #[test]
    fn test_user_variable_lookup() {
        let mut vars = UserVariables::default();
        vars.set("speed", 3.0);
        let ctx = FormulaContext::new(100.0, &vars);
        let e = FormulaElement::variable("speed");
        assert!(approx_eq(e.interpret(&ctx).unwrap(), 3.0));

        let missing = FormulaElement::variable("nope");
        assert_eq!(
            missing.interpret(&ctx),
            Err(FormulaError::UnknownVariable("nope".to_string()))
        );
    }

    #[test]
    fn test_function_arity_checked() {
        let e = FormulaElement::call(Function::Min, vec![FormulaElement::number(1.0)]);
        assert!(matches!(
            e.interpret(&FormulaContext::default()),
            Err(FormulaError::Arity {
                function: "min",
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_functions() {
        let ctx = FormulaContext::default();
        let abs = FormulaElement::call(Function::Abs, vec![FormulaElement::number(-4.0)]);
        let round = FormulaElement::call(Function::Round, vec![FormulaElement::number(2.5)]);
        let max = FormulaElement::call(
            Function::Max,
            vec![FormulaElement::number(1.0), FormulaElement::number(9.0)],
        );
        assert!(approx_eq(abs.interpret(&ctx).unwrap(), 4.0));
        assert!(approx_eq(round.interpret(&ctx).unwrap(), 3.0));
        assert!(approx_eq(max.interpret(&ctx).unwrap(), 9.0));
    }

    #[test]
    fn test_rand_whole_bounds_stay_whole_and_in_range() {
        let e = FormulaElement::call(
            Function::Rand,
            vec![FormulaElement::number(5.0), FormulaElement::number(1.0)],
        );
        for _ in 0..100 {
            let v = e.interpret(&FormulaContext::default()).unwrap();
            assert!((1.0..=5.0).contains(&v));
            assert_eq!(v.fract(), 0.0);
        }
    }

    #[test]
    fn test_rand_equal_bounds_outside_i64_returned_as_is() {
        for bound in [1e19, -1e300, 1e300] {
            let e = FormulaElement::call(
                Function::Rand,
                vec![FormulaElement::number(bound), FormulaElement::number(bound)],
            );
            assert_eq!(e.interpret(&FormulaContext::default()), Ok(bound));
        }
    }

    #[test]
    fn test_rand_whole_bounds_outside_i64_stay_in_range() {
        let e = FormulaElement::call(
            Function::Rand,
            vec![FormulaElement::number(1e19), FormulaElement::number(2e19)],
        );
        for _ in 0..100 {
            let v = e.interpret(&FormulaContext::default()).unwrap();
            assert!((1e19..=2e19).contains(&v));
        }

        let wide = FormulaElement::call(
            Function::Rand,
            vec![FormulaElement::number(-1e308), FormulaElement::number(1e308)],
        );
        for _ in 0..100 {
            let v = wide.interpret(&FormulaContext::default()).unwrap();
            assert!(v.is_finite());
            assert!((-1e308..=1e308).contains(&v));
        }
    }

    #[test]
    fn test_rand_fractional_bounds_in_range() {
        let e = FormulaElement::call(
            Function::Rand,
            vec![FormulaElement::number(0.5), FormulaElement::number(1.5)],
        );
        for _ in 0..100 {
            let v = e.interpret(&FormulaContext::default()).unwrap();
            assert!((0.5..=1.5).contains(&v));
        }
    }
}
