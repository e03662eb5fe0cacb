//! Abstract Syntax Tree for gate chains.

use std::f64::consts::PI;
use std::fmt;

use qsv_ir::{ArgValue, GateArgs, Quoted, Target};
use serde::{Deserialize, Serialize};

use crate::error::{ChainError, ChainResult};

/// A complete chain: `segment.segment.…`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    /// Segments in application order.
    pub segments: Vec<Segment>,
}

/// One `name(args)…[target]` step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Gate or macro name.
    pub name: String,
    /// Argument lists, one per call, in source order.
    pub calls: Vec<Vec<Argument>>,
    /// Target between the brackets.
    pub target: Target,
}

/// A positional or keyword argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Keyword, for `name = expr`.
    pub name: Option<String>,
    /// Value expression.
    pub value: Expression,
}

/// An argument expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// Boolean literal.
    Bool(bool),
    /// String literal.
    Str(String),
    /// π.
    Pi,
    /// Negation.
    Neg(Box<Expression>),
    /// Binary operation.
    BinOp {
        left: Box<Expression>,
        op: BinOp,
        right: Box<Expression>,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

/// Numeric intermediate used while folding an expression.
#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(v) => v,
        }
    }
}

impl Expression {
    /// Fold the expression into a single argument value.
    ///
    /// Integer arithmetic stays integral except for `/`, which always yields
    /// a float. Float results must be finite. Booleans and strings are only
    /// valid as whole arguments.
    pub fn evaluate(&self) -> ChainResult<ArgValue> {
        match self {
            Expression::Bool(b) => Ok(ArgValue::Bool(*b)),
            Expression::Str(s) => Ok(ArgValue::Str(s.clone())),
            other => match other.number()? {
                Number::Int(i) => Ok(ArgValue::Int(i)),
                Number::Float(v) if v.is_finite() => Ok(ArgValue::Float(v)),
                Number::Float(_) => Err(ChainError::InvalidExpression(format!(
                    "{self} does not evaluate to a finite number"
                ))),
            },
        }
    }

    fn number(&self) -> ChainResult<Number> {
        match self {
            Expression::Int(i) => Ok(Number::Int(*i)),
            Expression::Float(v) => Ok(Number::Float(*v)),
            Expression::Pi => Ok(Number::Float(PI)),
            Expression::Bool(_) | Expression::Str(_) => Err(ChainError::InvalidExpression(
                format!("{self} cannot be used in arithmetic"),
            )),
            Expression::Neg(inner) => match inner.number()? {
                Number::Int(i) => i
                    .checked_neg()
                    .map(Number::Int)
                    .ok_or_else(|| overflow(self)),
                Number::Float(v) => Ok(Number::Float(-v)),
            },
            Expression::BinOp { left, op, right } => {
                let (l, r) = (left.number()?, right.number()?);
                let int = |value: Option<i64>| {
                    value.map(Number::Int).ok_or_else(|| overflow(self))
                };
                match (l, r, op) {
                    (Number::Int(a), Number::Int(b), BinOp::Add) => int(a.checked_add(b)),
                    (Number::Int(a), Number::Int(b), BinOp::Sub) => int(a.checked_sub(b)),
                    (Number::Int(a), Number::Int(b), BinOp::Mul) => int(a.checked_mul(b)),
                    (l, r, op) => {
                        let (a, b) = (l.as_f64(), r.as_f64());
                        Ok(Number::Float(match op {
                            BinOp::Add => a + b,
                            BinOp::Sub => a - b,
                            BinOp::Mul => a * b,
                            BinOp::Div if b == 0.0 => {
                                return Err(ChainError::InvalidExpression(format!(
                                    "division by zero in {self}"
                                )));
                            }
                            BinOp::Div => a / b,
                        }))
                    }
                }
            }
        }
    }
}

fn overflow(expr: &Expression) -> ChainError {
    ChainError::InvalidExpression(format!("integer overflow in {expr}"))
}

impl Segment {
    /// Evaluate the arguments of each call.
    pub fn evaluate_calls(&self) -> ChainResult<Vec<GateArgs>> {
        self.calls
            .iter()
            .map(|call| {
                call.iter().try_fold(GateArgs::new(), |args, arg| {
                    let value = arg.value.evaluate()?;
                    Ok(match &arg.name {
                        Some(name) => args.kwarg(name.clone(), value),
                        None => args.arg(value),
                    })
                })
            })
            .collect()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Int(i) => write!(f, "{i}"),
            Expression::Float(v) => write!(f, "{v:?}"),
            Expression::Bool(b) => write!(f, "{b}"),
            Expression::Str(s) => write!(f, "{}", Quoted(s)),
            Expression::Pi => write!(f, "pi"),
            Expression::Neg(inner) => write!(f, "-{inner}"),
            Expression::BinOp { left, op, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}=")?;
        }
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for call in &self.calls {
            write!(f, "(")?;
            for (i, arg) in call.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ")")?;
        }
        match &self.target {
            Target::Tuple(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            other => write!(f, "[{other}]"),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
