//! Row filter expressions.
//!
//! Expressions are built in code rather than parsed:
//!
//! ```
//! use fuzzpost::query::expr::Expr;
//!
//! // fuzzy_in_text('alice', username) < 2 OR fuzzy_in_text('alice', title) < 2
//! let expr = Expr::or(vec![
//!     Expr::call("fuzzy_in_text", vec![Expr::text("alice"), Expr::field("username")]).lt(Expr::integer(2)),
//!     Expr::call("fuzzy_in_text", vec![Expr::text("alice"), Expr::field("title")]).lt(Expr::integer(2)),
//! ]);
//! assert_eq!(
//!     expr.to_string(),
//!     "(fuzzy_in_text('alice', username) < 2 OR fuzzy_in_text('alice', title) < 2)"
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::FieldValue;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// The operator's symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// An expression evaluated against one row at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Value of a field in the current row; null when absent.
    Field(String),
    /// A constant.
    Literal(FieldValue),
    /// Call to a registered scalar function.
    Call { function: String, args: Vec<Expr> },
    /// Binary comparison.
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Conjunction of all operands.
    And(Vec<Expr>),
    /// Disjunction of all operands.
    Or(Vec<Expr>),
    /// Negation.
    Not(Box<Expr>),
}

#[allow(clippy::should_implement_trait)]
impl Expr {
    pub fn field<S: Into<String>>(name: S) -> Self {
        Expr::Field(name.into())
    }

    pub fn text<S: Into<String>>(value: S) -> Self {
        Expr::Literal(FieldValue::Text(value.into()))
    }

    pub fn integer(value: i64) -> Self {
        Expr::Literal(FieldValue::Integer(value))
    }

    pub fn boolean(value: bool) -> Self {
        Expr::Literal(FieldValue::Boolean(value))
    }

    pub fn call<S: Into<String>>(function: S, args: Vec<Expr>) -> Self {
        Expr::Call {
            function: function.into(),
            args,
        }
    }

    pub fn and(operands: Vec<Expr>) -> Self {
        Expr::And(operands)
    }

    pub fn or(operands: Vec<Expr>) -> Self {
        Expr::Or(operands)
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Not(Box::new(operand))
    }

    /// Compare this expression with another.
    pub fn compare(self, op: CompareOp, other: Expr) -> Self {
        Expr::Compare {
            op,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    pub fn eq(self, other: Expr) -> Self {
        self.compare(CompareOp::Eq, other)
    }

    pub fn ne(self, other: Expr) -> Self {
        self.compare(CompareOp::Ne, other)
    }

    pub fn lt(self, other: Expr) -> Self {
        self.compare(CompareOp::Lt, other)
    }

    pub fn le(self, other: Expr) -> Self {
        self.compare(CompareOp::Le, other)
    }

    pub fn gt(self, other: Expr) -> Self {
        self.compare(CompareOp::Gt, other)
    }

    pub fn ge(self, other: Expr) -> Self {
        self.compare(CompareOp::Ge, other)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Field(name) => write!(f, "{name}"),
            Expr::Literal(FieldValue::Text(s)) => write!(f, "'{}'", s.replace('\'', "''")),
            Expr::Literal(value) => write!(f, "{value}"),
            Expr::Call { function, args } => {
                write!(f, "{function}(")?;
                write_joined(f, args, ", ")?;
                write!(f, ")")
            }
            Expr::Compare { op, left, right } => write!(f, "{left} {} {right}", op.symbol()),
            Expr::And(operands) => {
                write!(f, "(")?;
                write_joined(f, operands, " AND ")?;
                write!(f, ")")
            }
            Expr::Or(operands) => {
                write!(f, "(")?;
                write_joined(f, operands, " OR ")?;
                write!(f, ")")
            }
            Expr::Not(operand) => write!(f, "NOT {operand}"),
        }
    }
}
