//! Row-at-a-time expression evaluation.
//!
//! Evaluation follows SQL's three-valued logic: a missing field reads as
//! null, comparisons against null are null, `AND` is false as soon as one
//! operand is false and `OR` is true as soon as one operand is true. A row
//! passes a filter only when the expression is exactly `true`.

use std::cmp::Ordering;

use crate::document::{Document, FieldValue};
use crate::error::{FuzzpostError, Result};
use crate::function::FunctionRegistry;
use crate::query::expr::{CompareOp, Expr};

/// Evaluates [`Expr`] trees against documents.
#[derive(Debug, Clone)]
pub struct RowEvaluator {
    registry: FunctionRegistry,
}

impl Default for RowEvaluator {
    fn default() -> Self {
        Self::new(FunctionRegistry::with_builtins())
    }
}

impl RowEvaluator {
    /// Create an evaluator resolving calls through the given registry.
    pub fn new(registry: FunctionRegistry) -> Self {
        RowEvaluator { registry }
    }

    /// The functions available to expressions.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Evaluate an expression for one row.
    pub fn evaluate(&self, expr: &Expr, doc: &Document) -> Result<FieldValue> {
        match expr {
            Expr::Field(name) => Ok(doc.get_field(name).cloned().unwrap_or(FieldValue::Null)),
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Call { function, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg, doc))
                    .collect::<Result<Vec<_>>>()?;
                self.registry.call(function, &values)
            }
            Expr::Compare { op, left, right } => {
                let left = self.evaluate(left, doc)?;
                let right = self.evaluate(right, doc)?;
                compare(*op, &left, &right)
            }
            Expr::And(operands) => {
                let mut saw_null = false;
                for operand in operands {
                    match self.evaluate_logical(operand, doc)? {
                        Some(false) => return Ok(FieldValue::Boolean(false)),
                        Some(true) => {}
                        None => saw_null = true,
                    }
                }
                Ok(if saw_null {
                    FieldValue::Null
                } else {
                    FieldValue::Boolean(true)
                })
            }
            Expr::Or(operands) => {
                let mut saw_null = false;
                for operand in operands {
                    match self.evaluate_logical(operand, doc)? {
                        Some(true) => return Ok(FieldValue::Boolean(true)),
                        Some(false) => {}
                        None => saw_null = true,
                    }
                }
                Ok(if saw_null {
                    FieldValue::Null
                } else {
                    FieldValue::Boolean(false)
                })
            }
            Expr::Not(operand) => Ok(match self.evaluate_logical(operand, doc)? {
                Some(b) => FieldValue::Boolean(!b),
                None => FieldValue::Null,
            }),
        }
    }

    /// Whether a row passes the filter expression.
    pub fn matches(&self, expr: &Expr, doc: &Document) -> Result<bool> {
        Ok(self.evaluate_logical(expr, doc)?.unwrap_or(false))
    }

    /// Ids of the rows passing the filter, in input order.
    pub fn filter(&self, expr: &Expr, docs: &[Document]) -> Result<Vec<u64>> {
        let mut ids = Vec::new();
        for doc in docs {
            if self.matches(expr, doc)? {
                ids.push(doc.id());
            }
        }
        log::debug!("Filter {expr} kept {} of {} rows", ids.len(), docs.len());
        Ok(ids)
    }

    /// Evaluate an expression that must be boolean or null.
    fn evaluate_logical(&self, expr: &Expr, doc: &Document) -> Result<Option<bool>> {
        match self.evaluate(expr, doc)? {
            FieldValue::Boolean(b) => Ok(Some(b)),
            FieldValue::Null => Ok(None),
            other => Err(FuzzpostError::query(format!(
                "expected a boolean from {expr}, got {}",
                other.type_name()
            ))),
        }
    }
}

fn compare(op: CompareOp, left: &FieldValue, right: &FieldValue) -> Result<FieldValue> {
    let ordering = match (left, right) {
        (FieldValue::Null, _) | (_, FieldValue::Null) => return Ok(FieldValue::Null),
        (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
        (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
        (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
        _ => {
            return Err(FuzzpostError::query(format!(
                "cannot compare {} {} {}",
                left.type_name(),
                op.symbol(),
                right.type_name()
            )));
        }
    };

    let result = match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Le => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Ge => ordering != Ordering::Less,
    };
    Ok(FieldValue::Boolean(result))
}
