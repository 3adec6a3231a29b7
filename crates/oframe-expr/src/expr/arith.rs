//! Arithmetic over indexed expressions: addition, subtraction, scaling,
//! elementwise multiplication and squaring, with dimensional broadcast.
//!
//! Broadcasting is subset/superset only: an operand whose dimension
//! columns form a strict subset of the other's is replicated across the
//! missing columns (join on the shared columns). Partially overlapping,
//! non-nested dimension sets are rejected.

use crate::expr::constraint::{Constraint, Relation};
use crate::expr::core::{Expression, TermGroup, TermId};
use crate::expr::error::ExprError;
use crate::ids::VariableId;
use crate::index::Key;

/// Position of each `small` column inside `big`, or `None` if not nested.
fn projection(small: &[String], big: &[String]) -> Option<Vec<usize>> {
    small
        .iter()
        .map(|dim| big.iter().position(|d| d == dim))
        .collect()
}

fn project(key: &Key, proj: &[usize]) -> Key {
    proj.iter().map(|&i| key[i].clone()).collect()
}

impl TermGroup {
    /// Append `src`'s terms after the existing ones, merging by term key.
    pub(crate) fn merge_from(&mut self, src: &TermGroup) {
        for (term, coeff) in &src.linear {
            self.merge_linear(*term, *coeff);
        }
        for ((a, b), coeff) in &src.quadratic {
            self.merge_quadratic(*a, *b, *coeff);
        }
    }
}

/// Uniform view of one term for products.
#[derive(Debug, Clone, Copy)]
enum TermKind {
    Const,
    Lin(VariableId),
    Quad(VariableId, VariableId),
}

fn group_terms(group: &TermGroup) -> Vec<(TermKind, f64)> {
    let mut terms: Vec<(TermKind, f64)> = group
        .linear_terms()
        .iter()
        .map(|(t, c)| match t {
            TermId::Constant => (TermKind::Const, *c),
            TermId::Var(id) => (TermKind::Lin(*id), *c),
        })
        .collect();
    terms.extend(
        group
            .quadratic_terms()
            .iter()
            .map(|((a, b), c)| (TermKind::Quad(*a, *b), *c)),
    );
    terms
}

impl Expression {
    /// Outer-join addition with subset/superset broadcasting.
    ///
    /// For every aligned key, `other`'s terms are appended after `self`'s
    /// and merged by term key; keys present in only one operand carry
    /// that operand's terms as-is.
    pub fn add(&self, other: &Expression) -> Result<Expression, ExprError> {
        // Expressions with no groups yet are neutral regardless of dims.
        if self.groups.is_empty() {
            return Ok(other.clone());
        }
        if other.groups.is_empty() {
            return Ok(self.clone());
        }

        if let Some(proj) = projection(&other.dims, &self.dims) {
            let mut result = self.clone();
            if other.dims.len() == self.dims.len() {
                // Same dimension set: outer join, B-only keys appended in
                // B order (reordered into A's column order if needed).
                let inverse = projection(&self.dims, &other.dims)
                    .unwrap_or_else(|| (0..self.dims.len()).collect());
                for (bkey, bgroup) in &other.groups {
                    let rkey = project(bkey, &inverse);
                    result.group_mut(&rkey).merge_from(bgroup);
                }
            } else {
                // B is a strict subset: replicate B across A's keys.
                for (rkey, rgroup) in &mut result.groups {
                    let pkey = project(rkey, &proj);
                    if let Some(bgroup) = other.group(&pkey) {
                        rgroup.merge_from(bgroup);
                    }
                }
            }
            return Ok(result);
        }

        if let Some(proj) = projection(&self.dims, &other.dims) {
            // A is a strict subset: result keys come from B, with A's
            // replicated terms ahead of B's in every group.
            let mut result = Expression {
                dims: other.dims.clone(),
                groups: Vec::new(),
            };
            for (bkey, bgroup) in &other.groups {
                let pkey = project(bkey, &proj);
                let rgroup = result.group_mut(bkey);
                if let Some(agroup) = self.group(&pkey) {
                    rgroup.merge_from(agroup);
                }
                rgroup.merge_from(bgroup);
            }
            return Ok(result);
        }

        Err(ExprError::DimensionMismatch {
            left: self.dims.clone(),
            right: other.dims.clone(),
        })
    }

    /// `self + (-other)`.
    pub fn sub(&self, other: &Expression) -> Result<Expression, ExprError> {
        self.add(&other.negate())
    }

    /// Elementwise product; the result's degree must stay at or below 2.
    pub fn mul(&self, other: &Expression) -> Result<Expression, ExprError> {
        let (left_degree, right_degree) = (self.degree(), other.degree());
        if left_degree + right_degree > 2 {
            return Err(ExprError::DegreeTooHigh {
                left: left_degree,
                right: right_degree,
            });
        }

        // Align like addition, but absent groups multiply to nothing.
        let (big, small, swapped) = if projection(&other.dims, &self.dims).is_some() {
            (self, other, false)
        } else if projection(&self.dims, &other.dims).is_some() {
            (other, self, true)
        } else {
            return Err(ExprError::DimensionMismatch {
                left: self.dims.clone(),
                right: other.dims.clone(),
            });
        };
        let proj = projection(&small.dims, &big.dims)
            .unwrap_or_else(|| (0..big.dims.len()).collect());

        let mut result = Expression {
            dims: big.dims.clone(),
            groups: Vec::new(),
        };
        for (bkey, bgroup) in &big.groups {
            let rgroup = result.group_mut(bkey);
            let Some(sgroup) = small.group(&project(bkey, &proj)) else {
                continue;
            };
            let (lhs, rhs) = if swapped {
                (group_terms(sgroup), group_terms(bgroup))
            } else {
                (group_terms(bgroup), group_terms(sgroup))
            };
            for (aterm, acoeff) in &lhs {
                for (bterm, bcoeff) in &rhs {
                    let coeff = acoeff * bcoeff;
                    match (*aterm, *bterm) {
                        (TermKind::Const, TermKind::Const) => {
                            rgroup.merge_linear(TermId::Constant, coeff);
                        }
                        (TermKind::Const, TermKind::Lin(v)) | (TermKind::Lin(v), TermKind::Const) => {
                            rgroup.merge_linear(TermId::Var(v), coeff);
                        }
                        (TermKind::Lin(a), TermKind::Lin(b)) => {
                            rgroup.merge_quadratic(a, b, coeff);
                        }
                        (TermKind::Const, TermKind::Quad(a, b))
                        | (TermKind::Quad(a, b), TermKind::Const) => {
                            rgroup.merge_quadratic(a, b, coeff);
                        }
                        // Unreachable once the degree guard above passed.
                        _ => {
                            return Err(ExprError::DegreeTooHigh {
                                left: left_degree,
                                right: right_degree,
                            });
                        }
                    }
                }
            }
        }
        Ok(result)
    }

    /// `self * self`; rejected for quadratic input.
    pub fn square(&self) -> Result<Expression, ExprError> {
        self.mul(self)
    }

    /// Fold `self - other`, moving per-key constants to the right-hand side.
    pub fn compare(&self, other: &Expression, relation: Relation) -> Result<Constraint, ExprError> {
        let folded = self.sub(other)?;
        Ok(Constraint::from_folded(folded, relation))
    }

    pub fn le(&self, other: &Expression) -> Result<Constraint, ExprError> {
        self.compare(other, Relation::Le)
    }

    pub fn ge(&self, other: &Expression) -> Result<Constraint, ExprError> {
        self.compare(other, Relation::Ge)
    }

    pub fn eq(&self, other: &Expression) -> Result<Constraint, ExprError> {
        self.compare(other, Relation::Eq)
    }

    pub fn le_value(&self, rhs: f64) -> Result<Constraint, ExprError> {
        self.compare(&Expression::constant(rhs), Relation::Le)
    }

    pub fn ge_value(&self, rhs: f64) -> Result<Constraint, ExprError> {
        self.compare(&Expression::constant(rhs), Relation::Ge)
    }

    pub fn eq_value(&self, rhs: f64) -> Result<Constraint, ExprError> {
        self.compare(&Expression::constant(rhs), Relation::Eq)
    }
}

// ── Scalar operator overloads (infallible forms only) ───────────

impl std::ops::Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::ops::Add<f64> for Expression {
    type Output = Expression;

    fn add(self, rhs: f64) -> Self::Output {
        self.add_constant(rhs)
    }
}

impl std::ops::Sub<f64> for Expression {
    type Output = Expression;

    fn sub(self, rhs: f64) -> Self::Output {
        self.add_constant(-rhs)
    }
}

impl std::ops::Mul<f64> for Expression {
    type Output = Expression;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl std::ops::Add<Expression> for f64 {
    type Output = Expression;

    // The constant lands after the expression's terms: append order
    // follows primitive insertion order, not textual order.
    fn add(self, rhs: Expression) -> Self::Output {
        rhs.add_constant(self)
    }
}

impl std::ops::Sub<Expression> for f64 {
    type Output = Expression;

    fn sub(self, rhs: Expression) -> Self::Output {
        rhs.negate().add_constant(self)
    }
}

impl std::ops::Mul<Expression> for f64 {
    type Output = Expression;

    fn mul(self, rhs: Expression) -> Self::Output {
        rhs.scale(self)
    }
}

// ── Closed operand union with explicit operator dispatch ────────

/// A value an arithmetic operator can act on.
#[derive(Debug, Clone)]
pub enum Operand {
    Scalar(f64),
    Expr(Expression),
}

/// Binary operators over [`Operand`] pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
}

/// Apply `op` to an operand pair; every legal tag combination is
/// enumerated here, so unsupported combinations surface as errors at
/// the dispatch site rather than deep inside the term store.
pub fn apply(op: BinOp, lhs: Operand, rhs: Operand) -> Result<Operand, ExprError> {
    use Operand::{Expr, Scalar};
    Ok(match (op, lhs, rhs) {
        (BinOp::Add, Scalar(a), Scalar(b)) => Scalar(a + b),
        (BinOp::Sub, Scalar(a), Scalar(b)) => Scalar(a - b),
        (BinOp::Mul, Scalar(a), Scalar(b)) => Scalar(a * b),
        (BinOp::Add, Expr(a), Scalar(b)) => Expr(a.add_constant(b)),
        (BinOp::Add, Scalar(a), Expr(b)) => Expr(b.add_constant(a)),
        (BinOp::Sub, Expr(a), Scalar(b)) => Expr(a.add_constant(-b)),
        (BinOp::Sub, Scalar(a), Expr(b)) => Expr(b.negate().add_constant(a)),
        (BinOp::Mul, Expr(a), Scalar(b)) => Expr(a.scale(b)),
        (BinOp::Mul, Scalar(a), Expr(b)) => Expr(b.scale(a)),
        (BinOp::Add, Expr(a), Expr(b)) => Expr(a.add(&b)?),
        (BinOp::Sub, Expr(a), Expr(b)) => Expr(a.sub(&b)?),
        (BinOp::Mul, Expr(a), Expr(b)) => Expr(a.mul(&b)?),
    })
}
