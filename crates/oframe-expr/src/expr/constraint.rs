//! Constraints: a folded expression, a relation, and per-key constants.

use crate::expr::core::Expression;

/// Comparison relation between the folded expression and its constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Le,
    Eq,
    Ge,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Le => "le",
            Relation::Eq => "eq",
            Relation::Ge => "ge",
        }
    }

    /// Rendering token.
    pub fn token(self) -> &'static str {
        match self {
            Relation::Le => "<=",
            Relation::Eq => "=",
            Relation::Ge => ">=",
        }
    }
}

/// An immutable constraint in `expr <relation> constant` form.
///
/// Built from a user comparison by folding `lhs - rhs`, stripping the
/// degree-0 term of every dimension-key group and negating it into the
/// per-key constant (absent constant means 0).
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    expr: Expression,
    relation: Relation,
    rhs: Vec<f64>,
}

impl Constraint {
    pub(crate) fn from_folded(mut folded: Expression, relation: Relation) -> Self {
        let rhs = folded
            .groups
            .iter_mut()
            .map(|(_, group)| -group.strip_constant())
            .collect();
        Self {
            expr: folded,
            relation,
            rhs,
        }
    }

    /// The folded expression; its constant terms have been moved to
    /// [`Constraint::rhs`].
    pub fn expr(&self) -> &Expression {
        &self.expr
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Right-hand-side constants, parallel to the expression's groups.
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }
}
