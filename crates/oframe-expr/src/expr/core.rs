//! Core expression type: per-key term buckets partitioned by degree.
//!
//! An [`Expression`] is a collection of term groups, one group per
//! dimension key. Each group holds two ordered buckets:
//! - degree 0/1: `(TermId, f64)` where `TermId::Constant` is the explicit
//!   constant-term variant (replacing a magic variable id),
//! - degree 2:   `((VariableId, VariableId), f64)` with the pair stored
//!   in ascending id order so `(i,j)` and `(j,i)` contributions merge.
//!
//! Bucket order is append order: a term sits where it was first
//! introduced and stays there when later contributions accumulate into
//! it. Group order follows the order keys are first encountered, which
//! for single-table expressions is the table's row order.

use crate::ids::VariableId;
use crate::index::Key;

/// Term identity inside the degree-0/1 bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermId {
    /// The constant contribution, lowered against the reserved ONE variable.
    Constant,
    Var(VariableId),
}

/// Ordered term buckets for one dimension key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermGroup {
    pub(crate) linear: Vec<(TermId, f64)>,
    pub(crate) quadratic: Vec<((VariableId, VariableId), f64)>,
}

impl TermGroup {
    /// Merge a degree-0/1 contribution: accumulate in place if the term
    /// is already present, append otherwise.
    pub(crate) fn merge_linear(&mut self, term: TermId, coeff: f64) {
        if let Some(slot) = self.linear.iter_mut().find(|(t, _)| *t == term) {
            slot.1 += coeff;
        } else {
            self.linear.push((term, coeff));
        }
    }

    /// Merge a degree-2 contribution under the canonical ascending pair.
    pub(crate) fn merge_quadratic(&mut self, a: VariableId, b: VariableId, coeff: f64) {
        let pair = if a <= b { (a, b) } else { (b, a) };
        if let Some(slot) = self.quadratic.iter_mut().find(|(p, _)| *p == pair) {
            slot.1 += coeff;
        } else {
            self.quadratic.push((pair, coeff));
        }
    }

    pub fn linear_terms(&self) -> &[(TermId, f64)] {
        &self.linear
    }

    pub fn quadratic_terms(&self) -> &[((VariableId, VariableId), f64)] {
        &self.quadratic
    }

    /// Constant contribution of this group, zero if absent.
    pub fn constant(&self) -> f64 {
        self.linear
            .iter()
            .find(|(t, _)| *t == TermId::Constant)
            .map_or(0.0, |(_, c)| *c)
    }

    /// Drop the constant term, preserving the order of the rest.
    pub(crate) fn strip_constant(&mut self) -> f64 {
        let constant = self.constant();
        self.linear.retain(|(t, _)| *t != TermId::Constant);
        constant
    }

    fn has_variable_terms(&self) -> bool {
        self.linear.iter().any(|(t, _)| matches!(t, TermId::Var(_)))
    }
}

/// An indexed linear or quadratic expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    pub(crate) dims: Vec<String>,
    pub(crate) groups: Vec<(Key, TermGroup)>,
}

impl Expression {
    /// Empty expression: no dimensions, no terms.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A bare constant (scalar, dimensionless).
    pub fn constant(value: f64) -> Self {
        let mut group = TermGroup::default();
        group.merge_linear(TermId::Constant, value);
        Self {
            dims: Vec::new(),
            groups: vec![(Key::new(), group)],
        }
    }

    /// A single scalar variable with coefficient 1.
    pub fn variable(id: VariableId) -> Self {
        let mut group = TermGroup::default();
        group.merge_linear(TermId::Var(id), 1.0);
        Self {
            dims: Vec::new(),
            groups: vec![(Key::new(), group)],
        }
    }

    /// One coefficient-1 term per row of a dimensioned variable block,
    /// in table row order.
    pub fn indexed(dims: Vec<String>, rows: Vec<(Key, VariableId)>) -> Self {
        let groups = rows
            .into_iter()
            .map(|(key, id)| {
                let mut group = TermGroup::default();
                group.merge_linear(TermId::Var(id), 1.0);
                (key, group)
            })
            .collect();
        Self { dims, groups }
    }

    /// Dimension column names, in order.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Term groups in append order.
    pub fn groups(&self) -> &[(Key, TermGroup)] {
        &self.groups
    }

    /// Highest degree of any term (0 = constant only).
    pub fn degree(&self) -> usize {
        if self.groups.iter().any(|(_, g)| !g.quadratic.is_empty()) {
            2
        } else if self.groups.iter().any(|(_, g)| g.has_variable_terms()) {
            1
        } else {
            0
        }
    }

    /// Mutable group for `key`, appended at the end if absent.
    pub(crate) fn group_mut(&mut self, key: &Key) -> &mut TermGroup {
        if let Some(pos) = self.groups.iter().position(|(k, _)| k == key) {
            return &mut self.groups[pos].1;
        }
        self.groups.push((key.clone(), TermGroup::default()));
        let last = self.groups.len() - 1;
        &mut self.groups[last].1
    }

    /// Group for `key`, if present.
    pub(crate) fn group(&self, key: &Key) -> Option<&TermGroup> {
        self.groups.iter().find(|(k, _)| k == key).map(|(_, g)| g)
    }

    /// Append a constant contribution to every group (at the end of each
    /// group's degree-0/1 bucket unless the constant is already present).
    ///
    /// An expression with no groups gains a dimensionless constant group.
    pub fn add_constant(&self, value: f64) -> Self {
        let mut result = self.clone();
        if result.groups.is_empty() {
            return Expression::constant(value);
        }
        for (_, group) in &mut result.groups {
            group.merge_linear(TermId::Constant, value);
        }
        result
    }

    /// Scale every coefficient by `by`; zero drops all terms.
    pub fn scale(&self, by: f64) -> Self {
        let groups = self
            .groups
            .iter()
            .map(|(key, group)| {
                let scaled = TermGroup {
                    linear: group
                        .linear
                        .iter()
                        .map(|(t, c)| (*t, *c * by))
                        .filter(|(_, c)| *c != 0.0)
                        .collect(),
                    quadratic: group
                        .quadratic
                        .iter()
                        .map(|(p, c)| (*p, *c * by))
                        .filter(|(_, c)| *c != 0.0)
                        .collect(),
                };
                (key.clone(), scaled)
            })
            .collect();
        Self {
            dims: self.dims.clone(),
            groups,
        }
    }

    /// Flip the sign of every coefficient, preserving order.
    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }
}
