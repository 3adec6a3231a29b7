//! Dimensioned decision variables and their creation on the model.

use oframe_expr::{Expression, IdRange, IndexSet, VariableId};
use oframe_solver::VType;

use crate::model::error::ModelError;
use crate::model::Model;
use crate::types::Bounds;

/// Specification for a variable before ids are allocated.
#[derive(Debug, Clone)]
pub struct VariableSpec {
    pub(crate) vtype: VType,
    pub(crate) bounds: Bounds,
    pub(crate) index: Option<IndexSet>,
}

impl VariableSpec {
    /// Continuous, unbounded scalar by default.
    pub fn continuous() -> Self {
        Self {
            vtype: VType::Continuous,
            bounds: Bounds::free(),
            index: None,
        }
    }

    /// Binary variable: integer with bounds fixed at [0, 1].
    pub fn binary() -> Self {
        Self {
            vtype: VType::Binary,
            bounds: Bounds::new(0.0, 1.0),
            index: None,
        }
    }

    /// Integer variable, unbounded by default.
    pub fn integer() -> Self {
        Self {
            vtype: VType::Integer,
            bounds: Bounds::free(),
            index: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Index the variable over a table: one scalar sub-variable per row.
    pub fn over(mut self, index: &IndexSet) -> Self {
        self.index = Some(index.clone());
        self
    }
}

/// A named block of scalar decision variables, one per index row.
///
/// Immutable once created: the id block and index are fixed at
/// construction time.
#[derive(Debug, Clone)]
pub struct Variable {
    ids: IdRange,
    index: Option<IndexSet>,
    vtype: VType,
    bounds: Bounds,
}

impl Variable {
    /// Contiguous id block, assigned to index rows in table order.
    pub fn ids(&self) -> IdRange {
        self.ids
    }

    /// First id in the block.
    pub fn first_id(&self) -> VariableId {
        self.ids.start()
    }

    /// Number of scalar sub-variables.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Dimension column names; empty for a scalar.
    pub fn dims(&self) -> &[String] {
        self.index.as_ref().map_or(&[], |set| set.columns())
    }

    pub fn vtype(&self) -> VType {
        self.vtype
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Initial expression: one coefficient-1 term per index row, keyed
    /// by that row's dimension tuple.
    pub fn to_expr(&self) -> Expression {
        match &self.index {
            None => Expression::variable(self.ids.start()),
            Some(set) => Expression::indexed(
                set.columns().to_vec(),
                set.rows().iter().cloned().zip(self.ids.iter()).collect(),
            ),
        }
    }
}

impl Model {
    /// Create a variable, allocating one id per index row in table order.
    ///
    /// Validation runs before allocation, so a failed creation consumes
    /// no ids.
    pub fn variable(&mut self, spec: VariableSpec) -> Result<Variable, ModelError> {
        let Bounds { lower, upper } = spec.bounds;
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(ModelError::InvalidVariableBounds { lower, upper });
        }

        let count = spec.index.as_ref().map_or(1, IndexSet::len);
        let ids = self.allocator.allocate(count)?;
        let variable = Variable {
            ids,
            index: spec.index,
            vtype: spec.vtype,
            bounds: spec.bounds,
        };
        self.variables.push(variable.clone());

        tracing::debug!(
            component = "model",
            operation = "variable",
            status = "success",
            first_id = ids.start().inner(),
            count,
            vtype = spec.vtype.as_str(),
            "Created variable block"
        );
        Ok(variable)
    }
}
