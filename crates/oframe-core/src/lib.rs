//! Model container for indexed optimization models.
//!
//! `oframe-core` ties the expression algebra in `oframe-expr` to the
//! solver boundary in `oframe-solver`: a [`Model`] owns the id
//! allocator, creates dimensioned variables, registers named elements,
//! and lowers everything to a [`SolverBackend`](oframe_solver::SolverBackend).
//!
//! # Example
//!
//! ```
//! use oframe_core::{Model, ModelElement, VariableSpec};
//!
//! let mut model = Model::new();
//! let x = model.variable(VariableSpec::continuous())?;
//! let expr = x.to_expr().scale(2.0);
//! model.register("limit", ModelElement::Constraint(expr.clone().le_value(10.0)?))?;
//! model.minimize(expr)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod model;
pub mod types;

pub use model::{
    Model, ModelElement, ModelError, ModelSummary, PrettyPrintOptions, Variable, VariableSpec,
    DEFAULT_RESERVED_NAMES,
};
pub use types::{Bounds, Objective};
