//! The solver backend boundary.
//!
//! A backend receives finalized variables, constraints, and objectives
//! from the model core and owns the actual solve. Backend variable ids
//! must stay in 1:1 correspondence with core ids: the core calls
//! [`SolverBackend::add_variable`] once per scalar sub-variable, in
//! allocation order, starting with the constant ONE.

use oframe_expr::{Relation, VariableId};
use serde_json::Value;

use crate::{SolverError, SolverStatus};

/// Variable domain kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VType {
    Continuous,
    Binary,
    Integer,
}

impl VType {
    pub fn as_str(self) -> &'static str {
        match self {
            VType::Continuous => "continuous",
            VType::Binary => "binary",
            VType::Integer => "integer",
        }
    }
}

/// Optimization sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "min",
            Sense::Maximize => "max",
        }
    }
}

/// Interface every solver backend must implement.
pub trait SolverBackend {
    /// Register one scalar variable; returns the backend's id for it.
    fn add_variable(
        &mut self,
        lower: f64,
        upper: f64,
        vtype: VType,
        name: &str,
    ) -> Result<u32, SolverError>;

    /// Register a linear constraint row.
    fn add_linear_constraint(
        &mut self,
        terms: &[(VariableId, f64)],
        relation: Relation,
        rhs: f64,
    ) -> Result<(), SolverError>;

    /// Register a quadratic constraint row.
    fn add_quadratic_constraint(
        &mut self,
        linear: &[(VariableId, f64)],
        quadratic: &[((VariableId, VariableId), f64)],
        relation: Relation,
        rhs: f64,
    ) -> Result<(), SolverError>;

    /// Install the objective function.
    fn set_objective(
        &mut self,
        sense: Sense,
        linear: &[(VariableId, f64)],
        quadratic: &[((VariableId, VariableId), f64)],
    ) -> Result<(), SolverError>;

    /// Run the solve.
    fn optimize(&mut self) -> Result<SolverStatus, SolverError>;

    /// Forward a model attribute to the backend.
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), SolverError>;

    /// Read a model attribute from the backend.
    fn get_attribute(&self, name: &str) -> Result<Value, SolverError>;

    /// Forward a raw solver parameter to the backend.
    fn set_parameter(&mut self, name: &str, value: Value) -> Result<(), SolverError>;

    /// Read a raw solver parameter from the backend.
    fn get_parameter(&self, name: &str) -> Result<Value, SolverError>;
}
