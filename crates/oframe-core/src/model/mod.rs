//! Model container for indexed optimization models.
//!
//! The [`Model`] owns the id allocator (id 0 is reserved for the
//! constant ONE at construction), the variable list in allocation
//! order, the named element registry, and the optional objective.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`variable`]: Dimensioned variable specs and creation
//! - [`metadata`]: Per-element metadata
//! - [`lower`]: Lowering to a solver backend
//! - [`pretty`]: Human-readable ASCII model formatting

mod error;
mod lower;
mod metadata;
mod pretty;
mod variable;

use std::collections::BTreeMap;

use oframe_expr::{Constraint, Expression, IdAllocator};
use oframe_solver::Sense;
use serde::Serialize;

use crate::types::Objective;

pub use error::ModelError;
pub use pretty::PrettyPrintOptions;
pub use variable::{Variable, VariableSpec};

/// Names that can never be used for registered elements.
pub const DEFAULT_RESERVED_NAMES: &[&str] =
    &["objective", "solver", "params", "attr", "sense", "name", "ONE"];

/// What kind of element sits behind a registered name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Variable,
    Constraint,
}

/// An element that can be registered under a name.
#[derive(Debug, Clone)]
pub enum ModelElement {
    Variable(Variable),
    Constraint(Constraint),
}

/// Serializable headline counts for a model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub scalar_variables: usize,
    pub constraints: usize,
    pub objective: bool,
}

/// A container for variables, constraints, and an objective.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) allocator: IdAllocator,
    pub(crate) variables: Vec<Variable>,
    pub(crate) constraints: Vec<(String, Constraint)>,
    pub(crate) objective: Option<Objective>,
    names: BTreeMap<String, ElementKind>,
    reserved_names: Vec<String>,
    // Lazy-allocated metadata storage
    pub(crate) element_metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl Model {
    /// Create a new empty model with the constant ONE reserved at id 0.
    pub fn new() -> Self {
        Self::with_reserved_names(
            DEFAULT_RESERVED_NAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        )
    }

    /// Create a model with a custom reserved-name allow-list.
    pub fn with_reserved_names(reserved_names: Vec<String>) -> Self {
        Self {
            allocator: IdAllocator::with_constant(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
            names: BTreeMap::new(),
            reserved_names,
            element_metadata: None,
        }
    }

    /// Register an element under a name.
    ///
    /// Registration is the explicit replacement for attribute-assignment
    /// magic: reserved names and duplicates are rejected, and a
    /// registered constraint joins the lowering order.
    pub fn register(&mut self, name: &str, element: ModelElement) -> Result<(), ModelError> {
        if self.reserved_names.iter().any(|r| r == name) {
            return Err(ModelError::ReservedName {
                name: name.to_string(),
            });
        }
        if self.names.contains_key(name) {
            return Err(ModelError::DuplicateElement {
                name: name.to_string(),
            });
        }
        let kind = match element {
            ModelElement::Variable(_) => ElementKind::Variable,
            ModelElement::Constraint(constraint) => {
                self.constraints.push((name.to_string(), constraint));
                ElementKind::Constraint
            }
        };
        self.names.insert(name.to_string(), kind);
        tracing::debug!(
            component = "model",
            operation = "register",
            status = "success",
            name,
            kind = ?kind,
            "Registered model element"
        );
        Ok(())
    }

    /// Check whether a name is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Minimize an expression.
    ///
    /// Returns an error if the model already has an objective or the
    /// expression carries dimensions.
    pub fn minimize(&mut self, expr: Expression) -> Result<(), ModelError> {
        self.set_objective(Sense::Minimize, expr)
    }

    /// Maximize an expression.
    pub fn maximize(&mut self, expr: Expression) -> Result<(), ModelError> {
        self.set_objective(Sense::Maximize, expr)
    }

    fn set_objective(&mut self, sense: Sense, expr: Expression) -> Result<(), ModelError> {
        if self.objective.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        if !expr.dims().is_empty() {
            return Err(ModelError::ObjectiveNotScalar {
                dims: expr.dims().to_vec(),
            });
        }
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            degree = expr.degree(),
            "Set objective function"
        );
        self.objective = Some(Objective { sense, expr });
        Ok(())
    }

    /// The objective, if one was set.
    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    /// Variables in allocation order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Registered constraints in registration order.
    pub fn constraints(&self) -> &[(String, Constraint)] {
        &self.constraints
    }

    /// Total scalar sub-variables created (excluding the constant ONE).
    pub fn num_scalar_variables(&self) -> usize {
        self.variables.iter().map(Variable::len).sum()
    }

    /// Headline counts.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            scalar_variables: self.num_scalar_variables(),
            constraints: self.constraints.len(),
            objective: self.objective.is_some(),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Model, ModelElement, ModelError, VariableSpec};
    use oframe_expr::Expression;

    #[test]
    fn new_model_is_empty() {
        let model = Model::new();
        assert_eq!(model.num_scalar_variables(), 0);
        assert!(model.constraints().is_empty());
        assert!(model.objective().is_none());
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut model = Model::new();
        let var = model
            .variable(VariableSpec::continuous())
            .expect("variable");
        model
            .register("X", ModelElement::Variable(var.clone()))
            .expect("first registration");

        let result = model.register("X", ModelElement::Variable(var));
        assert!(matches!(result, Err(ModelError::DuplicateElement { .. })));
    }

    #[test]
    fn register_rejects_reserved_names() {
        let mut model = Model::new();
        let var = model
            .variable(VariableSpec::continuous())
            .expect("variable");
        let result = model.register("objective", ModelElement::Variable(var));
        assert!(matches!(result, Err(ModelError::ReservedName { .. })));
    }

    #[test]
    fn custom_reserved_list_is_honored() {
        let mut model = Model::with_reserved_names(vec!["plan".to_string()]);
        let var = model
            .variable(VariableSpec::continuous())
            .expect("variable");
        assert!(matches!(
            model.register("plan", ModelElement::Variable(var.clone())),
            Err(ModelError::ReservedName { .. })
        ));
        model
            .register("objective", ModelElement::Variable(var))
            .expect("not reserved under custom list");
    }

    #[test]
    fn constraints_keep_registration_order() {
        let mut model = Model::new();
        let x = model
            .variable(VariableSpec::continuous())
            .expect("x")
            .to_expr();
        let y = model
            .variable(VariableSpec::continuous())
            .expect("y")
            .to_expr();

        model
            .register(
                "second_last",
                ModelElement::Constraint(x.le_value(10.0).expect("constraint")),
            )
            .expect("register");
        model
            .register(
                "last",
                ModelElement::Constraint(y.ge_value(0.0).expect("constraint")),
            )
            .expect("register");

        let names: Vec<&str> = model
            .constraints()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, vec!["second_last", "last"]);
    }

    #[test]
    fn second_objective_is_rejected() {
        let mut model = Model::new();
        let expr = model
            .variable(VariableSpec::continuous())
            .expect("variable")
            .to_expr();
        model.minimize(expr.clone()).expect("first objective");
        assert!(matches!(
            model.maximize(expr),
            Err(ModelError::MultipleObjectives)
        ));
    }

    #[test]
    fn dimensioned_objective_is_rejected() {
        let mut model = Model::new();
        let index = oframe_expr::IndexSet::single(
            "t",
            vec![oframe_expr::KeyValue::Int(1), oframe_expr::KeyValue::Int(2)],
        )
        .expect("index");
        let expr = model
            .variable(VariableSpec::continuous().over(&index))
            .expect("variable")
            .to_expr();
        assert!(matches!(
            model.minimize(expr),
            Err(ModelError::ObjectiveNotScalar { .. })
        ));
    }

    #[test]
    fn summary_counts_scalars() {
        let mut model = Model::new();
        let index = oframe_expr::IndexSet::single(
            "t",
            vec![oframe_expr::KeyValue::Int(1), oframe_expr::KeyValue::Int(2)],
        )
        .expect("index");
        model
            .variable(VariableSpec::continuous().over(&index))
            .expect("indexed");
        model.variable(VariableSpec::binary()).expect("scalar");

        let summary = model.summary();
        assert_eq!(summary.scalar_variables, 3);
        assert_eq!(summary.constraints, 0);
        assert!(!summary.objective);

        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["scalar_variables"], 3);
    }

    #[test]
    fn objective_can_hold_constant_expression() {
        let mut model = Model::new();
        model
            .minimize(Expression::constant(4.0))
            .expect("constant objective");
        assert!(model.objective().is_some());
    }
}
