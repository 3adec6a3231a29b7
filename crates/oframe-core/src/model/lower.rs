//! Lowering a model to a solver backend.
//!
//! Lowering visits the model in a fixed order: the constant ONE first,
//! then every scalar sub-variable in allocation order, then constraints
//! in registration order (one backend row per dimension-key group), and
//! finally the objective. Backend ids must come back in 1:1
//! correspondence with core ids; a divergence aborts the lowering.

use oframe_expr::{Constraint, TermId, VariableId};
use oframe_solver::{SolverBackend, SolverConfig, SolverStatus, VType};

use crate::model::error::ModelError;
use crate::model::Model;

impl Model {
    /// Push the model's variables, constraints, and objective into a
    /// backend.
    pub fn realize<B: SolverBackend>(&self, backend: &mut B) -> Result<(), ModelError> {
        self.lower_variables(backend)?;

        for (name, constraint) in &self.constraints {
            lower_constraint(backend, constraint)?;
            tracing::debug!(
                component = "lowering",
                operation = "constraint",
                status = "success",
                name = name.as_str(),
                rows = constraint.rhs().len(),
                "Lowered constraint rows"
            );
        }

        if let Some(objective) = &self.objective {
            let (linear, quadratic) = match objective.expr.groups().first() {
                Some((_, group)) => {
                    collect_terms(group.linear_terms(), group.quadratic_terms())
                }
                None => (Vec::new(), Vec::new()),
            };
            backend.set_objective(objective.sense, &linear, &quadratic)?;
            tracing::debug!(
                component = "lowering",
                operation = "objective",
                status = "success",
                sense = objective.sense.as_str(),
                linear_terms = linear.len(),
                quadratic_terms = quadratic.len(),
                "Lowered objective"
            );
        }
        Ok(())
    }

    /// Realize the model, forward configuration, and run the solve.
    pub fn optimize<B: SolverBackend>(
        &self,
        backend: &mut B,
        config: &SolverConfig,
    ) -> Result<SolverStatus, ModelError> {
        self.realize(backend)?;
        apply_config(backend, config)?;
        let status = backend.optimize()?;
        tracing::debug!(
            component = "lowering",
            operation = "optimize",
            status = status.as_str(),
            "Solve finished"
        );
        Ok(status)
    }

    fn lower_variables<B: SolverBackend>(&self, backend: &mut B) -> Result<(), ModelError> {
        // ONE goes in first so backend id 0 matches VariableId::CONSTANT.
        let one = backend.add_variable(1.0, 1.0, VType::Continuous, "ONE")?;
        if one != VariableId::CONSTANT.inner() {
            return Err(ModelError::BackendIdMismatch {
                expected: VariableId::CONSTANT.inner(),
                got: one,
            });
        }

        for variable in &self.variables {
            let bounds = variable.bounds();
            for id in variable.ids().iter() {
                let got = backend.add_variable(
                    bounds.lower,
                    bounds.upper,
                    variable.vtype(),
                    &id.token(),
                )?;
                if got != id.inner() {
                    return Err(ModelError::BackendIdMismatch {
                        expected: id.inner(),
                        got,
                    });
                }
            }
        }
        tracing::debug!(
            component = "lowering",
            operation = "variables",
            status = "success",
            count = self.allocator.issued(),
            "Lowered scalar variables"
        );
        Ok(())
    }
}

fn lower_constraint<B: SolverBackend>(
    backend: &mut B,
    constraint: &Constraint,
) -> Result<(), ModelError> {
    let relation = constraint.relation();
    for (group_idx, (_, group)) in constraint.expr().groups().iter().enumerate() {
        let rhs = constraint.rhs()[group_idx];
        let (linear, quadratic) = collect_terms(group.linear_terms(), group.quadratic_terms());
        if quadratic.is_empty() {
            backend.add_linear_constraint(&linear, relation, rhs)?;
        } else {
            backend.add_quadratic_constraint(&linear, &quadratic, relation, rhs)?;
        }
    }
    Ok(())
}

/// Zero coefficients are kept in the store but never reach a backend.
fn collect_terms(
    linear: &[(TermId, f64)],
    quadratic: &[((VariableId, VariableId), f64)],
) -> (Vec<(VariableId, f64)>, Vec<((VariableId, VariableId), f64)>) {
    let linear = linear
        .iter()
        .filter(|(_, coeff)| *coeff != 0.0)
        .map(|(term, coeff)| {
            let id = match term {
                TermId::Constant => VariableId::CONSTANT,
                TermId::Var(id) => *id,
            };
            (id, *coeff)
        })
        .collect();
    let quadratic = quadratic
        .iter()
        .filter(|(_, coeff)| *coeff != 0.0)
        .copied()
        .collect();
    (linear, quadratic)
}

fn apply_config<B: SolverBackend>(
    backend: &mut B,
    config: &SolverConfig,
) -> Result<(), ModelError> {
    if let Some(seconds) = config.time_limit {
        backend.set_parameter("time_limit", serde_json::Value::from(seconds))?;
    }
    if let Some(gap) = config.mip_gap {
        backend.set_parameter("mip_gap", serde_json::Value::from(gap))?;
    }
    if let Some(enabled) = config.presolve {
        backend.set_parameter("presolve", serde_json::Value::from(enabled))?;
    }
    if let Some(count) = config.threads {
        backend.set_parameter("threads", serde_json::Value::from(count))?;
    }
    if let Some(enabled) = config.log_to_console {
        backend.set_parameter("log_to_console", serde_json::Value::from(enabled))?;
    }
    Ok(())
}
