//! Shared model-side value types.

use oframe_expr::{Expression, RenderOptions};
use oframe_solver::Sense;

/// Bounds for a scalar variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Unbounded in both directions.
    pub fn free() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }
}

/// Objective function: a sense and a dimensionless expression.
#[derive(Debug, Clone)]
pub struct Objective {
    pub sense: Sense,
    pub expr: Expression,
}

impl Objective {
    /// Rendering options for objectives: quadratic coefficients carry
    /// the Hessian factor of 2, and constants stay as explicit `x0` terms.
    pub fn render_options() -> RenderOptions {
        RenderOptions::new()
            .with_const_variable(true)
            .with_quadratic_divider(2.0)
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.expr.to_display_string(&Self::render_options()) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => f.write_str("<invalid objective>"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::{Bounds, Objective};
    use oframe_expr::{Expression, VariableId};
    use oframe_solver::Sense;

    #[test]
    fn free_bounds_are_infinite() {
        let bounds = Bounds::free();
        assert!(bounds.lower.is_infinite() && bounds.lower < 0.0);
        assert!(bounds.upper.is_infinite() && bounds.upper > 0.0);
    }

    #[test]
    fn objective_renders_with_hessian_divider() {
        let v = VariableId::new(1);
        let expr = Expression::variable(v)
            .square()
            .expect("square")
            .scale(3.0);
        let objective = Objective {
            sense: Sense::Minimize,
            expr,
        };
        assert_eq!(objective.to_string(), "[ 6 x1 * x1 ] / 2");
    }
}
