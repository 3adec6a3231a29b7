//! Canonical string rendering for expressions and constraints.
//!
//! The textual format is a bit-exact contract: signed-number layout,
//! per-dimension-group bracket headers, the quadratic bracket-and-divider
//! syntax, and term ordering all follow the stored append order and are
//! never re-sorted.

use std::fmt::Write as _;

use crate::expr::constraint::Constraint;
use crate::expr::core::{Expression, TermGroup, TermId};
use crate::expr::error::ExprError;
use crate::ids::VariableId;
use crate::index::format_key;

/// Formatting controls for canonical output.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Force an explicit `+` on the very first rendered term.
    pub include_prefix: bool,
    /// Keep nonzero constants as explicit terms against the reserved
    /// constant variable (`x0`) instead of a trailing bare number.
    pub include_const_variable: bool,
    /// Emit `[key]: ` group headers when more than one group is present.
    pub include_header: bool,
    /// Display-time scaling for quadratic coefficients; printed as a
    /// trailing `/ divider` when it differs from 1.
    pub quadratic_divider: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_prefix: false,
            include_const_variable: false,
            include_header: true,
            quadratic_divider: 1.0,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, enabled: bool) -> Self {
        self.include_prefix = enabled;
        self
    }

    pub fn with_const_variable(mut self, enabled: bool) -> Self {
        self.include_const_variable = enabled;
        self
    }

    pub fn with_header(mut self, enabled: bool) -> Self {
        self.include_header = enabled;
        self
    }

    pub fn with_quadratic_divider(mut self, divider: f64) -> Self {
        self.quadratic_divider = divider;
        self
    }

    fn validate(&self) -> Result<(), ExprError> {
        if !self.quadratic_divider.is_finite() || self.quadratic_divider <= 0.0 {
            return Err(ExprError::InvalidQuadraticDivider {
                divider: self.quadratic_divider,
            });
        }
        Ok(())
    }
}

/// Minimal faithful decimal form: the shortest representation that
/// round-trips, so input precision is preserved exactly.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-inf".to_string()
        } else {
            "inf".to_string()
        };
    }
    let normalized = if value == 0.0 { 0.0 } else { value };
    format!("{normalized}")
}

fn push_signed(out: &mut String, first: bool, force_prefix: bool, coeff: f64, body: &str) {
    let magnitude = coeff.abs();
    let mag_str = if magnitude == 1.0 && !body.is_empty() {
        String::new()
    } else if body.is_empty() {
        format_number(magnitude)
    } else {
        format!("{} ", format_number(magnitude))
    };
    if first {
        let sign = if coeff < 0.0 {
            "-"
        } else if force_prefix {
            "+"
        } else {
            ""
        };
        let _ = write!(out, "{sign}{mag_str}{body}");
    } else {
        let sign = if coeff < 0.0 { "-" } else { "+" };
        let _ = write!(out, " {sign}{mag_str}{body}");
    }
}

fn render_group(group: &TermGroup, options: &RenderOptions, rhs: Option<(&str, f64)>) -> String {
    let mut out = String::new();
    let mut first = true;
    let mut bare_constant = 0.0;

    for (term, coeff) in group.linear_terms() {
        if *coeff == 0.0 {
            continue;
        }
        match term {
            TermId::Constant if !options.include_const_variable => {
                bare_constant += *coeff;
            }
            TermId::Constant => {
                push_signed(
                    &mut out,
                    first,
                    options.include_prefix,
                    *coeff,
                    &VariableId::CONSTANT.token(),
                );
                first = false;
            }
            TermId::Var(id) => {
                push_signed(&mut out, first, options.include_prefix, *coeff, &id.token());
                first = false;
            }
        }
    }

    // A bare constant trails the degree-0/1 segment.
    if bare_constant != 0.0 {
        push_signed(&mut out, first, options.include_prefix, bare_constant, "");
        first = false;
    }

    let quadratic: Vec<((VariableId, VariableId), f64)> = group
        .quadratic_terms()
        .iter()
        .filter(|(_, c)| *c != 0.0)
        .copied()
        .collect();
    if !quadratic.is_empty() {
        if first {
            out.push_str("[ ");
        } else {
            out.push_str(" + [ ");
        }
        let mut quad_first = true;
        for ((a, b), coeff) in quadratic {
            let scaled = coeff * options.quadratic_divider;
            let body = format!("{} * {}", a.token(), b.token());
            push_signed(&mut out, quad_first, false, scaled, &body);
            quad_first = false;
        }
        out.push_str(" ]");
        if options.quadratic_divider != 1.0 {
            let _ = write!(out, " / {}", format_number(options.quadratic_divider));
        }
        first = false;
    }

    if first {
        out.push('0');
    }

    if let Some((token, value)) = rhs {
        let _ = write!(out, " {token} {}", format_number(value));
    }

    out
}

fn render_lines<'a, I>(groups: I, total: usize, options: &RenderOptions) -> String
where
    I: Iterator<Item = (&'a crate::index::Key, String)>,
{
    let mut lines = Vec::with_capacity(total);
    for (key, body) in groups {
        if total > 1 && options.include_header {
            lines.push(format!("[{}]: {body}", format_key(key)));
        } else {
            lines.push(body);
        }
    }
    lines.join("\n")
}

impl Expression {
    /// Render with explicit options.
    pub fn to_display_string(&self, options: &RenderOptions) -> Result<String, ExprError> {
        options.validate()?;
        Ok(self.render(options))
    }

    fn render(&self, options: &RenderOptions) -> String {
        if self.groups.is_empty() {
            return "0".to_string();
        }
        let total = self.groups.len();
        render_lines(
            self.groups
                .iter()
                .map(|(key, group)| (key, render_group(group, options, None))),
            total,
            options,
        )
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&RenderOptions::default()))
    }
}

impl Constraint {
    /// Render one `expr <relation> constant` line per dimension key.
    pub fn to_display_string(&self, options: &RenderOptions) -> Result<String, ExprError> {
        options.validate()?;
        Ok(self.render(options))
    }

    fn render(&self, options: &RenderOptions) -> String {
        let groups = self.expr().groups();
        if groups.is_empty() {
            return format!("0 {} 0", self.relation().token());
        }
        let total = groups.len();
        let token = self.relation().token();
        render_lines(
            groups.iter().zip(self.rhs()).map(|((key, group), rhs)| {
                (key, render_group(group, options, Some((token, *rhs))))
            }),
            total,
            options,
        )
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&RenderOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::{format_number, RenderOptions};
    use crate::expr::core::{Expression, TermId};
    use crate::expr::error::ExprError;
    use crate::ids::VariableId;
    use crate::index::{Key, KeyValue};

    fn v(id: u32) -> VariableId {
        VariableId::new(id)
    }

    #[test]
    fn number_formatting_preserves_precision() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(3.4), "3.4");
        assert_eq!(format_number(-2.1), "-2.1");
        assert_eq!(format_number(1.123_123_701_927_3), "1.1231237019273");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn scalar_expression_renders_with_signed_joins() {
        let expr = Expression::variable(v(1)).scale(5.0)
            .add(&Expression::variable(v(2)).scale(3.4))
            .and_then(|e| e.add(&Expression::variable(v(3)).scale(-2.1)))
            .and_then(|e| e.add(&Expression::variable(v(4)).scale(1.123_123_701_927_3)))
            .expect("sum");
        assert_eq!(
            expr.to_string(),
            "5 x1 +3.4 x2 -2.1 x3 +1.1231237019273 x4"
        );
    }

    #[test]
    fn unit_coefficients_render_bare_names() {
        let expr = Expression::variable(v(1))
            .add(&Expression::variable(v(2)).negate())
            .expect("sum");
        assert_eq!(expr.to_string(), "x1 -x2");
    }

    #[test]
    fn include_prefix_forces_leading_plus() {
        let expr = Expression::variable(v(1)).scale(5.0);
        let options = RenderOptions::new().with_prefix(true);
        assert_eq!(
            expr.to_display_string(&options).expect("render"),
            "+5 x1"
        );
    }

    #[test]
    fn bare_constant_trails_the_linear_segment() {
        let expr = 5.0 + Expression::variable(v(1)) * 2.0;
        assert_eq!(expr.to_string(), "2 x1 +5");
    }

    #[test]
    fn const_variable_renders_at_stored_position() {
        let mut expr = Expression::variable(v(1)).scale(5.0).add_constant(3.0);
        expr = expr
            .add(&Expression::variable(v(3)).scale(2.0))
            .expect("sum");
        let options = RenderOptions::new().with_const_variable(true);
        assert_eq!(
            expr.to_display_string(&options).expect("render"),
            "5 x1 +3 x0 +2 x3"
        );
    }

    #[test]
    fn quadratic_block_scales_by_divider() {
        let expr = Expression::variable(v(1)).scale(5.0)
            .add(&Expression::variable(v(2)).square().expect("sq").scale(-2.0))
            .and_then(|e| e.add(&Expression::constant(3.0)))
            .and_then(|e| e.add(&Expression::variable(v(3)).scale(2.0)))
            .and_then(|e| e.add(&Expression::variable(v(4)).square().expect("sq").scale(4.0)))
            .expect("expr");

        let options = RenderOptions::new()
            .with_const_variable(true)
            .with_quadratic_divider(2.0);
        assert_eq!(
            expr.to_display_string(&options).expect("render"),
            "5 x1 +3 x0 +2 x3 + [ -4 x2 * x2 +8 x4 * x4 ] / 2"
        );

        let constraint = expr.eq_value(0.0).expect("constraint");
        assert_eq!(
            constraint.to_string(),
            "5 x1 +2 x3 + [ -2 x2 * x2 +4 x4 * x4 ] = -3"
        );
    }

    #[test]
    fn pure_quadratic_starts_with_bracket() {
        let expr = Expression::variable(v(1)).square().expect("square");
        assert_eq!(expr.to_string(), "[ x1 * x1 ]");
    }

    #[test]
    fn group_headers_follow_append_order() {
        let key = |a: i64| -> Key { vec![KeyValue::Int(a)] };
        let expr = Expression::indexed(
            vec!["t".to_string()],
            vec![(key(2), v(1)), (key(1), v(2))],
        );
        assert_eq!(expr.to_string(), "[2]: x1\n[1]: x2");

        let headerless = RenderOptions::new().with_header(false);
        assert_eq!(
            expr.to_display_string(&headerless).expect("render"),
            "x1\nx2"
        );
    }

    #[test]
    fn zero_coefficients_are_never_shown() {
        let expr = Expression::variable(v(1))
            .add(&Expression::variable(v(1)).negate())
            .and_then(|e| e.add(&Expression::variable(v(2))))
            .expect("sum");
        assert_eq!(expr.to_string(), "x2");
    }

    #[test]
    fn empty_group_renders_zero() {
        assert_eq!(Expression::empty().to_string(), "0");
        assert_eq!(Expression::variable(v(1)).scale(0.0).to_string(), "0");
    }

    #[test]
    fn nonpositive_divider_is_rejected() {
        let expr = Expression::variable(v(1));
        let options = RenderOptions::new().with_quadratic_divider(0.0);
        assert_eq!(
            expr.to_display_string(&options),
            Err(ExprError::InvalidQuadraticDivider { divider: 0.0 })
        );
    }

    #[test]
    fn leading_negative_unit_coefficient() {
        let expr = Expression::variable(v(1)).negate();
        assert_eq!(expr.to_string(), "-x1");
        assert_eq!(TermId::Var(v(1)), expr.groups()[0].1.linear_terms()[0].0);
    }
}
