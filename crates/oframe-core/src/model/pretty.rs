//! Human-readable ASCII model formatting.

use std::fmt::Write as _;

use oframe_expr::{RenderOptions, VariableId};
use oframe_solver::{Sense, VType};

use crate::model::Model;
use crate::types::Bounds;

const PREVIEW_CONSTRAINTS: usize = 20;
const PREVIEW_DOMAIN_ITEMS: usize = 20;

/// Formatting controls for pretty-print output.
#[derive(Debug, Clone, Copy)]
pub struct PrettyPrintOptions {
    /// Maximum number of constraints to render.
    pub constraints: Option<usize>,
    /// Maximum number of domain or bounds items to show in grouped sections.
    pub domain_items: Option<usize>,
}

impl PrettyPrintOptions {
    /// Preview mode used by terse displays.
    pub fn preview() -> Self {
        Self {
            constraints: Some(PREVIEW_CONSTRAINTS),
            domain_items: Some(PREVIEW_DOMAIN_ITEMS),
        }
    }

    /// Full mode with no truncation.
    pub fn full() -> Self {
        Self {
            constraints: None,
            domain_items: None,
        }
    }
}

impl Model {
    /// Render the model to ASCII.
    pub fn format_ascii(&self, options: PrettyPrintOptions) -> String {
        let mut lines = Vec::new();
        lines.push(self.render_objective_line());
        lines.push(String::new());
        lines.push("s.t.".to_string());

        let total_constraints = self.constraints.len();
        let constraint_limit = options
            .constraints
            .unwrap_or(total_constraints)
            .min(total_constraints);

        if constraint_limit == 0 {
            lines.push(" (none)".to_string());
        } else {
            let render_options = RenderOptions::new();
            for (name, constraint) in self.constraints.iter().take(constraint_limit) {
                let rendered = constraint
                    .to_display_string(&render_options)
                    .unwrap_or_else(|_| "<invalid>".to_string());
                let mut body_lines = rendered.lines();
                if let Some(first) = body_lines.next() {
                    lines.push(format!(" {name}: {first}"));
                }
                // Remaining dimension groups sit under the constraint name.
                for body in body_lines {
                    lines.push(format!("   {body}"));
                }
            }
        }

        if constraint_limit < total_constraints {
            lines.push(format!(
                " ... ({} more constraints)",
                total_constraints - constraint_limit
            ));
        }

        let mut binary_labels = Vec::new();
        let mut integer_labels = Vec::new();
        let mut bounds_lines = Vec::new();
        for variable in &self.variables {
            let label = block_label(variable.first_id(), variable.len());
            match variable.vtype() {
                VType::Binary => {
                    binary_labels.push(label);
                    continue;
                }
                VType::Integer => integer_labels.push(label.clone()),
                VType::Continuous => {}
            }
            if let Some(line) = format_bounds_line(&label, variable.bounds()) {
                bounds_lines.push(line);
            }
        }

        let has_domains =
            !binary_labels.is_empty() || !integer_labels.is_empty() || !bounds_lines.is_empty();
        if has_domains {
            lines.push(String::new());
        }
        if !binary_labels.is_empty() {
            lines.push(format_group_line("Binary", &binary_labels, options.domain_items));
        }
        if !integer_labels.is_empty() {
            lines.push(format_group_line("Integer", &integer_labels, options.domain_items));
        }
        if !bounds_lines.is_empty() {
            lines.push("Bounds:".to_string());
            let bounds_limit = options
                .domain_items
                .unwrap_or(bounds_lines.len())
                .min(bounds_lines.len());
            for bound_line in bounds_lines.iter().take(bounds_limit) {
                lines.push(format!(" {bound_line}"));
            }
            if bounds_limit < bounds_lines.len() {
                lines.push(format!(
                    " ... ({} more bounds)",
                    bounds_lines.len() - bounds_limit
                ));
            }
        }

        lines.join("\n")
    }

    fn render_objective_line(&self) -> String {
        let Some(objective) = &self.objective else {
            return "Objective: (not set)".to_string();
        };
        let sense_label = match objective.sense {
            Sense::Minimize => "Min",
            Sense::Maximize => "Max",
        };
        format!("{sense_label} {objective}")
    }
}

fn block_label(first: VariableId, count: usize) -> String {
    if count <= 1 {
        first.token()
    } else {
        let last = VariableId::new(first.inner() + count as u32 - 1);
        format!("{}..{}", first.token(), last.token())
    }
}

fn format_group_line(label: &str, entries: &[String], max_items: Option<usize>) -> String {
    let limit = max_items.unwrap_or(entries.len()).min(entries.len());
    let mut line = String::new();
    let _ = write!(line, "{label}: ");
    if limit > 0 {
        line.push_str(&entries[..limit].join(", "));
    }
    if limit < entries.len() {
        if limit > 0 {
            line.push_str(", ");
        }
        let _ = write!(line, "... ({} more)", entries.len() - limit);
    }
    line
}

fn format_bounds_line(label: &str, bounds: Bounds) -> Option<String> {
    let lower_finite = bounds.lower.is_finite();
    let upper_finite = bounds.upper.is_finite();
    if !lower_finite && !upper_finite {
        return None;
    }
    if lower_finite && upper_finite {
        return Some(format!(
            "{} <= {label} <= {}",
            oframe_expr::format_number(bounds.lower),
            oframe_expr::format_number(bounds.upper)
        ));
    }
    if lower_finite {
        return Some(format!(
            "{} <= {label}",
            oframe_expr::format_number(bounds.lower)
        ));
    }
    Some(format!(
        "{label} <= {}",
        oframe_expr::format_number(bounds.upper)
    ))
}
