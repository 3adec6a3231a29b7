//! Expression arithmetic and rendering errors.

#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// A binary operation was given non-nested dimension sets.
    DimensionMismatch {
        left: Vec<String>,
        right: Vec<String>,
    },
    /// A product would exceed polynomial degree 2.
    DegreeTooHigh { left: usize, right: usize },
    /// `quadratic_divider` must be a positive number.
    InvalidQuadraticDivider { divider: f64 },
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::DimensionMismatch { .. } => "EXPR_DIMENSION_MISMATCH",
            ExprError::DegreeTooHigh { .. } => "EXPR_DEGREE_TOO_HIGH",
            ExprError::InvalidQuadraticDivider { .. } => "RENDER_INVALID_DIVIDER",
        }
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprError::DimensionMismatch { left, right } => write!(
                f,
                "[{}] Dimensions [{}] and [{}] are not nested; broadcasting requires one side's \
                 dimensions to be a subset of the other's",
                self.code(),
                left.join(","),
                right.join(","),
            ),
            ExprError::DegreeTooHigh { left, right } => write!(
                f,
                "[{}] Only linear and quadratic expressions are supported \
                 (operand degrees {} and {})",
                self.code(),
                left,
                right
            ),
            ExprError::InvalidQuadraticDivider { divider } => write!(
                f,
                "[{}] quadratic_divider must be positive (got {})",
                self.code(),
                divider
            ),
        }
    }
}

impl std::error::Error for ExprError {}

#[cfg(test)]
mod tests {
    use super::ExprError;

    #[test]
    fn error_code_is_stable() {
        let err = ExprError::DegreeTooHigh { left: 2, right: 2 };
        assert_eq!(err.code(), "EXPR_DEGREE_TOO_HIGH");
        assert!(err.to_string().contains("Only linear and quadratic"));
    }

    #[test]
    fn dimension_mismatch_names_both_sides() {
        let err = ExprError::DimensionMismatch {
            left: vec!["x".to_string()],
            right: vec!["y".to_string()],
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("[EXPR_DIMENSION_MISMATCH]"));
        assert!(rendered.contains("[x]"));
        assert!(rendered.contains("[y]"));
    }
}
