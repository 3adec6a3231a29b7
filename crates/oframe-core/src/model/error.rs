//! Model error types.

use oframe_expr::AllocError;
use oframe_solver::SolverError;

/// Errors that can occur while building or lowering a model.
#[derive(Debug, Clone)]
pub enum ModelError {
    /// An element with this name is already registered.
    DuplicateElement { name: String },
    /// The name is on the reserved allow-list.
    ReservedName { name: String },
    /// Invalid variable bounds.
    InvalidVariableBounds { lower: f64, upper: f64 },
    /// No element with this name is registered.
    UnknownElement { name: String },
    /// The model already has an objective.
    MultipleObjectives,
    /// The objective expression carries dimensions.
    ObjectiveNotScalar { dims: Vec<String> },
    /// A backend variable id diverged from the core id.
    BackendIdMismatch { expected: u32, got: u32 },
    /// Id allocation failed.
    Alloc(AllocError),
    /// A backend call failed during lowering.
    Solver(SolverError),
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::DuplicateElement { .. } => "MODEL_DUPLICATE_ELEMENT",
            ModelError::ReservedName { .. } => "MODEL_RESERVED_NAME",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::UnknownElement { .. } => "MODEL_UNKNOWN_ELEMENT",
            ModelError::MultipleObjectives => "OBJECTIVE_ALREADY_SET",
            ModelError::ObjectiveNotScalar { .. } => "OBJECTIVE_NOT_SCALAR",
            ModelError::BackendIdMismatch { .. } => "BACKEND_ID_MISMATCH",
            ModelError::Alloc(err) => err.code(),
            ModelError::Solver(err) => err.code(),
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::DuplicateElement { name } => write!(
                f,
                "[{}] Element '{}' is already registered",
                self.code(),
                name
            ),
            ModelError::ReservedName { name } => write!(
                f,
                "[{}] Name '{}' is reserved and cannot be used for model elements",
                self.code(),
                name
            ),
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::UnknownElement { name } => write!(
                f,
                "[{}] No element named '{}' is registered",
                self.code(),
                name
            ),
            ModelError::MultipleObjectives => write!(
                f,
                "[{}] Model already has an objective",
                self.code()
            ),
            ModelError::ObjectiveNotScalar { dims } => write!(
                f,
                "[{}] Objective must be dimensionless (got dimensions [{}])",
                self.code(),
                dims.join(",")
            ),
            ModelError::BackendIdMismatch { expected, got } => write!(
                f,
                "[{}] Backend returned variable id {} where {} was expected",
                self.code(),
                got,
                expected
            ),
            ModelError::Alloc(err) => write!(f, "{err}"),
            ModelError::Solver(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<AllocError> for ModelError {
    fn from(err: AllocError) -> Self {
        ModelError::Alloc(err)
    }
}

impl From<SolverError> for ModelError {
    fn from(err: SolverError) -> Self {
        ModelError::Solver(err)
    }
}
