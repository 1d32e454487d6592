//! Error types.
//!
//! - `RegressionError`: failures of the numeric core (fit, cost, descent, scans)
//! - `AppError`: what the binary reports, carrying a process exit code

/// Errors raised by the numeric core.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    /// The dataset has no samples or no features.
    EmptyDataset,
    /// Two inputs disagree on a dimension.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// The augmented design matrix is rank-deficient, so the normal equations
    /// have no unique solution.
    SingularMatrix { rank: usize, expected: usize },
    /// Gradient descent produced a non-finite or (when guarded) increasing cost.
    Divergence { iteration: usize, cost: f64 },
    /// A configuration value is out of range.
    InvalidConfig { field: &'static str, reason: String },
}

pub type RegressionResult<T> = Result<T, RegressionError>;

impl RegressionError {
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        RegressionError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for RegressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegressionError::EmptyDataset => write!(f, "Dataset has no samples or no features."),
            RegressionError::DimensionMismatch {
                what,
                expected,
                found,
            } => write!(f, "Dimension mismatch for {what}: expected {expected}, found {found}."),
            RegressionError::SingularMatrix { rank, expected } => write!(
                f,
                "Singular design matrix: rank {rank} < {expected} parameters (duplicate or collinear samples?)."
            ),
            RegressionError::Divergence { iteration, cost } => write!(
                f,
                "Gradient descent diverged at iteration {iteration} (cost={cost:e}); lower the learning rate."
            ),
            RegressionError::InvalidConfig { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for RegressionError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<RegressionError> for AppError {
    fn from(err: RegressionError) -> Self {
        let exit_code = match err {
            RegressionError::EmptyDataset
            | RegressionError::DimensionMismatch { .. }
            | RegressionError::InvalidConfig { .. } => 2,
            RegressionError::SingularMatrix { .. } => 3,
            RegressionError::Divergence { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}
