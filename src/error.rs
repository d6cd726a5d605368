use thiserror::Error;

/// Failures the planning engine reports to its caller.
///
/// Too little history is not an error: progression and forecasting return
/// a typed advisory value for that case instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Raised by a plan generator and recovered by the template fallback.
    #[error("plan generation failed: {0}")]
    UpstreamGeneration(String),
}

impl FitError {
    /// Machine-readable code used in the JSON error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::UpstreamGeneration(_) => "generation_error",
        }
    }
}
