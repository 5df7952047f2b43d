use thiserror::Error;

/// Errors raised while validating inputs.
///
/// Sampling and estimation themselves never fail: numeric problems in a
/// density or transform show up as NaN or infinite values in the output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("envelope constant must be finite and positive, got {0}")]
    InvalidEnvelope(f64),
    #[error("target density is positive at {x} but the proposal density is zero")]
    SupportMismatch { x: f64 },
    #[error("ratio of target to proposal density is not finite at {x}")]
    UnboundedRatio { x: f64 },
    #[error("sample is empty")]
    EmptySample,
    #[error("length mismatch: {left} values against {right}")]
    LengthMismatch { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
