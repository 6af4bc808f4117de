//! Errors raised by the synthetic generators.

/// Errors that may occur during synthetic input generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested grid had fewer than two vertices per side.
    #[error("grid side must be at least 2, got {side}")]
    GridTooSmall {
        /// Requested side length.
        side: u32,
    },
    /// A floating-point parameter was NaN, infinite or out of range.
    #[error("invalid value for `{parameter}`")]
    InvalidFloatParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
    },
}
