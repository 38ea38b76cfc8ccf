//! Error type shared by every gladiator crate

/// Errors raised when a caller hands the engine an impossible shape or configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GladiatorError {
    #[error("strength vector length must be positive, got {0}")]
    InvalidLength(usize),

    #[error("axis {axis} has non-positive bound {bound}")]
    InvalidDimension { axis: usize, bound: usize },

    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("strength at index {index} must be positive and finite, got {value}")]
    NonPositiveStrength { index: usize, value: f64 },

    #[error("table over {dims:?} is too large to allocate")]
    TableTooLarge { dims: Vec<usize> },

    #[error("at least one team is required")]
    EmptyTeams,

    #[error("invalid worker thread count: {0}")]
    InvalidThreadCount(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GladiatorError>;
