//! Gladiator Core - strength vectors and win-probability estimation
//!
//! This crate provides the building blocks for the gladiator optimizer:
//! - Strength vectors (one team's allocation of combat strength)
//! - Multi-index odometer and dense row-major tensor
//! - Pairwise and N-team win-probability estimators
//! - The shared error type

pub mod dense;
pub mod error;
pub mod estimate;
pub mod multi_index;
pub mod strength;

// Re-exports for convenient access
pub use dense::DenseArray;
pub use error::{GladiatorError, Result};
pub use estimate::{win_probabilities, win_probability};
pub use multi_index::MultiIndex;
pub use strength::StrengthVector;
