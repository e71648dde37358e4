//! # Process Calculations
//!
//! This module contains the calculation types. Each calculation follows the
//! pattern:
//!
//! - `*Input(s)` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - a pure function from one to the other
//!
//! Unlike a validator that rejects bad input, both calculations here are
//! infallible: unusable values are replaced by defaults or clamped, and the
//! replacements are logged (and, for the column, listed in the result).
//!
//! ## Available Calculations
//!
//! - [`distillation`] - Binary column FUG sizing, hydraulics and utilities
//! - [`psv`] - Preliminary fire-case relief valve sizing

pub mod distillation;
pub mod psv;

// Re-export commonly used types
pub use distillation::{design_distillation_column, normalize, DesignInputs, DesignResult, NormalizedInputs};
pub use psv::{PsvInput, PsvResult, ReliefCase};
