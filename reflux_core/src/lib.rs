//! # reflux_core - Distillation Column Shortcut Design Engine
//!
//! `reflux_core` sizes a binary distillation column from a handful of
//! process specifications: Fenske-Underwood-Gilliland stage count, shell
//! diameter, tray or packed height, condenser and reboiler duties with
//! exchanger areas, utility consumption and reflux drum volume. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All records implement Serialize/Deserialize
//! - **Never throws on bad numbers**: inputs are coerced and clamped, ill-posed
//!   specifications come back flagged with unavailable values as `None`
//! - **Auditable**: every run lists the correlations it applied
//!
//! ## Quick Start
//!
//! ```rust
//! use reflux_core::calculations::distillation::{design_distillation_column, DesignInputs};
//!
//! let result = design_distillation_column(&DesignInputs::default());
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("theoretical_stages"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Column design pipeline and PSV sizing
//! - [`equations`] - Correlations and the equation registry
//! - [`properties`] - Binary property packs and Custom properties
//! - [`pdf`] - Typst datasheet rendering
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod pdf;
pub mod properties;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::distillation::{design_distillation_column, DesignInputs, DesignResult};
pub use errors::{CalcError, CalcResult};
pub use properties::ChemicalSystem;
