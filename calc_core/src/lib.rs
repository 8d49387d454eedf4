//! # calc_core - Everyday Calculation Engine
//!
//! `calc_core` is the computational heart of Cifra: percentages, personal
//! finance, numerical calculus and a handful of everyday converters. Every
//! calculation validates its input, returns a structured result and records
//! the formula and steps that produced it. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions that take input and return results
//! - **JSON-First**: all request and result types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Explained**: results carry a formula string and ordered steps
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{evaluate, CalcSettings, CalculationRequest};
//!
//! let request: CalculationRequest =
//!     serde_json::from_str(r#"{"type": "PercentageOf", "x": 25, "y": 200}"#).unwrap();
//! let outcome = evaluate(&request, &CalcSettings::default()).unwrap();
//! assert_eq!(outcome.summary(), "Result: 12.5");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All calculators and the request/outcome dispatch
//! - [`worksheet`] - Saved lists of labelled requests
//! - [`settings`] - Tunable defaults (step size, intervals, reading speed)
//! - [`derivation`] - Formula and step recording, number formatting
//! - [`validation`] - Shared numeric input checks
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod calculations;
pub mod derivation;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod settings;
pub mod validation;
pub mod worksheet;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate, CalculationOutcome, CalculationRequest};
pub use errors::{CalcError, CalcResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_settings, load_worksheet, save_settings, save_worksheet, FileLock};
pub use settings::CalcSettings;
pub use worksheet::{Worksheet, WorksheetItem, WorksheetMetadata};
