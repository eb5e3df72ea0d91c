//! Shared foundations for the evaluation result tools.
//!
//! Holds the error type, the result-row data model, command-line settings,
//! the method style table and the solve-rate statistics.

pub mod error;
pub mod methods;
pub mod models;
pub mod settings;
pub mod stats;
