//! Shared start-up and reporting code for the `merge-results` and
//! `plot-figure` binaries.

pub mod bootstrap;
pub mod report;
