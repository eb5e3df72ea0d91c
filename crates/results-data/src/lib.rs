//! Data layer for the evaluation result tools.
//!
//! Responsible for discovering and reading result shards, merging them into
//! one table, and grouping merged rows into the per-panel solve-rate series
//! the figure renderer draws.

pub mod aggregator;
pub mod merger;
pub mod panels;
pub mod reader;
