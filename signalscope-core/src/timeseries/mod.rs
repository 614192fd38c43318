//! Time-series utilities shared by connectors and the orchestrator.
//!
//! Modules include:
//! - `normalize`: resolve backend bucket keys to canonical UTC instants
//! - `merge`: build a symbol's sorted price and volume series
/// Merge utilities producing chart-ready per-symbol series.
pub mod merge;
/// Bucket-key parsing for day, week, and month granularities.
pub mod normalize;
