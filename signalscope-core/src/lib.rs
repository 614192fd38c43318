//! signalscope-core
//!
//! Core traits and time-series utilities shared across the signalscope workspace.
//!
//! - `types`: re-exported data model, errors, and configuration.
//! - `connector`: the `SignalConnector` trait and its role traits.
//! - `timeseries`: bucket-key normalization and per-symbol series merging.
#![warn(missing_docs)]

/// Connector role traits and the primary `SignalConnector` interface.
pub mod connector;
/// Time-series utilities for normalizing bucket keys and merging series.
pub mod timeseries;
pub mod types;

pub use connector::SignalConnector;
pub use timeseries::merge::{merge_series, normalize_buckets, sort_points};
pub use timeseries::normalize::{normalize, normalize_millis};
pub use types::*;
