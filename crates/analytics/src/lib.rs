//! # Box Event Aggregation Engine
//!
//! Turns a filtered set of box records into the named frequency distributions the
//! charts consume.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** depends only on `core-types` and never mutates a record.
//! - **Stateless calculation:** `AggregationEngine` takes records in and hands a
//!   `DistributionSet` back. Each distribution is a single linear pass.
//!
//! ## Distribution shapes
//!
//! - *Fixed-key* (`confirm`, `inverseConfirm`, `target`, `inverseTarget`): the label set
//!   is known up front and every label is reported, zeros included.
//! - *Observed-order* (the time and direction distributions): labels appear in the order
//!   they were first met and only with non-zero counts.

// Declare the modules that constitute this crate.
pub mod distribution;
pub mod engine;

// Re-export the key components to create a clean, public-facing API.
pub use distribution::{Bucket, Distribution, DistributionSet};
pub use engine::AggregationEngine;
