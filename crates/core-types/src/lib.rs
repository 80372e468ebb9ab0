//! # Box Event Core Types
//!
//! The shared vocabulary of the workspace: untyped input rows ([`RawRow`]), the typed
//! [`BoxRecord`] they are normalized into, the typed column wrappers, and the
//! [`FilterCriteria`] value object.
//!
//! This crate sits at the bottom of the dependency graph and knows nothing about
//! transports, filtering or aggregation.

pub mod criteria;
pub mod error;
pub mod fields;
pub mod normalizer;
pub mod record;
pub mod scalar;

// Re-export the core types to provide a clean public API.
pub use criteria::FilterCriteria;
pub use error::CoreError;
pub use fields::{
    Breakout, Confirmation, Direction, HitEncoding, HitFlag, SessionDate, TargetHits, TargetLevel,
    TimeOfDay, TriState,
};
pub use normalizer::{normalize, normalize_all};
pub use record::BoxRecord;
pub use scalar::{RawRow, Scalar};
