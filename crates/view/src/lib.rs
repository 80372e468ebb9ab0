//! # Box Event View Composer
//!
//! The single entry point of the read path: raw rows → normalized [`Dataset`] →
//! filtered records → named distributions.
//!
//! The composer owns no state. The dataset and the active criteria belong to the
//! caller and are passed in on every call, so a view is a pure function of its two
//! inputs and can be recomputed freely, from any number of readers at once.

pub mod composer;
pub mod dataset;

pub use composer::{View, ViewComposer, compute_view};
pub use dataset::Dataset;
