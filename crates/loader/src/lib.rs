//! Fetches box records and holds the active dataset.
//!
//! A [`RecordSource`] delivers raw rows in one shot (a CSV export or the box store's
//! HTTP endpoint). The [`DatasetLoader`] turns those rows into a normalized
//! [`view::Dataset`] and publishes it, keeping only the most recently requested load.

pub mod dataset_loader;
pub mod error;
pub mod source;

pub use dataset_loader::{DatasetLoader, DatasetState};
pub use error::LoadError;
pub use source::{CsvSource, HttpSource, RecordSource, parse_delimited, source_from_settings};
