use crate::dataset::Dataset;
use analytics::{AggregationEngine, DistributionSet};
use core_types::{BoxRecord, FilterCriteria, RawRow};
use serde::Serialize;

/// Everything the presentation layer needs for one criteria selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    /// Size of the unfiltered dataset.
    pub total: usize,
    /// Matching records, in dataset order.
    pub records: Vec<BoxRecord>,
    pub distributions: DistributionSet,
}

impl View {
    pub fn matched(&self) -> usize {
        self.records.len()
    }
}

/// Runs filter and aggregation over a dataset. Holds no state between calls.
#[derive(Debug, Default)]
pub struct ViewComposer {
    aggregation: AggregationEngine,
}

impl ViewComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compute(&self, dataset: &Dataset, criteria: &FilterCriteria) -> View {
        // 1. Filter
        let selected = filters::filter(dataset.records(), criteria);

        // 2. Aggregate
        let distributions = self.aggregation.calculate(&selected);

        tracing::debug!(
            total = dataset.len(),
            matched = selected.len(),
            "Computed view."
        );

        View {
            total: dataset.len(),
            records: selected.into_iter().cloned().collect(),
            distributions,
        }
    }
}

/// Normalizes `rows` and computes the view for `criteria` in one call.
///
/// Callers that recompute on every criteria change should build a [`Dataset`] once and
/// use [`ViewComposer::compute`] instead.
pub fn compute_view(rows: &[RawRow], criteria: &FilterCriteria) -> View {
    let dataset = Dataset::from_rows(rows);
    ViewComposer::new().compute(&dataset, criteria)
}
