//! # Box Event Filter Engine
//!
//! Selects the records matching a [`FilterCriteria`]. All active facets are combined
//! with a logical AND and an inactive facet matches every record, so filtering with
//! default criteria returns the input unchanged.
//!
//! Filtering is total and order-preserving: it never errors, never reorders and never
//! duplicates, and it may legitimately return nothing.

use core_types::{BoxRecord, FilterCriteria};

pub mod facets;

/// Returns `true` when `record` satisfies every active facet of `criteria`.
pub fn matches(record: &BoxRecord, criteria: &FilterCriteria) -> bool {
    facets::weekday(record, criteria.weekday)
        && facets::date(record, &criteria.date)
        && facets::ticker(record, &criteria.ticker)
        && facets::direction(record.breakout.as_ref(), &criteria.breakout)
        && facets::time(record.breakout_time.as_ref(), &criteria.breakout_time)
        && facets::confirmation(record.confirm.as_ref(), &criteria.confirm)
        && facets::time(record.confirm_time.as_ref(), &criteria.confirm_time)
        && facets::direction(record.inverse_breakout.as_ref(), &criteria.inverse_breakout)
        && facets::time(
            record.inverse_breakout_time.as_ref(),
            &criteria.inverse_breakout_time,
        )
        && facets::confirmation(record.inverse_confirm.as_ref(), &criteria.inverse_confirm)
        && facets::time(
            record.inverse_confirm_time.as_ref(),
            &criteria.inverse_confirm_time,
        )
}

/// Applies `criteria` to `records`, keeping the matching ones in their original order.
pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a BoxRecord>
where
    I: IntoIterator<Item = &'a BoxRecord>,
{
    if criteria.is_unconstrained() {
        return records.into_iter().collect();
    }

    let selected: Vec<&BoxRecord> = records
        .into_iter()
        .filter(|r| matches(r, criteria))
        .collect();

    tracing::debug!(
        active_facets = criteria.active_facets(),
        matched = selected.len(),
        "Applied filter criteria."
    );
    selected
}
