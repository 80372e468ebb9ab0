use crate::distribution::{Distribution, DistributionSet, FixedTally, ObservedTally};
use core_types::fields::prefix_bucket;
use core_types::{BoxRecord, Breakout, Confirmation, HitEncoding, TargetHits, TargetLevel, TimeOfDay, TriState};

/// A stateless calculator for the chart distributions of a record set.
#[derive(Debug, Default)]
pub struct AggregationEngine {}

impl AggregationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point: computes every named distribution over `records`.
    ///
    /// Each distribution is an independent pass over the input; none depends on
    /// another.
    pub fn calculate(&self, records: &[&BoxRecord]) -> DistributionSet {
        let set = DistributionSet {
            breakout: direction_prefixes(records.iter().map(|r| r.breakout.as_ref())),
            breakout_time: minute_buckets(records.iter().map(|r| r.breakout_time.as_ref())),
            confirm: tri_state(records.iter().map(|r| r.confirm.as_ref())),
            confirm_time: minute_buckets(records.iter().map(|r| r.confirm_time.as_ref())),
            inverse_breakout: direction_prefixes(
                records.iter().map(|r| r.inverse_breakout.as_ref()),
            ),
            inverse_breakout_time: minute_buckets(
                records.iter().map(|r| r.inverse_breakout_time.as_ref()),
            ),
            inverse_confirm: tri_state(records.iter().map(|r| r.inverse_confirm.as_ref())),
            inverse_confirm_time: minute_buckets(
                records.iter().map(|r| r.inverse_confirm_time.as_ref()),
            ),
            target: target_hits(records.iter().map(|r| &r.targets), HitEncoding::Lenient),
            inverse_target: target_hits(
                records.iter().map(|r| &r.inverse_targets),
                HitEncoding::TextOnly,
            ),
        };

        tracing::debug!(
            records = records.len(),
            confirm_time_buckets = set.confirm_time.len(),
            "Calculated distributions."
        );
        set
    }
}

/// Fixed `true`/`false` tally. Values that are neither are left out entirely.
pub fn tri_state<'a, I>(values: I) -> Distribution
where
    I: IntoIterator<Item = Option<&'a Confirmation>>,
{
    let mut tally = FixedTally::new(["true", "false"]);
    for value in values.into_iter().flatten() {
        match value.tri_state() {
            TriState::True => tally.increment_at(0),
            TriState::False => tally.increment_at(1),
            TriState::Unknown => {}
        }
    }
    tally.finish()
}

/// Counts per `HH:MM` prefix, in first-seen order.
pub fn minute_buckets<'a, I>(values: I) -> Distribution
where
    I: IntoIterator<Item = Option<&'a TimeOfDay>>,
{
    let mut tally = ObservedTally::default();
    for label in values.into_iter().flatten().filter_map(TimeOfDay::minute_bucket) {
        tally.increment(label);
    }
    tally.finish()
}

/// Counts per five-character prefix of the recorded direction text, in first-seen
/// order. Labels keep the casing they were recorded with.
pub fn direction_prefixes<'a, I>(values: I) -> Distribution
where
    I: IntoIterator<Item = Option<&'a Breakout>>,
{
    let mut tally = ObservedTally::default();
    for label in values.into_iter().flatten().filter_map(|b| prefix_bucket(&b.raw)) {
        tally.increment(label);
    }
    tally.finish()
}

/// Fixed tally over the four target levels, labelled `Target <key>`.
pub fn target_hits<'a, I>(values: I, encoding: HitEncoding) -> Distribution
where
    I: IntoIterator<Item = &'a TargetHits>,
{
    let mut tally = FixedTally::new(TargetLevel::ALL.iter().map(TargetLevel::label));
    for hits in values {
        for (index, level) in TargetLevel::ALL.iter().enumerate() {
            if hits.is_hit(*level, encoding) {
                tally.increment_at(index);
            }
        }
    }
    tally.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{RawRow, normalize_all};
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<BoxRecord> {
        let rows: Vec<RawRow> = serde_json::from_value(value).unwrap();
        normalize_all(&rows)
    }

    fn calculate(records: &[BoxRecord]) -> DistributionSet {
        let refs: Vec<&BoxRecord> = records.iter().collect();
        AggregationEngine::new().calculate(&refs)
    }

    #[test]
    fn tri_state_excludes_unknown_values() {
        let set = calculate(&records(json!([
            { "confirm": "maybe" },
            { "confirm": "TRUE" },
            { "confirm": false },
            { "confirm": 1 },
            { }
        ])));
        assert_eq!(set.confirm.labels().collect::<Vec<_>>(), vec!["true", "false"]);
        assert_eq!(set.confirm.count("true"), Some(1));
        assert_eq!(set.confirm.count("false"), Some(1));
        assert_eq!(set.inverse_confirm.count("true"), Some(0));
        assert_eq!(set.inverse_confirm.len(), 2);
    }

    #[test]
    fn confirm_times_bucket_by_minute() {
        let set = calculate(&records(json!([
            { "confirm_time": "09:15:23" },
            { "confirm_time": "10:00:00" },
            { "confirm_time": "09:15:47" },
            { "confirm_time": "" }
        ])));
        assert_eq!(set.confirm_time.labels().collect::<Vec<_>>(), vec!["09:15", "10:00"]);
        assert_eq!(set.confirm_time.count("09:15"), Some(2));
        assert!(set.breakout_time.is_empty());
    }

    #[test]
    fn breakout_distribution_uses_recorded_text() {
        let set = calculate(&records(json!([
            { "breakout": "Up", "inverse_breakout": "none" },
            { "breakout": "Down", "inverse_breakout": "none" },
            { "breakout": "Up" }
        ])));
        assert_eq!(set.breakout.labels().collect::<Vec<_>>(), vec!["Up", "Down"]);
        assert_eq!(set.breakout.count("Up"), Some(2));
        assert_eq!(set.inverse_breakout.count("none"), Some(2));
    }

    #[test]
    fn target_accepts_three_truthy_encodings() {
        let set = calculate(&records(json!([
            { "target_05_hit": 1 },
            { "target_05_hit": "1" },
            { "target_05_hit": "True" },
            { "target_05_hit": 0 },
            { "target_05_hit": "False" },
            { "target_05_hit": true, "target_200_hit": "True" }
        ])));
        assert_eq!(
            set.target.labels().collect::<Vec<_>>(),
            vec!["Target 0.5", "Target 0.68", "Target 1.0", "Target 2.0"]
        );
        assert_eq!(set.target.count("Target 0.5"), Some(3));
        assert_eq!(set.target.count("Target 0.68"), Some(0));
        assert_eq!(set.target.count("Target 2.0"), Some(1));
    }

    #[test]
    fn inverse_target_accepts_only_text_true() {
        let set = calculate(&records(json!([
            { "inv_target_05_hit": "1" },
            { "inv_target_05_hit": 1 },
            { "inv_target_05_hit": "True", "inv_target_100_hit": "True" }
        ])));
        assert_eq!(set.inverse_target.count("Target 0.5"), Some(1));
        assert_eq!(set.inverse_target.count("Target 1.0"), Some(1));
        assert_eq!(set.inverse_target.len(), 4);
    }

    #[test]
    fn empty_input_still_yields_fixed_keys() {
        let set = calculate(&[]);
        assert_eq!(set.confirm.total(), 0);
        assert_eq!(set.confirm.len(), 2);
        assert_eq!(set.target.len(), 4);
        assert!(set.breakout.is_empty());
    }
}
