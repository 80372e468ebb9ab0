use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One bar of a chart: a label and how many records fell under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
    pub value: u64,
}

impl Bucket {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// An ordered sequence of buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution {
    pub buckets: Vec<Bucket>,
}

impl Distribution {
    /// Count recorded under `label`, if the label is present at all.
    pub fn count(&self, label: &str) -> Option<u64> {
        self.buckets.iter().find(|b| b.name == label).map(|b| b.value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.name.as_str())
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.value).sum()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Tally over a label set known up front. Every label is reported, zeros included,
/// in the order given.
#[derive(Debug)]
pub(crate) struct FixedTally {
    buckets: Vec<Bucket>,
}

impl FixedTally {
    pub(crate) fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            buckets: labels.into_iter().map(|l| Bucket::new(l, 0)).collect(),
        }
    }

    pub(crate) fn increment_at(&mut self, index: usize) {
        if let Some(bucket) = self.buckets.get_mut(index) {
            bucket.value += 1;
        }
    }

    pub(crate) fn finish(self) -> Distribution {
        Distribution {
            buckets: self.buckets,
        }
    }
}

/// Tally over labels discovered during the scan. Labels appear in first-seen order and
/// never with a zero count.
#[derive(Debug, Default)]
pub(crate) struct ObservedTally {
    buckets: Vec<Bucket>,
    positions: HashMap<String, usize>,
}

impl ObservedTally {
    pub(crate) fn increment(&mut self, label: String) {
        match self.positions.get(&label) {
            Some(&i) => self.buckets[i].value += 1,
            None => {
                self.positions.insert(label.clone(), self.buckets.len());
                self.buckets.push(Bucket::new(label, 1));
            }
        }
    }

    pub(crate) fn finish(self) -> Distribution {
        Distribution {
            buckets: self.buckets,
        }
    }
}

/// The full set of named distributions computed for a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSet {
    pub breakout: Distribution,
    pub breakout_time: Distribution,
    pub confirm: Distribution,
    pub confirm_time: Distribution,
    pub inverse_breakout: Distribution,
    pub inverse_breakout_time: Distribution,
    pub inverse_confirm: Distribution,
    pub inverse_confirm_time: Distribution,
    pub target: Distribution,
    pub inverse_target: Distribution,
}

impl DistributionSet {
    /// Distribution names in reporting order, as they appear on the wire.
    pub const NAMES: [&'static str; 10] = [
        "breakout",
        "breakoutTime",
        "confirm",
        "confirmTime",
        "inverseBreakout",
        "inverseBreakoutTime",
        "inverseConfirm",
        "inverseConfirmTime",
        "target",
        "inverseTarget",
    ];

    pub fn get(&self, name: &str) -> Option<&Distribution> {
        let distribution = match name {
            "breakout" => &self.breakout,
            "breakoutTime" => &self.breakout_time,
            "confirm" => &self.confirm,
            "confirmTime" => &self.confirm_time,
            "inverseBreakout" => &self.inverse_breakout,
            "inverseBreakoutTime" => &self.inverse_breakout_time,
            "inverseConfirm" => &self.inverse_confirm,
            "inverseConfirmTime" => &self.inverse_confirm_time,
            "target" => &self.target,
            "inverseTarget" => &self.inverse_target,
            _ => return None,
        };
        Some(distribution)
    }

    /// `(name, distribution)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Distribution)> {
        Self::NAMES
            .into_iter()
            .filter_map(move |name| self.get(name).map(|d| (name, d)))
    }
}
