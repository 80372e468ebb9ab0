use core_types::{BoxRecord, RawRow, normalize_all};

/// A loaded, normalized record set. Owns its records; everything downstream borrows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<BoxRecord>,
}

impl Dataset {
    /// Normalizes `rows` once, assigning ids in row order.
    pub fn from_rows(rows: &[RawRow]) -> Self {
        let records = normalize_all(rows);
        tracing::debug!(records = records.len(), "Normalized dataset.");
        Self { records }
    }

    pub fn records(&self) -> &[BoxRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct tickers in first-seen order.
    pub fn tickers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for ticker in self.records.iter().filter_map(|r| r.ticker.as_deref()) {
            if !seen.contains(&ticker) {
                seen.push(ticker);
            }
        }
        seen
    }
}

impl From<Vec<BoxRecord>> for Dataset {
    fn from(records: Vec<BoxRecord>) -> Self {
        Self { records }
    }
}
