//! Turns untyped input rows into [`BoxRecord`]s.
//!
//! Normalization is total: no cell can make it fail. Unreadable cells become `None`
//! (or keep their raw form inside a typed wrapper) and are dealt with at read time.

use crate::fields::{Breakout, Confirmation, HitFlag, SessionDate, TargetHits, TargetLevel, TimeOfDay};
use crate::record::BoxRecord;
use crate::scalar::{RawRow, Scalar};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::str::FromStr;

/// Column names of the extractor's row schema.
pub mod columns {
    pub const TICKER: &str = "ticker";
    pub const DATASET: &str = "dataset";
    pub const DATE: &str = "date";
    pub const HIGH_BOX: &str = "high_box";
    pub const LOW_BOX: &str = "low_box";
    pub const INITIAL_HIGH_BOX: &str = "initial_high_box";
    pub const INITIAL_LOW_BOX: &str = "initial_low_box";
    pub const START_TIME: &str = "start_time";
    pub const END_TIME: &str = "end_time";
    pub const BREAKOUT: &str = "breakout";
    pub const BREAKOUT_TIME: &str = "breakout_time";
    pub const CONFIRM: &str = "confirm";
    pub const CONFIRM_TIME: &str = "confirm_time";
    pub const INVERSE_BREAKOUT: &str = "inverse_breakout";
    pub const INVERSE_BREAKOUT_TIME: &str = "inverse_breakout_time";
    pub const INV_CONFIRM: &str = "inv_confirm";
    pub const INV_CONFIRM_TIME: &str = "inv_confirm_time";
}

/// Normalizes one raw row. `index` becomes the record id.
pub fn normalize(row: &RawRow, index: usize) -> BoxRecord {
    use columns::*;

    let mut record = BoxRecord::empty(index);

    record.ticker = text(row, TICKER);
    record.dataset = text(row, DATASET);
    record.date = text(row, DATE).map(SessionDate::new);

    record.high_box = decimal(row, HIGH_BOX);
    record.low_box = decimal(row, LOW_BOX);
    record.initial_high_box = decimal(row, INITIAL_HIGH_BOX);
    record.initial_low_box = decimal(row, INITIAL_LOW_BOX);
    record.start_time = time(row, START_TIME);
    record.end_time = time(row, END_TIME);

    record.breakout = text(row, BREAKOUT).map(Breakout::new);
    record.breakout_time = time(row, BREAKOUT_TIME);
    record.confirm = row.get(CONFIRM).cloned().map(Confirmation);
    record.confirm_time = time(row, CONFIRM_TIME);
    record.targets = target_hits(row, "target");

    record.inverse_breakout = text(row, INVERSE_BREAKOUT).map(Breakout::new);
    record.inverse_breakout_time = time(row, INVERSE_BREAKOUT_TIME);
    record.inverse_confirm = row.get(INV_CONFIRM).cloned().map(Confirmation);
    record.inverse_confirm_time = time(row, INV_CONFIRM_TIME);
    record.inverse_targets = target_hits(row, "inv_target");

    record
}

/// Normalizes a whole row set, assigning dense ids in input order.
pub fn normalize_all(rows: &[RawRow]) -> Vec<BoxRecord> {
    let records: Vec<BoxRecord> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| normalize(row, index))
        .collect();

    let undated = records.iter().filter(|r| r.weekday().is_none()).count();
    if undated > 0 {
        tracing::debug!(undated, total = records.len(), "Some rows carry no parseable date.");
    }
    records
}

fn text(row: &RawRow, name: &str) -> Option<String> {
    row.get(name).and_then(Scalar::to_text)
}

fn time(row: &RawRow, name: &str) -> Option<TimeOfDay> {
    text(row, name).map(TimeOfDay::new)
}

fn decimal(row: &RawRow, name: &str) -> Option<Decimal> {
    match row.get(name)? {
        Scalar::Number(n) => Decimal::from_f64(*n),
        Scalar::Text(t) => {
            let t = t.trim();
            Decimal::from_str(t)
                .or_else(|_| Decimal::from_scientific(t))
                .ok()
        }
        Scalar::Bool(_) | Scalar::Null => None,
    }
}

fn target_hits(row: &RawRow, prefix: &str) -> TargetHits {
    let mut hits = TargetHits::default();
    for level in TargetLevel::ALL {
        let column = format!("{}_{}_hit", prefix, level.column_code());
        hits.set(level, row.get(&column).cloned().map(HitFlag));
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Direction, HitEncoding, TriState};
    use rust_decimal_macros::dec;

    fn sample_row() -> RawRow {
        RawRow::new()
            .with("ticker", "NQ=F")
            .with("date", "2023-07-31")
            .with("high_box", "15890.25")
            .with("low_box", 15850.5)
            .with("breakout", "Up")
            .with("breakout_time", "16:05:00")
            .with("confirm", "True")
            .with("confirm_time", "16:10:00")
            .with("target_05_hit", 1)
            .with("target_068_hit", "0")
            .with("inv_target_05_hit", "True")
    }

    #[test]
    fn normalize_types_every_known_column() {
        let record = normalize(&sample_row(), 7);

        assert_eq!(record.id, 7);
        assert_eq!(record.ticker.as_deref(), Some("NQ=F"));
        assert_eq!(record.weekday(), Some(1));
        assert_eq!(record.high_box, Some(dec!(15890.25)));
        assert_eq!(record.low_box, Some(dec!(15850.5)));
        assert_eq!(record.breakout.as_ref().map(|b| b.direction), Some(Direction::Up));
        assert_eq!(record.confirm.as_ref().map(|c| c.tri_state()), Some(TriState::True));
        assert!(record.targets.is_hit(TargetLevel::Half, HitEncoding::Lenient));
        assert!(!record.targets.is_hit(TargetLevel::Fib068, HitEncoding::Lenient));
        assert!(record.inverse_targets.is_hit(TargetLevel::Half, HitEncoding::TextOnly));
        assert!(record.inverse_breakout.is_none());
    }

    #[test]
    fn normalize_never_fails_on_dirty_rows() {
        let row = RawRow::new()
            .with("date", "not a date")
            .with("high_box", "n/a")
            .with("breakout", 3)
            .with("confirm_time", true);
        let record = normalize(&row, 0);

        assert_eq!(record.weekday(), None);
        assert_eq!(record.high_box, None);
        assert_eq!(record.breakout.as_ref().map(|b| b.raw.as_str()), Some("3"));
        assert_eq!(record.confirm_time.as_ref().map(|t| t.raw.as_str()), Some("true"));
    }

    #[test]
    fn ids_follow_row_order() {
        let rows = vec![sample_row(), RawRow::new(), sample_row()];
        let ids: Vec<usize> = normalize_all(&rows).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
