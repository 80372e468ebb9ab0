use crate::fields::{Breakout, Confirmation, SessionDate, TargetHits, TimeOfDay};
use rust_decimal::Decimal;
use serde::Serialize;

/// One trading session's opening-range box and what happened after it.
///
/// Records are produced once by [`crate::normalize`] and never mutated afterwards.
/// Every column except `id` is optional: a missing or unreadable cell is simply `None`
/// and fails any predicate that inspects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxRecord {
    /// Position of the row in the loaded set.
    pub id: usize,
    pub ticker: Option<String>,
    /// Provider/extraction batch the row came from.
    pub dataset: Option<String>,
    pub date: Option<SessionDate>,

    // Box geometry
    pub high_box: Option<Decimal>,
    pub low_box: Option<Decimal>,
    pub initial_high_box: Option<Decimal>,
    pub initial_low_box: Option<Decimal>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,

    // Primary breakout
    pub breakout: Option<Breakout>,
    pub breakout_time: Option<TimeOfDay>,
    pub confirm: Option<Confirmation>,
    pub confirm_time: Option<TimeOfDay>,
    pub targets: TargetHits,

    // Inverse breakout (reversal through the opposite side of the box)
    pub inverse_breakout: Option<Breakout>,
    pub inverse_breakout_time: Option<TimeOfDay>,
    pub inverse_confirm: Option<Confirmation>,
    pub inverse_confirm_time: Option<TimeOfDay>,
    pub inverse_targets: TargetHits,
}

impl BoxRecord {
    /// A record with the given id and every column absent.
    pub fn empty(id: usize) -> Self {
        Self {
            id,
            ticker: None,
            dataset: None,
            date: None,
            high_box: None,
            low_box: None,
            initial_high_box: None,
            initial_low_box: None,
            start_time: None,
            end_time: None,
            breakout: None,
            breakout_time: None,
            confirm: None,
            confirm_time: None,
            targets: TargetHits::default(),
            inverse_breakout: None,
            inverse_breakout_time: None,
            inverse_confirm: None,
            inverse_confirm_time: None,
            inverse_targets: TargetHits::default(),
        }
    }

    pub fn weekday(&self) -> Option<u32> {
        self.date.as_ref().and_then(SessionDate::weekday)
    }
}
