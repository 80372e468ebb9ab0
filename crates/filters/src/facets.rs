//! One predicate per facet. Each returns `true` without looking at the record when
//! its criterion is inactive, and `false` whenever the inspected column is missing.

use core_types::criteria::active;
use core_types::{BoxRecord, Breakout, Confirmation, TimeOfDay};

pub fn weekday(record: &BoxRecord, criterion: Option<u32>) -> bool {
    match criterion {
        None => true,
        Some(day) => record.weekday() == Some(day),
    }
}

pub fn date(record: &BoxRecord, criterion: &Option<String>) -> bool {
    let Some(needle) = active(criterion) else {
        return true;
    };
    record.date.as_ref().is_some_and(|d| d.raw.contains(needle))
}

pub fn ticker(record: &BoxRecord, criterion: &Option<String>) -> bool {
    let Some(wanted) = active(criterion) else {
        return true;
    };
    record.ticker.as_deref() == Some(wanted)
}

/// Case-insensitive equality on a breakout direction.
pub fn direction(field: Option<&Breakout>, criterion: &Option<String>) -> bool {
    let Some(wanted) = active(criterion) else {
        return true;
    };
    field.is_some_and(|b| b.eq_ignore_case(wanted))
}

/// Case-sensitive substring containment on a time of day, so `"09:"` selects the
/// whole 9 o'clock hour.
pub fn time(field: Option<&TimeOfDay>, criterion: &Option<String>) -> bool {
    let Some(needle) = active(criterion) else {
        return true;
    };
    field.is_some_and(|t| t.contains(needle))
}

/// Case-insensitive equality between the text form of a confirmation and the criterion.
pub fn confirmation(field: Option<&Confirmation>, criterion: &Option<String>) -> bool {
    let Some(wanted) = active(criterion) else {
        return true;
    };
    let wanted = wanted.to_lowercase();
    field
        .and_then(Confirmation::normalized_text)
        .is_some_and(|text| text == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{RawRow, normalize};

    fn record() -> BoxRecord {
        let row = RawRow::new()
            .with("date", "2023-07-31")
            .with("breakout", "Up")
            .with("confirm", true)
            .with("confirm_time", "09:32:10");
        normalize(&row, 0)
    }

    #[test]
    fn inactive_criteria_match_everything() {
        let empty = BoxRecord::empty(0);
        let blank = Some(String::new());
        assert!(weekday(&empty, None));
        assert!(date(&empty, &None));
        assert!(ticker(&empty, &blank));
        assert!(direction(None, &blank));
        assert!(time(None, &None));
        assert!(confirmation(None, &blank));
    }

    #[test]
    fn missing_columns_never_match_active_criteria() {
        let empty = BoxRecord::empty(0);
        assert!(!weekday(&empty, Some(1)));
        assert!(!date(&empty, &Some("2023".into())));
        assert!(!direction(None, &Some("up".into())));
        assert!(!time(None, &Some("09".into())));
        assert!(!confirmation(None, &Some("true".into())));
    }

    #[test]
    fn facet_matching_rules() {
        let r = record();
        assert!(direction(r.breakout.as_ref(), &Some("UP".into())));
        assert!(!direction(r.breakout.as_ref(), &Some("u".into())));
        assert!(time(r.confirm_time.as_ref(), &Some("09:".into())));
        assert!(time(r.confirm_time.as_ref(), &Some(":32".into())));
        assert!(!time(r.confirm_time.as_ref(), &Some("10:".into())));
        assert!(confirmation(r.confirm.as_ref(), &Some("True".into())));
        assert!(!confirmation(r.confirm.as_ref(), &Some("false".into())));
        assert!(date(&r, &Some("07-3".into())));
    }
}
