use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize};

/// The facet selectors of a view. Every field defaults to "no constraint"; an empty
/// string is treated exactly like `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// `0` = Sunday through `6` = Saturday.
    #[serde(deserialize_with = "deserialize_weekday")]
    pub weekday: Option<u32>,
    /// Substring of the session date.
    pub date: Option<String>,
    pub ticker: Option<String>,

    pub breakout: Option<String>,
    pub breakout_time: Option<String>,
    pub confirm: Option<String>,
    pub confirm_time: Option<String>,

    pub inverse_breakout: Option<String>,
    pub inverse_breakout_time: Option<String>,
    pub inverse_confirm: Option<String>,
    pub inverse_confirm_time: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weekday(mut self, weekday: u32) -> Self {
        self.weekday = Some(weekday);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    pub fn with_breakout(mut self, breakout: impl Into<String>) -> Self {
        self.breakout = Some(breakout.into());
        self
    }

    pub fn with_breakout_time(mut self, time: impl Into<String>) -> Self {
        self.breakout_time = Some(time.into());
        self
    }

    pub fn with_confirm(mut self, confirm: impl Into<String>) -> Self {
        self.confirm = Some(confirm.into());
        self
    }

    pub fn with_confirm_time(mut self, time: impl Into<String>) -> Self {
        self.confirm_time = Some(time.into());
        self
    }

    pub fn with_inverse_breakout(mut self, breakout: impl Into<String>) -> Self {
        self.inverse_breakout = Some(breakout.into());
        self
    }

    pub fn with_inverse_breakout_time(mut self, time: impl Into<String>) -> Self {
        self.inverse_breakout_time = Some(time.into());
        self
    }

    pub fn with_inverse_confirm(mut self, confirm: impl Into<String>) -> Self {
        self.inverse_confirm = Some(confirm.into());
        self
    }

    pub fn with_inverse_confirm_time(mut self, time: impl Into<String>) -> Self {
        self.inverse_confirm_time = Some(time.into());
        self
    }

    /// Number of facets that actually constrain the result.
    pub fn active_facets(&self) -> usize {
        let text_facets = [
            &self.date,
            &self.ticker,
            &self.breakout,
            &self.breakout_time,
            &self.confirm,
            &self.confirm_time,
            &self.inverse_breakout,
            &self.inverse_breakout_time,
            &self.inverse_confirm,
            &self.inverse_confirm_time,
        ];
        let active_text = text_facets.iter().filter(|f| active(f).is_some()).count();
        active_text + usize::from(self.weekday.is_some())
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active_facets() == 0
    }
}

/// The criterion value of a text facet, or `None` when the facet is inactive.
pub fn active(facet: &Option<String>) -> Option<&str> {
    facet.as_deref().filter(|s| !s.is_empty())
}

/// Parses a weekday criterion as typed by a user: blank means "any day".
pub fn parse_weekday(input: &str) -> Result<Option<u32>, CoreError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|e| CoreError::InvalidInput("weekday".to_string(), format!("{trimmed}: {e}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeekdayInput {
    Number(u32),
    Text(String),
}

fn deserialize_weekday<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<WeekdayInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(WeekdayInput::Number(n)) => Ok(Some(n)),
        Some(WeekdayInput::Text(t)) => parse_weekday(&t).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_strings_are_inactive() {
        let criteria = FilterCriteria::new().with_breakout("").with_confirm("true");
        assert_eq!(criteria.active_facets(), 1);
        assert!(FilterCriteria::default().is_unconstrained());
    }

    #[test]
    fn weekday_accepts_number_text_and_blank() {
        let c: FilterCriteria = serde_json::from_value(json!({ "weekday": 3 })).unwrap();
        assert_eq!(c.weekday, Some(3));

        let c: FilterCriteria = serde_json::from_value(json!({ "weekday": "1" })).unwrap();
        assert_eq!(c.weekday, Some(1));

        let c: FilterCriteria = serde_json::from_value(json!({ "weekday": "" })).unwrap();
        assert_eq!(c.weekday, None);

        let c: FilterCriteria = serde_json::from_value(json!({ "weekday": null })).unwrap();
        assert_eq!(c.weekday, None);

        assert!(serde_json::from_value::<FilterCriteria>(json!({ "weekday": "monday" })).is_err());
    }

    #[test]
    fn camel_case_field_names() {
        let c: FilterCriteria = serde_json::from_value(json!({
            "breakout": "up",
            "inverseConfirmTime": "10:"
        }))
        .unwrap();
        assert_eq!(c.breakout.as_deref(), Some("up"));
        assert_eq!(c.inverse_confirm_time.as_deref(), Some("10:"));
        assert_eq!(c.active_facets(), 2);
    }
}
