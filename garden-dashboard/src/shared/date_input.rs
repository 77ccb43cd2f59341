//! Date-range form values

use chrono::{DateTime, Local, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::shared::error::DashboardError;

/// Display format of a valid date field
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Value of one date field: no bound, a local time, or text that failed to parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Absent,
    Valid(DateTime<Local>),
    Invalid(String),
}

impl DateInput {
    /// Parse operator input
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]` and `YYYY-MM-DD` (local
    /// midnight). Empty input means no bound.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return DateInput::Absent;
        }

        if let Ok(time) = DateTime::parse_from_rfc3339(text) {
            return DateInput::Valid(time.with_timezone(&Local));
        }

        let naive = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            });

        // Wall-clock times inside a DST gap have no local instant
        match naive.and_then(|naive| Local.from_local_datetime(&naive).earliest()) {
            Some(time) => DateInput::Valid(time),
            None => DateInput::Invalid(text.to_string()),
        }
    }

    /// Form default for the start field: one month before `now`
    pub fn month_before(now: DateTime<Local>) -> Self {
        DateInput::Valid(now.checked_sub_months(Months::new(1)).unwrap_or(now))
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, DateInput::Invalid(_))
    }

    /// Request bound in UTC, `None` for no bound
    pub fn to_utc(&self) -> Result<Option<DateTime<Utc>>, DashboardError> {
        match self {
            DateInput::Absent => Ok(None),
            DateInput::Valid(time) => Ok(Some(time.with_timezone(&Utc))),
            DateInput::Invalid(_) => Err(DashboardError::InvalidDate),
        }
    }

    /// Text shown in the form field
    pub fn display(&self) -> String {
        match self {
            DateInput::Absent => String::new(),
            DateInput::Valid(time) => time.format(DATE_INPUT_FORMAT).to_string(),
            DateInput::Invalid(text) => text.clone(),
        }
    }
}
