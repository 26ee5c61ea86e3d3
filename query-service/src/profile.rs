use serde::Deserialize;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime,
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month]/[day]/[year] [hour]:[minute]:[second]");

/// Timestamp format profile for the service. Exactly one is active per
/// process; it controls request parsing, response rendering, and which lookup
/// endpoint the router exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Day-granularity timestamps, `YYYY-MM-DD`. Serves `/api/get_data_by_date`.
    Daily,
    /// Full datetimes, `MM/DD/YYYY HH:MM:SS`. Serves `/api/get_data_range`.
    Datetime,
}

impl Profile {
    /// Human-readable format string for error messages.
    pub const fn format_hint(self) -> &'static str {
        match self {
            Profile::Daily => "YYYY-MM-DD",
            Profile::Datetime => "MM/DD/YYYY HH:MM:SS",
        }
    }

    /// Parses a timestamp string in this profile's format into a UTC instant.
    /// Day-granularity timestamps map to midnight UTC.
    pub fn parse_ts(self, s: &str) -> Result<OffsetDateTime, time::error::Parse> {
        match self {
            Profile::Daily => Date::parse(s, DATE_FORMAT).map(|d| d.midnight().assume_utc()),
            Profile::Datetime => {
                PrimitiveDateTime::parse(s, DATETIME_FORMAT).map(|dt| dt.assume_utc())
            }
        }
    }

    pub fn render_ts(self, ts: OffsetDateTime) -> String {
        let rendered = match self {
            Profile::Daily => ts.date().format(&DATE_FORMAT),
            Profile::Datetime => ts.format(&DATETIME_FORMAT),
        };
        // The format descriptions above only use components every timestamp has.
        rendered.expect("timestamp formatting cannot fail")
    }
}

/// Parses the `date` query parameter, which is always `YYYY-MM-DD`.
pub fn parse_day(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, DATE_FORMAT)
}

pub const DAY_FORMAT_HINT: &str = "YYYY-MM-DD";
