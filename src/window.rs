use serde::{Deserialize, Serialize};
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, Duration,
};

/// Wire format for every date in the dataset and the API surface.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to parse date string: {0}")]
    Parse(#[from] time::error::Parse),
    #[error("Failed to format date string: {0}")]
    Format(#[from] time::error::Format),
}

/// Parse a `YYYY-MM-DD` date string, rejecting anything else.
pub fn parse_date(input: &str) -> Result<Date, time::error::Parse> {
    Date::parse(input, DATE_FORMAT)
}

pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(DATE_FORMAT)
}

/// The trailing-12-months reporting window, pinned to the most recent
/// measurement date at startup. It does not advance with wall-clock time;
/// requests keep seeing the same window until the process restarts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportingWindow {
    pub date_start: String,
    pub date_end: String,
}

impl ReportingWindow {
    /// Window spanning the 365 days ending at `date_end` (inclusive).
    pub fn trailing_year(date_end: &str) -> Result<Self, Error> {
        let end = parse_date(date_end)?;
        let start = end - Duration::days(365);

        Ok(Self {
            date_start: format_date(start)?,
            date_end: format_date(end)?,
        })
    }
}
