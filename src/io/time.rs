use chrono::{NaiveDateTime, NaiveTime};

const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Date-time layouts seen in the survey, solar and market exports.
///
/// Day-first layouts come before month-first ones, slashes are never read as month-first.
const DATE_TIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M",
];

#[must_use]
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS.iter().find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Parse a time of day, either bare or as the time part of a full timestamp.
#[must_use]
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        .or_else(|| parse_date_time(text).map(|date_time| date_time.time()))
}
