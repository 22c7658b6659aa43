use chrono::{Datelike, Month, NaiveDate, Weekday};

use crate::error::PipelineError;

/// Days per month of a non-leap year.
pub const MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, derive_more::Display)]
pub enum DayType {
    #[display("weekday")]
    Weekday,

    #[display("weekend")]
    Weekend,
}

impl DayType {
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => Self::Weekend,
            _ => Self::Weekday,
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DayCounts {
    pub weekday: u32,
    pub weekend: u32,
}

impl DayCounts {
    pub fn of_year(year: i32) -> Result<Self, PipelineError> {
        let (weekday, weekend) =
            days_of_year(year)?.fold((0, 0), |(weekday, weekend), date| match DayType::of(date) {
                DayType::Weekday => (weekday + 1, weekend),
                DayType::Weekend => (weekday, weekend + 1),
            });
        Ok(Self { weekday, weekend })
    }

    #[must_use]
    pub const fn total(self) -> u32 {
        self.weekday + self.weekend
    }

    #[must_use]
    pub const fn count(self, day_type: DayType) -> u32 {
        match day_type {
            DayType::Weekday => self.weekday,
            DayType::Weekend => self.weekend,
        }
    }

    /// Share of the year's days that are weekdays.
    #[must_use]
    pub fn weekday_ratio(self) -> f64 {
        f64::from(self.weekday) / f64::from(self.total())
    }

    #[must_use]
    pub fn weekend_ratio(self) -> f64 {
        1.0 - self.weekday_ratio()
    }

    #[must_use]
    pub fn ratio(self, day_type: DayType) -> f64 {
        match day_type {
            DayType::Weekday => self.weekday_ratio(),
            DayType::Weekend => self.weekend_ratio(),
        }
    }
}

/// Iterate over the dates of the year from January 1 to December 31.
pub fn days_of_year(year: i32) -> Result<impl Iterator<Item = NaiveDate>, PipelineError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| PipelineError::Configuration(format!("{year} is not a supported year")))?;
    Ok(first.iter_days().take_while(move |date| date.year() == year))
}

pub fn hours_in_year(year: i32) -> Result<usize, PipelineError> {
    Ok(days_of_year(year)?.count() * 24)
}

#[must_use]
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|month| Month::try_from(month).ok())
        .map_or("?", |month| month.name())
}
