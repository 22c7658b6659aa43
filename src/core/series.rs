use std::ops::{Add, Sub};

use chrono::Datelike;
use itertools::Itertools;

use crate::{
    core::calendar::days_of_year,
    error::PipelineError,
    quantity::{energy::MegawattHours, power::Megawatts, time::Hours},
};

/// Hourly load of a whole year in calendar order, hour 0 being January 1, 00:00.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnualSeries(pub Vec<Megawatts>);

impl AnnualSeries {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Megawatts> + '_ {
        self.0.iter().copied()
    }

    pub fn total_energy(&self) -> MegawattHours {
        self.iter().map(|power| power * Hours::ONE).sum()
    }

    #[must_use]
    pub fn peak(&self) -> Option<Megawatts> {
        self.iter().max()
    }

    /// Element-wise sum, for stacking the synthesized load on top of a baseline.
    pub fn try_add(&self, other: &Self) -> Result<Self, PipelineError> {
        self.zip_with(other, Add::add)
    }

    /// Element-wise difference, for removing an assumed load from a measured one.
    pub fn try_sub(&self, other: &Self) -> Result<Self, PipelineError> {
        self.zip_with(other, Sub::sub)
    }

    fn zip_with(
        &self,
        other: &Self,
        op: impl Fn(Megawatts, Megawatts) -> Megawatts,
    ) -> Result<Self, PipelineError> {
        if self.len() != other.len() {
            return Err(PipelineError::LengthMismatch { expected: self.len(), actual: other.len() });
        }
        Ok(Self(self.iter().zip(other.iter()).map(|(lhs, rhs)| op(lhs, rhs)).collect()))
    }

    /// Split the series into the calendar months of the year.
    ///
    /// Yields `(month, hourly values)`, months numbered from 1.
    pub fn months(
        &self,
        year: i32,
    ) -> Result<impl Iterator<Item = (u32, Vec<Megawatts>)> + '_, PipelineError> {
        let days = days_of_year(year)?.collect_vec();
        let expected = days.len() * 24;
        if self.len() != expected {
            return Err(PipelineError::LengthMismatch { expected, actual: self.len() });
        }
        let months = days
            .into_iter()
            .zip(self.0.chunks_exact(24))
            .chunk_by(|(date, _)| date.month())
            .into_iter()
            .map(|(month, days)| {
                (month, days.flat_map(|(_, hours)| hours.iter().copied()).collect())
            })
            .collect_vec();
        Ok(months.into_iter())
    }
}

impl FromIterator<Megawatts> for AnnualSeries {
    fn from_iter<T: IntoIterator<Item = Megawatts>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
