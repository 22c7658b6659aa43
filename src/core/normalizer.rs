use std::collections::BTreeMap;

use average::{Estimate, Mean};
use chrono::Timelike;
use itertools::Itertools;

use crate::{
    core::{
        profile::{HOURS_PER_DAY, HourlyProfile},
        size_class::SizeClass,
    },
    io::density::DensityTable,
    prelude::*,
};

/// Normalized charging density of one charge type for one vehicle size class.
#[must_use]
#[derive(Clone, Debug)]
pub struct DensityColumn {
    pub header: String,
    pub charge_type: String,
    pub size_class: SizeClass,
    pub profile: HourlyProfile,
}

impl DensityColumn {
    pub fn new(header: impl Into<String>, profile: HourlyProfile) -> Result<Self, PipelineError> {
        let header = header.into();
        let size_class = SizeClass::detect(&header).ok_or_else(|| {
            PipelineError::InputFormat(format!("`{header}` names no vehicle size class"))
        })?;
        let charge_type = charge_type_of(&header, size_class).to_owned();
        Ok(Self { header, charge_type, size_class, profile })
    }
}

/// The label shared with the percentage table: everything before ` - <Size>`.
fn charge_type_of(header: &str, size_class: SizeClass) -> &str {
    header
        .find(&format!(" - {}", size_class.label()))
        .map_or_else(|| header.split(',').next().unwrap_or(header), |index| &header[..index])
        .trim()
}

/// Density columns of a day type, split by vehicle size class.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct DensityProfiles(BTreeMap<SizeClass, Vec<DensityColumn>>);

impl DensityProfiles {
    /// Group the columns by size class, requiring every class to be present.
    pub fn try_from_columns(
        columns: impl IntoIterator<Item = DensityColumn>,
    ) -> Result<Self, PipelineError> {
        let this = Self(
            columns.into_iter().into_group_map_by(|column| column.size_class).into_iter().collect(),
        );
        for size_class in SizeClass::ALL {
            if this.size_class(size_class).is_empty() {
                return Err(PipelineError::InputFormat(format!(
                    "no density columns for {size_class} vehicles"
                )));
            }
        }
        Ok(this)
    }

    #[must_use]
    pub fn size_class(&self, size_class: SizeClass) -> &[DensityColumn] {
        self.0.get(&size_class).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DensityColumn> {
        self.0.values().flatten()
    }
}

/// Resample the readings into hourly means and turn every column into a density.
#[instrument(skip_all)]
pub fn normalize(table: &DensityTable) -> Result<DensityProfiles, PipelineError> {
    let hourly = resample_hourly(table)?;

    let mut columns = Vec::with_capacity(hourly.len());
    for (header, profile) in table.headers.iter().zip(hourly) {
        if SizeClass::detect(header).is_none() {
            debug!(header, "skipping a column without a vehicle size class");
            continue;
        }
        let zero_sum = || PipelineError::InputFormat(format!("`{header}` sums to zero"));
        // Second division absorbs the rounding drift of the first one:
        let profile = profile.normalized().ok_or_else(zero_sum)?.normalized().ok_or_else(zero_sum)?;
        let column = DensityColumn::new(header.as_str(), profile)?;
        debug!(header, column.charge_type, %column.size_class, "normalized");
        columns.push(column);
    }

    DensityProfiles::try_from_columns(columns)
}

/// Average the readings of every column within each hour of day.
fn resample_hourly(table: &DensityTable) -> Result<Vec<HourlyProfile>, PipelineError> {
    let mut means: Vec<[Mean; HOURS_PER_DAY]> =
        table.headers.iter().map(|_| std::array::from_fn(|_| Mean::new())).collect();
    for row in &table.rows {
        let hour = row.time.hour() as usize;
        for (column, value) in means.iter_mut().zip(&row.values) {
            if let Some(value) = value {
                column[hour].add(*value);
            }
        }
    }

    table
        .headers
        .iter()
        .zip(means)
        .map(|(header, column)| {
            let mut profile = HourlyProfile::ZERO;
            for (hour, (value, mean)) in profile.0.iter_mut().zip(column).enumerate() {
                if mean.is_empty() {
                    return Err(PipelineError::InputFormat(format!(
                        "`{header}` has no readings between {hour:02}:00 and {hour:02}:59"
                    )));
                }
                *value = mean.mean();
            }
            Ok(profile)
        })
        .collect()
}
