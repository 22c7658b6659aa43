use std::collections::{HashMap, hash_map::Entry};

use chrono::Datelike;

use crate::{
    core::{
        calendar::{DayType, days_of_year, hours_in_year},
        series::AnnualSeries,
        synthesizer::{DailyLoad, DaySynthesizer},
    },
    prelude::*,
};

/// Concatenate the synthesized days of the year in calendar order.
///
/// A day only depends on its month and day type, so each of these is synthesized once.
#[instrument(skip(synthesizer))]
pub fn assemble(
    year: i32,
    synthesizer: &DaySynthesizer<'_>,
) -> Result<AnnualSeries, PipelineError> {
    let mut days: HashMap<(u32, DayType), DailyLoad> = HashMap::new();
    let mut series = Vec::with_capacity(hours_in_year(year)?);

    for date in days_of_year(year)? {
        let key = (date.month(), DayType::of(date));
        let day = match days.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => *entry.insert(synthesizer.synthesize(key.1, key.0)?),
        };
        series.extend_from_slice(&day);
    }

    debug!(len = series.len(), n_distinct_days = days.len(), "assembled");
    Ok(AnnualSeries(series))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::Weekday;

    use super::*;
    use crate::{
        core::{
            blender::{CategoryPercentages, MonthlyPercentages, SolarScales},
            calendar::DayCounts,
            normalizer::{DensityColumn, DensityProfiles},
            profile::{HOURS_PER_DAY, HourlyProfile},
            size_class::{SizeClass, VehicleSizeEnergy},
        },
        quantity::energy::GigawattHours,
    };

    const COORDINATED: &str = "Coordinated Charging";

    fn peak_at(hour: usize) -> HourlyProfile {
        let mut values = [0.0; HOURS_PER_DAY];
        values[hour] = 1.0;
        HourlyProfile(values)
    }

    fn profiles(uncoordinated_peak: usize) -> DensityProfiles {
        DensityProfiles::try_from_columns(SizeClass::ALL.into_iter().flat_map(|size_class| {
            let uncoordinated = format!("Uncoordinated Charging - {size_class}, x");
            let coordinated = format!("{COORDINATED} - {size_class}, x");
            [
                DensityColumn::new(uncoordinated, peak_at(uncoordinated_peak)).unwrap(),
                DensityColumn::new(coordinated, peak_at(12)).unwrap(),
            ]
        }))
        .unwrap()
    }

    const ENERGY: VehicleSizeEnergy = VehicleSizeEnergy {
        small: GigawattHours(2623.0),
        medium: GigawattHours(3418.0),
        large: GigawattHours(3504.0),
    };

    fn assemble_year(year: i32) -> Result<AnnualSeries, PipelineError> {
        let weekday = profiles(19);
        let weekend = profiles(10);
        let base: CategoryPercentages =
            [("Uncoordinated Charging", 0.5), (COORDINATED, 0.5)].into_iter().collect();
        let percentages = MonthlyPercentages::blend(&base, COORDINATED, &SolarScales::default())?;
        let synthesizer = DaySynthesizer::builder()
            .weekday(&weekday)
            .weekend(&weekend)
            .percentages(&percentages)
            .energy(ENERGY)
            .day_counts(DayCounts::of_year(year)?)
            .build();
        assemble(year, &synthesizer)
    }

    #[test]
    fn test_length() -> Result<(), PipelineError> {
        assert_eq!(assemble_year(2050)?.len(), 8760);
        assert_eq!(assemble_year(2048)?.len(), 8784);
        Ok(())
    }

    #[test]
    fn test_calendar_order() -> Result<(), PipelineError> {
        let series = assemble_year(2050)?;
        // January 1, 2050 is a Saturday: the uncoordinated peak sits at 10:00.
        assert_eq!(chrono::NaiveDate::from_ymd_opt(2050, 1, 1).unwrap().weekday(), Weekday::Sat);
        assert!(series.0[10] > series.0[19]);
        // January 3 is a Monday: the peak moves to 19:00.
        let monday = 2 * 24;
        assert!(series.0[monday + 19] > series.0[monday + 10]);
        Ok(())
    }

    #[test]
    fn test_total_energy() -> Result<(), PipelineError> {
        let series = assemble_year(2050)?;
        let total = GigawattHours::from(series.total_energy());
        assert_abs_diff_eq!(total.0, ENERGY.total().0, epsilon = ENERGY.total().0 * 0.03);
        Ok(())
    }

    #[test]
    fn test_solar_follows_month() -> Result<(), PipelineError> {
        let series = assemble_year(2050)?;
        // Noon is the coordinated peak, June has the weakest solar scale:
        let january_noon = series.0[2 * 24 + 12];
        let june_noon = series.0[(31 + 28 + 31 + 30 + 31 + 1) * 24 + 12];
        assert!(january_noon > june_noon);
        Ok(())
    }
}
