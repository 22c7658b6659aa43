use bon::Builder;
use itertools::Itertools;

use crate::{
    core::{
        blender::{CategoryPercentages, MonthlyPercentages},
        calendar::{DayCounts, DayType},
        normalizer::{DensityColumn, DensityProfiles},
        profile::{HOURS_PER_DAY, HourlyProfile},
        size_class::{SizeClass, VehicleSizeEnergy},
    },
    error::PipelineError,
    quantity::{energy::MegawattHours, power::Megawatts, time::Hours},
};

pub type DailyLoad = [Megawatts; HOURS_PER_DAY];

/// Turns density profiles and blended percentages into absolute hourly charging power.
#[derive(Builder)]
pub struct DaySynthesizer<'a> {
    weekday: &'a DensityProfiles,
    weekend: &'a DensityProfiles,
    percentages: &'a MonthlyPercentages,
    energy: VehicleSizeEnergy,
    day_counts: DayCounts,
}

impl DaySynthesizer<'_> {
    /// Charging power of a single day of the given type in the given month.
    pub fn synthesize(&self, day_type: DayType, month: u32) -> Result<DailyLoad, PipelineError> {
        let profiles = match day_type {
            DayType::Weekday => self.weekday,
            DayType::Weekend => self.weekend,
        };
        let percentages = self.percentages.on_month(month)?;

        let mut day = [Megawatts::ZERO; HOURS_PER_DAY];
        for size_class in SizeClass::ALL {
            let density =
                superimpose(profiles.size_class(size_class), percentages).map_err(|error| {
                    PipelineError::DataMismatch(format!(
                        "{day_type} in month {month}, {size_class} vehicles: {error}"
                    ))
                })?;
            let daily_energy = self.daily_energy(size_class, day_type);
            for (power, share) in day.iter_mut().zip(density.iter()) {
                *power += daily_energy * share / Hours::ONE;
            }
        }
        Ok(day)
    }

    /// Energy charged by the size class on one day of the given type:
    /// the annual energy split by the day type ratio, then spread over the days of that type.
    fn daily_energy(&self, size_class: SizeClass, day_type: DayType) -> MegawattHours {
        MegawattHours::from(self.energy.get(size_class)) * self.day_counts.ratio(day_type)
            / f64::from(self.day_counts.count(day_type))
    }
}

/// Weight every density column by the share of its charge type and sum them up.
///
/// Columns and percentages are joined by charge type label, both sides must list
/// exactly the same charge types.
pub fn superimpose(
    columns: &[DensityColumn],
    percentages: &CategoryPercentages,
) -> Result<HourlyProfile, String> {
    if columns.len() != percentages.len() {
        return Err(format!(
            "{} density columns against {} charge type percentages",
            columns.len(),
            percentages.len(),
        ));
    }
    if let Some(duplicate) = columns.iter().map(|column| &column.charge_type).duplicates().next() {
        return Err(format!("charge type `{duplicate}` has more than one density column"));
    }
    columns.iter().try_fold(HourlyProfile::ZERO, |sum, column| {
        let share = percentages
            .get(&column.charge_type)
            .ok_or_else(|| format!("no percentage for the density column `{}`", column.header))?;
        Ok(sum + column.profile * share)
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::energy::GigawattHours;

    const FLAT: HourlyProfile = HourlyProfile([1.0 / 24.0; HOURS_PER_DAY]);

    fn evening() -> HourlyProfile {
        let mut values = [0.0; HOURS_PER_DAY];
        values[18..22].fill(0.25);
        HourlyProfile(values)
    }

    fn profiles() -> DensityProfiles {
        DensityProfiles::try_from_columns(SizeClass::ALL.into_iter().flat_map(|size_class| {
            [
                DensityColumn::new(format!("Home - {size_class}, survey"), evening()).unwrap(),
                DensityColumn::new(format!("Solar - {size_class}, survey"), FLAT).unwrap(),
            ]
        }))
        .unwrap()
    }

    fn percentages() -> MonthlyPercentages {
        MonthlyPercentages::constant(&[("Home", 0.75), ("Solar", 0.25)].into_iter().collect())
    }

    #[test]
    fn test_zero_energy() -> Result<(), PipelineError> {
        let (profiles, percentages) = (profiles(), percentages());
        let synthesizer = DaySynthesizer::builder()
            .weekday(&profiles)
            .weekend(&profiles)
            .percentages(&percentages)
            .energy(VehicleSizeEnergy::default())
            .day_counts(DayCounts { weekday: 260, weekend: 105 })
            .build();
        for day_type in [DayType::Weekday, DayType::Weekend] {
            let day = synthesizer.synthesize(day_type, 6)?;
            assert!(day.iter().all(|power| *power == Megawatts::ZERO));
        }
        Ok(())
    }

    #[test]
    fn test_flat_profile() -> Result<(), PipelineError> {
        let profiles = DensityProfiles::try_from_columns(
            SizeClass::ALL.map(|size_class| {
                DensityColumn::new(format!("Solar - {size_class}, survey"), FLAT).unwrap()
            }),
        )?;
        let percentages = MonthlyPercentages::constant(&[("Solar", 1.0)].into_iter().collect());
        let day_counts = DayCounts { weekday: 260, weekend: 105 };
        let synthesizer = DaySynthesizer::builder()
            .weekday(&profiles)
            .weekend(&profiles)
            .percentages(&percentages)
            .energy(VehicleSizeEnergy { medium: GigawattHours(1000.0), ..Default::default() })
            .day_counts(day_counts)
            .build();

        let day = synthesizer.synthesize(DayType::Weekday, 1)?;
        let expected = (1.0 / 24.0) * 0.7123 * 1000.0 * 1000.0 / 260.0;
        for power in day {
            assert_abs_diff_eq!(power.0, expected, epsilon = 0.01);
            assert_abs_diff_eq!(
                power.0,
                (1.0 / 24.0) * day_counts.weekday_ratio() * 1000.0 * 1000.0 / 260.0,
                epsilon = 1e-9,
            );
        }
        Ok(())
    }

    #[test]
    fn test_daily_energy() -> Result<(), PipelineError> {
        let (profiles, percentages) = (profiles(), percentages());
        let energy = VehicleSizeEnergy {
            small: GigawattHours(2623.0),
            medium: GigawattHours(3418.0),
            large: GigawattHours(3504.0),
        };
        let synthesizer = DaySynthesizer::builder()
            .weekday(&profiles)
            .weekend(&profiles)
            .percentages(&percentages)
            .energy(energy)
            .day_counts(DayCounts { weekday: 260, weekend: 105 })
            .build();
        let day = synthesizer.synthesize(DayType::Weekend, 12)?;
        let total: f64 = day.iter().map(|power| power.0).sum();
        // Every day carries the same share of the annual energy:
        assert_abs_diff_eq!(total, 9545.0 * 1000.0 / 365.0, epsilon = 1e-3);
        // Evening hours carry the home charging on top of the flat solar share:
        assert!(day[19] > day[3]);
        Ok(())
    }

    #[test]
    fn test_count_mismatch() {
        let profiles = profiles();
        let percentages = MonthlyPercentages::constant(&[("Home", 1.0)].into_iter().collect());
        let synthesizer = DaySynthesizer::builder()
            .weekday(&profiles)
            .weekend(&profiles)
            .percentages(&percentages)
            .energy(VehicleSizeEnergy::default())
            .day_counts(DayCounts { weekday: 260, weekend: 105 })
            .build();
        assert!(matches!(
            synthesizer.synthesize(DayType::Weekday, 1),
            Err(PipelineError::DataMismatch(_))
        ));
    }

    #[test]
    fn test_label_mismatch() {
        let columns = profiles().size_class(SizeClass::Small).to_vec();
        let percentages = [("Home", 0.5), ("Workplace", 0.5)].into_iter().collect();
        let error = superimpose(&columns, &percentages).unwrap_err();
        assert!(error.contains("Solar - Small"), "{error}");
    }

    #[test]
    fn test_superimpose() {
        let columns = profiles().size_class(SizeClass::Large).to_vec();
        let density = superimpose(&columns, &[("Solar", 0.25), ("Home", 0.75)].into_iter().collect())
            .unwrap();
        assert_abs_diff_eq!(density.sum(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(density.0[0], 0.25 / 24.0, epsilon = 1e-12);
        assert_abs_diff_eq!(density.0[18], 0.25 / 24.0 + 0.75 * 0.25, epsilon = 1e-12);
    }
}
