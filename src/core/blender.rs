use serde::{Deserialize, Serialize};

use crate::{io::percentages::PercentageTable, prelude::*};

/// Precomputed Queensland solar seasonality: month mean output over the annual mean,
/// weighted by the month length.
pub const DEFAULT_SOLAR_SCALES: [f64; 12] = [
    1.093_333_260_116_656_3,
    0.975_333_906_306_611_2,
    0.904_693_077_103_209_3,
    0.974_128_331_049_643_4,
    0.888_173_755_655_294_3,
    0.792_839_216_676_244_1,
    0.954_833_246_083_246_3,
    1.064_417_096_514_164_8,
    1.101_801_691_189_991,
    1.094_491_788_534_328,
    1.084_464_930_909_302_8,
    1.065_352_152_445_179,
];

/// Percentages are kept at the precision the survey publishes them with.
const PERCENTAGE_DIGITS: i32 = 8;

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SolarScales(pub [f64; 12]);

impl Default for SolarScales {
    fn default() -> Self {
        Self(DEFAULT_SOLAR_SCALES)
    }
}

impl SolarScales {
    /// Scale factor of the month, numbered from 1.
    pub fn on_month(&self, month: u32) -> Result<f64, PipelineError> {
        month
            .checked_sub(1)
            .and_then(|index| self.0.get(index as usize))
            .copied()
            .ok_or_else(|| PipelineError::Configuration(format!("month {month} is out of range")))
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// Ordered charge type shares.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryPercentages(Vec<(String, f64)>);

impl<S: Into<String>> FromIterator<(S, f64)> for CategoryPercentages {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(label, share)| (label.into(), share)).collect())
    }
}

impl CategoryPercentages {
    /// Take the scenario column, dropping the charge types without a share.
    #[instrument(skip(table))]
    pub fn from_scenario(table: &PercentageTable, scenario: u32) -> Result<Self, PipelineError> {
        let column = table.scenario(scenario)?;
        if column.values.len() != table.charge_types.len() {
            return Err(PipelineError::DataMismatch(format!(
                "`{}` has {} values for {} charge types",
                column.header,
                column.values.len(),
                table.charge_types.len(),
            )));
        }
        let mut percentages = Vec::with_capacity(column.values.len());
        for (charge_type, value) in table.charge_types.iter().zip(&column.values) {
            match value {
                Some(value) => percentages.push((charge_type.clone(), round(*value))),
                None => warn!(charge_type, column = column.header, "dropping a missing percentage"),
            }
        }
        Ok(Self(percentages))
    }

    #[must_use]
    pub fn get(&self, charge_type: &str) -> Option<f64> {
        self.0.iter().find(|(label, _)| label == charge_type).map(|(_, share)| *share)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, share)| (label.as_str(), *share))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, share)| share).sum()
    }

    /// Scale the coordinated share by the solar factor and rescale all the other shares
    /// so that the total stays one.
    pub fn blend(&self, coordinated: &str, solar_scale: f64) -> Result<Self, PipelineError> {
        let coordinated_share = self.get(coordinated).ok_or_else(|| {
            PipelineError::Configuration(format!(
                "charge type `{coordinated}` is missing from the percentages"
            ))
        })?;
        let coordinated_share = coordinated_share * solar_scale;

        let static_sum: f64 =
            self.0.iter().filter(|(label, _)| label != coordinated).map(|(_, share)| share).sum();
        if static_sum.abs() < f64::EPSILON {
            return Err(PipelineError::Configuration(format!(
                "shares other than `{coordinated}` sum to zero"
            )));
        }
        let static_scale = (1.0 - coordinated_share) / static_sum;

        Ok(Self(
            self.0
                .iter()
                .map(|(label, share)| {
                    let share =
                        if label == coordinated { coordinated_share } else { share * static_scale };
                    (label.clone(), share)
                })
                .collect(),
        ))
    }
}

/// Blended percentages for each calendar month.
#[must_use]
#[derive(Clone, Debug)]
pub struct MonthlyPercentages(Vec<CategoryPercentages>);

impl MonthlyPercentages {
    pub fn blend(
        base: &CategoryPercentages,
        coordinated: &str,
        solar_scales: &SolarScales,
    ) -> Result<Self, PipelineError> {
        (1..=12)
            .map(|month| base.blend(coordinated, solar_scales.on_month(month)?))
            .collect::<Result<_, _>>()
            .map(Self)
    }

    /// The same percentages all year round.
    #[cfg(test)]
    pub fn constant(percentages: &CategoryPercentages) -> Self {
        Self(vec![percentages.clone(); 12])
    }

    pub fn on_month(&self, month: u32) -> Result<&CategoryPercentages, PipelineError> {
        month
            .checked_sub(1)
            .and_then(|index| self.0.get(index as usize))
            .ok_or_else(|| PipelineError::Configuration(format!("month {month} is out of range")))
    }

    /// Iterate over `(month, percentages)`, months numbered from 1.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &CategoryPercentages)> {
        (1..).zip(&self.0)
    }
}

fn round(value: f64) -> f64 {
    let factor = 10_f64.powi(PERCENTAGE_DIGITS);
    (value * factor).round() / factor
}
