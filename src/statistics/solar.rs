use average::{Estimate, Mean};
use chrono::{Datelike, NaiveDateTime};

use crate::{
    core::{
        blender::SolarScales,
        calendar::{MONTH_DAYS, month_name},
    },
    prelude::*,
};

/// Estimate the seasonal solar scales from a generation trace.
///
/// Each scale is the month mean over the mean of the monthly means, weighted by the month
/// length, so that a constant trace yields `12 × days / 365`.
#[instrument(skip_all)]
pub fn estimate_solar_scales(
    samples: impl IntoIterator<Item = (NaiveDateTime, f64)>,
) -> Result<SolarScales, PipelineError> {
    let mut monthly: [Mean; 12] = std::array::from_fn(|_| Mean::new());
    for (timestamp, output) in samples {
        monthly[timestamp.month0() as usize].add(output);
    }

    let mut means = [0.0; 12];
    for (month, (mean, estimate)) in (1..).zip(means.iter_mut().zip(&monthly)) {
        if estimate.is_empty() {
            return Err(PipelineError::InputFormat(format!(
                "no solar samples in {}",
                month_name(month)
            )));
        }
        *mean = estimate.mean();
    }

    let mean_of_means = means.iter().sum::<f64>() / 12.0;
    if mean_of_means.abs() < f64::EPSILON {
        return Err(PipelineError::InputFormat("the solar output is zero all year".to_owned()));
    }
    let total_days = f64::from(MONTH_DAYS.iter().sum::<u32>());

    let mut scales = [0.0; 12];
    for ((scale, mean), days) in scales.iter_mut().zip(means).zip(MONTH_DAYS) {
        *scale = (f64::from(days) / total_days) * (mean / mean_of_means) * 12.0;
    }
    let scales = SolarScales(scales);
    info!(sum = scales.sum(), "estimated");
    Ok(scales)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, TimeDelta};

    use super::*;

    fn hourly_trace(output: impl Fn(NaiveDateTime) -> f64) -> Vec<(NaiveDateTime, f64)> {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        (0..8760)
            .map(|hour| start + TimeDelta::hours(hour))
            .map(|timestamp| (timestamp, output(timestamp)))
            .collect()
    }

    #[test]
    fn test_constant_output() -> Result<(), PipelineError> {
        let scales = estimate_solar_scales(hourly_trace(|_| 0.4))?;
        for (scale, days) in scales.0.into_iter().zip(MONTH_DAYS) {
            assert_abs_diff_eq!(scale, f64::from(days) / 365.0 * 12.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(scales.sum(), 12.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_seasonal_output() -> Result<(), PipelineError> {
        // Southern hemisphere: summer in January, winter in June.
        let scales = estimate_solar_scales(hourly_trace(|timestamp| match timestamp.month() {
            12 | 1 | 2 => 0.3,
            6 | 7 | 8 => 0.1,
            _ => 0.2,
        }))?;
        assert!(scales.0[0] > scales.0[3]);
        assert!(scales.0[3] > scales.0[5]);
        Ok(())
    }

    #[test]
    fn test_missing_month() {
        let trace =
            hourly_trace(|_| 1.0).into_iter().filter(|(timestamp, _)| timestamp.month() != 4);
        assert!(matches!(
            estimate_solar_scales(trace),
            Err(PipelineError::InputFormat(message)) if message.contains("April")
        ));
    }
}
