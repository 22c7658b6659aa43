use average::Mean;
use chrono::{DurationRound, NaiveDateTime, TimeDelta};
use itertools::Itertools;

use crate::{
    core::series::AnnualSeries,
    prelude::*,
    quantity::{energy::GigawattHours, power::Megawatts},
};

const ONE_HOUR: TimeDelta = TimeDelta::hours(1);

/// Average the settlement interval demand within every clock hour.
///
/// The trailing bucket is dropped: a monthly market export ends with the first
/// interval of the following month. Missing hours are an error, the series must stay
/// aligned with the calendar.
pub fn resample_hourly(
    samples: &[(NaiveDateTime, f64)],
) -> Result<Vec<(NaiveDateTime, Megawatts)>, PipelineError> {
    let truncated = samples
        .iter()
        .map(|(timestamp, demand)| {
            let hour = timestamp.duration_trunc(ONE_HOUR).map_err(|error| {
                PipelineError::InputFormat(format!("cannot truncate `{timestamp}`: {error}"))
            })?;
            Ok((hour, *demand))
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;
    let mut hourly = Vec::new();
    for (hour, samples) in &truncated.into_iter().chunk_by(|(hour, _)| *hour) {
        let mean: Mean = samples.map(|(_, demand)| demand).collect();
        hourly.push((hour, Megawatts(mean.mean())));
    }
    if let Some(((previous, _), (next, _))) = hourly
        .iter()
        .tuple_windows()
        .find(|((previous, _), (next, _))| *next - *previous != ONE_HOUR)
    {
        return Err(PipelineError::InputFormat(format!(
            "demand readings jump from {previous} to {next}"
        )));
    }
    hourly.pop();
    Ok(hourly)
}

/// Stitch the hourly demand of several exports in chronological order.
#[instrument(skip_all, fields(n_exports = exports.len()))]
pub fn stitch(mut exports: Vec<Vec<(NaiveDateTime, Megawatts)>>) -> AnnualSeries {
    exports.retain(|export| !export.is_empty());
    exports.sort_by_key(|export| export[0].0);
    exports.into_iter().flatten().map(|(_, demand)| demand).collect()
}

/// Scale the series so that it sums up to the target annual consumption.
#[instrument(skip_all, fields(target = %target))]
pub fn scale_to_consumption(
    series: &AnnualSeries,
    target: GigawattHours,
) -> Result<AnnualSeries, PipelineError> {
    let current = GigawattHours::from(series.total_energy());
    if current <= GigawattHours::ZERO {
        return Err(PipelineError::InputFormat(format!(
            "cannot scale a series consuming {current}"
        )));
    }
    let scale = target / current;
    info!(%current, scale, "scaling");
    Ok(series.iter().map(|demand| demand * scale).collect())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;

    fn five_minute_export(month: u32, demand: impl Fn(u32) -> f64) -> Vec<(NaiveDateTime, f64)> {
        let start = NaiveDate::from_ymd_opt(2022, month, 1).unwrap().and_hms_opt(0, 5, 0).unwrap();
        let end =
            NaiveDate::from_ymd_opt(2022, month + 1, 1).unwrap().and_hms_opt(0, 5, 0).unwrap();
        std::iter::successors(Some(start), |timestamp| Some(*timestamp + TimeDelta::minutes(5)))
            .take_while(|timestamp| *timestamp < end)
            .map(|timestamp| (timestamp, demand(chrono::Timelike::hour(&timestamp))))
            .collect()
    }

    #[test]
    fn test_resample_hourly() -> Result<(), PipelineError> {
        let hourly = resample_hourly(&five_minute_export(2, |hour| f64::from(hour) * 100.0))?;
        // Readings from 00:05 up to and including 00:00 of March 1st, which is dropped:
        assert_eq!(hourly.len(), 28 * 24);
        assert_abs_diff_eq!(hourly[0].1.0, 0.0);
        assert_abs_diff_eq!(hourly[13].1.0, 1300.0);
        assert_eq!(
            hourly.last().unwrap().0,
            NaiveDate::from_ymd_opt(2022, 2, 28).unwrap().and_hms_opt(23, 0, 0).unwrap(),
        );
        Ok(())
    }

    #[test]
    fn test_resample_gap() {
        let mut samples = five_minute_export(1, |_| 1.0);
        samples.retain(|(timestamp, _)| {
            timestamp.date() != NaiveDate::from_ymd_opt(2022, 1, 10).unwrap()
                || chrono::Timelike::hour(timestamp) != 7
        });
        assert!(matches!(
            resample_hourly(&samples),
            Err(PipelineError::InputFormat(message)) if message.contains("2022-01-10 06:00:00")
        ));
    }

    #[test]
    fn test_stitch_chronologically() -> Result<(), PipelineError> {
        let february = resample_hourly(&five_minute_export(2, |_| 2.0))?;
        let january = resample_hourly(&five_minute_export(1, |_| 1.0))?;
        let series = stitch(vec![february, january]);
        assert_eq!(series.len(), (31 + 28) * 24);
        assert_eq!(series.0[0], Megawatts(1.0));
        assert_eq!(series.0[31 * 24], Megawatts(2.0));
        Ok(())
    }

    #[test]
    fn test_scale_to_consumption() -> Result<(), PipelineError> {
        let series: AnnualSeries =
            (0..8760).map(|hour| Megawatts(f64::from(hour % 24) * 500.0)).collect();
        let scaled = scale_to_consumption(&series, GigawattHours(109_955.026))?;
        let consumption = GigawattHours::from(scaled.total_energy());
        assert_abs_diff_eq!(consumption.0, 109_955.026, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_scale_empty() {
        assert!(scale_to_consumption(&AnnualSeries::default(), GigawattHours(1.0)).is_err());
    }
}
