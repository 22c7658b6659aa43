use std::{io::Read, path::Path};

use chrono::NaiveDateTime;

use crate::{
    io::{csv_reader, open, parse_optional_number, time::parse_date_time},
    prelude::*,
};

/// Named timestamp and value columns of a time series export.
#[derive(Copy, Clone)]
pub struct Columns<'a> {
    pub time: &'a str,
    pub value: &'a str,
}

/// Solar generation trace.
pub const SOLAR_COLUMNS: Columns<'static> = Columns { time: "time", value: "electricity" };

/// Regional market demand export, in megawatts per 5-minute settlement interval.
pub const DEMAND_COLUMNS: Columns<'static> =
    Columns { time: "SETTLEMENTDATE", value: "TOTALDEMAND" };

/// Read `(timestamp, value)` pairs, skipping rows with a missing value.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_timestamped(path: &Path, columns: Columns<'_>) -> Result<Vec<(NaiveDateTime, f64)>> {
    let samples = read_timestamped_from(open(path)?, columns)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    debug!(len = samples.len(), "loaded");
    Ok(samples)
}

pub fn read_timestamped_from(
    reader: impl Read,
    columns: Columns<'_>,
) -> Result<Vec<(NaiveDateTime, f64)>> {
    from_csv(csv_reader(reader), columns)
}

fn from_csv<R: Read>(
    mut reader: csv::Reader<R>,
    columns: Columns<'_>,
) -> Result<Vec<(NaiveDateTime, f64)>> {
    let headers = reader.headers()?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| PipelineError::InputFormat(format!("missing the `{name}` column")))
    };
    let (time_index, value_index) = (position(columns.time)?, position(columns.value)?);

    let mut samples = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = index + 2;
        let cell = record.get(time_index).unwrap_or_default();
        let timestamp = parse_date_time(cell).ok_or_else(|| {
            PipelineError::InputFormat(format!("line {line}: cannot parse `{cell}` as a timestamp"))
        })?;
        match parse_optional_number(record.get(value_index).unwrap_or_default())
            .with_context(|| format!("line {line}"))?
        {
            Some(value) => samples.push((timestamp, value)),
            None => trace!(line, "skipping a missing value"),
        }
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_read_demand() -> Result {
        let samples = read_timestamped_from(
            "REGION,SETTLEMENTDATE,TOTALDEMAND,RRP,PERIODTYPE\n\
             QLD1,2022/01/01 00:05:00,5912.3,80.1,TRADE\n\
             QLD1,2022/01/01 00:10:00,,80.1,TRADE\n"
                .as_bytes(),
            DEMAND_COLUMNS,
        )?;
        let expected = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap().and_hms_opt(0, 5, 0).unwrap();
        assert_eq!(samples, [(expected, 5912.3)]);
        Ok(())
    }

    #[test]
    fn test_missing_column() {
        let error = read_timestamped_from("time,power\n".as_bytes(), SOLAR_COLUMNS).unwrap_err();
        assert!(error.to_string().contains("electricity"));
    }
}
