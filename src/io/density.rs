use std::{io::Read, path::Path};

use chrono::NaiveTime;

use crate::{
    io::{csv_reader, open, parse_optional_number, time::parse_time_of_day},
    prelude::*,
};

const TIME_COLUMN: &str = "Time";

/// Raw sub-hourly charging density readings, one column per charging profile.
#[must_use]
#[derive(Debug)]
pub struct DensityTable {
    pub headers: Vec<String>,
    pub rows: Vec<DensityRow>,
}

#[derive(Debug)]
pub struct DensityRow {
    pub time: NaiveTime,
    pub values: Vec<Option<f64>>,
}

impl DensityTable {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        let table = Self::from_reader(open(path)?)
            .with_context(|| format!("failed to read the density table `{}`", path.display()))?;
        debug!(n_columns = table.headers.len(), n_rows = table.rows.len(), "loaded");
        Ok(table)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Self::from_csv(csv_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut headers = reader.headers()?.iter().map(str::to_owned);
        match headers.next() {
            Some(header) if header == TIME_COLUMN => {}
            header => {
                return Err(PipelineError::InputFormat(format!(
                    "the first column must be `{TIME_COLUMN}`, got {header:?}"
                ))
                .into());
            }
        }
        let headers: Vec<String> = headers.collect();

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let line = index + 2;
            let time = record.get(0).and_then(parse_time_of_day).ok_or_else(|| {
                PipelineError::InputFormat(format!(
                    "line {line}: cannot parse `{}` as a time of day",
                    record.get(0).unwrap_or_default(),
                ))
            })?;
            let values = record
                .iter()
                .skip(1)
                .map(parse_optional_number)
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("line {line}"))?;
            rows.push(DensityRow { time, values });
        }
        Ok(Self { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader() -> Result {
        // Unquoted header cells split at the comma and no longer match the rows:
        assert!(
            DensityTable::from_reader(
                "Time,Residential - Convenience - Small, 2040\n00:00,0.5\n".as_bytes()
            )
            .is_err()
        );

        let table = DensityTable::from_reader(
            "Time,\"Residential - Convenience - Small, 2040\"\n00:00,0.5\n00:30,\n".as_bytes(),
        )?;
        assert_eq!(table.headers, ["Residential - Convenience - Small, 2040"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].values, [Some(0.5)]);
        assert_eq!(table.rows[1].values, [None]);
        Ok(())
    }

    #[test]
    fn test_bad_time() {
        let error = DensityTable::from_reader("Time,A - Small\nlater,0.5\n".as_bytes()).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<PipelineError>(),
            Some(PipelineError::InputFormat(_))
        ));
    }

    #[test]
    fn test_missing_time_column() {
        let error = DensityTable::from_reader("Hour,A - Small\n00:00,0.5\n".as_bytes()).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<PipelineError>(),
            Some(PipelineError::InputFormat(_))
        ));
    }
}
