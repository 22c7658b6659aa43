use std::{io::Read, path::Path};

use crate::{
    io::{csv_reader, open, parse_optional_number},
    prelude::*,
};

const CHARGE_TYPE_COLUMN: &str = "Charge Type";

/// Charge-type shares, one column per flexible-charging scenario.
#[must_use]
pub struct PercentageTable {
    pub charge_types: Vec<String>,
    pub scenarios: Vec<ScenarioColumn>,
}

pub struct ScenarioColumn {
    pub header: String,
    pub values: Vec<Option<f64>>,
}

impl ScenarioColumn {
    /// Whether the header carries the scenario identifier as a whole number,
    /// so that `5` does not select a `50 % flex` column.
    #[must_use]
    pub fn matches(&self, scenario: u32) -> bool {
        self.header
            .split(|char: char| !char.is_ascii_digit())
            .filter(|token| !token.is_empty())
            .any(|token| token.parse::<u32>() == Ok(scenario))
    }
}

impl PercentageTable {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        Self::from_reader(open(path)?)
            .with_context(|| format!("failed to read the percentage table `{}`", path.display()))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Self::from_csv(csv_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let charge_type_index =
            headers.iter().position(|header| header == CHARGE_TYPE_COLUMN).ok_or_else(|| {
                PipelineError::InputFormat(format!("missing the `{CHARGE_TYPE_COLUMN}` column"))
            })?;
        let mut scenarios: Vec<ScenarioColumn> = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != charge_type_index)
            .map(|(_, header)| ScenarioColumn { header: header.to_owned(), values: Vec::new() })
            .collect();

        let mut charge_types = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let line = index + 2;
            charge_types.push(record.get(charge_type_index).unwrap_or_default().to_owned());
            let cells = record
                .iter()
                .enumerate()
                .filter(|(column, _)| *column != charge_type_index)
                .map(|(_, cell)| cell);
            for (scenario, cell) in scenarios.iter_mut().zip(cells) {
                let value = parse_optional_number(cell).with_context(|| format!("line {line}"))?;
                scenario.values.push(value);
            }
        }

        Ok(Self { charge_types, scenarios })
    }

    /// Select the first column whose header names the scenario.
    pub fn scenario(&self, scenario: u32) -> Result<&ScenarioColumn, PipelineError> {
        self.scenarios.iter().find(|column| column.matches(scenario)).ok_or_else(|| {
            PipelineError::Configuration(format!(
                "no percentage column for the {scenario}% flexible charging scenario"
            ))
        })
    }
}
