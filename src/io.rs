//! Flat comma-separated tables read and written by the pipeline.

pub mod density;
pub mod percentages;
pub mod series;
pub mod time;
pub mod timestamped;

use std::{fs::File, io::Read, path::Path};

use crate::prelude::*;

/// Parse a numeric cell, treating empty and `NaN` cells as missing.
pub fn parse_optional_number(cell: &str) -> Result<Option<f64>, PipelineError> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let value = cell
        .parse::<f64>()
        .map_err(|_| PipelineError::InputFormat(format!("`{cell}` is not a number")))?;
    Ok((!value.is_nan()).then_some(value))
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("failed to open `{}`", path.display()))
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_number() -> Result {
        assert_eq!(parse_optional_number("0.25")?, Some(0.25));
        assert_eq!(parse_optional_number("")?, None);
        assert_eq!(parse_optional_number("NaN")?, None);
        assert!(parse_optional_number("abc").is_err());
        Ok(())
    }
}
