use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use crate::{
    core::series::AnnualSeries,
    io::{csv_reader, open, parse_optional_number},
    prelude::*,
    quantity::power::Megawatts,
};

pub const LOAD_COLUMN: &str = "Load (MW)";

impl AnnualSeries {
    /// Read the first column of a table as an hourly load series.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        Self::from_reader(open(path)?)
            .with_context(|| format!("failed to read the load series `{}`", path.display()))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Self::from_csv(csv_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        reader.headers()?;
        let mut values = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let value = parse_optional_number(record.get(0).unwrap_or_default())?.ok_or_else(|| {
                PipelineError::InputFormat(format!("line {}: missing load value", index + 2))
            })?;
            values.push(Megawatts(value));
        }
        Ok(Self(values))
    }

    #[instrument(skip_all, fields(path = %path.display(), len = self.len()))]
    pub fn write(&self, path: &Path) -> Result {
        let file =
            File::create(path).with_context(|| format!("failed to create `{}`", path.display()))?;
        self.to_writer(file).with_context(|| format!("failed to write `{}`", path.display()))?;
        info!("written");
        Ok(())
    }

    pub fn to_writer(&self, writer: impl Write) -> Result {
        self.to_csv(csv::Writer::from_writer(writer))
    }

    fn to_csv<W: Write>(&self, mut writer: csv::Writer<W>) -> Result {
        writer.write_record([LOAD_COLUMN])?;
        for value in self.iter() {
            writer.write_record([value.0.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }
}
