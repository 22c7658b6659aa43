use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    core::calendar::DayCounts,
    io::timestamped::{SOLAR_COLUMNS, read_timestamped},
    prelude::*,
    statistics::solar::estimate_solar_scales,
    tables::{build_day_counts_table, build_solar_scales_table},
};

#[derive(Parser)]
pub struct CalibrateArgs {
    #[command(subcommand)]
    command: CalibrateCommand,
}

impl CalibrateArgs {
    pub fn run(self) -> Result {
        match self.command {
            CalibrateCommand::Days(args) => args.run(),
            CalibrateCommand::Solar(args) => args.run(),
        }
    }
}

#[derive(Subcommand)]
pub enum CalibrateCommand {
    /// Count the weekdays and the weekend days of a year.
    Days(CalibrateDaysArgs),

    /// Estimate the monthly solar scales from an hourly generation trace.
    Solar(CalibrateSolarArgs),
}

#[derive(Parser)]
pub struct CalibrateDaysArgs {
    #[clap(long, env = "YEAR")]
    year: i32,
}

impl CalibrateDaysArgs {
    fn run(self) -> Result {
        let day_counts = DayCounts::of_year(self.year)?;
        println!("{}", build_day_counts_table(self.year, day_counts));
        Ok(())
    }
}

#[derive(Parser)]
pub struct CalibrateSolarArgs {
    /// Table with `time` and `electricity` columns.
    #[clap(long)]
    source: PathBuf,
}

impl CalibrateSolarArgs {
    #[instrument(skip_all, fields(source = %self.source.display()))]
    fn run(self) -> Result {
        let solar_scales = estimate_solar_scales(read_timestamped(&self.source, SOLAR_COLUMNS)?)?;
        println!("{}", build_solar_scales_table(&solar_scales));
        Ok(())
    }
}
