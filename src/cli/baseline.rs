use std::{fs, path::PathBuf};

use clap::Parser;
use itertools::Itertools;

use crate::{
    core::series::AnnualSeries,
    io::timestamped::{DEMAND_COLUMNS, read_timestamped},
    prelude::*,
    quantity::energy::GigawattHours,
    statistics::demand::{resample_hourly, scale_to_consumption, stitch},
};

#[derive(Parser)]
pub struct BaselineArgs {
    /// Directory with the regional demand exports.
    #[clap(long)]
    demand_dir: PathBuf,

    /// Target annual consumption in gigawatt-hours.
    #[clap(long, env = "CONSUMPTION_GWH")]
    consumption: GigawattHours,

    /// EV charging load already contained in the target, to subtract.
    #[clap(long)]
    assumed_ev: Option<PathBuf>,

    #[clap(long)]
    output: PathBuf,
}

impl BaselineArgs {
    #[instrument(skip_all, fields(demand_dir = %self.demand_dir.display()))]
    pub fn run(self) -> Result {
        let paths: Vec<PathBuf> = fs::read_dir(&self.demand_dir)
            .with_context(|| format!("failed to list `{}`", self.demand_dir.display()))?
            .map_ok(|entry| entry.path())
            .filter_ok(|path| path.extension().is_some_and(|extension| extension == "csv"))
            .try_collect()?;
        ensure!(!paths.is_empty(), "no demand exports in `{}`", self.demand_dir.display());

        let mut exports = Vec::with_capacity(paths.len());
        for path in &paths {
            let samples = read_timestamped(path, DEMAND_COLUMNS)?;
            exports.push(
                resample_hourly(&samples)
                    .with_context(|| format!("failed to resample `{}`", path.display()))?,
            );
        }
        let demand = stitch(exports);
        info!(n_exports = paths.len(), len = demand.len(), "stitched");

        let mut baseline = scale_to_consumption(&demand, self.consumption)?;
        if let Some(path) = &self.assumed_ev {
            baseline = baseline
                .try_sub(&AnnualSeries::read(path)?)
                .context("the assumed EV load does not match the demand")?;
        }
        baseline.write(&self.output)
    }
}
