//! Run configuration read from a TOML file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;
use serde::Deserialize;

use crate::{
    core::{blender::SolarScales, size_class::VehicleSizeEnergy},
    prelude::*,
};

pub const DEFAULT_COORDINATED_CHARGE_TYPE: &str = "Residential - Coordinated Charging";

#[must_use]
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Calendar year of the synthesized series.
    pub year: i32,

    /// Flexible charging scenario, matched against the percentage table headers.
    pub scenario: u32,

    /// Charge type whose share follows the solar seasonality.
    #[serde(default = "default_coordinated_charge_type")]
    pub coordinated_charge_type: String,

    /// Annual charging energy per vehicle size class.
    pub energy: VehicleSizeEnergy,

    /// Explicit solar scales, one per month.
    #[serde(default)]
    pub solar_scales: Option<SolarScales>,

    pub paths: Paths,

    /// Directory of the configuration file, where the default output lands.
    #[serde(skip)]
    base: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paths {
    pub weekday_profiles: PathBuf,
    pub weekend_profiles: PathBuf,
    pub percentages: PathBuf,
    pub baseline: PathBuf,

    /// Solar generation trace to estimate the solar scales from.
    #[serde(default)]
    pub solar_source: Option<PathBuf>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Where to additionally write the EV-only series.
    #[serde(default)]
    pub ev_output: Option<PathBuf>,
}

fn default_coordinated_charge_type() -> String {
    DEFAULT_COORDINATED_CHARGE_TYPE.to_owned()
}

impl Config {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read the configuration `{}`", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("invalid configuration `{}`", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if config.solar_scales.is_some() && config.paths.solar_source.is_some() {
            return Err(PipelineError::Configuration(
                "`solar_scales` and `paths.solar_source` are mutually exclusive".to_owned(),
            )
            .into());
        }
        Ok(config)
    }

    /// Resolve the relative paths against the directory of the configuration file.
    fn relative_to(mut self, base: &Path) -> Self {
        let paths = &mut self.paths;
        for path in [
            &mut paths.weekday_profiles,
            &mut paths.weekend_profiles,
            &mut paths.percentages,
            &mut paths.baseline,
        ] {
            *path = base.join(&*path);
        }
        for path in [&mut paths.solar_source, &mut paths.output, &mut paths.ev_output]
            .into_iter()
            .flatten()
        {
            *path = base.join(&*path);
        }
        self.base = base.to_path_buf();
        self
    }

    /// Output path, by default dated, named after the year and the scenario, and placed next to
    /// the configuration file.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.paths.output.clone().unwrap_or_else(|| {
            self.base.join(format!(
                "{}_{}_loads_{}_flex.csv",
                Local::now().format("%y%m%d"),
                self.year,
                self.scenario,
            ))
        })
    }
}
