use std::path::PathBuf;

use crate::{
    config::Config,
    core::{
        assembler::assemble,
        blender::{CategoryPercentages, MonthlyPercentages, SolarScales},
        calendar::DayCounts,
        normalizer::{DensityProfiles, normalize},
        series::AnnualSeries,
        synthesizer::DaySynthesizer,
    },
    io::{
        density::DensityTable,
        percentages::PercentageTable,
        timestamped::{SOLAR_COLUMNS, read_timestamped},
    },
    prelude::*,
    statistics::solar::estimate_solar_scales,
};

/// Everything the synthesis needs, loaded and prepared up front.
pub struct Pipeline {
    config: Config,
    weekday: DensityProfiles,
    weekend: DensityProfiles,
    day_counts: DayCounts,
    solar_scales: SolarScales,
    percentages: MonthlyPercentages,
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct Report {
    pub year: i32,
    pub ev: AnnualSeries,
    pub total: AnnualSeries,
    pub output: PathBuf,
}

impl Pipeline {
    #[instrument(skip_all, fields(year = config.year, scenario = config.scenario))]
    pub fn load(config: Config) -> Result<Self> {
        let weekday = DensityTable::read(&config.paths.weekday_profiles)?;
        let weekend = DensityTable::read(&config.paths.weekend_profiles)?;
        let percentages = PercentageTable::read(&config.paths.percentages)?;
        let solar_scales = Self::resolve_solar_scales(&config)?;
        Self::from_tables(config, &weekday, &weekend, &percentages, solar_scales)
    }

    pub fn from_tables(
        config: Config,
        weekday: &DensityTable,
        weekend: &DensityTable,
        percentages: &PercentageTable,
        solar_scales: SolarScales,
    ) -> Result<Self> {
        let weekday = normalize(weekday).context("failed to normalize the weekday profiles")?;
        let weekend = normalize(weekend).context("failed to normalize the weekend profiles")?;
        let day_counts = DayCounts::of_year(config.year)?;
        let base = CategoryPercentages::from_scenario(percentages, config.scenario)?;
        let percentages =
            MonthlyPercentages::blend(&base, &config.coordinated_charge_type, &solar_scales)?;
        info!(
            n_weekdays = day_counts.weekday,
            n_weekend_days = day_counts.weekend,
            n_charge_types = base.len(),
            annual_energy = %config.energy.total(),
            "prepared",
        );
        Ok(Self { config, weekday, weekend, day_counts, solar_scales, percentages })
    }

    fn resolve_solar_scales(config: &Config) -> Result<SolarScales> {
        if let Some(solar_scales) = config.solar_scales {
            return Ok(solar_scales);
        }
        match &config.paths.solar_source {
            Some(path) => {
                let samples = read_timestamped(path, SOLAR_COLUMNS)?;
                Ok(estimate_solar_scales(samples).with_context(|| {
                    format!("failed to estimate the solar scales from `{}`", path.display())
                })?)
            }
            None => Ok(SolarScales::default()),
        }
    }

    pub const fn percentages(&self) -> &MonthlyPercentages {
        &self.percentages
    }

    pub const fn solar_scales(&self) -> &SolarScales {
        &self.solar_scales
    }

    pub const fn day_counts(&self) -> DayCounts {
        self.day_counts
    }

    /// Electric vehicle charging load alone.
    pub fn synthesize(&self) -> Result<AnnualSeries, PipelineError> {
        let synthesizer = DaySynthesizer::builder()
            .weekday(&self.weekday)
            .weekend(&self.weekend)
            .percentages(&self.percentages)
            .energy(self.config.energy)
            .day_counts(self.day_counts)
            .build();
        let series = assemble(self.config.year, &synthesizer)?;
        info!(total_energy = %series.total_energy(), "synthesized");
        Ok(series)
    }

    /// Synthesize, stack on top of the baseline, and write the results.
    #[instrument(skip_all, fields(year = self.config.year))]
    pub fn run(&self) -> Result<Report> {
        let ev = self.synthesize()?;
        let baseline = AnnualSeries::read(&self.config.paths.baseline)?;
        let total = ev.try_add(&baseline).context("the baseline does not cover the year")?;
        if let Some(path) = &self.config.paths.ev_output {
            ev.write(path)?;
        }
        let output = self.config.output_path();
        total.write(&output)?;
        Ok(Report { year: self.config.year, ev, total, output })
    }
}
