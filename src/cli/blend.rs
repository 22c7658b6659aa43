use clap::Parser;

use crate::{
    cli::config::ConfigArgs,
    pipeline::Pipeline,
    prelude::*,
    tables::{build_percentages_table, build_solar_scales_table},
};

#[derive(Parser)]
pub struct BlendArgs {
    #[clap(flatten)]
    config: ConfigArgs,
}

impl BlendArgs {
    pub fn run(self) -> Result {
        let pipeline = Pipeline::load(self.config.read()?)?;
        println!("{}", build_solar_scales_table(pipeline.solar_scales()));
        println!("{}", build_percentages_table(pipeline.percentages()));
        Ok(())
    }
}
