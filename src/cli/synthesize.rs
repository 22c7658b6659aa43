use clap::Parser;

use crate::{cli::config::ConfigArgs, pipeline::Pipeline, prelude::*, tables::build_report_table};

#[derive(Parser)]
pub struct SynthesizeArgs {
    #[clap(flatten)]
    config: ConfigArgs,
}

impl SynthesizeArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let report = Pipeline::load(self.config.read()?)?.run()?;
        println!("{}", build_report_table(&report)?);
        info!(output = %report.output.display(), "saved");
        Ok(())
    }
}
