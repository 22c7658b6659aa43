mod baseline;
mod blend;
mod calibrate;
mod config;
mod synthesize;

use clap::{Parser, Subcommand};

use crate::{
    cli::{
        baseline::BaselineArgs,
        blend::BlendArgs,
        calibrate::CalibrateArgs,
        synthesize::SynthesizeArgs,
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: synthesize the EV charging load and stack it on the baseline.
    #[clap(name = "synthesize")]
    Synthesize(Box<SynthesizeArgs>),

    /// Print the solar-blended charge type shares of every month.
    #[clap(name = "blend")]
    Blend(Box<BlendArgs>),

    /// Derive the constants the synthesis relies on.
    #[clap(name = "calibrate")]
    Calibrate(Box<CalibrateArgs>),

    /// Build the baseline grid load from market demand exports.
    #[clap(name = "baseline")]
    Baseline(Box<BaselineArgs>),
}

impl Command {
    pub fn run(self) -> Result {
        match self {
            Self::Synthesize(args) => args.run(),
            Self::Blend(args) => args.run(),
            Self::Calibrate(args) => args.run(),
            Self::Baseline(args) => args.run(),
        }
    }
}
