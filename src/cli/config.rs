use std::path::PathBuf;

use clap::Parser;

use crate::{config::Config, prelude::*};

#[derive(Parser)]
pub struct ConfigArgs {
    /// Run configuration file.
    #[clap(long = "config", env = "EVLOAD_CONFIG", default_value = "evload.toml")]
    path: PathBuf,
}

impl ConfigArgs {
    pub fn read(&self) -> Result<Config> {
        Config::read(&self.path)
    }
}
