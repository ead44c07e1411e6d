//! CLI subcommands.

pub mod batch;
pub mod process;

use std::path::Path;

use bolletta_core::BollettaConfig;

/// Load the configuration file if one was given, defaults otherwise.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BollettaConfig> {
    match config_path {
        Some(path) => Ok(BollettaConfig::from_file(Path::new(path))?),
        None => Ok(BollettaConfig::default()),
    }
}
