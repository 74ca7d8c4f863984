use std::path::Path;

use anyhow::Context;
use phpini_core::config::ConfigLoader;
use phpini_core::driver::{Driver, RunReporter};

use crate::commands::RunOptions;

pub struct Configure;

impl Configure {
    pub fn execute(config_path: &Path, options: &RunOptions) -> anyhow::Result<()> {
        tracing::debug!(config = %config_path.display(), "Executing configure command");

        let config = ConfigLoader::load(config_path)?;

        let driver =
            Driver::new(&config, options.dry_run).context("Failed to initialize driver")?;
        let report = driver.run().context("Configuration run aborted")?;

        // Display results
        let summary = RunReporter::generate_summary(&report);
        println!("{summary}");

        Ok(())
    }
}
