use clap::{Parser, Subcommand};
use phpini_core::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

/// PHP ini batch configuration tool
///
/// Enable extensions and set php.ini values across every PHP installation
/// matched by a JSON configuration
#[derive(Parser, Debug)]
#[command(name = "phpini")]
#[command(about, long_about = None, version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Preview changes without writing any file (dry-run)
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply settings and extensions to every discovered php.ini
    Configure {
        /// Path to the JSON configuration file
        #[arg(value_name = "CONFIG", default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}
