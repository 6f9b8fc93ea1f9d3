//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod dump;

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, ConfigError, SiteConfigFile};

pub(crate) use check::CheckArgs;
pub(crate) use dump::DumpArgs;

/// Configuration arguments shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base path the site is served under (overrides config).
    #[arg(long, env = "SITENAV_BASE")]
    base: Option<String>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load the configuration file with CLI overrides applied.
    fn load(self) -> Result<SiteConfigFile, ConfigError> {
        let cli_settings = CliSettings {
            base_path: self.base,
            source_dir: self.source_dir,
        };
        SiteConfigFile::load(self.config.as_deref(), Some(&cli_settings))
    }
}
