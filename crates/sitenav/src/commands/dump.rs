//! `sitenav dump` command implementation.

use clap::Args;
use serde_json::Value;
use sitenav_config::ResolvedSiteModel;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the dump command.
#[derive(Args)]
pub(crate) struct DumpArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Print the resolved model (base-joined links, typed entries) instead
    /// of the normalized configuration.
    #[arg(long)]
    resolved: bool,
}

impl DumpArgs {
    /// Execute the dump command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or resolved.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let resolved = self.resolved;
        let model = self.config.load()?.resolve()?;
        let json = serde_json::to_string_pretty(&render(&model, resolved)?)?;
        Output::new().data(&json)?;
        Ok(())
    }
}

fn render(model: &ResolvedSiteModel, resolved: bool) -> Result<Value, serde_json::Error> {
    if resolved {
        serde_json::to_value(model)
    } else {
        Ok(model.to_raw())
    }
}
