//! `sitenav check` command implementation.

use clap::Args;
use sitenav_check::{AnchorIndex, SourceTree, check_links, check_rewrite_sources};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Enable verbose output (show scan and resolution logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a rewrite source is
    /// missing, or a navigation link does not resolve.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let file = self.config.load()?;
        let model = file.resolve()?;

        output.site(&model.site.title, &model.site.base_path);
        output.field("Config", file.config_path.display());
        output.field("Source directory", file.source_dir.display());

        let tree = SourceTree::scan(&file.source_dir, &model.site.source_exclude)?;
        output.field(
            "Documents",
            format_args!("{} ({} excluded)", tree.len(), tree.excluded()),
        );
        if tree.is_empty() {
            output.warning("No markdown documents found");
        }

        check_rewrite_sources(&model.site.rewrites, &tree)?;
        let index = AnchorIndex::build(&tree, &model.site.rewrites)?;
        output.field("Pages", index.len());

        let report = check_links(&model, &index);
        if report.skipped > 0 {
            output.warning(&format!(
                "Skipped {} anchor-only link(s) with no page to check against",
                report.skipped
            ));
        }
        let report = report.into_result()?;

        output.success(&format!(
            "All {} navigation link(s) resolve",
            report.checked
        ));
        Ok(())
    }
}
