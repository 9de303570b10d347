//! Clear links command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::runtime::StartupContext;
use crate::storage::WriteOutcome;

pub fn clear_links(ctx: &StartupContext) -> Result<(), CliError> {
    let count = ctx.store.list_all().len();
    match ctx.store.clear() {
        WriteOutcome::Persisted => {
            println!(
                "{} Removed {} short links",
                "✓".bold().green(),
                count.to_string().green()
            );
            Ok(())
        }
        WriteOutcome::Dropped(reason) => Err(CliError::StorageError(reason)),
    }
}
