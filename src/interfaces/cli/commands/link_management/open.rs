//! Open (redirect) command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::runtime::StartupContext;
use crate::services::RedirectOutcome;
use crate::storage::ClickOutcome;

use super::helpers::format_time;

/// Prints the target URL on stdout so callers can follow it.
pub async fn open_link(
    ctx: &StartupContext,
    code: String,
    referrer: Option<String>,
) -> Result<(), CliError> {
    match ctx
        .redirect_service
        .resolve(&code, referrer.as_deref())
        .await
    {
        RedirectOutcome::Redirect { target, click } => {
            println!("{}", target);
            match click {
                ClickOutcome::Recorded { total_clicks } => eprintln!(
                    "{} {} ({} clicks)",
                    "→".bold().green(),
                    code.cyan(),
                    total_clicks
                ),
                ClickOutcome::Dropped(reason) => eprintln!(
                    "{} {}",
                    "⚠ Click not recorded:".yellow().bold(),
                    reason.dimmed()
                ),
                // 理论上不会出现：刚查到的记录在写入前被删掉了
                ClickOutcome::UnknownCode => {}
            }
            Ok(())
        }
        RedirectOutcome::NotFound => Err(CliError::CommandError(format!(
            "Not found: the short URL '{}' does not exist",
            code
        ))),
        RedirectOutcome::Expired { expiry_at } => Err(CliError::CommandError(format!(
            "Link expired: '{}' stopped working at {}",
            code,
            format_time(expiry_at)
        ))),
    }
}
