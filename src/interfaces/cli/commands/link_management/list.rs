//! List links command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::runtime::StartupContext;
use crate::services::LinkStatus;

use super::helpers::format_time;

pub fn list_links(ctx: &StartupContext) -> Result<(), CliError> {
    let links = ctx.stats_service.link_stats();

    if links.is_empty() {
        println!("{} No short links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Short link list:".bold().green());
    println!();
    for link in &links {
        let mut info_parts = vec![format!(
            "{} -> {}",
            link.shortcode.cyan(),
            link.long_url.blue().underline()
        )];

        let expiry = format!("(expires: {})", format_time(link.expiry_at));
        info_parts.push(match link.status {
            LinkStatus::Active => expiry.dimmed().yellow().to_string(),
            LinkStatus::Expired => format!("{} {}", expiry, "expired").red().to_string(),
        });

        if link.click_count > 0 {
            info_parts.push(
                format!("(clicks: {})", link.click_count)
                    .dimmed()
                    .cyan()
                    .to_string(),
            );
        }

        println!("  {}", info_parts.join(" "));
    }
    println!();
    println!(
        "{} Total {} short links",
        "ℹ".bold().blue(),
        links.len().to_string().green()
    );
    Ok(())
}
