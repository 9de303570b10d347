//! Statistics command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::runtime::StartupContext;
use crate::services::{LinkStats, LinkStatus};

use super::helpers::format_time;

pub fn show_stats(ctx: &StartupContext, code: Option<String>) -> Result<(), CliError> {
    match code {
        Some(code) => {
            let stats = ctx.stats_service.link_stats_for(&code).ok_or_else(|| {
                CliError::CommandError(format!("Short link not found: {}", code))
            })?;
            print_link(&stats, true);
        }
        None => {
            let all = ctx.stats_service.link_stats();
            if all.is_empty() {
                println!("{} No short links found", "ℹ".bold().blue());
                return Ok(());
            }
            for stats in &all {
                print_link(stats, false);
            }
        }
    }

    let summary = ctx.stats_service.summary();
    println!("{}", "Summary:".bold().green());
    println!("  Total URLs:   {}", summary.total_links.to_string().green());
    println!("  Total Clicks: {}", summary.total_clicks.to_string().cyan());
    println!("  Active URLs:  {}", summary.active_links.to_string().green());
    println!("  Expired URLs: {}", summary.expired_links.to_string().red());
    Ok(())
}

fn print_link(stats: &LinkStats, with_clicks: bool) {
    let status = match stats.status {
        LinkStatus::Active => stats.status.as_ref().green(),
        LinkStatus::Expired => stats.status.as_ref().red(),
    };

    println!(
        "{} [{}] {} clicks",
        stats.short_url.cyan().bold(),
        status,
        stats.click_count
    );
    println!("  {}", stats.long_url.blue().underline());
    println!(
        "  {}",
        format!(
            "created {} · expires {}",
            format_time(stats.created_at),
            format_time(stats.expiry_at)
        )
        .dimmed()
    );

    if with_clicks && !stats.clicks.is_empty() {
        println!("  {}", "Click details:".bold());
        for click in &stats.clicks {
            println!(
                "    {}  {}  {}",
                format_time(click.timestamp),
                click.referrer,
                click.geo.as_deref().unwrap_or("-").dimmed()
            );
        }
    }
    println!();
}
