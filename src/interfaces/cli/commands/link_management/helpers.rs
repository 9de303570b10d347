use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::services::CreatedLink;
use crate::storage::WriteOutcome;
use crate::utils::format_duration_human;

pub fn format_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Prints one freshly created link, as `add` and `batch` show it.
pub fn print_created(created: &CreatedLink) {
    if created.generated_code {
        println!(
            "{} Generated random code: {}",
            "ℹ".bold().blue(),
            created.link.shortcode.magenta()
        );
    }

    println!(
        "{} Shortened: {} -> {} (expires: {}, in {})",
        "✓".bold().green(),
        created.short_url.cyan(),
        created.link.long_url.blue().underline(),
        format_time(created.link.expiry_at).yellow(),
        format_duration_human(created.link.created_at, created.link.expiry_at)
    );

    print_write_warning(&created.write);
}

/// 写入失败不算错误，但要让用户知道数据没有保存
pub fn print_write_warning(write: &WriteOutcome) {
    if let WriteOutcome::Dropped(reason) = write {
        println!(
            "  {} {}",
            "⚠ Not saved:".yellow().bold(),
            reason.dimmed()
        );
    }
}
