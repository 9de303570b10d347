//! Diagnostic log command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::runtime::StartupContext;
use crate::system::{LogEntry, LogLevel};

pub fn show_logs(ctx: &StartupContext, clear: bool, limit: Option<usize>) -> Result<(), CliError> {
    if clear {
        if !ctx.diagnostics.clear_logs() {
            return Err(CliError::StorageError(
                "Failed to clear diagnostic logs".to_string(),
            ));
        }
        println!("{} Diagnostic logs cleared", "✓".bold().green());
        return Ok(());
    }

    let logs = ctx.diagnostics.get_logs();
    if logs.is_empty() {
        println!("{} No diagnostic logs", "ℹ".bold().blue());
        return Ok(());
    }

    let skip = limit.map_or(0, |n| logs.len().saturating_sub(n));
    for entry in &logs[skip..] {
        println!("{}", format_entry(entry));
    }
    println!();
    println!(
        "{} Showing {} of {} entries (max {})",
        "ℹ".bold().blue(),
        (logs.len() - skip).to_string().green(),
        logs.len(),
        ctx.diagnostics.max_entries()
    );
    Ok(())
}

fn format_entry(entry: &LogEntry) -> String {
    let level = match entry.level {
        LogLevel::Error => entry.level.as_ref().red().bold(),
        LogLevel::Warn => entry.level.as_ref().yellow().bold(),
        LogLevel::Info => entry.level.as_ref().green(),
        LogLevel::Debug => entry.level.as_ref().dimmed(),
    };

    let mut line = format!(
        "{} {:>5} {} {}",
        entry
            .timestamp
            .format("%Y-%m-%d %H:%M:%S%.3f")
            .to_string()
            .dimmed(),
        level,
        entry.package.cyan(),
        entry.message
    );
    if let Some(meta) = &entry.meta {
        line.push(' ');
        line.push_str(&serde_json::Value::Object(meta.clone()).to_string().dimmed().to_string());
    }
    line
}
