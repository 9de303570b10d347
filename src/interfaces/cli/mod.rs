//! CLI interface module
//!
//! Thin front end over the services: every command calls into the
//! [`StartupContext`] and renders the outcome.

pub mod commands;

use std::fmt;

use crate::cli::Commands;
use crate::errors::PocketlinkError;
use crate::runtime::StartupContext;
use commands::{
    add_link, batch_links, clear_links, list_links, open_link, run_config_command, show_logs,
    show_stats,
};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    ValidationError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::ValidationError(msg) => format!("Invalid input: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::ValidationError(msg) => {
                format!("{} {}", "Invalid input:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<PocketlinkError> for CliError {
    fn from(err: PocketlinkError) -> Self {
        match err {
            PocketlinkError::InvalidFields(_) | PocketlinkError::Validation(_) => {
                CliError::ValidationError(err.message())
            }
            PocketlinkError::DateParse(_) => CliError::ParseError(err.message()),
            PocketlinkError::FileOperation(_) | PocketlinkError::Serialization(_) => {
                CliError::StorageError(err.message())
            }
            _ => CliError::CommandError(err.message()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, ctx: &StartupContext) -> Result<(), CliError> {
    match cmd {
        Commands::Add {
            url,
            code,
            validity,
        } => add_link(ctx, url, code, validity).await,

        Commands::Batch { urls, validity } => batch_links(ctx, urls, validity).await,

        Commands::Open { code, referrer } => open_link(ctx, code, referrer).await,

        Commands::List => list_links(ctx),

        Commands::Stats { code } => show_stats(ctx, code),

        Commands::Logs { clear, limit } => show_logs(ctx, clear, limit),

        Commands::Clear => clear_links(ctx),

        Commands::Config { action } => run_config_command(action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{Field, ValidationErrors};

    #[test]
    fn test_invalid_fields_map_to_validation_error() {
        let mut errors = ValidationErrors::new();
        errors.add(Field::LongUrl, "URL is required");
        let cli: CliError = PocketlinkError::InvalidFields(errors).into();
        assert!(matches!(cli, CliError::ValidationError(ref m) if m.contains("URL is required")));
    }

    #[test]
    fn test_format_simple() {
        let err = CliError::CommandError("Short link not found: abcd".into());
        assert_eq!(err.format_simple(), "Command error: Short link not found: abcd");
    }
}
