//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for pocketlink using clap's derive macros.

use clap::{Parser, Subcommand};

/// Pocketlink - A local, single-user URL shortener
#[derive(Parser, Debug)]
#[command(name = "pocketlink")]
#[command(version)]
#[command(about = "A local, single-user URL shortener", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (default: pocketlink.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shorten a URL
    ///
    /// Generates a random shortcode unless --code is given.
    Add {
        /// Target URL (http:// or https://)
        url: String,

        /// Custom shortcode, 4-12 alphanumeric characters
        #[arg(long, short = 'n')]
        code: Option<String>,

        /// Validity in minutes (default: links.default_validity_minutes)
        #[arg(long, short = 'v')]
        validity: Option<String>,
    },

    /// Shorten several URLs at once
    Batch {
        /// Target URLs
        #[arg(required = true, num_args = 1..)]
        urls: Vec<String>,

        /// Validity in minutes, applied to every URL
        #[arg(long, short = 'v')]
        validity: Option<String>,
    },

    /// Resolve a shortcode, record the visit and print the target URL
    Open {
        /// Shortcode to resolve
        code: String,

        /// Referrer recorded with the click (default: direct)
        #[arg(long, short = 'r')]
        referrer: Option<String>,
    },

    /// List all short links
    List,

    /// Show click statistics
    Stats {
        /// Only show this shortcode, with its click history
        code: Option<String>,
    },

    /// Show or clear diagnostic logs
    Logs {
        /// Remove all stored diagnostic entries
        #[arg(long)]
        clear: bool,

        /// Show only the most recent N entries
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },

    /// Delete every stored short link
    Clear,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: pocketlink.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::parse_from(["pocketlink", "add", "https://example.com", "--code", "abcd"]);
        match cli.command {
            Commands::Add {
                url,
                code,
                validity,
            } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(code.as_deref(), Some("abcd"));
                assert!(validity.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_batch_requires_urls() {
        assert!(Cli::try_parse_from(["pocketlink", "batch"]).is_err());
        let cli = Cli::try_parse_from(["pocketlink", "batch", "https://a.com", "https://b.com"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Batch { ref urls, .. } if urls.len() == 2));
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::parse_from(["pocketlink", "list", "--config", "/tmp/custom.toml"]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/custom.toml"));
    }
}
