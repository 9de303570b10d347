//! CLI mode
//!
//! Loads configuration, opens storage, installs logging and only then wires
//! the services, so their startup messages reach every sink.

use std::sync::Arc;

use tracing_appender::non_blocking::WorkerGuard;

use crate::cli::{Cli, Commands};
use crate::config::{StaticConfig, init_config};
use crate::interfaces::cli::{self, CliError, commands};
use crate::runtime::{StartupContext, prepare_startup, prepare_storage};
use crate::system::init_logging;

pub async fn run_cli(args: Cli) -> Result<(), CliError> {
    // 配置命令不需要存储和日志
    if let Commands::Config { action } = args.command {
        return commands::run_config_command(action);
    }

    let config = init_config(args.config.as_deref());
    let (ctx, _guard) = bootstrap(config);

    cli::run_cli_command(args.command, &ctx).await
}

/// Opens storage, installs the global subscriber, then builds the services.
///
/// A logging failure is printed and startup continues without it. The guard
/// must outlive the command.
pub fn bootstrap(config: Arc<StaticConfig>) -> (StartupContext, Option<WorkerGuard>) {
    let storage = prepare_storage(&config);

    let diagnostics = config
        .diagnostics
        .enabled
        .then(|| storage.diagnostics.clone());
    let guard = match init_logging(&config, diagnostics) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{}", e.format_colored());
            None
        }
    };

    (prepare_startup(config, storage), guard)
}
