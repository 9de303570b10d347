//! System-level modules
//!
//! - Logging initialization (console/file output)
//! - The diagnostic log sink fed from `tracing`

pub mod diagnostics;
pub mod logging;

pub use diagnostics::{DiagnosticLayer, DiagnosticLog, LogEntry, LogLevel};
pub use logging::init_logging;
