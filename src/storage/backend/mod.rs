//! Persistence backends for the key-value slots
//!
//! A backend stores opaque string values under slot keys. The link store and
//! the diagnostic log each own one slot; neither backend interprets the
//! values it holds.
//!
//! Backends must not emit `tracing` events: the diagnostic layer writes
//! through the same backend while handling an event.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::errors::Result;

/// Key-value slot persistence
pub trait KvBackend: Send + Sync {
    /// Returns `Ok(None)` when nothing has been written under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the whole value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    fn get_backend_name(&self) -> &'static str;
}
