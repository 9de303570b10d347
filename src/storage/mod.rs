//! Shortlink storage
//!
//! `LinkStore` owns the `shortcode → ShortLink` mapping kept in one slot of
//! a [`KvBackend`]. Every read operation loads the slot afresh and every
//! mutation rewrites the whole mapping. Persistence failures never reach the
//! caller as errors: reads degrade to an empty mapping and writes are
//! dropped, both logged and reported through [`LoadSource`],
//! [`WriteOutcome`] and [`ClickOutcome`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

pub mod backend;
pub mod models;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use models::{ClickRecord, DIRECT_REFERRER, ShortLink, StorageSchema};

use crate::config::{StorageBackendKind, StorageConfig};
use crate::utils::clock::{Clock, SystemClock};

/// Where the mapping returned by [`LinkStore::read_store`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing persisted yet.
    Missing,
    Loaded,
    /// The slot held data of an unexpected shape; it was read as empty.
    Malformed(String),
    /// The backend failed; the mapping was read as empty.
    ReadFailed(String),
}

impl LoadSource {
    pub fn is_failure(&self) -> bool {
        matches!(self, LoadSource::Malformed(_) | LoadSource::ReadFailed(_))
    }
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub schema: StorageSchema,
    pub source: LoadSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Persisted,
    Dropped(String),
}

impl WriteOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, WriteOutcome::Persisted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Recorded { total_clicks: usize },
    UnknownCode,
    Dropped(String),
}

pub struct LinkStore {
    backend: Arc<dyn KvBackend>,
    key: String,
    clock: Arc<dyn Clock>,
}

impl LinkStore {
    pub fn new(backend: Arc<dyn KvBackend>, key: impl Into<String>) -> Self {
        Self::with_clock(backend, key, Arc::new(SystemClock))
    }

    pub fn with_clock(
        backend: Arc<dyn KvBackend>,
        key: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            backend,
            key: key.into(),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.get_backend_name()
    }

    /// Loads the whole mapping from the slot.
    pub fn read_store(&self) -> Snapshot {
        let raw = match self.backend.read(&self.key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                return Snapshot {
                    schema: StorageSchema::default(),
                    source: LoadSource::Missing,
                };
            }
            Err(e) => {
                error!(error = %e, "Failed to get stored data");
                return Snapshot {
                    schema: StorageSchema::default(),
                    source: LoadSource::ReadFailed(e.to_string()),
                };
            }
        };

        match serde_json::from_str::<StorageSchema>(&raw) {
            Ok(mut schema) => {
                schema.links.retain(|key, link| {
                    let consistent = *key == link.shortcode;
                    if !consistent {
                        warn!(
                            key = %key,
                            shortcode = %link.shortcode,
                            "Skipping stored link whose key does not match its shortcode"
                        );
                    }
                    consistent
                });
                Snapshot {
                    schema,
                    source: LoadSource::Loaded,
                }
            }
            Err(e) => {
                warn!(error = %e, "Stored data has an unexpected shape, treating it as empty");
                Snapshot {
                    schema: StorageSchema::default(),
                    source: LoadSource::Malformed(e.to_string()),
                }
            }
        }
    }

    /// Replaces the persisted mapping with `schema`.
    pub fn write_store(&self, schema: &StorageSchema) -> WriteOutcome {
        let json = match serde_json::to_string(schema) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to serialize data");
                return WriteOutcome::Dropped(e.to_string());
            }
        };

        match self.backend.write(&self.key, &json) {
            Ok(()) => WriteOutcome::Persisted,
            Err(e) => {
                error!(error = %e, "Failed to save data");
                WriteOutcome::Dropped(e.to_string())
            }
        }
    }

    /// Inserts `link`, silently replacing any record (and its clicks) already
    /// stored under the same shortcode. Callers check [`Self::is_available`]
    /// first.
    pub fn create(&self, link: ShortLink) -> WriteOutcome {
        let mut schema = self.read_store().schema;
        let shortcode = link.shortcode.clone();
        schema.links.insert(shortcode.clone(), link);

        let outcome = self.write_store(&schema);
        if outcome.is_persisted() {
            info!(shortcode = %shortcode, "Short link added");
        }
        outcome
    }

    pub fn lookup(&self, shortcode: &str) -> Option<ShortLink> {
        self.read_store().schema.links.remove(shortcode)
    }

    /// Not atomic with [`Self::create`].
    pub fn is_available(&self, shortcode: &str) -> bool {
        !self.read_store().schema.links.contains_key(shortcode)
    }

    /// All records, in no particular order.
    pub fn list_all(&self) -> Vec<ShortLink> {
        self.read_store().schema.links.into_values().collect()
    }

    /// Appends a click with no location.
    pub fn append_click(&self, shortcode: &str, referrer: Option<&str>) -> ClickOutcome {
        self.append_click_with_geo(shortcode, referrer, None)
    }

    /// Appends a click carrying `geo` in the same mutation, so the location
    /// always lands on the record it was looked up for.
    pub fn append_click_with_geo(
        &self,
        shortcode: &str,
        referrer: Option<&str>,
        geo: Option<String>,
    ) -> ClickOutcome {
        let mut schema = self.read_store().schema;
        let Some(link) = schema.links.get_mut(shortcode) else {
            warn!(
                shortcode = %shortcode,
                "Attempted to record click for non-existent shortcode"
            );
            return ClickOutcome::UnknownCode;
        };

        link.clicks.push(ClickRecord::new(self.clock.now(), referrer, geo));
        let total_clicks = link.clicks.len();

        match self.write_store(&schema) {
            WriteOutcome::Persisted => {
                info!(shortcode = %shortcode, total_clicks, "Click recorded");
                ClickOutcome::Recorded { total_clicks }
            }
            WriteOutcome::Dropped(reason) => ClickOutcome::Dropped(reason),
        }
    }

    /// Removes every stored link.
    pub fn clear(&self) -> WriteOutcome {
        match self.backend.remove(&self.key) {
            Ok(()) => {
                info!("Link store cleared");
                WriteOutcome::Persisted
            }
            Err(e) => {
                error!(error = %e, "Failed to clear stored data");
                WriteOutcome::Dropped(e.to_string())
            }
        }
    }
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create(config: &StorageConfig) -> Arc<dyn KvBackend> {
        match config.backend {
            StorageBackendKind::File => Arc::new(FileBackend::new(&config.data_dir)),
            StorageBackendKind::Memory => Arc::new(MemoryBackend::new()),
        }
    }
}
