use std::sync::Arc;

use dashmap::DashMap;

use super::KvBackend;
use crate::errors::Result;

/// In-process backend; contents vanish with the process.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    slots: Arc<DashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares an existing map, so tests can inspect raw slot contents.
    pub fn with_slots(slots: Arc<DashMap<String, String>>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KvBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).map(|v| v.value().clone()))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }

    fn get_backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_slot() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.read("links").unwrap(), None);
    }

    #[test]
    fn test_write_read_remove() {
        let slots = Arc::new(DashMap::new());
        let backend = MemoryBackend::with_slots(slots.clone());

        backend.write("links", "{}").unwrap();
        assert_eq!(backend.read("links").unwrap().as_deref(), Some("{}"));
        assert_eq!(slots.len(), 1);

        backend.remove("links").unwrap();
        backend.remove("links").unwrap();
        assert!(backend.is_empty());
    }
}
