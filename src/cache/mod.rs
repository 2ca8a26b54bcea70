//! Single-slot result cache
//!
//! The legacy client asks for the same coordinates twice in a row (country
//! lookup, then the full query). Keeping only the most recent upstream
//! result covers that pattern without any eviction policy: every miss
//! overwrites the slot.

pub mod store;

use crate::error::{Error, Result};
use crate::place::RawPlaceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::StateStore;
use tracing::{debug, warn};

/// The single cached upstream result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Raw upstream record
    pub data: RawPlaceRecord,

    /// Query latitude, already rounded
    pub lat: f64,

    /// Query longitude, already rounded
    pub lon: f64,

    /// Language the record was requested in
    pub lang: String,

    /// When the entry was stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    fn matches(&self, lat: f64, lon: f64, lang: &str) -> bool {
        self.lat == lat && self.lon == lon && self.lang == lang
    }
}

/// Cache holding at most one entry in a state store
pub struct ResultCache {
    store: Box<dyn StateStore>,
    slot: String,
}

impl ResultCache {
    /// Create a cache using `slot` as the entry name in `store`
    pub fn new(store: Box<dyn StateStore>, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
        }
    }

    /// Look up the record for an exact (lat, lon, lang) key
    ///
    /// Coordinates are compared exactly; callers round them first. A hit
    /// returns the stored record with `cached` set.
    ///
    /// An unreadable or corrupt slot fails this lookup with
    /// [`Error::Storage`] and is discarded, so the next lookup is a miss.
    pub fn lookup(&self, lat: f64, lon: f64, lang: &str) -> Result<Option<RawPlaceRecord>> {
        let Some(entry) = self.load()? else {
            return Ok(None);
        };

        if !entry.matches(lat, lon, lang) {
            debug!(
                "Cache miss for {},{} [{}] (slot holds {},{} [{}])",
                lat, lon, lang, entry.lat, entry.lon, entry.lang
            );
            return Ok(None);
        }

        debug!("Cache hit for {},{} [{}]", lat, lon, lang);
        let mut record = entry.data;
        record.cached = true;
        Ok(Some(record))
    }

    /// Overwrite the slot with a fresh record
    pub fn store(&self, lat: f64, lon: f64, lang: &str, record: &RawPlaceRecord) -> Result<()> {
        let entry = CacheEntry {
            data: RawPlaceRecord {
                cached: false,
                ..record.clone()
            },
            lat,
            lon,
            lang: lang.to_string(),
            stored_at: Some(Utc::now()),
        };

        let payload = serde_json::to_vec_pretty(&entry)?;
        let written = self.store.write(&self.slot, &payload)?;
        debug!("Stored cache entry for {},{} [{}] ({} bytes)", lat, lon, lang, written);
        Ok(())
    }

    /// Current entry, if any
    pub fn entry(&self) -> Result<Option<CacheEntry>> {
        self.load()
    }

    fn load(&self) -> Result<Option<CacheEntry>> {
        let Some(payload) = self.store.read(&self.slot)? else {
            return Ok(None);
        };

        match serde_json::from_slice::<CacheEntry>(&payload) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!("Discarding corrupt cache slot '{}': {}", self.slot, e);
                if let Err(remove_err) = self.store.remove(&self.slot) {
                    warn!("Failed to discard cache slot '{}': {}", self.slot, remove_err);
                }
                Err(Error::Storage(format!(
                    "Corrupt cache slot '{}': {}",
                    self.slot, e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::store::{FileStateStore, MemoryStateStore};
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn frankfurt() -> RawPlaceRecord {
        RawPlaceRecord {
            city: Some("Frankfurt am Main".to_string()),
            state: Some("Hessen".to_string()),
            ..RawPlaceRecord::at(50.1109, 8.6821)
        }
    }

    fn memory_cache() -> ResultCache {
        ResultCache::new(Box::new(MemoryStateStore::new()), "rgcCache")
    }

    /// Store that shares its blobs with the test
    struct SharedStore(Arc<MemoryStateStore>);

    impl StateStore for SharedStore {
        fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
            self.0.read(name)
        }
        fn write(&self, name: &str, data: &[u8]) -> Result<usize> {
            self.0.write(name, data)
        }
        fn remove(&self, name: &str) -> Result<()> {
            self.0.remove(name)
        }
    }

    #[test]
    fn test_empty_cache_misses() {
        let cache = memory_cache();
        assert!(cache.lookup(50.11092, 8.68213, "de").unwrap().is_none());
        assert!(cache.entry().unwrap().is_none());
    }

    #[test]
    fn test_store_then_lookup_hits() {
        let cache = memory_cache();
        cache.store(50.11092, 8.68213, "de", &frankfurt()).unwrap();

        let record = cache.lookup(50.11092, 8.68213, "de").unwrap().unwrap();
        assert!(record.cached);
        assert_eq!(record.city.as_deref(), Some("Frankfurt am Main"));
        assert_eq!(record.lat, 50.1109);
    }

    #[test]
    fn test_differing_key_misses() {
        let cache = memory_cache();
        cache.store(50.11092, 8.68213, "de", &frankfurt()).unwrap();

        assert!(cache.lookup(50.11093, 8.68213, "de").unwrap().is_none());
        assert!(cache.lookup(50.11092, 8.68214, "de").unwrap().is_none());
        assert!(cache.lookup(50.11092, 8.68213, "de,en").unwrap().is_none());
    }

    #[test]
    fn test_store_overwrites_slot() {
        let cache = memory_cache();
        cache.store(50.11092, 8.68213, "de", &frankfurt()).unwrap();
        cache
            .store(47.49791, 19.04023, "hu", &RawPlaceRecord::at(47.4979, 19.0402))
            .unwrap();

        assert!(cache.lookup(50.11092, 8.68213, "de").unwrap().is_none());
        assert!(cache.lookup(47.49791, 19.04023, "hu").unwrap().is_some());

        let entry = cache.entry().unwrap().unwrap();
        assert_eq!(entry.lang, "hu");
        assert!(entry.stored_at.is_some());
    }

    #[test]
    fn test_cached_flag_not_persisted() {
        let cache = memory_cache();
        let mut record = frankfurt();
        record.cached = true;
        cache.store(1.0, 2.0, "en", &record).unwrap();

        let entry = cache.entry().unwrap().unwrap();
        assert!(!entry.data.cached);
    }

    #[test]
    fn test_corrupt_slot_fails_once() {
        let blobs = Arc::new(MemoryStateStore::new());
        let cache = ResultCache::new(Box::new(SharedStore(blobs.clone())), "rgcCache");
        blobs.write("rgcCache", b"{ not json").unwrap();

        let result = cache.lookup(1.0, 2.0, "en");
        assert!(matches!(result, Err(Error::Storage(_))));

        // The corrupt slot is discarded; caching keeps working afterwards
        assert!(cache.lookup(1.0, 2.0, "en").unwrap().is_none());
        cache.store(1.0, 2.0, "en", &frankfurt()).unwrap();
        assert!(cache.lookup(1.0, 2.0, "en").unwrap().is_some());
    }

    #[test]
    fn test_file_backed_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());
        let path = store.path_for("rgcCache");
        let cache = ResultCache::new(Box::new(store), "rgcCache");

        cache.store(50.11092, 8.68213, "de", &frankfurt()).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"lang\": \"de\""));
        assert!(content.contains("\"city\": \"Frankfurt am Main\""));

        let record = cache.lookup(50.11092, 8.68213, "de").unwrap().unwrap();
        assert!(record.cached);
        assert_eq!(record.state.as_deref(), Some("Hessen"));
    }

    #[test]
    fn test_entry_without_timestamp_loads() {
        let blobs = Arc::new(MemoryStateStore::new());
        let cache = ResultCache::new(Box::new(SharedStore(blobs.clone())), "rgcCache");
        blobs
            .write(
                "rgcCache",
                br#"{"data": {"city": "Wien", "lat": 48.2, "lng": 16.37}, "lat": 48.2, "lon": 16.37, "lang": "de"}"#,
            )
            .unwrap();

        let record = cache.lookup(48.2, 16.37, "de").unwrap().unwrap();
        assert_eq!(record.city.as_deref(), Some("Wien"));
    }
}
