//! JSON file-based record store.
//!
//! One human-readable JSON file per entity type, with atomic writes
//! (write-to-temp + rename) to prevent corruption on crashes. The whole
//! dataset lives in memory and is persisted on every modification.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) — the file is loaded once on open
//! - **Write**: O(n) — the entire dataset is serialized per mutation
//! - **Best for**: local datasets of a few thousand records

use crate::domain::error::{InvopakError, Result};
use crate::domain::record::Record;
use crate::store::backend::RecordStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// On-disk envelope wrapping the records of one entity type.
///
/// Versioned for future migrations; records are indexed by their identity
/// key for O(1) lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "R: Serialize", deserialize = "R: DeserializeOwned"))]
struct StoreData<R> {
    /// Storage format version.
    version: u32,

    /// All stored records, keyed by [`Record::id`].
    #[serde(default)]
    records: HashMap<String, R>,
}

impl<R> Default for StoreData<R> {
    fn default() -> Self {
        Self {
            version: 1,
            records: HashMap::new(),
        }
    }
}

/// JSON file store for one entity type.
///
/// # Thread Safety
///
/// `Send` but not `Sync`: designed to be owned by a single view or worker,
/// matching the single-threaded event model of the core.
///
/// # Examples
///
/// ```no_run
/// use invopak::domain::Invoice;
/// use invopak::store::JsonStore;
/// use std::path::Path;
///
/// let store: JsonStore<Invoice> = JsonStore::open_in(Path::new("/tmp/invopak"))?;
/// # Ok::<(), invopak::domain::InvopakError>(())
/// ```
pub struct JsonStore<R: Record + Serialize + DeserializeOwned> {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on creation.
    data: StoreData<R>,

    /// Tracks whether data has been modified since the last save.
    dirty: bool,
}

impl<R: Record + Serialize + DeserializeOwned> JsonStore<R> {
    /// Creates or opens a JSON store at the given file path.
    ///
    /// Loads existing data if the file exists, otherwise starts empty.
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails, the file exists but
    /// contains invalid JSON, or permissions prevent reading.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, entity = R::entity_type(), "initializing JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            StoreData::default()
        };

        tracing::debug!(record_count = data.records.len(), "store initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Opens the store for this entity type inside a data directory.
    ///
    /// The file name is derived from [`Record::entity_type`], e.g.
    /// `invoices.json`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`JsonStore::new`].
    pub fn open_in(dir: &Path) -> Result<Self> {
        Self::new(dir.join(format!("{}.json", R::entity_type())))
    }

    /// Loads store data from a JSON file.
    fn load_from_file(path: &Path) -> Result<StoreData<R>> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreData<R> = serde_json::from_str(&contents)
            .map_err(|e| InvopakError::Store(format!("failed to parse {}: {e}", path.display())))?;

        tracing::debug!(
            version = data.version,
            records = data.records.len(),
            "loaded store data"
        );

        Ok(data)
    }

    /// Saves store data to disk using an atomic write.
    ///
    /// Writes to a temporary file first, then renames it onto the target
    /// path, so the file is never left half-written even if the process
    /// crashes mid-save.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| InvopakError::Store(format!("failed to serialize store: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl<R: Record + Serialize + DeserializeOwned + Send> RecordStore<R> for JsonStore<R> {
    fn get_all(&self) -> Result<Vec<R>> {
        let _span = tracing::debug_span!("json_get_all", entity = R::entity_type()).entered();

        let records: Vec<R> = self.data.records.values().cloned().collect();

        tracing::debug!(count = records.len(), "retrieved records");
        Ok(records)
    }

    fn put(&mut self, record: &R) -> Result<String> {
        let id = record.id().to_string();
        let _span =
            tracing::debug_span!("json_put", entity = R::entity_type(), id = %id).entered();

        self.data.records.insert(id.clone(), record.clone());
        self.dirty = true;
        self.save_to_file()?;

        Ok(id)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let _span =
            tracing::debug_span!("json_delete", entity = R::entity_type(), id = %id).entered();

        if self.data.records.remove(id).is_none() {
            return Err(InvopakError::Store(format!("record not found: {id}")));
        }

        self.dirty = true;
        self.save_to_file()
    }
}

impl<R: Record + Serialize + DeserializeOwned> Drop for JsonStore<R> {
    /// Saves unwritten changes on drop as a last line of defense.
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!(path = ?self.file_path, "saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            description: "Portland cement".to_string(),
            hs_code: "2523.2900".to_string(),
            uom: "MT".to_string(),
            category: "construction".to_string(),
            unit_price: price,
            tax_rate: 18.0,
        }
    }

    #[test]
    fn put_get_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store: JsonStore<Product> = JsonStore::open_in(dir.path()).unwrap();

        assert!(store.get_all().unwrap().is_empty());
        store.put(&product("p1", 100.0)).unwrap();
        store.put(&product("p2", 200.0)).unwrap();
        assert_eq!(store.get_all().unwrap().len(), 2);

        // Re-putting the same key replaces, not duplicates.
        store.put(&product("p1", 150.0)).unwrap();
        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|p| p.id == "p1" && p.unit_price == 150.0));

        store.delete("p1").unwrap();
        assert_eq!(store.get_all().unwrap().len(), 1);
        assert!(store.delete("p1").is_err());
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store: JsonStore<Product> = JsonStore::open_in(dir.path()).unwrap();
            store.put(&product("p1", 100.0)).unwrap();
        }
        let store: JsonStore<Product> = JsonStore::open_in(dir.path()).unwrap();
        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "p1");
    }

    #[test]
    fn writes_are_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let mut store: JsonStore<Product> = JsonStore::open_in(dir.path()).unwrap();
        store.put(&product("p1", 100.0)).unwrap();

        // No temp file is left behind after a successful save.
        assert!(dir.path().join("products.json").exists());
        assert!(!dir.path().join("products.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("products.json"), "not json").unwrap();
        let result: Result<JsonStore<Product>> = JsonStore::open_in(dir.path());
        assert!(matches!(result, Err(InvopakError::Store(_))));
    }
}
