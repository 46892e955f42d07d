//! In-memory record store for tests and ephemeral hosts.
//!
//! Behaves exactly like the JSON backend minus persistence: records keyed by
//! identity, replace-on-put, error on deleting a missing key. Also usable as
//! a fixture seed via [`MemoryStore::with_records`].

use crate::domain::error::{InvopakError, Result};
use crate::domain::record::Record;
use crate::store::backend::RecordStore;
use std::collections::HashMap;

/// Volatile record store backed by a `HashMap`.
///
/// # Examples
///
/// ```
/// use invopak::domain::{Product, Record};
/// use invopak::store::{MemoryStore, RecordStore};
///
/// let product = Product {
///     id: "p1".into(),
///     description: "Portland cement".into(),
///     hs_code: "2523.2900".into(),
///     uom: "MT".into(),
///     category: "construction".into(),
///     unit_price: 28_500.0,
///     tax_rate: 18.0,
/// };
///
/// let mut store = MemoryStore::new();
/// store.put(&product)?;
/// assert_eq!(store.get_all()?.len(), 1);
/// # Ok::<(), invopak::domain::InvopakError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore<R> {
    records: HashMap<String, R>,
}

impl<R: Record> MemoryStore<R> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Creates a store pre-seeded with the given records.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|r| (r.id().to_string(), r))
                .collect(),
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: Record + Send> RecordStore<R> for MemoryStore<R> {
    fn get_all(&self) -> Result<Vec<R>> {
        Ok(self.records.values().cloned().collect())
    }

    fn put(&mut self, record: &R) -> Result<String> {
        let id = record.id().to_string();
        self.records.insert(id.clone(), record.clone());
        Ok(id)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        if self.records.remove(id).is_none() {
            return Err(InvopakError::Store(format!("record not found: {id}")));
        }
        Ok(())
    }
}
