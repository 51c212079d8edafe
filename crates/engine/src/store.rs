//! Persistence collaborator seam.
//!
//! The engine never stores records itself: it builds them and dispatches the
//! intent to a [`RecordStore`]. The HTTP-backed implementation lives in the
//! front-end crate; [`MemoryStore`] backs the engine's own tests.
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use thiserror::Error;

use crate::{RecordId, TransactionRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("record not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation rejected: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// External persistence capability, matched by record identity.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Stores a new record; assigns no identity beyond what was supplied.
    async fn create(&self, record: &TransactionRecord) -> Result<(), StoreError>;

    /// Replaces an existing record matched by its id.
    async fn update(&self, record: &TransactionRecord) -> Result<(), StoreError>;
}

/// In-process store backing the engine's tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<RecordId, TransactionRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<TransactionRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    #[must_use]
    pub fn records(&self) -> Vec<TransactionRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, record: &TransactionRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        if records.contains_key(&record.id) {
            return Err(StoreError::Conflict(record.id.to_string()));
        }
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &TransactionRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        if !records.contains_key(&record.id) {
            return Err(StoreError::NotFound);
        }
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Money, RecordDate, RecordKind};

    fn record(id: &str) -> TransactionRecord {
        TransactionRecord {
            id: RecordId::from(id),
            kind: RecordKind::Expense,
            description: "Mercado".to_string(),
            amount: Money::new(12_000),
            date: RecordDate::parse("01/02/2024").unwrap(),
            category: Category::Alimentacao,
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_ids() {
        let store = MemoryStore::new();
        store.create(&record("1")).await.unwrap();
        let err = store.create(&record("1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn update_requires_an_existing_record() {
        let store = MemoryStore::new();
        let err = store.update(&record("7")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));

        store.create(&record("7")).await.unwrap();
        let mut changed = record("7");
        changed.description = "Feira".to_string();
        store.update(&changed).await.unwrap();
        assert_eq!(
            store.get(&RecordId::from("7")).unwrap().description,
            "Feira"
        );
    }
}
