use async_trait::async_trait;
use parking_lot::RwLock;
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::models::{ExpenseData, ExpenseId, ExpenseRecord},
    infrastructure::config::StoreConfig,
};

mod http;

pub use self::http::HttpStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to expense store failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("expense store responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected expense store payload: {0}")]
    Decode(String),
    #[error("invalid expense store url: {0}")]
    Url(#[from] url::ParseError),
    #[error("expense {0} not found in store")]
    Missing(ExpenseId),
}

/// Remote CRUD collaborator holding the persisted expenses.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch_expenses(&self) -> Result<Vec<ExpenseRecord>, StoreError>;
    async fn store_expense(&self, data: &ExpenseData) -> Result<ExpenseId, StoreError>;
    async fn update_expense(&self, id: &ExpenseId, data: &ExpenseData) -> Result<(), StoreError>;
    async fn delete_expense(&self, id: &ExpenseId) -> Result<(), StoreError>;
}

pub fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn RemoteStore>> {
    match config.provider.as_str() {
        "http" => {
            let Some(base_url) = config.base_url.as_deref() else {
                anyhow::bail!("http store provider requires store.base_url");
            };
            Ok(Arc::new(HttpStore::new(base_url, config.timeout())?))
        }
        "memory" => Ok(Arc::new(MemoryStore::default())),
        other => anyhow::bail!("unsupported store provider: {other}"),
    }
}

/// Process-local store with generated identifiers. Entries come back in
/// insertion order, like keys pushed to the remote tree.
#[derive(Default)]
pub struct MemoryStore {
    expenses: RwLock<BTreeMap<u64, (ExpenseId, ExpenseData)>>,
    next_seq: RwLock<u64>,
}

impl MemoryStore {
    pub fn with_expenses(expenses: impl IntoIterator<Item = ExpenseRecord>) -> Self {
        let store = Self::default();
        for record in expenses {
            store.insert(record.id.clone(), record.data());
        }
        store
    }

    fn insert(&self, id: ExpenseId, data: ExpenseData) {
        let mut seq = self.next_seq.write();
        self.expenses.write().insert(*seq, (id, data));
        *seq += 1;
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn fetch_expenses(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
        Ok(self
            .expenses
            .read()
            .values()
            .map(|(id, data)| data.clone().into_record(id.clone()))
            .collect())
    }

    async fn store_expense(&self, data: &ExpenseData) -> Result<ExpenseId, StoreError> {
        let id = ExpenseId::new(Uuid::new_v4().simple().to_string());
        self.insert(id.clone(), data.clone());
        Ok(id)
    }

    async fn update_expense(&self, id: &ExpenseId, data: &ExpenseData) -> Result<(), StoreError> {
        let mut expenses = self.expenses.write();
        match expenses.values_mut().find(|(existing, _)| existing == id) {
            Some(entry) => {
                entry.1 = data.clone();
                Ok(())
            }
            None => Err(StoreError::Missing(id.clone())),
        }
    }

    async fn delete_expense(&self, id: &ExpenseId) -> Result<(), StoreError> {
        self.expenses.write().retain(|_, (existing, _)| existing != id);
        Ok(())
    }
}
