use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::{RemoteStore, StoreError};
use crate::domain::models::{ExpenseData, ExpenseId, ExpenseRecord};

const COLLECTION: &str = "expenses";

/// Client for a Firebase-style JSON tree: the collection lives at
/// `{base}/expenses.json` and each entry at `{base}/expenses/{id}.json`.
pub struct HttpStore {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("store base url cannot carry a path: {base_url}");
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn collection_url(&self) -> Result<Url, StoreError> {
        self.endpoint(&[&format!("{COLLECTION}.json")])
    }

    fn entry_url(&self, id: &ExpenseId) -> Result<Url, StoreError> {
        self.endpoint(&[COLLECTION, &format!("{id}.json")])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn fetch_expenses(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
        let url = self.collection_url()?;
        debug!(%url, "fetching expenses");
        let response = checked(self.client.get(url).send().await?)?;
        // `preserve_order` keeps the keys in the order the store sent them.
        let entries: Option<Map<String, Value>> = decode(response).await?;

        entries
            .unwrap_or_default()
            .into_iter()
            .map(|(id, value)| {
                let data: ExpenseData = serde_json::from_value(value)
                    .map_err(|err| StoreError::Decode(format!("entry {id}: {err}")))?;
                Ok(data.into_record(ExpenseId::new(id)))
            })
            .collect()
    }

    async fn store_expense(&self, data: &ExpenseData) -> Result<ExpenseId, StoreError> {
        let url = self.collection_url()?;
        debug!(%url, "storing expense");
        let response = checked(self.client.post(url).json(data).send().await?)?;
        let pushed: PushResponse = decode(response).await?;
        Ok(ExpenseId::new(pushed.name))
    }

    async fn update_expense(&self, id: &ExpenseId, data: &ExpenseData) -> Result<(), StoreError> {
        let url = self.entry_url(id)?;
        debug!(%url, "updating expense");
        checked(self.client.put(url).json(data).send().await?)?;
        Ok(())
    }

    async fn delete_expense(&self, id: &ExpenseId) -> Result<(), StoreError> {
        let url = self.entry_url(id)?;
        debug!(%url, "deleting expense");
        checked(self.client.delete(url).send().await?)?;
        Ok(())
    }
}

fn checked(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status(status))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|err| StoreError::Decode(err.to_string()))
}
