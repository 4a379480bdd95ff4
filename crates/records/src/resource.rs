//! Typed REST collections.
//!
//! Paths follow the backend's trailing-slash convention: the collection lives
//! at `/sales/orders/`, an item at `/sales/orders/<id>/` and an action at
//! `/sales/orders/<id>/<action>/`.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use erpdesk_client::{ApiClient, HttpTransport, Method, Transport};
use erpdesk_core::{Record, RecordId};

use crate::action::{Action, Workflow};
use crate::error::RecordError;

/// Where a record type lives on the backend.
pub trait Endpoint {
    /// Collection path, with a trailing slash.
    const PATH: &'static str;
    /// File name prefix for CSV exports.
    const EXPORT_PREFIX: &'static str;
}

/// List endpoints answer with either a bare array or a paginated envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<R> {
    Paged { results: Vec<R> },
    Bare(Vec<R>),
}

impl<R> From<ListEnvelope<R>> for Vec<R> {
    fn from(value: ListEnvelope<R>) -> Self {
        match value {
            ListEnvelope::Paged { results } => results,
            ListEnvelope::Bare(items) => items,
        }
    }
}

pub struct Resource<'a, R, T = HttpTransport> {
    client: &'a ApiClient<T>,
    path: String,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R, T> Resource<'a, R, T>
where
    R: Record + Endpoint + DeserializeOwned,
    T: Transport,
{
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self::at(client, R::PATH)
    }

    /// Same record type under a different collection path.
    pub fn at(client: &'a ApiClient<T>, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.ends_with('/') {
            path.push('/');
        }
        Self {
            client,
            path,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn item_path(&self, id: &RecordId) -> String {
        format!("{}{}/", self.path, id)
    }

    pub fn action_path(&self, id: &RecordId, action: Action) -> String {
        format!("{}{}/{}/", self.path, id, action.segment())
    }

    pub async fn list(&self) -> Result<Vec<R>, RecordError> {
        let envelope: ListEnvelope<R> = self.client.get(&self.path).await?;
        let records: Vec<R> = envelope.into();
        debug!(path = %self.path, count = records.len(), "collection fetched");
        Ok(records)
    }

    pub async fn get(&self, id: &RecordId) -> Result<R, RecordError> {
        Ok(self.client.get(&self.item_path(id)).await?)
    }

    pub async fn create<B>(&self, body: &B) -> Result<R, RecordError>
    where
        B: Serialize + ?Sized,
    {
        let created: R = self.client.post(&self.path, body).await?;
        info!(path = %self.path, id = %created.id(), "record created");
        Ok(created)
    }

    /// Full replace (PUT).
    pub async fn update<B>(&self, id: &RecordId, body: &B) -> Result<R, RecordError>
    where
        B: Serialize + ?Sized,
    {
        Ok(self.client.put(&self.item_path(id), body).await?)
    }

    /// Partial update (PATCH).
    pub async fn patch<B>(&self, id: &RecordId, body: &B) -> Result<R, RecordError>
    where
        B: Serialize + ?Sized,
    {
        Ok(self.client.patch(&self.item_path(id), body).await?)
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), RecordError> {
        self.client.delete(&self.item_path(id)).await?;
        info!(path = %self.path, %id, "record deleted");
        Ok(())
    }

    /// POST `action` for `id` with no body. The backend decides whether the
    /// transition is legal.
    pub async fn perform(&self, id: &RecordId, action: Action) -> Result<Value, RecordError> {
        let path = self.action_path(id, action);
        let value = self.client.request(Method::Post, &path, None, &[]).await?;
        info!(%path, action = action.segment(), "action performed");
        Ok(value)
    }
}

impl<R, T> Resource<'_, R, T>
where
    R: Workflow + Endpoint + DeserializeOwned,
    T: Transport,
{
    /// Like [`perform`](Self::perform), but refuses actions the record's
    /// current status does not offer without calling the backend.
    pub async fn perform_on(&self, record: &R, action: Action) -> Result<Value, RecordError> {
        if !record.allows(action) {
            return Err(RecordError::ActionUnavailable {
                action,
                status: record.status().to_string(),
            });
        }
        self.perform(record.id(), action).await
    }
}
