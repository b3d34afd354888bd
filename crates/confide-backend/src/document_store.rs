use crate::{BackendClient, BackendError, DIARY_TABLE};

use confide_core::DiaryEntry;
use confide_diary::{DiaryEntryChanges, DocumentStore, NewDiaryEntry, Result as DiaryErrorResult};

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::Method;

/// Diary collection served by the hosted REST endpoint.
///
/// Rows are only visible to the user whose token authorises the request.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: Arc<BackendClient>,
}

impl HttpDocumentStore {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    fn table_path() -> String {
        format!("/rest/v1/{DIARY_TABLE}")
    }

    /// PostgREST equality filter; the value goes through query encoding.
    fn eq_filter(value: &str) -> String {
        format!("eq.{value}")
    }

    fn require_session(&self) -> Result<(), BackendError> {
        match self.client.access_token() {
            Some(_) => Ok(()),
            None => Err(BackendError::not_signed_in()),
        }
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn select_by_owner(&self, owner: &str) -> DiaryErrorResult<Vec<DiaryEntry>> {
        self.require_session()?;

        let req = self
            .client
            .request(Method::GET, &Self::table_path())
            .query(&[
                ("select", "*".to_string()),
                ("user_id", Self::eq_filter(owner)),
                ("order", "created_at.desc".to_string()),
            ]);
        let entries: Vec<DiaryEntry> = self.client.execute(req).await?;
        debug!("Selected {} diary rows", entries.len());
        Ok(entries)
    }

    async fn insert(&self, record: &NewDiaryEntry) -> DiaryErrorResult<DiaryEntry> {
        self.require_session()?;

        let req = self
            .client
            .request(Method::POST, &Self::table_path())
            .header("Prefer", "return=representation")
            .json(record);
        let rows: Vec<DiaryEntry> = self.client.execute(req).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::api(200, "EMPTY", "Insert returned no row").into())
    }

    async fn update(&self, id: &str, changes: &DiaryEntryChanges) -> DiaryErrorResult<()> {
        self.require_session()?;

        let req = self
            .client
            .request(Method::PATCH, &Self::table_path())
            .query(&[("id", Self::eq_filter(id))])
            .json(changes);
        self.client.execute_empty(req).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DiaryErrorResult<()> {
        self.require_session()?;

        let req = self
            .client
            .request(Method::DELETE, &Self::table_path())
            .query(&[("id", Self::eq_filter(id))]);
        self.client.execute_empty(req).await?;
        Ok(())
    }
}
