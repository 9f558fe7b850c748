//! Typed CRUD over one module path
//!
//! Resource clients own no state beyond the module path; everything else
//! comes from the shared [`BaasicClient`].

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use baasic_domain::{BaasicError, CollectionModel, Model, Result};
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::client::BaasicClient;
use super::url::{FindParams, QueryString};

/// CRUD client for the resources of type `T` under `module_path`
pub struct ResourceClient<T> {
    client: Arc<BaasicClient>,
    module_path: String,
    _model: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            module_path: self.module_path.clone(),
            _model: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient").field("module_path", &self.module_path).finish()
    }
}

impl<T: Model> ResourceClient<T> {
    pub fn new(client: Arc<BaasicClient>, module_path: impl Into<String>) -> Self {
        Self { client, module_path: module_path.into(), _model: PhantomData }
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    /// One page of resources; an empty page when the backend answers `null`.
    #[instrument(skip(self, cancel), fields(module = %self.module_path))]
    pub async fn find(
        &self,
        params: &FindParams,
        cancel: &CancellationToken,
    ) -> Result<CollectionModel<T>> {
        let url = self.client.api_url("{0}", &[&self.module_path])?;
        let query = QueryString::from_find(params);
        let page: Option<CollectionModel<T>> =
            self.client.get(&format!("{url}{query}"), cancel).await?;
        Ok(page.unwrap_or_default())
    }

    #[instrument(skip(self, cancel), fields(module = %self.module_path))]
    pub async fn get(
        &self,
        id: &str,
        embed: &str,
        fields: &str,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let url = self.item_url(id)?;
        let query = QueryString::for_item(embed, fields);
        self.client.get(&format!("{url}{query}"), cancel).await
    }

    /// Create `item`; the created resource is returned as the backend stored
    /// it.
    #[instrument(skip(self, item, cancel), fields(module = %self.module_path))]
    pub async fn insert(&self, item: &T, cancel: &CancellationToken) -> Result<T> {
        let url = self.client.api_url("{0}", &[&self.module_path])?;
        self.client.post(&url, item, cancel).await
    }

    /// Replace `item`; `true` for 200, 201 and 204, `false` for any other
    /// status.
    ///
    /// # Errors
    /// `BaasicError::InvalidInput` when `item` has no id.
    #[instrument(skip(self, item, cancel), fields(module = %self.module_path))]
    pub async fn update(&self, item: &T, cancel: &CancellationToken) -> Result<bool> {
        let id = item
            .id()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BaasicError::InvalidInput("resource has no id to update".into()))?;
        let url = self.item_url(&id)?;

        let status = self.client.put_status(&url, item, cancel).await?;
        Ok(matches!(status, StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT))
    }

    /// `true` only when the backend answers `200 OK`.
    #[instrument(skip(self, cancel), fields(module = %self.module_path))]
    pub async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<bool> {
        let url = self.item_url(id)?;
        self.client.delete(&url, cancel).await
    }

    fn item_url(&self, id: &str) -> Result<String> {
        let id = urlencoding::encode(id);
        self.client.api_url("{0}/{1}", &[&self.module_path, &id])
    }
}
