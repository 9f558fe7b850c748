//! Metering resource clients

use std::sync::Arc;

use baasic_domain::constants::{METERING_DATA_MODULE_PATH, METERING_STATISTICS_MODULE_PATH};
use baasic_domain::{CollectionModel, MeteringData, MeteringStatistic, Model, Result};
use tokio_util::sync::CancellationToken;

use super::client::BaasicClient;
use super::resource::ResourceClient;
use super::url::FindParams;

/// Raw metering records (`metering/data`)
#[derive(Debug, Clone)]
pub struct MeteringDataClient<T = MeteringData> {
    resource: ResourceClient<T>,
}

impl MeteringDataClient {
    pub fn new(client: Arc<BaasicClient>) -> Self {
        Self::with_model(client)
    }
}

impl<T: Model> MeteringDataClient<T> {
    /// Client that (de)serializes records as `T`.
    pub fn with_model(client: Arc<BaasicClient>) -> Self {
        Self { resource: ResourceClient::new(client, METERING_DATA_MODULE_PATH) }
    }

    pub async fn find(
        &self,
        params: &FindParams,
        cancel: &CancellationToken,
    ) -> Result<CollectionModel<T>> {
        self.resource.find(params, cancel).await
    }

    pub async fn get(
        &self,
        id: &str,
        embed: &str,
        fields: &str,
        cancel: &CancellationToken,
    ) -> Result<T> {
        self.resource.get(id, embed, fields, cancel).await
    }

    pub async fn insert(&self, record: &T, cancel: &CancellationToken) -> Result<T> {
        self.resource.insert(record, cancel).await
    }

    pub async fn update(&self, record: &T, cancel: &CancellationToken) -> Result<bool> {
        self.resource.update(record, cancel).await
    }

    pub async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<bool> {
        self.resource.delete(id, cancel).await
    }
}

/// Aggregated metering figures (`metering/statistics`); read and delete only
#[derive(Debug, Clone)]
pub struct MeteringStatisticClient<T = MeteringStatistic> {
    resource: ResourceClient<T>,
}

impl MeteringStatisticClient {
    pub fn new(client: Arc<BaasicClient>) -> Self {
        Self::with_model(client)
    }
}

impl<T: Model> MeteringStatisticClient<T> {
    pub fn with_model(client: Arc<BaasicClient>) -> Self {
        Self { resource: ResourceClient::new(client, METERING_STATISTICS_MODULE_PATH) }
    }

    pub async fn find(
        &self,
        params: &FindParams,
        cancel: &CancellationToken,
    ) -> Result<CollectionModel<T>> {
        self.resource.find(params, cancel).await
    }

    pub async fn get(
        &self,
        id: &str,
        embed: &str,
        fields: &str,
        cancel: &CancellationToken,
    ) -> Result<T> {
        self.resource.get(id, embed, fields, cancel).await
    }

    pub async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<bool> {
        self.resource.delete(id, cancel).await
    }
}
