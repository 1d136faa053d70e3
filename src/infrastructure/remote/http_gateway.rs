use crate::application::ports::remote_gateway::RemoteGateway;
use crate::domain::entities::QueueRecord;
use crate::domain::value_objects::{CollectionName, OperationKind};
use crate::shared::config::RemoteConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Delivers queue records to the portal backend as REST calls:
/// create → POST, update → PUT, delete → DELETE on `/api/{collection}`.
pub struct HttpRemoteGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteGateway {
    pub fn new(config: &RemoteConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, collection: &CollectionName) -> String {
        format!("{}/api/{}", self.base_url, collection.as_str())
    }
}

#[async_trait]
impl RemoteGateway for HttpRemoteGateway {
    async fn deliver(&self, record: &QueueRecord) -> Result<(), AppError> {
        let url = self.endpoint(&record.collection);
        let request = match record.operation {
            OperationKind::Create => self.client.post(&url),
            OperationKind::Update => self.client.put(&url),
            OperationKind::Delete => self.client.delete(&url),
        };

        let response = request.json(record.payload.as_json()).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "{} {} returned {}",
                record.operation,
                url,
                response.status()
            )));
        }

        Ok(())
    }

    async fn fetch_collection(&self, collection: &CollectionName) -> Result<Vec<Value>, AppError> {
        let url = self.endpoint(collection);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let items: Vec<Value> = response.json().await?;
        Ok(items)
    }
}
