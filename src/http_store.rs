// Booking store backed by a hosted document database over HTTP
//
// POST {base_url}/{collection} with the booking document as JSON.
// The server answers with the created document's id and creation time.

use crate::booking::{BookingRecord, NewBooking};
use crate::config::{SiteConfig, StoreConfig};
use crate::store::{BookingStore, CollectionPath, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

// Body returned by the document database for a created document
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedDocument {
    id: String,
    create_time: DateTime<Utc>,
}

pub struct HttpDocumentStore {
    client: reqwest::Client,
    config: StoreConfig,
    collection: CollectionPath,
}

impl HttpDocumentStore {
    pub fn new(config: StoreConfig, collection: CollectionPath) -> Result<Self, StoreError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            config,
            collection,
        })
    }

    pub fn from_site_config(config: &SiteConfig) -> Result<Self, StoreError> {
        Self::new(config.store.clone(), config.collection_path())
    }

    pub fn documents_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.collection
        )
    }

    fn map_send_error(&self, e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout(self.config.timeout_ms.unwrap_or_default())
        } else {
            StoreError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl BookingStore for HttpDocumentStore {
    fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    async fn create(&self, booking: NewBooking) -> Result<BookingRecord, StoreError> {
        let url = self.documents_url();
        debug!(%url, lodging_id = %booking.lodging_id, "creating booking document");

        let mut request = self.client.post(&url).json(&booking);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("unreadable response body: {}", e));
            error!(status = status.as_u16(), %message, "booking document rejected");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let created: CreatedDocument = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        Ok(booking.into_record(created.id, created.create_time))
    }
}
