use std::time::Duration;

use async_trait::async_trait;
use quote_catalog::{OptionCatalog, OptionSelection, ProductDetails};
use quote_core::QuoteRequest;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::backend::{BackendError, QuoteAck, QuoteBackend};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`QuoteBackend`] talking JSON to the quote API over HTTP.
pub struct HttpQuoteBackend {
    client: Client,
    base_url: String,
}

impl HttpQuoteBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| BackendError::Decode(e.to_string()));
        }

        let message = error_message(response).await;
        if status == StatusCode::NOT_FOUND {
            Err(BackendError::NotFound(message))
        } else {
            Err(BackendError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Text of the `{"error": ..}` body, or the raw body when it is not JSON.
async fn error_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    }
}

fn transport(e: reqwest::Error) -> BackendError {
    BackendError::Transport(e.to_string())
}

#[async_trait]
impl QuoteBackend for HttpQuoteBackend {
    async fn fetch_options(&self) -> Result<OptionCatalog, BackendError> {
        let response = self
            .client
            .get(self.url("/api/options"))
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }

    async fn fetch_product_details(
        &self,
        selection: &OptionSelection,
    ) -> Result<ProductDetails, BackendError> {
        let response = self
            .client
            .post(self.url("/api/product-details"))
            .json(selection)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }

    async fn submit_quote(&self, request: &QuoteRequest) -> Result<QuoteAck, BackendError> {
        let response = self
            .client
            .post(self.url("/api/quotes"))
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }
}
