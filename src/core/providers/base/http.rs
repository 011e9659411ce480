//! Shared HTTP transport for adapters
//!
//! One pooled `reqwest` client per adapter, preconfigured with the adapter's
//! timeout and headers. Every failure leaves here already mapped to a
//! [`ProviderError`] by the adapter's [`ErrorMapper`].

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::config::ProviderSettings;
use crate::core::traits::{ErrorMapper, TransportFailure};
use crate::core::types::ProviderError;
use crate::utils::error::{Result, RouterError};

const POOL_IDLE_TIMEOUT_SECS: u64 = 90;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Pooled HTTP client bound to one provider
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    provider: String,
}

impl HttpTransport {
    /// Build a client carrying `auth_headers` plus the configured extra headers
    pub fn new(settings: &ProviderSettings, auth_headers: HeaderMap) -> Result<Self> {
        let mut headers = auth_headers;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("llm-router/", env!("CARGO_PKG_VERSION"))),
        );

        for (name, value) in &settings.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                RouterError::config(format!("{}: invalid header name '{}': {}", settings.id, name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                RouterError::config(format!("{}: invalid header value: {}", settings.id, e))
            })?;
            headers.insert(name, value);
        }

        let connect_timeout = settings
            .timeout
            .min(Duration::from_secs(CONNECT_TIMEOUT_SECS));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .connect_timeout(connect_timeout)
            .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            provider: settings.id.clone(),
        })
    }

    /// POST a JSON body and decode a JSON reply
    pub async fn post_json<B, T, M>(
        &self,
        mapper: &M,
        url: &str,
        body: &B,
    ) -> std::result::Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
        M: ErrorMapper,
    {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                mapper.map_transport_error(&self.provider, &TransportFailure::from_reqwest(&e))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            mapper.map_transport_error(&self.provider, &TransportFailure::from_reqwest(&e))
        })?;

        if !status.is_success() {
            debug!(provider = %self.provider, status = status.as_u16(), "backend returned error status");
            return Err(mapper.map_http_error(&self.provider, status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| mapper.map_parsing_error(&self.provider, &e))
    }

    /// GET `url` and report whether it answered 2xx
    pub async fn probe(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(provider = %self.provider, error = %e, "health probe failed");
                false
            }
        }
    }
}
