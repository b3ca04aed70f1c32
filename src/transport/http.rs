use crate::config::ClientConfig;
use crate::{Error, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Header the provider reads the API key from.
pub const API_KEY_HEADER: &str = "xi-api-key";

pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        // No local check on the key: an empty key is rejected by the provider with a 401.
        request.header(API_KEY_HEADER, &self.api_key)
    }

    /// GET `path` and deserialize the JSON body.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .map_err(TransportError::Http)?;

        let body = Self::success_body(response)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// POST a JSON body to `path` and return the raw response bytes.
    pub fn post_json_for_bytes<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        accept: &str,
    ) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .authorized(self.client.post(&url))
            .header(ACCEPT, accept)
            .json(body)
            .send()
            .map_err(TransportError::Http)?;

        Self::success_body(response)
    }

    fn success_body(response: Response) -> Result<Vec<u8>> {
        let status = response.status();
        let bytes = response.bytes().map_err(TransportError::Http)?;
        if !status.is_success() {
            return Err(Error::remote(
                status.as_u16(),
                String::from_utf8_lossy(&bytes).into_owned(),
            ));
        }
        Ok(bytes.to_vec())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
