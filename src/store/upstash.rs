use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use super::HashStore;

/// Blanket deadline for a single store call. There is no retry: a request
/// that fails or times out propagates to the caller once.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Envelope the REST API wraps every successful reply in.
#[derive(Debug, Deserialize)]
struct RestResponse<T> {
    result: T,
}

/// Client for an Upstash-style Redis REST API.
///
/// Commands are path segments on the base URL, authenticated with a bearer
/// token. `HGETALL` comes back as a flat `[field, value, field, value, ...]`
/// array, `HINCRBY` as the integer after the increment.
pub struct UpstashStore {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

impl UpstashStore {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("store request failed {}: {}", status, body));
        }
        let envelope: RestResponse<T> = response.json().await?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl HashStore for UpstashStore {
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>> {
        let url = format!(
            "{}/hgetall/{}",
            self.base_url,
            urlencoding::encode(key)
        );
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let flat: Vec<String> = Self::decode(response).await?;
        let mut fields = HashMap::with_capacity(flat.len() / 2);
        for pair in flat.chunks_exact(2) {
            fields.insert(pair[0].clone(), pair[1].clone());
        }
        Ok(fields)
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        let url = format!(
            "{}/hincrby/{}/{}/{}",
            self.base_url,
            urlencoding::encode(key),
            urlencoding::encode(field),
            delta
        );
        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        Self::decode(response).await
    }
}
