use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::{
    header::{CONTENT_LENGTH, CONTENT_TYPE, RANGE},
    Client,
};
use serde_json::json;

use crate::{Network, NetworkError, RangeResponse};

// Constants
const DEFAULT_API_BASE: &str = "https://statsigapi.net/v1";
const API_KEY_HEADER: &str = "STATSIG-API-KEY";
const CLIENT_TIME_HEADER: &str = "STATSIG-CLIENT-TIME";
const SDK_TYPE: &str = "rust-specsync";
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

// Config
#[derive(Clone, Debug)]
pub struct HttpNetworkConfig {
    pub api_base: String,
    pub server_secret: String,
    pub request_timeout: Duration,
}

impl HttpNetworkConfig {
    pub fn new(server_secret: &str) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            server_secret: server_secret.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// [`Network`] over HTTPS. Config and metadata requests are authenticated
/// POSTs against `api_base`; id list files are fetched with a `Range` GET
/// from the url the metadata points at.
pub struct HttpNetwork {
    client: Client,
    config: HttpNetworkConfig,
}

impl HttpNetwork {
    pub fn new(config: HttpNetworkConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| NetworkError::Request {
                endpoint: config.api_base.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    async fn post(&self, endpoint: &str, body: String) -> Result<String, NetworkError> {
        let url = format!("{}/{}", self.config.api_base.trim_end_matches('/'), endpoint);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.config.server_secret.as_str())
            .header(CLIENT_TIME_HEADER, client_time_millis().to_string())
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .body(body)
            .send()
            .await
            .map_err(|e| NetworkError::Request {
                endpoint: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(NetworkError::Status {
                endpoint: url,
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(|e| NetworkError::Body {
            endpoint: url,
            message: e.to_string(),
        })
    }
}

impl Network for HttpNetwork {
    async fn fetch_config_specs(&self, since_time: u64) -> Result<String, NetworkError> {
        let body = json!({ "sinceTime": since_time }).to_string();
        self.post("download_config_specs", body).await
    }

    async fn fetch_id_list_metadata(&self) -> Result<String, NetworkError> {
        let body = json!({
            "statsigMetadata": {
                "sdkType": SDK_TYPE,
                "sdkVersion": SDK_VERSION,
            }
        })
        .to_string();
        self.post("get_id_lists", body).await
    }

    async fn fetch_id_list_range(&self, url: &str, start: u64) -> Result<RangeResponse, NetworkError> {
        let response = self
            .client
            .get(url)
            .header(RANGE, format!("bytes={}-", start))
            .send()
            .await
            .map_err(|e| NetworkError::Request {
                endpoint: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        // the declared length, not the decoded body size
        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());

        let body = response.text().await.map_err(|e| NetworkError::Body {
            endpoint: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(RangeResponse {
            status,
            content_length,
            body,
        })
    }
}

fn client_time_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0)
}
