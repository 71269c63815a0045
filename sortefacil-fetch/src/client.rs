//! HTTP client for the Caixa results API

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sortefacil_core::{DrawRecord, GameConfig};
use thiserror::Error;

use crate::api::ApiDraw;

const DEFAULT_BASE_URL: &str = "https://servicebus2.caixa.gov.br/portaldeloterias/api";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected payload: {0}")]
    InvalidPayload(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Number of draws to retrieve, latest included. Clamped to `1..=10`.
    pub history_depth: u32,
    /// Drop draws whose numbers do not fit the game definition
    pub validate_records: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            history_depth: 10,
            validate_records: true,
        }
    }
}

/// Source of draw records for a game.
#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn latest(&self, game: &GameConfig) -> Result<DrawRecord, FetchError>;

    async fn contest(&self, game: &GameConfig, contest: u32) -> Result<DrawRecord, FetchError>;
}

pub struct CaixaClient {
    client: reqwest::Client,
    base_url: String,
}

impl CaixaClient {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, game: &GameConfig, contest: Option<u32>) -> String {
        match contest {
            Some(n) => format!("{}/{}/{}", self.base_url, game.api_path(), n),
            None => format!("{}/{}", self.base_url, game.api_path()),
        }
    }

    async fn fetch_draw(&self, url: &str) -> Result<DrawRecord, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let draw: ApiDraw = response.json().await?;
        draw.into_record()
    }
}

#[async_trait]
impl HistorySource for CaixaClient {
    async fn latest(&self, game: &GameConfig) -> Result<DrawRecord, FetchError> {
        let url = self.build_url(game, None);
        self.fetch_draw(&url).await
    }

    async fn contest(&self, game: &GameConfig, contest: u32) -> Result<DrawRecord, FetchError> {
        let url = self.build_url(game, Some(contest));
        self.fetch_draw(&url).await
    }
}
