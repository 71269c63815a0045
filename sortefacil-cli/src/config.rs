use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sortefacil_core::{GameConfig, GameTable};
use sortefacil_fetch::FetchConfig;

pub const API_URL_ENV: &str = "SORTEFACIL_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    /// Replaces the built-in game table when non-empty
    pub games: Vec<GameConfig>,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Cannot read config file {:?}", path))?;
                Self::from_json(&json)
                    .with_context(|| format!("Invalid config file {:?}", path))?
            }
            None => Self::default(),
        };
        config.override_api_url(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn override_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            tracing::info!("API base URL overridden: {}", url);
            self.fetch.base_url = url;
        }
    }

    pub fn game_table(&self) -> Result<GameTable> {
        if self.games.is_empty() {
            return Ok(GameTable::builtin());
        }
        let table = GameTable::from_games(self.games.clone())?;
        Ok(table)
    }
}
