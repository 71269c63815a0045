use std::collections::HashSet;

use crate::error::LotteryError;
use crate::models::GameConfig;

/// Supported lottery variants, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct GameTable {
    games: Vec<GameConfig>,
}

impl GameTable {
    pub fn builtin() -> Self {
        Self {
            games: vec![
                GameConfig::new("megasena", "Mega-Sena", 6, 60),
                GameConfig::new("quina", "Quina", 5, 80),
                GameConfig::new("lotofacil", "Lotofácil", 15, 25),
                GameConfig::new("lotomania", "Lotomania", 20, 100),
                GameConfig::new("duplasena", "Dupla Sena", 6, 50),
                GameConfig::new("diadesorte", "Dia de Sorte", 7, 31),
                GameConfig::new("timemania", "Timemania", 10, 80).with_drawn_count(7),
                GameConfig::new("federal", "Federal", 5, 99999),
                GameConfig::new("loteca", "Loteca", 14, 3),
                GameConfig::new("supersete", "Super Sete", 7, 10),
            ],
        }
    }

    pub fn from_games(games: Vec<GameConfig>) -> Result<Self, LotteryError> {
        if games.is_empty() {
            return Err(LotteryError::InvalidGameTable("no games configured".to_string()));
        }
        let mut seen = HashSet::new();
        for game in &games {
            if !seen.insert(game.id.as_str()) {
                return Err(LotteryError::InvalidGameTable(format!(
                    "duplicate game id '{}'",
                    game.id
                )));
            }
            if game.numbers_count == 0 {
                return Err(LotteryError::InvalidGameTable(format!(
                    "game '{}' has numbers_count = 0",
                    game.id
                )));
            }
        }
        Ok(Self { games })
    }

    pub fn find(&self, id: &str) -> Result<&GameConfig, LotteryError> {
        self.games
            .iter()
            .find(|g| g.id == id)
            .ok_or_else(|| LotteryError::UnknownGame(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameConfig> {
        self.games.iter()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for GameTable {
    fn default() -> Self {
        Self::builtin()
    }
}
