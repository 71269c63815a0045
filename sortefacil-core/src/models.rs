use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LotteryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub id: String,
    pub name: String,
    pub numbers_count: usize,
    pub max_number: u32,
    /// Numbers per official draw when it differs from the bet size (Timemania draws 7, bets 10).
    #[serde(default)]
    pub drawn_count: Option<usize>,
    /// Endpoint segment on the results API. Falls back to `id` when empty.
    #[serde(default)]
    pub api_path: String,
}

impl GameConfig {
    pub fn new(id: &str, name: &str, numbers_count: usize, max_number: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            numbers_count,
            max_number,
            drawn_count: None,
            api_path: id.to_string(),
        }
    }

    pub fn with_drawn_count(mut self, drawn_count: usize) -> Self {
        self.drawn_count = Some(drawn_count);
        self
    }

    pub fn drawn_count(&self) -> usize {
        self.drawn_count.unwrap_or(self.numbers_count)
    }

    pub fn api_path(&self) -> &str {
        if self.api_path.is_empty() {
            &self.id
        } else {
            &self.api_path
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub contest: u32,
    pub date: NaiveDate,
    pub numbers: Vec<String>,
    pub accumulated: Option<bool>,
    pub next_accumulated_prize: Option<f64>,
    pub special_accumulated_prize: Option<f64>,
    pub next_estimated_prize: Option<f64>,
}

impl DrawRecord {
    pub fn new(contest: u32, date: NaiveDate, numbers: Vec<String>) -> Self {
        Self {
            contest,
            date,
            numbers,
            accumulated: None,
            next_accumulated_prize: None,
            special_accumulated_prize: None,
            next_estimated_prize: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub number: String,
    pub count: u32,
}

impl FrequencyEntry {
    pub fn new(number: &str, count: u32) -> Self {
        Self {
            number: number.to_string(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub numbers: Vec<String>,
    pub confidence: u32,
    pub game_name: String,
}

/// Integer value of a drawn number ("07" -> 7).
pub fn number_value(number: &str) -> Option<u32> {
    number.trim().parse::<u32>().ok()
}

/// Numeric order first, lexical order for non-numeric strings and ties ("7" vs "07").
pub fn compare_numbers(a: &str, b: &str) -> Ordering {
    match (number_value(a), number_value(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

pub fn validate_record(game: &GameConfig, record: &DrawRecord) -> Result<(), LotteryError> {
    let invalid = |reason: String| LotteryError::InvalidDraw {
        game: game.id.clone(),
        contest: record.contest,
        reason,
    };

    if record.numbers.len() != game.drawn_count() {
        return Err(invalid(format!(
            "expected {} numbers, got {}",
            game.drawn_count(),
            record.numbers.len()
        )));
    }
    for number in &record.numbers {
        match number_value(number) {
            Some(n) if n <= game.max_number => {}
            Some(n) => {
                return Err(invalid(format!(
                    "number {} out of range (0-{})",
                    n, game.max_number
                )));
            }
            None => return Err(invalid(format!("'{}' is not a number", number))),
        }
    }
    Ok(())
}
