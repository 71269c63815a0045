use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::LotteryError;
use crate::games::GameTable;
use crate::models::{FrequencyEntry, GameConfig, Suggestion, compare_numbers};

/// Seeded generator when a seed is given, OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// ceil(n * 0.7), in integers.
pub fn frequent_slice_size(numbers_count: usize) -> usize {
    (numbers_count * 7).div_ceil(10)
}

/// ceil(n * 0.3), in integers.
pub fn rare_slice_size(numbers_count: usize) -> usize {
    (numbers_count * 3).div_ceil(10)
}

pub fn suggest<R: Rng + ?Sized>(
    table: &GameTable,
    game_id: &str,
    freqs: &[FrequencyEntry],
    rng: &mut R,
) -> Result<Suggestion, LotteryError> {
    let game = table.find(game_id)?;
    suggest_for(game, freqs, rng)
}

/// Builds a bet from the head (most drawn) and tail (least drawn) of a
/// frequency table sorted by descending count.
pub fn suggest_for<R: Rng + ?Sized>(
    game: &GameConfig,
    freqs: &[FrequencyEntry],
    rng: &mut R,
) -> Result<Suggestion, LotteryError> {
    if freqs.is_empty() {
        return Err(LotteryError::NoFrequencies);
    }

    let n = game.numbers_count;
    let most_frequent = &freqs[..frequent_slice_size(n).min(freqs.len())];
    let less_frequent = &freqs[freqs.len() - rare_slice_size(n).min(freqs.len())..];

    // Head and tail overlap on short tables; keep the first occurrence.
    let mut seen = HashSet::new();
    let mut pool: Vec<&str> = most_frequent
        .iter()
        .chain(less_frequent)
        .map(|f| f.number.as_str())
        .filter(|number| seen.insert(*number))
        .collect();

    pool.shuffle(rng);

    if pool.len() < n {
        tracing::warn!(
            game = %game.id,
            pool = pool.len(),
            required = n,
            "candidate pool smaller than bet size, suggestion will be short"
        );
    }

    let mut numbers: Vec<String> = pool.into_iter().take(n).map(str::to_string).collect();
    numbers.sort_by(|a, b| compare_numbers(a, b));

    let confidence = (most_frequent.len() as f64 / n as f64 * 100.0).round() as u32;

    tracing::debug!(game = %game.id, ?numbers, confidence, "suggestion generated");

    Ok(Suggestion {
        numbers,
        confidence,
        game_name: game.name.clone(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: u32) -> Self {
        if confidence >= 70 {
            ConfidenceLevel::High
        } else if confidence >= 50 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "High"),
            ConfidenceLevel::Medium => write!(f, "Medium"),
            ConfidenceLevel::Low => write!(f, "Low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::number_value;

    fn freqs_desc(count: usize) -> Vec<FrequencyEntry> {
        (1..=count)
            .map(|i| FrequencyEntry::new(&format!("{:02}", i), (count - i + 1) as u32))
            .collect()
    }

    #[test]
    fn test_slice_sizes() {
        assert_eq!(frequent_slice_size(6), 5);
        assert_eq!(rare_slice_size(6), 2);
        assert_eq!(frequent_slice_size(5), 4);
        assert_eq!(rare_slice_size(5), 2);
        assert_eq!(frequent_slice_size(10), 7);
        assert_eq!(rare_slice_size(10), 3);
        assert_eq!(frequent_slice_size(15), 11);
        assert_eq!(rare_slice_size(15), 5);
    }

    #[test]
    fn test_megasena_six_entries() {
        let table = GameTable::builtin();
        let freqs = freqs_desc(6);
        let mut rng = rng_from_seed(Some(7));

        let suggestion = suggest(&table, "megasena", &freqs, &mut rng).unwrap();

        // Head (5) and tail (2) cover all six entries, whatever the shuffle.
        assert_eq!(suggestion.numbers, vec!["01", "02", "03", "04", "05", "06"]);
        assert_eq!(suggestion.confidence, 83);
        assert_eq!(suggestion.game_name, "Mega-Sena");
    }

    #[test]
    fn test_unknown_game() {
        let table = GameTable::builtin();
        let mut rng = rng_from_seed(Some(1));
        let err = suggest(&table, "euromillions", &freqs_desc(10), &mut rng).unwrap_err();
        assert_eq!(err, LotteryError::UnknownGame("euromillions".to_string()));
    }

    #[test]
    fn test_empty_frequencies() {
        let table = GameTable::builtin();
        let mut rng = rng_from_seed(Some(1));
        let err = suggest(&table, "quina", &[], &mut rng).unwrap_err();
        assert_eq!(err, LotteryError::NoFrequencies);
    }

    #[test]
    fn test_valid_bet_for_every_game() {
        let table = GameTable::builtin();
        let mut rng = rng_from_seed(None);

        for game in table.iter() {
            let freqs = freqs_desc(game.numbers_count + 12);
            for _ in 0..50 {
                let suggestion = suggest_for(game, &freqs, &mut rng).unwrap();
                let numbers = &suggestion.numbers;

                assert_eq!(numbers.len(), game.numbers_count, "{}", game.id);
                let distinct: HashSet<&String> = numbers.iter().collect();
                assert_eq!(distinct.len(), numbers.len(), "{}: {:?}", game.id, numbers);
                assert!(
                    numbers
                        .windows(2)
                        .all(|w| number_value(&w[0]) < number_value(&w[1])),
                    "{}: {:?}",
                    game.id,
                    numbers
                );
                assert!(numbers.iter().all(|n| freqs.iter().any(|f| &f.number == n)));
            }
        }
    }

    #[test]
    fn test_numbers_come_from_head_or_tail() {
        let game = GameConfig::new("megasena", "Mega-Sena", 6, 60);
        let freqs = freqs_desc(30);
        let head: Vec<&str> = freqs[..5].iter().map(|f| f.number.as_str()).collect();
        let tail: Vec<&str> = freqs[28..].iter().map(|f| f.number.as_str()).collect();
        let mut rng = rng_from_seed(None);

        for _ in 0..100 {
            let suggestion = suggest_for(&game, &freqs, &mut rng).unwrap();
            for n in &suggestion.numbers {
                assert!(head.contains(&n.as_str()) || tail.contains(&n.as_str()), "{n}");
            }
        }
    }

    #[test]
    fn test_not_constant_across_calls() {
        let game = GameConfig::new("megasena", "Mega-Sena", 6, 60);
        let freqs = freqs_desc(30);
        let mut rng = rng_from_seed(None);

        let results: HashSet<Vec<String>> = (0..100)
            .map(|_| suggest_for(&game, &freqs, &mut rng).unwrap().numbers)
            .collect();
        assert!(results.len() > 1);
    }

    #[test]
    fn test_seed_determinism() {
        let game = GameConfig::new("lotofacil", "Lotofácil", 15, 25);
        let freqs = freqs_desc(25);

        let s1 = suggest_for(&game, &freqs, &mut rng_from_seed(Some(123))).unwrap();
        let s2 = suggest_for(&game, &freqs, &mut rng_from_seed(Some(123))).unwrap();
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_short_table_gives_short_bet() {
        let game = GameConfig::new("megasena", "Mega-Sena", 6, 60);
        let freqs = freqs_desc(3);
        let mut rng = rng_from_seed(Some(5));

        let suggestion = suggest_for(&game, &freqs, &mut rng).unwrap();
        assert_eq!(suggestion.numbers, vec!["01", "02", "03"]);
        // Head slice is capped by the table length: round(3 / 6 * 100).
        assert_eq!(suggestion.confidence, 50);
    }

    #[test]
    fn test_overlapping_slices_are_deduplicated() {
        let game = GameConfig::new("quina", "Quina", 5, 80);
        let freqs = vec![
            FrequencyEntry::new("04", 3),
            FrequencyEntry::new("61", 2),
            FrequencyEntry::new("17", 1),
        ];
        let mut rng = rng_from_seed(Some(9));

        let suggestion = suggest_for(&game, &freqs, &mut rng).unwrap();
        assert_eq!(suggestion.numbers, vec!["04", "17", "61"]);
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(ConfidenceLevel::from_confidence(83), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(70), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(69), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_confidence(50), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_confidence(49), ConfidenceLevel::Low);
    }
}
