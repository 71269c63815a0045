use std::collections::HashMap;

use crate::models::{DrawRecord, FrequencyEntry, compare_numbers};

/// Counts every drawn number across `records`, most frequent first.
/// Equal counts are ordered by ascending number.
pub fn tally(records: &[DrawRecord]) -> Vec<FrequencyEntry> {
    let mut counts: HashMap<&str, u32> = HashMap::new();

    for record in records {
        for number in &record.numbers {
            *counts.entry(number.as_str()).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<FrequencyEntry> = counts
        .into_iter()
        .map(|(number, count)| FrequencyEntry::new(number, count))
        .collect();
    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| compare_numbers(&a.number, &b.number))
    });
    entries
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyExtremes {
    pub max_count: u32,
    pub min_count: u32,
    pub most_frequent: Vec<FrequencyEntry>,
    pub least_frequent: Vec<FrequencyEntry>,
}

pub fn extremes(freqs: &[FrequencyEntry]) -> Option<FrequencyExtremes> {
    let max_count = freqs.iter().map(|f| f.count).max()?;
    let min_count = freqs.iter().map(|f| f.count).min()?;

    let pick = |count: u32| -> Vec<FrequencyEntry> {
        let mut picked: Vec<FrequencyEntry> =
            freqs.iter().filter(|f| f.count == count).cloned().collect();
        picked.sort_by(|a, b| compare_numbers(&a.number, &b.number));
        picked
    };

    Some(FrequencyExtremes {
        max_count,
        min_count,
        most_frequent: pick(max_count),
        least_frequent: pick(min_count),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyTag {
    Frequent,
    Rare,
    Normal,
}

impl std::fmt::Display for FrequencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrequencyTag::Frequent => write!(f, "HOT"),
            FrequencyTag::Rare => write!(f, "COLD"),
            FrequencyTag::Normal => write!(f, "-"),
        }
    }
}

/// Tags a number against the table. A flat table (every count equal) tags nothing.
pub fn classify(number: &str, freqs: &[FrequencyEntry]) -> FrequencyTag {
    let Some(ext) = extremes(freqs) else {
        return FrequencyTag::Normal;
    };
    if ext.max_count == ext.min_count {
        return FrequencyTag::Normal;
    }

    let count = freqs
        .iter()
        .find(|f| f.number == number)
        .map(|f| f.count)
        .unwrap_or(0);

    if count == ext.max_count {
        FrequencyTag::Frequent
    } else if count == ext.min_count {
        FrequencyTag::Rare
    } else {
        FrequencyTag::Normal
    }
}
