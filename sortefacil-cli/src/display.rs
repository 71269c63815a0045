use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use sortefacil_core::sampler::ConfidenceLevel;
use sortefacil_core::stats::{FrequencyExtremes, FrequencyTag, classify};
use sortefacil_core::{DrawRecord, FrequencyEntry, GameConfig, GameTable, Suggestion};

const DATE_FORMAT: &str = "%d/%m/%Y";

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn tag_color(tag: FrequencyTag) -> Color {
    match tag {
        FrequencyTag::Frequent => Color::Green,
        FrequencyTag::Rare => Color::Red,
        FrequencyTag::Normal => Color::White,
    }
}

fn join_numbers<'a>(numbers: impl IntoIterator<Item = &'a String>) -> String {
    numbers
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn format_prize(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("R$ {:.2}", v),
        _ => "—".to_string(),
    }
}

pub fn display_games(table: &GameTable) {
    let mut out = new_table(vec!["Id", "Game", "Numbers per bet", "Max number"]);
    for game in table.iter() {
        out.add_row(vec![
            game.id.clone(),
            game.name.clone(),
            game.numbers_count.to_string(),
            game.max_number.to_string(),
        ]);
    }
    println!("{out}");
}

pub fn display_no_results(game: &GameConfig) {
    println!("No results: could not load draws for {}.", game.name);
}

/// Number with its tag mark: `*` for the most drawn, `°` for the least drawn.
fn mark_number(number: &str, freqs: &[FrequencyEntry]) -> String {
    match classify(number, freqs) {
        FrequencyTag::Frequent => format!("{number}*"),
        FrequencyTag::Rare => format!("{number}°"),
        FrequencyTag::Normal => number.to_string(),
    }
}

/// Numbers of a draw carrying `tag`, as a coloured cell.
fn tagged_cell(numbers: &[String], freqs: &[FrequencyEntry], tag: FrequencyTag) -> Cell {
    let tagged = numbers
        .iter()
        .filter(|n| classify(n, freqs) == tag)
        .map(String::as_str)
        .collect::<Vec<_>>();
    if tagged.is_empty() {
        Cell::new("—")
    } else {
        Cell::new(tagged.join(" ")).fg(tag_color(tag))
    }
}

fn accumulated_label(record: &DrawRecord) -> String {
    match (record.accumulated, record.next_accumulated_prize) {
        (Some(true), Some(v)) if v > 0.0 => format!("yes ({})", format_prize(Some(v))),
        (Some(true), _) => "yes".to_string(),
        (Some(false), _) => "no".to_string(),
        (None, _) => "—".to_string(),
    }
}

pub fn display_history(game: &GameConfig, records: &[DrawRecord], freqs: &[FrequencyEntry]) {
    println!("\nLatest {} draws - {}\n", records.len(), game.name);

    let mut table = new_table(vec![
        "Contest",
        "Date",
        "Numbers",
        "Hot",
        "Cold",
        "Accumulated",
        "Next prize (est.)",
        "Special prize",
    ]);

    for record in records {
        let numbers = record
            .numbers
            .iter()
            .map(|n| mark_number(n, freqs))
            .collect::<Vec<_>>()
            .join(" ");

        table.add_row(vec![
            Cell::new(record.contest),
            Cell::new(record.date.format(DATE_FORMAT)),
            Cell::new(numbers),
            tagged_cell(&record.numbers, freqs, FrequencyTag::Frequent),
            tagged_cell(&record.numbers, freqs, FrequencyTag::Rare),
            Cell::new(accumulated_label(record)),
            Cell::new(format_prize(record.next_estimated_prize)),
            Cell::new(format_prize(record.special_accumulated_prize)),
        ]);
    }
    println!("{table}");
    println!("(* most drawn, ° least drawn in this window)");
}

pub fn display_frequencies(freqs: &[FrequencyEntry], draws: usize) {
    println!("\nFrequencies over the last {} draws\n", draws);

    let mut table = new_table(vec!["Number", "Times drawn", "Tag"]);
    for entry in freqs {
        let tag = classify(&entry.number, freqs);
        table.add_row(vec![
            Cell::new(&entry.number),
            Cell::new(entry.count),
            Cell::new(tag.to_string()).fg(tag_color(tag)),
        ]);
    }
    println!("{table}");
}

pub fn display_extremes(ext: &FrequencyExtremes) {
    let list = |entries: &[FrequencyEntry]| {
        entries
            .iter()
            .take(10)
            .map(|e| format!("{} ({}x)", e.number, e.count))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("\n── Most drawn ({}) ──", ext.most_frequent.len());
    println!("{}", list(&ext.most_frequent));
    println!("Drawn {} time(s) in the window", ext.max_count);

    println!("\n── Least drawn ({}) ──", ext.least_frequent.len());
    println!("{}", list(&ext.least_frequent));
}

pub fn display_suggestion(suggestion: &Suggestion) {
    let level = ConfidenceLevel::from_confidence(suggestion.confidence);
    let color = match level {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Red,
    };

    println!("\n🎲 Suggested bet - {}\n", suggestion.game_name);

    let mut table = new_table(vec!["Numbers", "Confidence"]);
    table.add_row(vec![
        Cell::new(join_numbers(&suggestion.numbers)),
        Cell::new(format!("{} ({}%)", level, suggestion.confidence)).fg(color),
    ]);
    println!("{table}");
    println!("SIMULATION ONLY. Based on recent draw frequencies, guarantees nothing.");
}

pub fn display_suggestions(suggestions: &[Suggestion]) {
    let Some(first) = suggestions.first() else {
        return;
    };
    if suggestions.len() == 1 {
        display_suggestion(first);
        return;
    }

    println!("\n🎲 Suggested bets - {}\n", first.game_name);

    let mut table = new_table(vec!["#", "Numbers", "Confidence"]);
    for (i, suggestion) in suggestions.iter().enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            join_numbers(&suggestion.numbers),
            format!("{}%", suggestion.confidence),
        ]);
    }
    println!("{table}");
    println!("SIMULATION ONLY. Based on recent draw frequencies, guarantees nothing.");
}
