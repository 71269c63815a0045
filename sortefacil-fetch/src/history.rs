use futures::future::join_all;
use sortefacil_core::models::validate_record;
use sortefacil_core::{DrawRecord, GameConfig};

use crate::client::{FetchConfig, HistorySource};

/// Most draws returned by [`fetch_history`], whatever the configured depth.
pub const MAX_HISTORY_DEPTH: u32 = 10;

/// Latest draw followed by up to `history_depth - 1` preceding contests,
/// `history_depth` being clamped to `1..=MAX_HISTORY_DEPTH`.
///
/// Previous contests are requested concurrently and every request is awaited;
/// failures, empty draws and (when enabled) malformed draws are skipped.
/// Returns an empty vector when the latest draw cannot be retrieved, since
/// its contest number anchors the rest.
pub async fn fetch_history<S>(source: &S, game: &GameConfig, config: &FetchConfig) -> Vec<DrawRecord>
where
    S: HistorySource + ?Sized,
{
    let latest = match source.latest(game).await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(game = %game.id, "latest draw unavailable: {}", e);
            return Vec::new();
        }
    };

    let depth = config.history_depth.clamp(1, MAX_HISTORY_DEPTH);
    let previous: Vec<u32> = (1..depth)
        .filter_map(|i| latest.contest.checked_sub(i))
        .filter(|&n| n > 0)
        .collect();

    tracing::info!(
        game = %game.id,
        latest = latest.contest,
        requested = previous.len(),
        "fetching previous draws"
    );

    let results = join_all(previous.iter().map(|&n| source.contest(game, n))).await;

    let mut records = Vec::with_capacity(results.len() + 1);
    if accept(game, &latest, config) {
        records.push(latest);
    }
    for (contest, result) in previous.iter().zip(results) {
        match result {
            Ok(record) if accept(game, &record, config) => records.push(record),
            Ok(_) => {}
            Err(e) => tracing::warn!(game = %game.id, contest, "draw skipped: {}", e),
        }
    }

    tracing::info!(game = %game.id, draws = records.len(), "history loaded");
    records
}

fn accept(game: &GameConfig, record: &DrawRecord, config: &FetchConfig) -> bool {
    if record.numbers.is_empty() {
        tracing::warn!(game = %game.id, contest = record.contest, "draw has no numbers");
        return false;
    }
    if config.validate_records {
        if let Err(e) = validate_record(game, record) {
            tracing::warn!("{}", e);
            return false;
        }
    }
    true
}
