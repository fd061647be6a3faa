use std::collections::HashMap;

use quiz_core::model::{GameRecord, StatisticsSnapshot};
use tracing::warn;

use crate::repository::StorageError;

/// Fixed key names in the `statistics` table.
pub mod keys {
    /// Number of rounds played (integer).
    pub const GAMES_COUNT: &str = "gamesCount";
    /// Best round as JSON: `correct`, `total`, `date`.
    pub const BEST_GAME: &str = "bestGame";
    /// Running sum of per-round accuracy ratios (real).
    pub const ACCURACY_SUM: &str = "total";
    /// Reserved; never written.
    pub const CORRECT: &str = "correct";
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn parse_games_count(raw: Option<&str>) -> Result<u32, StorageError> {
    match raw {
        None => Ok(0),
        Some(v) => v
            .trim()
            .parse::<u32>()
            .map_err(|_| StorageError::Serialization(format!("invalid {}: {v}", keys::GAMES_COUNT))),
    }
}

fn parse_accuracy_sum(raw: Option<&str>) -> Result<f64, StorageError> {
    match raw {
        None => Ok(0.0),
        Some(v) => v.trim().parse::<f64>().map_err(|_| {
            StorageError::Serialization(format!("invalid {}: {v}", keys::ACCURACY_SUM))
        }),
    }
}

/// Decodes the stored best game, falling back to the zero record.
///
/// A corrupt best game must not block new rounds.
pub(crate) fn decode_best_game(raw: Option<&str>) -> GameRecord {
    let Some(raw) = raw else {
        return GameRecord::zero();
    };
    match serde_json::from_str::<GameRecord>(raw) {
        Ok(record) => record,
        Err(err) => {
            warn!(error = %err, "stored best game is unreadable, using zero record");
            GameRecord::zero()
        }
    }
}

pub(crate) fn encode_best_game(record: &GameRecord) -> Result<String, StorageError> {
    serde_json::to_string(record).map_err(ser)
}

/// Rebuilds statistics from `key -> value` rows. Missing keys load as zero.
pub(crate) fn snapshot_from_rows(
    rows: &HashMap<String, String>,
) -> Result<StatisticsSnapshot, StorageError> {
    let games_played = parse_games_count(rows.get(keys::GAMES_COUNT).map(String::as_str))?;
    let accuracy_sum = parse_accuracy_sum(rows.get(keys::ACCURACY_SUM).map(String::as_str))?;
    let best_game = decode_best_game(rows.get(keys::BEST_GAME).map(String::as_str));

    StatisticsSnapshot::from_persisted(games_played, best_game, accuracy_sum).map_err(ser)
}

/// Flattens statistics into the rows written by a save.
pub(crate) fn rows_from_snapshot(
    stats: &StatisticsSnapshot,
) -> Result<Vec<(&'static str, String)>, StorageError> {
    Ok(vec![
        (keys::GAMES_COUNT, stats.games_played().to_string()),
        (keys::BEST_GAME, encode_best_game(stats.best_game())?),
        // `Display` for f64 prints the shortest text that parses back exactly
        (keys::ACCURACY_SUM, stats.total_accuracy_sum().to_string()),
    ])
}
