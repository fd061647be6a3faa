use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{GameRecord, RoundResult};

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum StatisticsError {
    #[error("invalid round result: {correct}/{total}")]
    InvalidRoundResult { correct: u32, total: u32 },

    #[error("no games have been played yet")]
    NoGamesPlayed,

    #[error("invalid persisted statistics: {0}")]
    InvalidPersistedState(String),
}

/// Lifetime statistics for the single local player.
///
/// `total_accuracy_sum` adds up each round's `correct / total` ratio, so the
/// average accuracy is that sum divided by `games_played`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSnapshot {
    games_played: u32,
    best_game: GameRecord,
    total_accuracy_sum: f64,
}

impl StatisticsSnapshot {
    /// Rehydrate statistics from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError::InvalidPersistedState` if the accuracy sum is
    /// negative, not finite, or larger than one full score per game.
    pub fn from_persisted(
        games_played: u32,
        best_game: GameRecord,
        total_accuracy_sum: f64,
    ) -> Result<Self, StatisticsError> {
        if !total_accuracy_sum.is_finite() || total_accuracy_sum < 0.0 {
            return Err(StatisticsError::InvalidPersistedState(format!(
                "accuracy sum {total_accuracy_sum}"
            )));
        }
        // each round adds at most 1.0; allow rounding slack
        if total_accuracy_sum > f64::from(games_played) + 1e-9 {
            return Err(StatisticsError::InvalidPersistedState(format!(
                "accuracy sum {total_accuracy_sum} exceeds {games_played} games"
            )));
        }
        Ok(Self {
            games_played,
            best_game,
            total_accuracy_sum,
        })
    }

    #[must_use]
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    #[must_use]
    pub fn best_game(&self) -> &GameRecord {
        &self.best_game
    }

    #[must_use]
    pub fn total_accuracy_sum(&self) -> f64 {
        self.total_accuracy_sum
    }

    /// Fold a finished round into the statistics. Returns `true` when the round
    /// became the new best game.
    ///
    /// All fields change together or not at all.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError::InvalidRoundResult` if `total` is zero or
    /// `correct` exceeds `total`.
    pub fn record_round(
        &mut self,
        result: RoundResult,
        played_at: DateTime<Utc>,
    ) -> Result<bool, StatisticsError> {
        let RoundResult { correct, total } = result;
        if total == 0 || correct > total {
            return Err(StatisticsError::InvalidRoundResult { correct, total });
        }
        let games_played = self.games_played.checked_add(1).ok_or_else(|| {
            StatisticsError::InvalidPersistedState("games played overflow".into())
        })?;

        let candidate = GameRecord::new(correct, total, played_at);
        let is_new_best = candidate.is_better_than(&self.best_game);

        self.games_played = games_played;
        if is_new_best {
            self.best_game = candidate;
        }
        self.total_accuracy_sum += f64::from(correct) / f64::from(total);
        Ok(is_new_best)
    }

    /// Mean per-round accuracy as a percentage.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError::NoGamesPlayed` when nothing has been recorded.
    pub fn average_accuracy_percent(&self) -> Result<f64, StatisticsError> {
        if self.games_played == 0 {
            return Err(StatisticsError::NoGamesPlayed);
        }
        Ok(self.total_accuracy_sum / f64::from(self.games_played) * 100.0)
    }
}

impl Default for StatisticsSnapshot {
    fn default() -> Self {
        Self {
            games_played: 0,
            best_game: GameRecord::zero(),
            total_accuracy_sum: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{epoch, fixed_now};
    use chrono::Duration;

    #[test]
    fn fresh_statistics_are_zero() {
        let stats = StatisticsSnapshot::default();
        assert_eq!(stats.games_played(), 0);
        assert_eq!(stats.best_game().correct(), 0);
        assert_eq!(stats.best_game().total(), 0);
        assert_eq!(stats.best_game().date(), epoch());
        assert_eq!(
            stats.average_accuracy_percent(),
            Err(StatisticsError::NoGamesPlayed)
        );
    }

    #[test]
    fn ten_then_five_averages_seventy_five() {
        let mut stats = StatisticsSnapshot::default();
        assert!(stats.record_round(RoundResult::new(10, 10), fixed_now()).unwrap());
        assert!(!stats.record_round(RoundResult::new(5, 10), fixed_now()).unwrap());

        assert_eq!(stats.best_game().correct(), 10);
        assert_eq!(stats.games_played(), 2);
        let avg = stats.average_accuracy_percent().unwrap();
        assert!((avg - 75.0).abs() < 1e-9);
    }

    #[test]
    fn accuracy_sum_accumulates_ratios() {
        let rounds = [(3, 4), (1, 3), (0, 10), (7, 7), (2, 5)];
        let mut stats = StatisticsSnapshot::default();
        let mut expected = 0.0;
        for (k, (correct, total)) in rounds.into_iter().enumerate() {
            stats
                .record_round(RoundResult::new(correct, total), fixed_now())
                .unwrap();
            expected += f64::from(correct) / f64::from(total);
            assert_eq!(stats.games_played() as usize, k + 1);
            assert!((stats.total_accuracy_sum() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn tie_keeps_first_best_game() {
        let first = fixed_now();
        let later = first + Duration::hours(1);
        let mut stats = StatisticsSnapshot::default();
        stats.record_round(RoundResult::new(6, 10), first).unwrap();
        let replaced = stats.record_round(RoundResult::new(6, 10), later).unwrap();

        assert!(!replaced);
        assert_eq!(stats.best_game().date(), first);
    }

    #[test]
    fn zero_score_round_does_not_replace_default_best() {
        let mut stats = StatisticsSnapshot::default();
        stats.record_round(RoundResult::new(0, 10), fixed_now()).unwrap();
        assert_eq!(stats.best_game(), &GameRecord::zero());
        assert_eq!(stats.games_played(), 1);
        assert_eq!(stats.average_accuracy_percent().unwrap(), 0.0);
    }

    #[test]
    fn invalid_round_leaves_statistics_untouched() {
        let mut stats = StatisticsSnapshot::default();
        stats.record_round(RoundResult::new(4, 5), fixed_now()).unwrap();
        let before = stats.clone();

        assert_eq!(
            stats.record_round(RoundResult::new(0, 0), fixed_now()),
            Err(StatisticsError::InvalidRoundResult {
                correct: 0,
                total: 0
            })
        );
        assert!(matches!(
            stats.record_round(RoundResult::new(6, 5), fixed_now()),
            Err(StatisticsError::InvalidRoundResult { .. })
        ));
        assert_eq!(stats, before);
    }

    #[test]
    fn persisted_state_is_validated() {
        assert!(StatisticsSnapshot::from_persisted(2, GameRecord::zero(), 1.5).is_ok());
        assert!(StatisticsSnapshot::from_persisted(1, GameRecord::zero(), -0.1).is_err());
        assert!(StatisticsSnapshot::from_persisted(1, GameRecord::zero(), 2.0).is_err());
        assert!(StatisticsSnapshot::from_persisted(1, GameRecord::zero(), f64::NAN).is_err());
    }
}
