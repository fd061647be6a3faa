use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::epoch;

/// Outcome of one finished round, as kept for the best-game record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    correct: u32,
    total: u32,
    date: DateTime<Utc>,
}

impl GameRecord {
    #[must_use]
    pub fn new(correct: u32, total: u32, date: DateTime<Utc>) -> Self {
        Self {
            correct,
            total,
            date,
        }
    }

    /// The record reported before any round has been played.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0, 0, epoch())
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Strictly more correct answers. Equal scores are not better, so the
    /// earlier record keeps its place.
    #[must_use]
    pub fn is_better_than(&self, other: &GameRecord) -> bool {
        self.correct > other.correct
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn more_correct_is_better() {
        let a = GameRecord::new(7, 10, fixed_now());
        let b = GameRecord::new(6, 10, fixed_now());
        assert!(a.is_better_than(&b));
        assert!(!b.is_better_than(&a));
    }

    #[test]
    fn tie_is_not_better() {
        let a = GameRecord::new(5, 10, fixed_now());
        let b = GameRecord::new(5, 5, fixed_now());
        assert!(!a.is_better_than(&b));
        assert!(!b.is_better_than(&a));
    }

    #[test]
    fn zero_record_is_dated_at_epoch() {
        let zero = GameRecord::default();
        assert_eq!(zero.correct(), 0);
        assert_eq!(zero.total(), 0);
        assert_eq!(zero.date(), epoch());
    }

    #[test]
    fn json_keeps_all_fields() {
        let record = GameRecord::new(9, 10, fixed_now());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"correct\":9"));
        assert!(json.contains("\"total\":10"));
        let back: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
