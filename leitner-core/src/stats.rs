use crate::{AnswerRecord, BucketMap, Difficulty};
use serde::{Deserialize, Serialize};

/// Trial counts per difficulty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total: u32,
    pub wrong: u32,
    pub hard: u32,
    pub easy: u32,
}

impl Totals {
    pub fn record(&mut self, d: Difficulty) {
        self.total += 1;
        match d {
            Difficulty::Wrong => self.wrong += 1,
            Difficulty::Hard => self.hard += 1,
            Difficulty::Easy => self.easy += 1,
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.hard + self.easy) as f64 / self.total as f64
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub total_cards: usize,
    /// Cards in the highest bucket key of the map.
    pub learned_cards: usize,
    pub progress_percent: f64,
    /// Built from the answer history only; the bucket figures above never
    /// look at it.
    pub trials: Totals,
}

pub fn compute_progress(map: &BucketMap, history: &[AnswerRecord]) -> Progress {
    let total_cards = map.total_cards();
    let learned_cards = map
        .max_bucket()
        .and_then(|bucket| map.get(bucket))
        .map(|cards| cards.len())
        .unwrap_or(0);
    let progress_percent = if total_cards > 0 {
        learned_cards as f64 / total_cards as f64 * 100.0
    } else {
        0.0
    };

    let mut trials = Totals::default();
    for r in history {
        trials.record(r.difficulty);
    }

    Progress {
        total_cards,
        learned_cards,
        progress_percent,
        trials,
    }
}
