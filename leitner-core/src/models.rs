use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

pub type CardId = Uuid;

/// Cards sharing one bucket.
pub type CardSet = HashSet<Flashcard>;

/// Self-rated recall outcome of one practice trial.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Wrong,
    Hard,
    Easy,
}

impl Difficulty {
    /// Number of buckets a card climbs after answering with this difficulty.
    /// `Wrong` never promotes; it sends the card back to bucket 0 instead.
    pub fn promotion(&self) -> usize {
        match self {
            Difficulty::Wrong => 0,
            Difficulty::Hard => 1,
            Difficulty::Easy => 2,
        }
    }

    pub fn is_wrong(&self) -> bool {
        matches!(self, Difficulty::Wrong)
    }
}

/// A flashcard. Equality and hashing go through the card id only, so two
/// cards with identical text are still different cards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Flashcard {
    id: CardId,
    pub front: String,
    pub back: String,
    pub hint: String,
    pub tags: Vec<String>,
}

impl Flashcard {
    pub fn new(
        front: impl Into<String>,
        back: impl Into<String>,
        hint: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            front: front.into(),
            back: back.into(),
            hint: hint.into(),
            tags,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }
}

impl PartialEq for Flashcard {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Flashcard {}

impl Hash for Flashcard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Formats the hint shown for the front of a card.
pub fn get_hint(card: &Flashcard) -> String {
    format!("Hint: {}", card.hint)
}

/// One practice trial, as recorded by whoever drives the review loop.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerRecord {
    pub card_id: CardId,
    pub day: u32,
    pub difficulty: Difficulty,
}

impl AnswerRecord {
    pub fn new(card: &Flashcard, day: u32, difficulty: Difficulty) -> Self {
        Self {
            card_id: card.id(),
            day,
            difficulty,
        }
    }
}
