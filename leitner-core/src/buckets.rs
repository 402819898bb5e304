//! The two bucket representations and the conversions between them.
//!
//! [`BucketMap`] is the sparse form: bucket number to card set, where a
//! missing bucket means "no cards". [`BucketSets`] is the dense form: one set
//! per index from 0 up to the highest occupied bucket. Emptied buckets may
//! linger in a `BucketMap` as empty entries; every query here treats them the
//! same as missing keys.
//!
//! A card must sit in at most one bucket of a given assignment. [`BucketMap::place`]
//! enforces that; a map deserialized from elsewhere that breaks it is outside
//! what the scheduler promises to handle.

use crate::{CardId, CardSet, CoreError, Flashcard};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse bucket assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketMap {
    buckets: BTreeMap<usize, CardSet>,
}

impl BucketMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every card starts out in bucket 0.
    pub fn starting(cards: impl IntoIterator<Item = Flashcard>) -> Self {
        let mut map = Self::new();
        let first: CardSet = cards.into_iter().collect();
        map.buckets.insert(0, first);
        map
    }

    /// Adds `card` to `bucket`, refusing cards that already have a bucket.
    pub fn place(&mut self, bucket: usize, card: Flashcard) -> Result<(), CoreError> {
        if self.bucket_of(&card).is_some() {
            return Err(CoreError::Conflict("card already assigned to a bucket"));
        }
        self.insert_into(bucket, card);
        Ok(())
    }

    pub fn bucket_of(&self, card: &Flashcard) -> Option<usize> {
        self.buckets
            .iter()
            .find(|(_, cards)| cards.contains(card))
            .map(|(bucket, _)| *bucket)
    }

    pub fn find(&self, id: CardId) -> Option<&Flashcard> {
        self.buckets
            .values()
            .flat_map(|cards| cards.iter())
            .find(|c| c.id() == id)
    }

    pub fn get(&self, bucket: usize) -> Option<&CardSet> {
        self.buckets.get(&bucket)
    }

    /// Number of distinct bucket keys, empty entries included.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Highest bucket key present, whether or not it still holds cards.
    pub fn max_bucket(&self) -> Option<usize> {
        self.buckets.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_cards(&self) -> usize {
        self.buckets.values().map(|cards| cards.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &CardSet)> {
        self.buckets.iter().map(|(bucket, cards)| (*bucket, cards))
    }

    /// Copy of this map with the empty entries dropped.
    pub fn without_empty(&self) -> BucketMap {
        BucketMap {
            buckets: self
                .buckets
                .iter()
                .filter(|(_, cards)| !cards.is_empty())
                .map(|(bucket, cards)| (*bucket, cards.clone()))
                .collect(),
        }
    }

    pub(crate) fn remove_from(&mut self, bucket: usize, card: &Flashcard) -> bool {
        self.buckets
            .get_mut(&bucket)
            .map(|cards| cards.remove(card))
            .unwrap_or(false)
    }

    pub(crate) fn insert_into(&mut self, bucket: usize, card: Flashcard) {
        self.buckets.entry(bucket).or_default().insert(card);
    }
}

/// Dense bucket assignment: index `i` holds the cards of bucket `i`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketSets {
    sets: Vec<CardSet>,
}

impl BucketSets {
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, bucket: usize) -> Option<&CardSet> {
        self.sets.get(bucket)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &CardSet)> {
        self.sets.iter().enumerate()
    }

    /// Rebuilds the sparse form from the non-empty indices.
    pub fn to_bucket_map(&self) -> BucketMap {
        let mut map = BucketMap::new();
        for (bucket, cards) in self.iter().filter(|(_, cards)| !cards.is_empty()) {
            map.buckets.insert(bucket, cards.clone());
        }
        map
    }
}

impl From<Vec<CardSet>> for BucketSets {
    fn from(sets: Vec<CardSet>) -> Self {
        Self { sets }
    }
}

/// Moves each set into its slot without copying any card.
impl From<BucketMap> for BucketSets {
    fn from(map: BucketMap) -> Self {
        let len = dense_len(&map);
        let mut sets: Vec<CardSet> = (0..len).map(|_| CardSet::new()).collect();
        for (bucket, cards) in map.buckets {
            sets[bucket] = cards;
        }
        Self { sets }
    }
}

fn dense_len(map: &BucketMap) -> usize {
    map.max_bucket().unwrap_or(0) + 1
}

/// Dense copy of `map`. The result always has at least one slot.
pub fn to_bucket_sets(map: &BucketMap) -> BucketSets {
    BucketSets::from(map.clone())
}

/// Inclusive range of non-empty buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRange {
    pub min_bucket: usize,
    pub max_bucket: usize,
}

pub fn bucket_range(sets: &BucketSets) -> Option<BucketRange> {
    let mut occupied = sets
        .iter()
        .filter(|(_, cards)| !cards.is_empty())
        .map(|(bucket, _)| bucket);
    let min_bucket = occupied.next()?;
    let max_bucket = occupied.last().unwrap_or(min_bucket);
    Some(BucketRange {
        min_bucket,
        max_bucket,
    })
}
