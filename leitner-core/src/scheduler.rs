use crate::{BucketMap, BucketSets, CardSet, Difficulty, Flashcard};
use tracing::{debug, trace};

/// Whether bucket `bucket` comes up for review on `day`. Bucket 0 is due
/// every day, bucket `k` every `k + 1` days.
pub fn is_due(bucket: usize, day: u32) -> bool {
    (day as usize) % (bucket + 1) == 0
}

/// Cards to practice on `day`, gathered into a fresh set.
pub fn practice(sets: &BucketSets, day: u32) -> CardSet {
    let mut due = CardSet::new();
    for (bucket, cards) in sets.iter() {
        if is_due(bucket, day) {
            due.extend(cards.iter().cloned());
        }
    }
    trace!(day, due = due.len(), "selected practice set");
    due
}

/// Bucket a card in `current` moves to, given how many bucket keys the map
/// had before the move. Promotion never goes past the last existing slot.
pub fn next_bucket(current: usize, difficulty: Difficulty, bucket_count: usize) -> usize {
    if difficulty.is_wrong() {
        return 0;
    }
    let ceiling = bucket_count.saturating_sub(1);
    current.saturating_add(difficulty.promotion()).min(ceiling)
}

/// Moves `card` after a practice trial. Mutates `map` and hands it back.
///
/// A card that is not in any bucket is ignored. The bucket it leaves stays
/// in the map as an empty entry.
pub fn update<'a>(
    map: &'a mut BucketMap,
    card: &Flashcard,
    difficulty: Difficulty,
) -> &'a mut BucketMap {
    let Some(current) = map.bucket_of(card) else {
        debug!(card = %card.id(), "card not in any bucket, ignoring");
        return map;
    };

    let target = next_bucket(current, difficulty, map.bucket_count());
    map.remove_from(current, card);
    map.insert_into(target, card.clone());
    debug!(card = %card.id(), ?difficulty, from = current, to = target, "moved card");
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_bucket_sets;

    fn card(front: &str) -> Flashcard {
        Flashcard::new(front, "back", "hint", vec![])
    }

    #[test]
    fn due_follows_bucket_period() {
        assert!(is_due(0, 0));
        assert!(is_due(0, 7));
        assert!(is_due(2, 6));
        assert!(!is_due(2, 4));
        assert!(is_due(5, 0));
    }

    #[test]
    fn practice_on_day_two() {
        let (a, b) = (card("a"), card("b"));
        let mut map = BucketMap::new();
        map.place(0, a.clone()).unwrap();
        map.place(2, b.clone()).unwrap();

        let due = practice(&to_bucket_sets(&map), 2);
        assert_eq!(due.len(), 1);
        assert!(due.contains(&a));

        let due = practice(&to_bucket_sets(&map), 3);
        assert_eq!(due.len(), 2);
    }

    #[test]
    fn easy_moves_up_two_within_existing_slots() {
        let (a, b, c) = (card("a"), card("b"), card("c"));
        let mut map = BucketMap::new();
        map.place(0, a.clone()).unwrap();
        map.place(1, b).unwrap();
        map.place(2, c).unwrap();
        map.place(3, card("d")).unwrap();

        update(&mut map, &a, Difficulty::Easy);
        assert_eq!(map.bucket_of(&a), Some(2));
        assert!(map.get(0).unwrap().is_empty());
    }

    #[test]
    fn hard_moves_up_one() {
        let a = card("a");
        let mut map = BucketMap::new();
        map.place(0, a.clone()).unwrap();
        map.place(1, card("b")).unwrap();
        map.place(4, card("c")).unwrap();

        update(&mut map, &a, Difficulty::Hard);
        assert_eq!(map.bucket_of(&a), Some(1));
    }

    #[test]
    fn wrong_resets_to_zero() {
        let a = card("a");
        let mut map = BucketMap::new();
        map.place(0, card("b")).unwrap();
        map.place(3, a.clone()).unwrap();

        update(&mut map, &a, Difficulty::Wrong);
        assert_eq!(map.bucket_of(&a), Some(0));
        assert_eq!(map.get(0).unwrap().len(), 2);
    }

    #[test]
    fn single_bucket_caps_promotion() {
        let c = card("c");
        let mut map = BucketMap::starting([c.clone()]);
        update(&mut map, &c, Difficulty::Easy);
        assert_eq!(map.bucket_of(&c), Some(0));
        assert_eq!(map.bucket_count(), 1);
    }

    #[test]
    fn cap_uses_key_count_not_bucket_number() {
        // two keys, so the ceiling is bucket 1 even though the card sits in 5
        let c = card("c");
        let mut map = BucketMap::new();
        map.place(0, card("a")).unwrap();
        map.place(5, c.clone()).unwrap();

        update(&mut map, &c, Difficulty::Hard);
        assert_eq!(map.bucket_of(&c), Some(1));
        assert!(map.get(5).unwrap().is_empty());
    }

    #[test]
    fn promotion_from_the_highest_bucket_number() {
        let c = card("c");
        let mut map = BucketMap::new();
        map.place(0, card("a")).unwrap();
        map.place(usize::MAX, c.clone()).unwrap();

        update(&mut map, &c, Difficulty::Easy);
        assert_eq!(map.bucket_of(&c), Some(1));
        assert_eq!(next_bucket(usize::MAX, Difficulty::Hard, usize::MAX), usize::MAX - 1);
    }

    #[test]
    fn unknown_card_is_a_no_op() {
        let mut map = BucketMap::starting([card("a")]);
        let before = map.clone();
        let stranger = card("a");

        let after = update(&mut map, &stranger, Difficulty::Easy).clone();
        assert_eq!(after, before);
    }

    #[test]
    fn update_returns_the_same_map() {
        let a = card("a");
        let mut map = BucketMap::starting([a.clone()]);
        let ptr: *const BucketMap = &map;
        let returned = update(&mut map, &a, Difficulty::Wrong);
        assert!(std::ptr::eq(ptr, returned));
    }

    #[test]
    fn next_bucket_with_empty_map_stays_at_zero() {
        assert_eq!(next_bucket(0, Difficulty::Easy, 0), 0);
        assert_eq!(next_bucket(1, Difficulty::Hard, 3), 2);
        assert_eq!(next_bucket(1, Difficulty::Easy, 3), 2);
    }
}
