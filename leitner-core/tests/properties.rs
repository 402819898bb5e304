use leitner_core::{
    bucket_range, practice, to_bucket_sets, update, BucketMap, Difficulty, Flashcard,
};
use proptest::prelude::*;

// One bucket number per card; every card gets its own identity.
fn assignment_strategy() -> impl Strategy<Value = (BucketMap, Vec<Flashcard>)> {
    proptest::collection::vec(0..8usize, 0..24).prop_map(|buckets| {
        let mut map = BucketMap::new();
        let mut cards = Vec::with_capacity(buckets.len());
        for (i, bucket) in buckets.into_iter().enumerate() {
            let card = Flashcard::new(format!("q{i}"), format!("a{i}"), "", vec![]);
            map.place(bucket, card.clone()).unwrap();
            cards.push(card);
        }
        (map, cards)
    })
}

fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Wrong),
        Just(Difficulty::Hard),
        Just(Difficulty::Easy),
    ]
}

proptest! {
    #[test]
    fn dense_round_trip((map, _cards) in assignment_strategy()) {
        let sets = to_bucket_sets(&map);
        prop_assert_eq!(sets.len(), map.max_bucket().unwrap_or(0) + 1);
        prop_assert_eq!(sets.to_bucket_map(), map.without_empty());
    }

    #[test]
    fn range_brackets_exactly_the_occupied_slots((map, cards) in assignment_strategy()) {
        let sets = to_bucket_sets(&map);
        match bucket_range(&sets) {
            None => prop_assert!(cards.is_empty()),
            Some(r) => {
                prop_assert!(r.min_bucket <= r.max_bucket);
                prop_assert!(!sets.get(r.min_bucket).unwrap().is_empty());
                prop_assert!(!sets.get(r.max_bucket).unwrap().is_empty());
                for (i, s) in sets.iter() {
                    if i < r.min_bucket || i > r.max_bucket {
                        prop_assert!(s.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn practice_is_periodic((map, cards) in assignment_strategy(), day in 0..200u32) {
        let due = practice(&to_bucket_sets(&map), day);
        for c in &cards {
            let bucket = map.bucket_of(c).unwrap();
            prop_assert_eq!(due.contains(c), day as usize % (bucket + 1) == 0);
        }
        prop_assert!(due.len() <= cards.len());
    }

    #[test]
    fn wrong_always_lands_in_zero(
        (mut map, cards) in assignment_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!cards.is_empty());
        let card = pick.get(&cards);
        update(&mut map, card, Difficulty::Wrong);
        prop_assert_eq!(map.bucket_of(card), Some(0));
    }

    #[test]
    fn promotion_stays_below_key_count(
        (mut map, cards) in assignment_strategy(),
        pick in any::<prop::sample::Index>(),
        difficulty in difficulty_strategy(),
    ) {
        prop_assume!(!cards.is_empty());
        let card = pick.get(&cards);
        let count_before = map.bucket_count();
        let total_before = map.total_cards();

        update(&mut map, card, difficulty);
        let bucket = map.bucket_of(card).unwrap();
        prop_assert!(bucket < count_before);
        prop_assert_eq!(map.total_cards(), total_before);
    }
}
