use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::cards_logic::{best_envido, envido_score, trick_rank};
use crate::domain::dealing::{deal_hands, DECK_SIZE};
use crate::domain::rounds::{hand_winner, resolve_round, RoundOutcome};
use crate::domain::test_gens;
use crate::domain::{card_beats, Card};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(config())]

    /// Property: any two-seat deal hands out six distinct cards.
    #[test]
    fn prop_two_seat_deal_is_disjoint(seed in any::<u64>()) {
        let hands = deal_hands(2, seed).unwrap();
        prop_assert_eq!(hands.len(), 2);
        let all: HashSet<Card> = hands.iter().flatten().copied().collect();
        prop_assert_eq!(all.len(), 6);
    }

    /// Property: every legal table size fits in the deck.
    #[test]
    fn prop_deal_sizes(seed in any::<u64>(), seats in prop::sample::select(vec![2usize, 4, 6])) {
        let hands = deal_hands(seats, seed).unwrap();
        let all: HashSet<Card> = hands.iter().flatten().copied().collect();
        prop_assert_eq!(all.len(), seats * 3);
        prop_assert!(all.len() <= DECK_SIZE);
    }

    /// Property: trick rank is a total preorder consistent with card_beats.
    #[test]
    fn prop_trick_rank_total(a in test_gens::card(), b in test_gens::card()) {
        let ab = card_beats(a, b);
        let ba = card_beats(b, a);
        prop_assert!(!(ab && ba));
        prop_assert_eq!(!ab && !ba, trick_rank(a) == trick_rank(b));
    }

    /// Property: a completed round is won by a seat holding a top card, or is a parda.
    #[test]
    fn prop_round_winner_holds_top_card(plays in test_gens::round_plays(4)) {
        let top = plays.iter().map(|(_, c)| trick_rank(*c)).max().unwrap();
        match resolve_round(&plays).unwrap() {
            RoundOutcome::Won(seat) => {
                let card = plays.iter().find(|(s, _)| *s == seat).unwrap().1;
                prop_assert_eq!(trick_rank(card), top);
                prop_assert_eq!(plays.iter().filter(|(_, c)| trick_rank(*c) == top).count(), 1);
            }
            RoundOutcome::Parda => {
                prop_assert!(plays.iter().filter(|(_, c)| trick_rank(*c) == top).count() >= 2);
            }
        }
    }

    /// Property: three resolved rounds always produce a hand winner.
    #[test]
    fn prop_three_rounds_decide(
        r1 in test_gens::side_outcome(),
        r2 in test_gens::side_outcome(),
        r3 in test_gens::side_outcome(),
    ) {
        prop_assert!(hand_winner(&[r1, r2, r3]).is_some());
    }

    /// Property: no shown subset beats the best Envido of the hand.
    #[test]
    fn prop_envido_subsets_bounded(hand in test_gens::dealt_hand()) {
        let best = best_envido(&hand);
        for (i, a) in hand.iter().enumerate() {
            prop_assert!(envido_score(&[*a]).unwrap() <= best);
            for b in &hand[i + 1..] {
                prop_assert!(envido_score(&[*a, *b]).unwrap() <= best);
            }
        }
        prop_assert!(best <= 33);
    }
}
