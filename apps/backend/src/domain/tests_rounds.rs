//! Exhaustive checks of the hand-level parda cascade.

use crate::domain::rounds::{hand_winner, SideOutcome};
use crate::domain::state::Side;

const ALL: [SideOutcome; 3] = [
    SideOutcome::Won(Side::Mano),
    SideOutcome::Won(Side::Pie),
    SideOutcome::Parda,
];

/// Independent statement of the rules, written as prose logic rather than a table.
fn oracle(outcomes: &[SideOutcome]) -> Option<Side> {
    use SideOutcome::{Parda, Won};

    let first_decisive = outcomes.iter().find_map(|o| match o {
        Won(s) => Some(*s),
        Parda => None,
    });
    match outcomes.len() {
        0 | 1 => None,
        2 => {
            let wins_mano = outcomes.iter().filter(|o| **o == Won(Side::Mano)).count();
            let wins_pie = outcomes.iter().filter(|o| **o == Won(Side::Pie)).count();
            if wins_mano == 2 {
                Some(Side::Mano)
            } else if wins_pie == 2 {
                Some(Side::Pie)
            } else if outcomes.contains(&Parda) {
                // One decisive round next to a parda settles the hand.
                first_decisive
            } else {
                None
            }
        }
        _ => match outcomes[2] {
            Won(s) => Some(s),
            // Third round tied: the first decisive round wins, mano if none.
            Parda => Some(first_decisive.unwrap_or(Side::Mano)),
        },
    }
}

#[test]
fn fewer_than_two_rounds_never_decide() {
    assert_eq!(hand_winner(&[]), None);
    for o in ALL {
        assert_eq!(hand_winner(&[o]), None, "{o:?}");
    }
}

#[test]
fn every_two_round_sequence() {
    for r1 in ALL {
        for r2 in ALL {
            let seq = [r1, r2];
            assert_eq!(hand_winner(&seq), oracle(&seq), "{seq:?}");
        }
    }
}

#[test]
fn every_reachable_three_round_sequence() {
    let mut checked = 0;
    for r1 in ALL {
        for r2 in ALL {
            // A third round is only played when two rounds left the hand open.
            if hand_winner(&[r1, r2]).is_some() {
                continue;
            }
            for r3 in ALL {
                let seq = [r1, r2, r3];
                let got = hand_winner(&seq);
                assert!(got.is_some(), "three rounds always decide: {seq:?}");
                assert_eq!(got, oracle(&seq), "{seq:?}");
                checked += 1;
            }
        }
    }
    // [M,P], [P,M] and [=,=] prefixes, three endings each.
    assert_eq!(checked, 9);
}

#[test]
fn three_pardas_go_to_mano() {
    let seq = [SideOutcome::Parda; 3];
    assert_eq!(hand_winner(&seq), Some(Side::Mano));
}

#[test]
fn split_rounds_then_parda_go_to_first_winner() {
    use SideOutcome::{Parda, Won};
    assert_eq!(
        hand_winner(&[Won(Side::Pie), Won(Side::Mano), Parda]),
        Some(Side::Pie)
    );
    assert_eq!(
        hand_winner(&[Won(Side::Mano), Won(Side::Pie), Parda]),
        Some(Side::Mano)
    );
}

#[test]
fn parda_first_then_decisive_round_wins() {
    use SideOutcome::{Parda, Won};
    assert_eq!(hand_winner(&[Parda, Won(Side::Pie)]), Some(Side::Pie));
    assert_eq!(hand_winner(&[Parda, Parda, Won(Side::Pie)]), Some(Side::Pie));
}
