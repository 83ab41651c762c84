//! Round (trick) resolution and the hand-level parda cascade.

use crate::domain::cards_logic::trick_rank;
use crate::domain::state::{Seat, Side};
use crate::domain::Card;

/// Result of a completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won(Seat),
    /// Two or more seats tied on the top trick rank.
    Parda,
}

/// A round outcome seen from the teams' point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideOutcome {
    Won(Side),
    Parda,
}

/// Decide a completed round. Highest trick rank wins; a shared top rank is a parda.
/// Returns `None` for an empty round.
pub fn resolve_round(plays: &[(Seat, Card)]) -> Option<RoundOutcome> {
    let top = plays.iter().map(|(_, c)| trick_rank(*c)).max()?;
    let mut leaders = plays.iter().filter(|(_, c)| trick_rank(*c) == top);
    let (seat, _) = leaders.next()?;
    if leaders.next().is_some() {
        Some(RoundOutcome::Parda)
    } else {
        Some(RoundOutcome::Won(*seat))
    }
}

/// Hand winner from the resolved rounds so far, `None` while undecided.
///
/// Table over every reachable sequence (M = mano side, P = pie side, = = parda):
///
/// | r1 | r2 | r3 | winner                             |
/// |----|----|----|------------------------------------|
/// | x  | x  |    | x (two rounds won)                 |
/// | x  | =  |    | x (first round decides)            |
/// | =  | x  |    | x (later decisive round decides) * |
/// | x  | y  | z  | z                                  |
/// | x  | y  | =  | x (first round decides) *          |
/// | =  | =  | z  | z                                  |
/// | =  | =  | =  | M                                  |
///
/// `x y` with x != y and `= =` stay undecided after two rounds.
///
/// Rows marked `*` follow common table practice rather than the written
/// house rules and are pending product-owner confirmation.
pub fn hand_winner(outcomes: &[SideOutcome]) -> Option<Side> {
    use SideOutcome::{Parda, Won};

    match outcomes {
        [Won(a), Won(b)] if a == b => Some(*a),
        [Won(a), Parda] => Some(*a),
        [Parda, Won(b)] => Some(*b),

        // Already decided after two rounds; a third entry does not change that.
        [Won(a), Won(b), _] if a == b => Some(*a),
        [Won(a), Parda, _] => Some(*a),
        [Parda, Won(b), _] => Some(*b),

        [Won(_), Won(_), Won(c)] => Some(*c),
        [Won(a), Won(_), Parda] => Some(*a),
        [Parda, Parda, Won(c)] => Some(*c),
        [Parda, Parda, Parda] => Some(Side::Mano),

        _ => None,
    }
}
