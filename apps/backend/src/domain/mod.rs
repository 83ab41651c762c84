//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod envido;
pub mod game_transition;
pub mod hand;
pub mod match_state;
pub mod rounds;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod truco;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props;
#[cfg(test)]
mod tests_rounds;

// Re-exports for ergonomics
pub use cards_logic::{card_beats, envido_score, trick_rank};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::deal_hands;
pub use envido::{EnvidoLevel, EnvidoStatus};
pub use hand::HandAction;
pub use match_state::{JoinOutcome, MatchId, MatchState, PlayerId};
pub use rules::GameRules;
pub use seed_derivation::{derive_dealing_seed, derive_first_dealer};
pub use state::{Hand, HandStatus, Seat, Side};
pub use truco::TrucoLevel;
