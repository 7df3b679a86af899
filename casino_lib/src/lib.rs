//! Core rules library for the casino: the card and deck model, hand scoring,
//! the blackjack round state machine, roulette bet resolution and the shared
//! bankroll. Presentation, persistence and input wiring live in the
//! application crate; this crate only talks to them through the injected
//! ports (`BalanceStore`, `Pacer`) so every rule can be tested without real
//! storage or real timers.

pub mod bankroll;
pub mod blackjack;
pub mod card;
pub mod hand;
pub mod roulette;

use std::error::Error;
use std::fmt::Display;
use std::time::Duration;

pub mod prelude {
    pub use super::bankroll::{BalanceStore, Bankroll, DEFAULT_BALANCE};
    pub use super::blackjack::{BlackjackTable, RoundOutcome, RoundPhase, TableView};
    pub use super::card::{Card, Deck, Rank, Suit};
    pub use super::hand::Hand;
    pub use super::roulette::{PocketColor, RouletteBet, RouletteWheel, SpinResult};
    pub use super::{CasinoGameError, InstantPacer, Pacer, StandardPacer};
}

/// Errors produced by the game engines. Every variant is recoverable from the
/// player's point of view: the round or spin simply does not start (or the
/// action is ignored) and the bankroll is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CasinoGameError {
    /// The bet was absent, non-numeric, zero or negative.
    InvalidBet,
    /// The bet exceeds the current bankroll balance.
    InsufficientFunds,
    /// A draw was requested from an empty deck. Not reachable under the
    /// rules (at most 21 cards leave a 52-card deck in one round), so seeing
    /// this indicates a logic defect rather than bad input.
    EmptyDeck,
    /// The action is not valid in the current round phase, e.g. a hit before
    /// any hand has been dealt or after the dealer's turn has started.
    OutOfTurn,
}

impl Display for CasinoGameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CasinoGameError::InvalidBet => write!(f, "Please enter a valid bet."),
            CasinoGameError::InsufficientFunds => write!(f, "You do not have enough money."),
            CasinoGameError::EmptyDeck => write!(f, "the deck has no cards left to draw"),
            CasinoGameError::OutOfTurn => write!(f, "that action is not available right now"),
        }
    }
}

impl Error for CasinoGameError {}

/// Pacing port for the time-extended steps of a round: the dealer's draw
/// pause and the roulette spin delay. The engines never sleep directly, they
/// ask the injected pacer, so tests run rounds instantaneously.
pub trait Pacer {
    fn pause(&self, wait: Duration);
}

/// Production pacer, blocks the calling thread for the requested duration.
pub struct StandardPacer;

impl Pacer for StandardPacer {
    fn pause(&self, wait: Duration) {
        std::thread::sleep(wait);
    }
}

/// Zero-delay pacer for tests and the `--fast` console mode.
pub struct InstantPacer;

impl Pacer for InstantPacer {
    fn pause(&self, _wait: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_match_the_user_facing_contract() {
        assert_eq!(
            CasinoGameError::InvalidBet.to_string(),
            "Please enter a valid bet."
        );
        assert_eq!(
            CasinoGameError::InsufficientFunds.to_string(),
            "You do not have enough money."
        );
    }

    #[test]
    fn instant_pacer_does_not_block() {
        let start = std::time::Instant::now();
        InstantPacer.pause(Duration::from_secs(60));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
