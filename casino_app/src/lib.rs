//! Application crate for the casino: wires the rule engines from
//! `casino_lib` to the persistence store, parses raw user input into bets
//! and actions, and exposes the whole thing to the console binary and the
//! HTTP API binary through one `CasinoSession`.

pub mod store;
pub mod view;

pub use store::{FileBalanceStore, MemoryStore};

use casino_lib::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod prelude {
    pub use super::store::{FileBalanceStore, MemoryStore, BALANCE_KEY};
    pub use super::{parse_bet, parse_roulette_bet, CasinoSession};
    pub use casino_lib::prelude::*;
}

/// Parses a raw bet string from the user. Non-numeric, non-positive or
/// absent input is an invalid bet; the engines re-check the amount against
/// the bankroll themselves.
pub fn parse_bet(text: &str) -> Result<u32, CasinoGameError> {
    match text.trim().parse::<u32>() {
        Ok(bet) if bet > 0 => Ok(bet),
        _ => Err(CasinoGameError::InvalidBet),
    }
}

/// Parses a roulette bet type: a color, a parity, or a straight number
/// 0..=36.
pub fn parse_roulette_bet(text: &str) -> Result<RouletteBet, CasinoGameError> {
    match text.trim().to_lowercase().as_str() {
        "red" => Ok(RouletteBet::Red),
        "black" => Ok(RouletteBet::Black),
        "even" => Ok(RouletteBet::Even),
        "odd" => Ok(RouletteBet::Odd),
        other => match other.parse::<u8>() {
            Ok(n) if n <= 36 => Ok(RouletteBet::Straight(n)),
            _ => Err(CasinoGameError::InvalidBet),
        },
    }
}

/// One player's seat at the casino: the shared bankroll plus one engine per
/// game. All access is sequential; the binaries own the session directly or
/// behind a mutex.
pub struct CasinoSession {
    bankroll: Bankroll,
    blackjack: BlackjackTable<StdRng>,
    roulette: RouletteWheel<StdRng>,
}

impl CasinoSession {
    /// Associated function that builds a session on top of a balance store.
    /// `fast` swaps the real pacing delays for instant ones.
    pub fn new(store: Box<dyn BalanceStore + Send>, fast: bool) -> CasinoSession {
        let bankroll = Bankroll::with_store(store);
        let blackjack = BlackjackTable::new(StdRng::from_entropy(), Self::pacer(fast));
        let roulette = RouletteWheel::new(StdRng::from_entropy(), Self::pacer(fast));
        CasinoSession {
            bankroll,
            blackjack,
            roulette,
        }
    }

    fn pacer(fast: bool) -> Box<dyn Pacer + Send> {
        if fast {
            Box::new(InstantPacer)
        } else {
            Box::new(StandardPacer)
        }
    }

    /// Getter method for the current bankroll balance.
    pub fn balance(&self) -> u32 {
        self.bankroll.balance()
    }

    /// Starts a blackjack round from raw bet text. Returns the outcome when
    /// the deal settled immediately (a dealt 21).
    pub fn deal(&mut self, bet_text: &str) -> Result<Option<RoundOutcome>, CasinoGameError> {
        let bet = parse_bet(bet_text)?;
        self.blackjack.deal(&mut self.bankroll, bet)
    }

    /// Draws one more card for the player. Returns the outcome on a bust.
    pub fn hit(&mut self) -> Result<Option<RoundOutcome>, CasinoGameError> {
        self.blackjack.hit(&mut self.bankroll)
    }

    /// Ends the player's turn and plays the dealer out, reporting each draw
    /// through `on_draw`.
    pub fn stay<F: FnMut(&TableView)>(
        &mut self,
        on_draw: F,
    ) -> Result<RoundOutcome, CasinoGameError> {
        self.blackjack.stay(&mut self.bankroll, on_draw)
    }

    /// Runs one roulette spin from raw bet text and a bet-type string.
    pub fn spin(&mut self, bet_text: &str, kind_text: &str) -> Result<SpinResult, CasinoGameError> {
        let bet = parse_bet(bet_text)?;
        let kind = parse_roulette_bet(kind_text)?;
        self.roulette.spin(&mut self.bankroll, bet, kind)
    }

    /// Getter method for the current blackjack table snapshot.
    pub fn blackjack_view(&self) -> TableView {
        self.blackjack.view()
    }

    /// Getter method for the blackjack round phase.
    pub fn blackjack_phase(&self) -> RoundPhase {
        self.blackjack.phase()
    }
}
