//! The blackjack round state machine. One round at a time: validate and
//! debit the bet, deal from a fresh shuffled deck, take hit/stay decisions
//! from the player, run the dealer's fixed draw policy and settle against
//! the bankroll. Deck and hands are discarded at settlement; nothing is
//! carried between rounds except the bankroll itself.

use crate::bankroll::Bankroll;
use crate::card::{Card, Deck};
use crate::hand::Hand;
use crate::{CasinoGameError, Pacer};
use rand::Rng;
use serde::Serialize;
use std::time::Duration;

/// Pause between dealer draws, purely for presentation pacing.
pub const DEALER_DRAW_PAUSE: Duration = Duration::from_secs(1);

/// The dealer stands on any 17 or more, soft 17 included.
const DEALER_STAND: u8 = 17;

/// Where the current round stands. `Settled` keeps the finished hands around
/// for display and is immediately ready for the next deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundPhase {
    Idle,
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// How a settled round came out, from the player's side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundOutcome {
    PlayerWin,
    DealerWin,
    Push,
    PlayerBust,
}

impl RoundOutcome {
    /// The user-facing result message. The exact text is part of the
    /// observable contract.
    pub fn message(&self) -> &'static str {
        match self {
            RoundOutcome::PlayerWin => "You win!",
            RoundOutcome::DealerWin => "Dealer wins! You lose.",
            RoundOutcome::Push => "Push! It's a tie.",
            RoundOutcome::PlayerBust => "You busted! You lose.",
        }
    }
}

/// A snapshot of the table for the presentation layer: the full ordered
/// hands, both derived values and whether the dealer's first card is still
/// face down.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub player_value: u8,
    pub dealer_value: u8,
    pub conceal_hole_card: bool,
}

/// The blackjack engine. Generic over the random source so tests can seed
/// it; the pacer spaces out the dealer's draws without the engine ever
/// sleeping on its own.
pub struct BlackjackTable<R: Rng> {
    rng: R,
    pacer: Box<dyn Pacer + Send>,
    deck: Deck,
    player_hand: Hand,
    dealer_hand: Hand,
    bet: u32,
    phase: RoundPhase,
    outcome: Option<RoundOutcome>,
}

impl<R: Rng> BlackjackTable<R> {
    /// Associated function for a new table with no round in progress.
    pub fn new(rng: R, pacer: Box<dyn Pacer + Send>) -> BlackjackTable<R> {
        BlackjackTable {
            rng,
            pacer,
            deck: Deck::standard(),
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            bet: 0,
            phase: RoundPhase::Idle,
            outcome: None,
        }
    }

    /// Method that starts a round: validates the bet, debits it from the
    /// bankroll (the stake is at risk from here on), builds and shuffles a
    /// fresh deck and deals two cards each, player first, alternating.
    ///
    /// Returns `Some(outcome)` when the round settled on the spot: a dealt
    /// 21 ends the round immediately, compared against the dealer's two-card
    /// hand as it stands. Otherwise the round is in `PlayerTurn` and `None`
    /// is returned.
    pub fn deal(
        &mut self,
        bankroll: &mut Bankroll,
        bet: u32,
    ) -> Result<Option<RoundOutcome>, CasinoGameError> {
        let mut deck = Deck::standard();
        deck.shuffle(&mut self.rng);
        self.deal_with_deck(bankroll, bet, deck)
    }

    /// Same as `deal` but with a caller-supplied deck, for deterministic
    /// replays and scenario tests. Draw order is player, dealer, player,
    /// dealer.
    pub fn deal_with_deck(
        &mut self,
        bankroll: &mut Bankroll,
        bet: u32,
        deck: Deck,
    ) -> Result<Option<RoundOutcome>, CasinoGameError> {
        match self.phase {
            RoundPhase::Idle | RoundPhase::Settled => {}
            _ => return Err(CasinoGameError::OutOfTurn),
        }
        if bet == 0 {
            return Err(CasinoGameError::InvalidBet);
        }
        bankroll.debit(bet)?;

        self.bet = bet;
        self.deck = deck;
        self.player_hand.clear();
        self.dealer_hand.clear();
        self.outcome = None;
        self.phase = RoundPhase::PlayerTurn;

        let first_player = self.draw_card()?;
        self.player_hand.receive_card(first_player);
        let first_dealer = self.draw_card()?;
        self.dealer_hand.receive_card(first_dealer);
        let second_player = self.draw_card()?;
        self.player_hand.receive_card(second_player);
        let second_dealer = self.draw_card()?;
        self.dealer_hand.receive_card(second_dealer);

        // A dealt 21 ends the round at once. The dealer's hand is compared
        // as it stands, two cards, with the flat payout; there is no
        // separate dealer-natural check and no 3:2 bonus.
        if self.player_hand.value() == 21 {
            return Ok(Some(self.settle(bankroll)));
        }

        Ok(None)
    }

    /// Method that draws one card into the player's hand. Valid only during
    /// the player's turn. A value over 21 settles the round immediately as a
    /// bust; the dealer never plays and the stake stays forfeited.
    pub fn hit(
        &mut self,
        bankroll: &mut Bankroll,
    ) -> Result<Option<RoundOutcome>, CasinoGameError> {
        if self.phase != RoundPhase::PlayerTurn {
            return Err(CasinoGameError::OutOfTurn);
        }
        let card = self.draw_card()?;
        self.player_hand.receive_card(card);
        if self.player_hand.is_busted() {
            return Ok(Some(self.settle(bankroll)));
        }
        Ok(None)
    }

    /// Method that ends the player's turn and plays out the dealer. The
    /// dealer draws one card at a time while under 17 and stands on any 17,
    /// soft included. Each draw is a discrete step: the pacer pause runs
    /// first, then the card is drawn and `on_draw` is invoked with the
    /// updated view so the presentation layer can show the hand grow.
    ///
    /// Once the dealer's turn has started no player action can interleave:
    /// the loop runs to completion inside this call and further `hit`/`stay`
    /// requests are rejected as out of turn.
    pub fn stay<F: FnMut(&TableView)>(
        &mut self,
        bankroll: &mut Bankroll,
        mut on_draw: F,
    ) -> Result<RoundOutcome, CasinoGameError> {
        if self.phase != RoundPhase::PlayerTurn {
            return Err(CasinoGameError::OutOfTurn);
        }
        self.phase = RoundPhase::DealerTurn;

        while self.dealer_hand.value() < DEALER_STAND {
            self.pacer.pause(DEALER_DRAW_PAUSE);
            let card = self.draw_card()?;
            self.dealer_hand.receive_card(card);
            on_draw(&self.view());
        }

        Ok(self.settle(bankroll))
    }

    /// Settlement: compare the hands and credit the bankroll. The stake was
    /// debited at the deal, so a loss credits nothing, a win credits twice
    /// the bet and a push returns the bet.
    fn settle(&mut self, bankroll: &mut Bankroll) -> RoundOutcome {
        let player = self.player_hand.value();
        let dealer = self.dealer_hand.value();

        let outcome = if player > 21 {
            RoundOutcome::PlayerBust
        } else if dealer > 21 || player > dealer {
            RoundOutcome::PlayerWin
        } else if player < dealer {
            RoundOutcome::DealerWin
        } else {
            RoundOutcome::Push
        };

        match outcome {
            RoundOutcome::PlayerWin => bankroll.credit(self.bet.saturating_mul(2)),
            RoundOutcome::Push => bankroll.credit(self.bet),
            RoundOutcome::DealerWin | RoundOutcome::PlayerBust => {}
        }

        self.phase = RoundPhase::Settled;
        self.outcome = Some(outcome);
        outcome
    }

    /// Draws from the round's deck. An empty deck is unreachable under the
    /// rules; if it ever happens the round is abandoned as settled so the
    /// table stays usable, and the error surfaces to the caller.
    fn draw_card(&mut self) -> Result<Card, CasinoGameError> {
        match self.deck.draw() {
            Ok(card) => Ok(card),
            Err(e) => {
                self.phase = RoundPhase::Settled;
                Err(e)
            }
        }
    }

    /// Getter method for the current snapshot of the table. The dealer's
    /// first card stays concealed until the player's turn is over.
    pub fn view(&self) -> TableView {
        TableView {
            player_cards: self.player_hand.cards().to_vec(),
            dealer_cards: self.dealer_hand.cards().to_vec(),
            player_value: self.player_hand.value(),
            dealer_value: self.dealer_hand.value(),
            conceal_hole_card: self.phase == RoundPhase::PlayerTurn,
        }
    }

    /// Getter method for the round phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Getter method for the outcome of the last settled round.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Getter method for the bet at risk in the current round.
    pub fn bet(&self) -> u32 {
        self.bet
    }
}
