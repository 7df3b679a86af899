//! Roulette spin resolution. Stateless between spins: validate and debit the
//! bet, draw a pocket uniformly from 0..=36, hold for the wheel's display
//! delay, then resolve the bet and credit any winnings. Pocket 0 is the
//! house pocket and loses every color and parity bet.

use crate::bankroll::Bankroll;
use crate::{CasinoGameError, Pacer};
use lazy_static::lazy_static;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

/// Delay between drawing the pocket and settling the bet, matching the
/// wheel-spin animation the presentation layer shows.
pub const SPIN_PAUSE: Duration = Duration::from_secs(3);

lazy_static! {
    /// The 18 red pockets of the standard wheel. The remaining 18 nonzero
    /// pockets are black; together they partition 1..=36.
    static ref RED_POCKETS: HashSet<u8> = [
        1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
    ]
    .into_iter()
    .collect();
}

/// The color classification of a drawn pocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PocketColor {
    Green,
    Red,
    Black,
}

impl PocketColor {
    /// Classifies a pocket in 0..=36.
    pub fn of(pocket: u8) -> PocketColor {
        if pocket == 0 {
            PocketColor::Green
        } else if RED_POCKETS.contains(&pocket) {
            PocketColor::Red
        } else {
            PocketColor::Black
        }
    }
}

/// The bet types the wheel resolves. Straight bets win on exact equality
/// with the drawn pocket and pay the same flat 2x as everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouletteBet {
    Red,
    Black,
    Even,
    Odd,
    Straight(u8),
}

impl RouletteBet {
    /// Whether this bet wins against the drawn pocket. Pocket 0 loses every
    /// color and parity bet and is excluded from both parities.
    pub fn wins_on(&self, pocket: u8) -> bool {
        match self {
            RouletteBet::Straight(n) => pocket == *n,
            _ if pocket == 0 => false,
            RouletteBet::Red => PocketColor::of(pocket) == PocketColor::Red,
            RouletteBet::Black => PocketColor::of(pocket) == PocketColor::Black,
            RouletteBet::Even => pocket % 2 == 0,
            RouletteBet::Odd => pocket % 2 != 0,
        }
    }
}

/// The result of one spin, everything the presentation layer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpinResult {
    pub pocket: u8,
    pub color: PocketColor,
    pub bet: u32,
    pub win: bool,
    /// The amount credited back: 2x the bet on a win, 0 on a loss.
    pub payout: u32,
}

impl SpinResult {
    /// Message announcing the drawn pocket.
    pub fn pocket_message(&self) -> String {
        format!("The ball landed on {}.", self.pocket)
    }

    /// Message announcing the settlement. A win reports the credited
    /// winnings, a loss reports the lost stake.
    pub fn outcome_message(&self) -> String {
        if self.win {
            format!("You won ${}!", self.payout)
        } else {
            format!("You lost ${}. Better luck next time!", self.bet)
        }
    }
}

/// The roulette engine. Holds no state between spins beyond its random
/// source and pacer; the bankroll is the only thing a spin mutates.
pub struct RouletteWheel<R: Rng> {
    rng: R,
    pacer: Box<dyn Pacer + Send>,
}

impl<R: Rng> RouletteWheel<R> {
    pub fn new(rng: R, pacer: Box<dyn Pacer + Send>) -> RouletteWheel<R> {
        RouletteWheel { rng, pacer }
    }

    /// Method that runs one spin to completion: validate and debit the bet,
    /// draw the pocket, wait out the display delay and settle. The whole
    /// spin happens inside this call, so a second spin can never race a
    /// pending settlement on the same wheel.
    pub fn spin(
        &mut self,
        bankroll: &mut Bankroll,
        bet: u32,
        kind: RouletteBet,
    ) -> Result<SpinResult, CasinoGameError> {
        if bet == 0 {
            return Err(CasinoGameError::InvalidBet);
        }
        if let RouletteBet::Straight(n) = kind {
            if n > 36 {
                return Err(CasinoGameError::InvalidBet);
            }
        }
        bankroll.debit(bet)?;

        let pocket: u8 = self.rng.gen_range(0..=36);
        self.pacer.pause(SPIN_PAUSE);

        Ok(Self::settle(bankroll, bet, kind, pocket))
    }

    /// Resolves a drawn pocket against the bet and credits any winnings.
    /// Split out so tests can drive exact pockets.
    fn settle(bankroll: &mut Bankroll, bet: u32, kind: RouletteBet, pocket: u8) -> SpinResult {
        let win = kind.wins_on(pocket);
        let payout = if win { bet.saturating_mul(2) } else { 0 };
        if win {
            bankroll.credit(payout);
        }
        SpinResult {
            pocket,
            color: PocketColor::of(pocket),
            bet,
            win,
            payout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InstantPacer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wheel() -> RouletteWheel<StdRng> {
        RouletteWheel::new(StdRng::seed_from_u64(11), Box::new(InstantPacer))
    }

    #[test]
    fn red_and_black_partition_the_nonzero_pockets() {
        let mut reds = 0;
        let mut blacks = 0;
        for pocket in 1..=36u8 {
            match PocketColor::of(pocket) {
                PocketColor::Red => reds += 1,
                PocketColor::Black => blacks += 1,
                PocketColor::Green => panic!("only pocket 0 is green"),
            }
        }
        assert_eq!(reds, 18);
        assert_eq!(blacks, 18);
        assert_eq!(PocketColor::of(0), PocketColor::Green);
    }

    #[test]
    fn pocket_zero_loses_every_color_and_parity_bet() {
        for kind in [
            RouletteBet::Red,
            RouletteBet::Black,
            RouletteBet::Even,
            RouletteBet::Odd,
        ] {
            assert!(!kind.wins_on(0), "{kind:?} must lose on pocket 0");
        }
        // A straight bet on 0 is the one way to win the house pocket.
        assert!(RouletteBet::Straight(0).wins_on(0));
    }

    #[test]
    fn parity_and_color_bets_resolve_per_pocket() {
        assert!(!RouletteBet::Red.wins_on(17));
        assert!(RouletteBet::Black.wins_on(17));
        assert!(RouletteBet::Odd.wins_on(17));
        assert!(!RouletteBet::Even.wins_on(17));
        assert!(RouletteBet::Red.wins_on(32));
        assert!(RouletteBet::Even.wins_on(32));
        assert!(RouletteBet::Straight(17).wins_on(17));
        assert!(!RouletteBet::Straight(17).wins_on(18));
    }

    #[test]
    fn losing_spin_scenario_reports_pocket_and_lost_stake() {
        // Bankroll 100, 10 on red, ball lands on 17 (black).
        let mut bankroll = Bankroll::new(100);
        bankroll.debit(10).unwrap();
        let result = RouletteWheel::<StdRng>::settle(&mut bankroll, 10, RouletteBet::Red, 17);
        assert!(!result.win);
        assert_eq!(bankroll.balance(), 90);
        assert_eq!(result.pocket_message(), "The ball landed on 17.");
        assert_eq!(
            result.outcome_message(),
            "You lost $10. Better luck next time!"
        );
    }

    #[test]
    fn winning_spin_credits_twice_the_bet() {
        let mut bankroll = Bankroll::new(100);
        bankroll.debit(10).unwrap();
        let result = RouletteWheel::<StdRng>::settle(&mut bankroll, 10, RouletteBet::Black, 17);
        assert!(result.win);
        assert_eq!(result.payout, 20);
        assert_eq!(bankroll.balance(), 110);
        assert_eq!(result.outcome_message(), "You won $20!");
    }

    #[test]
    fn invalid_bets_never_touch_the_bankroll() {
        let mut bankroll = Bankroll::new(100);
        let mut wheel = wheel();
        assert_eq!(
            wheel.spin(&mut bankroll, 0, RouletteBet::Red),
            Err(CasinoGameError::InvalidBet)
        );
        assert_eq!(
            wheel.spin(&mut bankroll, 5, RouletteBet::Straight(37)),
            Err(CasinoGameError::InvalidBet)
        );
        assert_eq!(
            wheel.spin(&mut bankroll, 101, RouletteBet::Red),
            Err(CasinoGameError::InsufficientFunds)
        );
        assert_eq!(bankroll.balance(), 100);
    }

    #[test]
    fn spins_keep_the_bankroll_consistent_over_many_rounds() {
        let mut bankroll = Bankroll::new(1000);
        let mut wheel = wheel();
        for i in 0..10_000 {
            if bankroll.balance() == 0 {
                break;
            }
            let kind = match i % 5 {
                0 => RouletteBet::Red,
                1 => RouletteBet::Black,
                2 => RouletteBet::Even,
                3 => RouletteBet::Odd,
                _ => RouletteBet::Straight((i % 37) as u8),
            };
            let before = bankroll.balance();
            let result = wheel.spin(&mut bankroll, 1, kind).unwrap();
            if result.pocket == 0 && !matches!(kind, RouletteBet::Straight(0)) {
                assert!(!result.win, "pocket 0 must lose {kind:?}");
            }
            let expected = if result.win { before + 1 } else { before - 1 };
            assert_eq!(bankroll.balance(), expected);
        }
    }
}
