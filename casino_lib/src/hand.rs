//! Hand scoring. The value of a hand is always derived from its cards, never
//! stored: aces start at 11 and are demoted to 1 one at a time while the
//! total is over 21, which yields the best total at or under 21 when one
//! exists and the minimal overshoot otherwise.

use crate::card::{Card, Rank};

/// The ordered cards held by one party (player or dealer) during a round.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand { cards: Vec::new() }
    }

    /// Method for receiving a card dealt from the deck.
    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Getter method for the cards in the hand, in the order they arrived.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Method that computes the hand's value. Each ace counts as 11 until
    /// the running total exceeds 21, then aces are demoted by 10 apiece (in
    /// any order, the result is the same) while any remain at 11.
    pub fn value(&self) -> u8 {
        let mut total: u16 = 0;
        let mut aces = 0u8;
        for card in &self.cards {
            if card.rank == Rank::Ace {
                aces += 1;
            }
            total += u16::from(card.base_value());
        }
        while total > 21 && aces > 0 {
            total -= 10;
            aces -= 1;
        }
        // Any bust score is far past 21 already, so a hand stacked beyond
        // what a real deck can deal saturates instead of wrapping.
        total.min(u16::from(u8::MAX)) as u8
    }

    /// Returns true if the hand value exceeds 21.
    pub fn is_busted(&self) -> bool {
        self.value() > 21
    }

    /// Returns true for a natural: exactly two cards totaling 21.
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    /// Returns true while an ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        let hard: u16 = self
            .cards
            .iter()
            .map(|c| match c.rank {
                Rank::Ace => 1u16,
                _ => u16::from(c.base_value()),
            })
            .sum();
        self.cards.iter().any(|c| c.rank == Rank::Ace) && hard + 10 == u16::from(self.value())
    }

    /// Method to discard all cards, readying the hand for the next round.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.receive_card(Card::new(Suit::Hearts, rank));
        }
        hand
    }

    #[test]
    fn ace_six_five_scores_twelve_not_twenty_two() {
        let hand = hand_of(&[Rank::Ace, Rank::Six, Rank::Five]);
        assert_eq!(hand.value(), 12);
        assert!(!hand.is_busted());
    }

    #[test]
    fn ace_counts_as_eleven_while_it_fits() {
        assert_eq!(hand_of(&[Rank::Ace, Rank::Six]).value(), 17);
        assert_eq!(hand_of(&[Rank::Ace, Rank::King]).value(), 21);
    }

    #[test]
    fn multiple_aces_demote_one_at_a_time() {
        assert_eq!(hand_of(&[Rank::Ace, Rank::Ace]).value(), 12);
        assert_eq!(hand_of(&[Rank::Ace, Rank::Ace, Rank::Nine]).value(), 21);
        assert_eq!(
            hand_of(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ten]).value(),
            13
        );
    }

    #[test]
    fn bust_reports_the_minimal_overshoot() {
        let hand = hand_of(&[Rank::Ten, Rank::Nine, Rank::Five]);
        assert_eq!(hand.value(), 24);
        assert!(hand.is_busted());
        // With an ace present the demotion keeps the overshoot minimal.
        let hand = hand_of(&[Rank::Ace, Rank::King, Rank::Queen, Rank::Two]);
        assert_eq!(hand.value(), 23);
    }

    #[test]
    fn oversized_stacked_hands_saturate_instead_of_wrapping() {
        // No real deck deals this, but the public API allows it: thirty
        // kings sum to 300, which must not wrap around u8.
        let mut hand = Hand::new();
        for _ in 0..30 {
            hand.receive_card(Card::new(Suit::Hearts, Rank::King));
        }
        assert_eq!(hand.value(), u8::MAX);
        assert!(hand.is_busted());
    }

    #[test]
    fn natural_is_exactly_two_cards_totaling_twenty_one() {
        assert!(hand_of(&[Rank::Ten, Rank::Ace]).is_natural());
        assert!(hand_of(&[Rank::Ace, Rank::King]).is_natural());
        assert!(!hand_of(&[Rank::Seven, Rank::Seven, Rank::Seven]).is_natural());
        assert!(!hand_of(&[Rank::Ten, Rank::Nine]).is_natural());
    }

    #[test]
    fn soft_hands_are_detected() {
        assert!(hand_of(&[Rank::Ace, Rank::Six]).is_soft());
        assert!(!hand_of(&[Rank::Ace, Rank::Six, Rank::Ten]).is_soft());
        assert!(!hand_of(&[Rank::Ten, Rank::Seven]).is_soft());
    }
}
