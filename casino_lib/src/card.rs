//! The card and deck model. A deck is always built from the full 52-card
//! suit-by-rank grid and only ever shrinks: shuffling permutes it, drawing
//! removes from the top, and nothing is put back until a fresh deck is built
//! for the next round.

use crate::CasinoGameError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// The base scoring value of the rank: face value for the numeric ranks,
    /// 10 for the face cards and 11 for an ace. Ace demotion to 1 is a hand
    /// level concern, see `Hand::value`.
    pub fn base_value(&self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// A single playing card. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Card {
        Card { suit, rank }
    }

    pub fn base_value(&self) -> u8 {
        self.rank.base_value()
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rank.label())
    }
}

/// An ordered pile of cards, drawn from the top.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Associated function that returns the full 52-card deck in its
    /// deterministic suit-major order, one card per suit and rank pair.
    pub fn standard() -> Deck {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }
        Deck { cards }
    }

    /// Associated function that builds a deck with a known draw order, used
    /// for deterministic replays and scenario tests. The first card of
    /// `cards` is the first card drawn.
    pub fn stacked<I: IntoIterator<Item = Card>>(cards: I) -> Deck {
        let mut cards = cards.into_iter().collect::<Vec<Card>>();
        // Draws pop from the back, so the requested draw order is reversed.
        cards.reverse();
        Deck { cards }
    }

    /// Method that permutes the deck uniformly at random with the given rng.
    /// `SliceRandom::shuffle` performs the backward Fisher-Yates walk, so
    /// each of the 52! orderings is equally likely.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Method that removes and returns the top card of the deck. Fails with
    /// `EmptyDeck` once all cards have been drawn.
    pub fn draw(&mut self) -> Result<Card, CasinoGameError> {
        self.cards.pop().ok_or(CasinoGameError::EmptyDeck)
    }

    /// Getter method for the number of cards still in the deck.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.remaining(), 52);
        let unique = deck.cards.iter().collect::<HashSet<&Card>>();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn shuffle_preserves_the_card_multiset() {
        let mut deck = Deck::standard();
        let before = deck.cards.iter().copied().collect::<HashSet<Card>>();
        let mut rng = StdRng::seed_from_u64(7);
        deck.shuffle(&mut rng);
        let after = deck.cards.iter().copied().collect::<HashSet<Card>>();
        assert_eq!(deck.remaining(), 52);
        assert_eq!(before, after);
    }

    #[test]
    fn deck_empties_after_52_draws_and_the_53rd_fails() {
        let mut deck = Deck::standard();
        for i in 0..52 {
            assert_eq!(deck.remaining(), 52 - i);
            deck.draw().expect("deck should not be empty yet");
        }
        assert_eq!(deck.remaining(), 0);
        assert_eq!(deck.draw(), Err(CasinoGameError::EmptyDeck));
    }

    #[test]
    fn stacked_deck_draws_in_the_given_order() {
        let ten = Card::new(Suit::Hearts, Rank::Ten);
        let ace = Card::new(Suit::Spades, Rank::Ace);
        let mut deck = Deck::stacked([ten, ace]);
        assert_eq!(deck.draw().unwrap(), ten);
        assert_eq!(deck.draw().unwrap(), ace);
        assert_eq!(deck.draw(), Err(CasinoGameError::EmptyDeck));
    }

    #[test]
    fn face_cards_score_ten_and_aces_score_eleven() {
        assert_eq!(Card::new(Suit::Clubs, Rank::King).base_value(), 10);
        assert_eq!(Card::new(Suit::Clubs, Rank::Jack).base_value(), 10);
        assert_eq!(Card::new(Suit::Clubs, Rank::Ace).base_value(), 11);
        assert_eq!(Card::new(Suit::Clubs, Rank::Four).base_value(), 4);
    }
}
