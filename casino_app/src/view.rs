//! Console presentation: a pure projection of engine state onto stdout. The
//! dealer's hole card renders as `Hidden` while the view says to conceal it,
//! matching what the player is allowed to know mid-round.

use casino_lib::blackjack::TableView;
use casino_lib::roulette::SpinResult;

const WIDTH: usize = 80;

/// Prints the current balance line.
pub fn render_balance(balance: u32) {
    println!("{:<20}${}", "balance:", balance);
}

/// Prints both hands and their scores. The dealer's first card is shown as
/// `Hidden` while concealed.
pub fn render_table(view: &TableView) {
    let dealer_cards = view
        .dealer_cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            if view.conceal_hole_card && i == 0 {
                "Hidden".to_string()
            } else {
                card.to_string()
            }
        })
        .collect::<Vec<String>>()
        .join(" ");
    let player_cards = view
        .player_cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<String>>()
        .join(" ");

    println!("{:<20}{}", "dealer's hand:", dealer_cards);
    println!("{:<20}Score: {}", "", view.dealer_value);
    println!("{:<20}{}", "your hand:", player_cards);
    println!("{:<20}Score: {}", "", view.player_value);
}

/// Prints the spin result: the pocket announcement, then the win/loss line.
pub fn render_spin(result: &SpinResult) {
    println!("{}", result.pocket_message());
    println!("{}", result.outcome_message());
}

/// Prints a full-width divider between rounds.
pub fn render_divider() {
    println!("{}", "-".repeat(WIDTH));
}
