use casino_app::prelude::*;
use casino_app::view;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Console casino: blackjack and roulette against a bankroll saved between
/// sessions.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path of the JSON file the bankroll is saved in.
    #[arg(long, default_value = "casino_balance.json")]
    store: PathBuf,

    /// Balance a brand-new store starts with.
    #[arg(long, default_value_t = DEFAULT_BALANCE)]
    starting_balance: u32,

    /// Skip the dealer-draw and wheel-spin pacing delays.
    #[arg(long)]
    fast: bool,
}

fn main() {
    let args = Args::parse();

    let mut store = FileBalanceStore::new(&args.store);
    if store.load().is_none() && args.starting_balance != DEFAULT_BALANCE {
        store.save(args.starting_balance);
    }
    let mut session = CasinoSession::new(Box::new(store), args.fast);

    println!("Welcome to the casino.");
    print_help();
    view::render_balance(session.balance());

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some(c) => c,
            None => continue,
        };

        match command {
            "deal" => {
                let bet = words.next().unwrap_or("");
                match session.deal(bet) {
                    Ok(settled) => {
                        view::render_table(&session.blackjack_view());
                        view::render_balance(session.balance());
                        if let Some(outcome) = settled {
                            println!("{}", outcome.message());
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            "hit" => match session.hit() {
                Ok(settled) => {
                    view::render_table(&session.blackjack_view());
                    view::render_balance(session.balance());
                    if let Some(outcome) = settled {
                        println!("{}", outcome.message());
                    }
                }
                Err(e) => println!("{e}"),
            },
            "stay" => match session.stay(|table| view::render_table(table)) {
                Ok(outcome) => {
                    view::render_table(&session.blackjack_view());
                    view::render_balance(session.balance());
                    println!("{}", outcome.message());
                }
                Err(e) => println!("{e}"),
            },
            "spin" => {
                let bet = words.next().unwrap_or("").to_string();
                let kind = words.next().unwrap_or("").to_string();
                println!("Spinning...");
                match session.spin(&bet, &kind) {
                    Ok(result) => {
                        view::render_spin(&result);
                        view::render_balance(session.balance());
                    }
                    Err(e) => println!("{e}"),
                }
            }
            "balance" => view::render_balance(session.balance()),
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("unrecognized command: {other}"),
        }
        view::render_divider();
    }
}

fn print_help() {
    println!("commands:");
    println!("  deal BET                     start a blackjack round");
    println!("  hit                          draw another card");
    println!("  stay                         end your turn, dealer plays");
    println!("  spin BET red|black|even|odd|0-36");
    println!("                               spin the roulette wheel");
    println!("  balance                      show the bankroll");
    println!("  quit                         leave the table");
}
