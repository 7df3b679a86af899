//! Persistence collaborator: a small JSON key-value file that keeps the
//! bankroll across sessions. Missing or unreadable files just mean nothing
//! was saved yet; save failures are reported and never crash a round.

use casino_lib::bankroll::BalanceStore;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// The key the balance is stored under.
pub const BALANCE_KEY: &str = "casinoPlayerMoney";

/// File-backed balance store.
pub struct FileBalanceStore {
    path: PathBuf,
}

impl FileBalanceStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> FileBalanceStore {
        FileBalanceStore { path: path.into() }
    }

    fn read_map(&self) -> Option<HashMap<String, u32>> {
        let contents = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }
}

impl BalanceStore for FileBalanceStore {
    fn load(&self) -> Option<u32> {
        self.read_map()?.get(BALANCE_KEY).copied()
    }

    fn save(&mut self, balance: u32) {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(BALANCE_KEY.to_string(), balance);
        match serde_json::to_string_pretty(&map) {
            Ok(contents) => {
                if let Err(e) = fs::write(&self.path, contents) {
                    eprintln!("error: could not save balance to {:?}: {e}", self.path);
                }
            }
            Err(e) => eprintln!("error: could not serialize balance: {e}"),
        }
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    saved: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore { saved: None }
    }

    pub fn with_balance(balance: u32) -> MemoryStore {
        MemoryStore {
            saved: Some(balance),
        }
    }
}

impl BalanceStore for MemoryStore {
    fn load(&self) -> Option<u32> {
        self.saved
    }

    fn save(&mut self, balance: u32) {
        self.saved = Some(balance);
    }
}
