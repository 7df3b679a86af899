//! The single bankroll shared by both games. The in-memory balance is the
//! authority for the lifetime of the process; an injected `BalanceStore` is
//! told about every mutation so the value survives across sessions.

use crate::CasinoGameError;

/// The balance a fresh bankroll starts with when the store has nothing saved.
pub const DEFAULT_BALANCE: u32 = 1000;

/// Persistence port for the bankroll. The application crate supplies a
/// file-backed implementation; tests supply an in-memory one.
pub trait BalanceStore {
    /// Returns the previously saved balance, or `None` if nothing was saved.
    fn load(&self) -> Option<u32>;
    /// Persists the balance. Called after every bankroll mutation.
    fn save(&mut self, balance: u32);
}

/// The player's money. Never negative, mutated only by the settlement paths
/// of the two engines through `debit` and `credit`.
pub struct Bankroll {
    balance: u32,
    store: Option<Box<dyn BalanceStore + Send>>,
}

impl Bankroll {
    /// Associated function for a bankroll with no backing store, used by
    /// tests and callers that manage persistence themselves.
    pub fn new(balance: u32) -> Bankroll {
        Bankroll {
            balance,
            store: None,
        }
    }

    /// Associated function that loads the saved balance from `store`, or
    /// starts at `DEFAULT_BALANCE` if the store has nothing.
    pub fn with_store(store: Box<dyn BalanceStore + Send>) -> Bankroll {
        let balance = store.load().unwrap_or(DEFAULT_BALANCE);
        Bankroll {
            balance,
            store: Some(store),
        }
    }

    /// Getter method for the current balance.
    pub fn balance(&self) -> u32 {
        self.balance
    }

    /// Method that removes `amount` from the balance. Fails with
    /// `InsufficientFunds` (and mutates nothing) if the balance would go
    /// negative.
    pub fn debit(&mut self, amount: u32) -> Result<(), CasinoGameError> {
        if amount > self.balance {
            return Err(CasinoGameError::InsufficientFunds);
        }
        self.balance -= amount;
        self.persist();
        Ok(())
    }

    /// Method that adds `amount` to the balance. No upper bound.
    pub fn credit(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
        self.persist();
    }

    fn persist(&mut self) {
        if let Some(store) = self.store.as_mut() {
            store.save(self.balance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingStore {
        saved: Arc<Mutex<Vec<u32>>>,
        initial: Option<u32>,
    }

    impl BalanceStore for RecordingStore {
        fn load(&self) -> Option<u32> {
            self.initial
        }

        fn save(&mut self, balance: u32) {
            self.saved.lock().unwrap().push(balance);
        }
    }

    #[test]
    fn debit_and_credit_move_the_balance() {
        let mut bankroll = Bankroll::new(100);
        bankroll.debit(40).unwrap();
        assert_eq!(bankroll.balance(), 60);
        bankroll.credit(80);
        assert_eq!(bankroll.balance(), 140);
    }

    #[test]
    fn debit_beyond_the_balance_is_rejected_without_mutation() {
        let mut bankroll = Bankroll::new(50);
        assert_eq!(bankroll.debit(51), Err(CasinoGameError::InsufficientFunds));
        assert_eq!(bankroll.balance(), 50);
        // The full balance is still allowed.
        bankroll.debit(50).unwrap();
        assert_eq!(bankroll.balance(), 0);
        assert_eq!(bankroll.debit(1), Err(CasinoGameError::InsufficientFunds));
    }

    #[test]
    fn every_mutation_is_saved_to_the_store() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let store = RecordingStore {
            saved: Arc::clone(&saved),
            initial: Some(100),
        };
        let mut bankroll = Bankroll::with_store(Box::new(store));
        assert_eq!(bankroll.balance(), 100);

        bankroll.debit(30).unwrap();
        bankroll.credit(10);
        let _ = bankroll.debit(1000); // rejected, must not save
        bankroll.credit(0);

        assert_eq!(*saved.lock().unwrap(), vec![70, 80, 80]);
    }

    #[test]
    fn empty_store_falls_back_to_the_default_balance() {
        let store = RecordingStore {
            saved: Arc::new(Mutex::new(Vec::new())),
            initial: None,
        };
        let bankroll = Bankroll::with_store(Box::new(store));
        assert_eq!(bankroll.balance(), DEFAULT_BALANCE);
    }
}
