//! Entity storage.
//!
//! The [`Store`] trait is the seam between the ledger logic and where users
//! and transactions live. [`MemStore`] keeps everything in process memory.

use std::collections::HashMap;

use crate::{Transaction, User, transactions::recency_order};

/// Backing storage for users and transactions.
///
/// Implementations only store; invariants are enforced by the
/// [`Engine`](crate::Engine) before anything reaches the store.
pub trait Store {
    /// Returns a fresh, strictly increasing sequence number.
    fn next_seq(&mut self) -> u64;

    fn user(&self, id: &str) -> Option<&User>;
    fn user_mut(&mut self, id: &str) -> Option<&mut User>;
    /// All users in creation order.
    fn users(&self) -> Vec<&User>;
    fn insert_user(&mut self, user: User);
    fn remove_user(&mut self, id: &str) -> Option<User>;

    fn transaction(&self, id: &str) -> Option<&Transaction>;
    /// All transactions, most recent first.
    fn transactions(&self) -> Vec<&Transaction>;
    fn insert_transaction(&mut self, tx: Transaction);
    fn remove_transaction(&mut self, id: &str) -> Option<Transaction>;
}

#[derive(Debug, Default)]
pub struct MemStore {
    seq: u64,
    users: HashMap<String, User>,
    transactions: HashMap<String, Transaction>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemStore {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    fn user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    fn users(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by_key(|u| u.seq);
        users
    }

    fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    fn remove_user(&mut self, id: &str) -> Option<User> {
        self.users.remove(id)
    }

    fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    fn transactions(&self) -> Vec<&Transaction> {
        let mut txs: Vec<&Transaction> = self.transactions.values().collect();
        txs.sort_by(|a, b| recency_order(a, b));
        txs
    }

    fn insert_transaction(&mut self, tx: Transaction) {
        self.transactions.insert(tx.id.clone(), tx);
    }

    fn remove_transaction(&mut self, id: &str) -> Option<Transaction> {
        self.transactions.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, UserKind};

    fn user(id: &str, seq: u64) -> User {
        User {
            id: id.to_string(),
            name: id.to_uppercase(),
            avatar: "micah".to_string(),
            balance: Amount::ZERO,
            kind: UserKind::Friend,
            seq,
        }
    }

    #[test]
    fn users_come_back_in_creation_order() {
        let mut store = MemStore::new();
        for id in ["c", "a", "b"] {
            let seq = store.next_seq();
            store.insert_user(user(id, seq));
        }
        let ids: Vec<_> = store.users().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn remove_missing_is_none() {
        let mut store = MemStore::new();
        assert!(store.remove_user("nope").is_none());
        assert!(store.remove_transaction("nope").is_none());
    }
}
