use crate::{Amount, CURRENT_USER_ID, MemStore, Store, User, UserKind};

mod balances;
mod settlement;
mod statistics;
mod transactions;
mod users;

pub use balances::BalanceDrift;
pub use statistics::{Achievements, GameCount, GameTypeCounts, Standing};

/// The ledger: owns the store and keeps every cached balance in step with the
/// transaction log.
///
/// Mutations take `&mut self`; callers sharing an engine across tasks must
/// serialize them (the server wraps it in a `RwLock`).
#[derive(Debug)]
pub struct Engine<S = MemStore> {
    store: S,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl<S: Store> Engine<S> {
    /// Read-only access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[derive(Debug)]
pub struct EngineBuilder {
    current_user_name: String,
    current_user_avatar: String,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            current_user_name: "You".to_string(),
            current_user_avatar: "lorelei".to_string(),
        }
    }
}

impl EngineBuilder {
    /// Display name of the current user.
    pub fn current_user_name(mut self, name: impl Into<String>) -> EngineBuilder {
        self.current_user_name = name.into();
        self
    }

    pub fn current_user_avatar(mut self, avatar: impl Into<String>) -> EngineBuilder {
        self.current_user_avatar = avatar.into();
        self
    }

    /// Build an engine over a fresh [`MemStore`].
    pub fn build(self) -> Engine {
        self.build_with_store(MemStore::new())
    }

    /// Build an engine over `store`, creating the current user if the store
    /// does not hold one yet.
    pub fn build_with_store<S: Store>(self, mut store: S) -> Engine<S> {
        if store.user(CURRENT_USER_ID).is_none() {
            let seq = store.next_seq();
            store.insert_user(User {
                id: CURRENT_USER_ID.to_string(),
                name: self.current_user_name,
                avatar: self.current_user_avatar,
                balance: Amount::ZERO,
                kind: UserKind::Friend,
                seq,
            });
        }
        Engine { store }
    }
}
