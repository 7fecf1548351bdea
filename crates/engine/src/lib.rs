//! Balance ledger for a small group of friends.
//!
//! Users log shared loans and expenses, zero-sum game results and settle-up
//! payments. The [`Engine`] validates every transaction before admitting it
//! and keeps each friend's running balance against the current user equal to
//! the sum of that friend's entries across the stored log.

pub use commands::{NewTransaction, SplitMode};
pub use error::{EngineError, Entity, SettlementError, ValidationError};
pub use money::Amount;
pub use ops::{
    Achievements, BalanceDrift, Engine, EngineBuilder, GameCount, GameTypeCounts, Standing,
};
pub use store::{MemStore, Store};
pub use transactions::{GameType, Involvement, Transaction, TransactionKind, TransactionType};
pub use users::{CURRENT_USER_ID, NewUser, User, UserKind};
pub use validation::ValidatedTransaction;

mod commands;
mod error;
mod money;
mod ops;
pub mod seed;
mod store;
mod transactions;
mod users;
mod validation;

pub type ResultEngine<T> = Result<T, EngineError>;
