//! Transaction primitives.
//!
//! A [`Transaction`] is an immutable record whose [`Involvement`]s are the
//! per-user balance deltas it applies. Corrections are modelled as delete and
//! recreate.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Amount, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Poker,
    Mahjong,
    Blackjack,
}

impl GameType {
    pub const ALL: [GameType; 3] = [Self::Poker, Self::Mahjong, Self::Blackjack];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Poker => "poker",
            Self::Mahjong => "mahjong",
            Self::Blackjack => "blackjack",
        }
    }
}

impl TryFrom<&str> for GameType {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "poker" => Ok(Self::Poker),
            "mahjong" => Ok(Self::Mahjong),
            "blackjack" => Ok(Self::Blackjack),
            other => Err(ValidationError::UnknownType(format!("game type {other}"))),
        }
    }
}

/// Transaction type together with the data only that type carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    /// Shared cost paid by the current user; amounts are what each friend owes.
    Loan { category: Option<String> },
    Expense { category: Option<String> },
    /// Zero-sum redistribution among players.
    Game { game_type: GameType },
    /// Settle-up record.
    Payment,
}

impl TransactionKind {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Loan { .. } => TransactionType::Loan,
            Self::Expense { .. } => TransactionType::Expense,
            Self::Game { .. } => TransactionType::Game,
            Self::Payment => TransactionType::Payment,
        }
    }
}

/// Plain discriminant of [`TransactionKind`], used for filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Loan,
    Expense,
    Game,
    Payment,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loan => "loan",
            Self::Expense => "expense",
            Self::Game => "game",
            Self::Payment => "payment",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loan" => Ok(Self::Loan),
            "expense" => Ok(Self::Expense),
            "game" => Ok(Self::Game),
            "payment" => Ok(Self::Payment),
            other => Err(ValidationError::UnknownType(format!(
                "transaction type {other}"
            ))),
        }
    }
}

/// One participant's signed share of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Involvement {
    pub user_id: String,
    pub amount: Amount,
}

impl Involvement {
    pub fn new(user_id: impl Into<String>, amount: Amount) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Creation order, breaks ties between transactions on the same date.
    pub seq: u64,
    pub title: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    /// Nominal size of the transaction; 0 for games.
    pub total_amount: Amount,
    pub involved_users: Vec<Involvement>,
    pub notes: Option<String>,
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.kind.transaction_type()
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.involved_users.iter().any(|i| i.user_id == user_id)
    }

    /// Net delta this transaction applies to `user_id`.
    pub fn amount_for(&self, user_id: &str) -> Option<Amount> {
        let mut entries = self
            .involved_users
            .iter()
            .filter(|i| i.user_id == user_id)
            .peekable();
        entries.peek()?;
        Some(entries.map(|i| i.amount).sum())
    }

    pub fn game_type(&self) -> Option<GameType> {
        match self.kind {
            TransactionKind::Game { game_type } => Some(game_type),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            TransactionKind::Loan { category } | TransactionKind::Expense { category } => {
                category.as_deref()
            }
            _ => None,
        }
    }
}

/// Most recent first: date descending, then most recently created first.
pub fn recency_order(a: &Transaction, b: &Transaction) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.seq.cmp(&a.seq))
}
