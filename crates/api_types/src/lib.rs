//! JSON bodies exchanged with the ledger server.
//!
//! Amounts travel as plain JSON numbers with at most one decimal; the server
//! rounds them to tenths before they reach the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine readable error kind, e.g. `game_not_zero_sum`.
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Success {
    pub success: bool,
}

pub mod user {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct User {
        pub id: String,
        pub name: String,
        pub avatar: String,
        pub balance: f64,
        pub is_group: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub members: Option<Vec<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserNew {
        pub name: String,
        pub avatar: String,
        #[serde(default)]
        pub is_group: Option<bool>,
        /// Member ids; required when `is_group` is true.
        #[serde(default)]
        pub members: Option<Vec<String>>,
    }

    /// Body of `PATCH /users/current`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CurrentUserUpdate {
        pub name: String,
        pub avatar: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionType {
        Loan,
        Expense,
        Game,
        Payment,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum GameType {
        Poker,
        Mahjong,
        Blackjack,
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitType {
        #[default]
        Equal,
        /// Amounts entered by hand; they must add up to the total.
        Unequal,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionUser {
        pub user_id: String,
        pub amount: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: String,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub game_type: Option<GameType>,
        pub date: NaiveDate,
        pub total_amount: f64,
        pub involved_users: Vec<TransactionUser>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub notes: Option<String>,
    }

    /// Body of `POST /transactions`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub title: String,
        #[serde(default)]
        pub category: Option<String>,
        /// Required for games, rejected for every other type.
        #[serde(default)]
        pub game_type: Option<GameType>,
        /// Defaults to the server's current date.
        #[serde(default)]
        pub date: Option<NaiveDate>,
        #[serde(default)]
        pub total_amount: f64,
        pub involved_users: Vec<TransactionUser>,
        #[serde(default)]
        pub notes: Option<String>,
        #[serde(default)]
        pub split_type: SplitType,
    }

    /// Query of `GET /transactions`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionFilter {
        #[serde(rename = "type", default)]
        pub kind: Option<TransactionType>,
    }
}

pub mod balance {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Balance {
        pub user_id: String,
        pub balance: f64,
    }
}

pub mod settle {
    use super::*;

    /// Body of `POST /settle`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Settle {
        pub user_id: String,
        /// Settles the whole outstanding balance when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amount: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date: Option<NaiveDate>,
    }
}

pub mod stats {
    use super::*;
    use crate::{transaction::Transaction, user::User};

    #[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct GameStats {
        pub poker: usize,
        pub mahjong: usize,
        pub blackjack: usize,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Standing {
        pub user_id: String,
        pub name: String,
        pub balance: f64,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GameCount {
        pub user_id: String,
        pub name: String,
        pub games: usize,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Achievements {
        pub biggest_winner: Option<Standing>,
        pub most_played: Option<GameCount>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Stats {
        pub total_owed: f64,
        pub total_owed_to_you: f64,
        pub net_balance: f64,
        pub loan_balance: f64,
        pub game_balance: f64,
        /// Top friends by balance, highest first.
        pub leaderboard: Vec<User>,
        pub game_stats: GameStats,
        pub total_transactions: usize,
        pub last_game: Option<Transaction>,
        pub achievements: Achievements,
    }
}
