//! Read-only aggregates, recomputed from the store on every call.
//!
//! Balance aggregates only look at friends: groups carry no balance and the
//! current user is the reference point, not a counterpart.

use std::collections::HashMap;

use serde::Serialize;

use crate::{Amount, CURRENT_USER_ID, GameType, Store, Transaction, TransactionType, User};

use super::Engine;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GameTypeCounts {
    pub poker: usize,
    pub mahjong: usize,
    pub blackjack: usize,
}

impl GameTypeCounts {
    pub fn get(&self, game_type: GameType) -> usize {
        match game_type {
            GameType::Poker => self.poker,
            GameType::Mahjong => self.mahjong,
            GameType::Blackjack => self.blackjack,
        }
    }

    fn bump(&mut self, game_type: GameType) {
        match game_type {
            GameType::Poker => self.poker += 1,
            GameType::Mahjong => self.mahjong += 1,
            GameType::Blackjack => self.blackjack += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub user_id: String,
    pub name: String,
    pub balance: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameCount {
    pub user_id: String,
    pub name: String,
    pub games: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Achievements {
    /// Top of the leaderboard, current user included.
    pub biggest_winner: Option<Standing>,
    /// Player with the most game participations.
    pub most_played: Option<GameCount>,
}

impl<S: Store> Engine<S> {
    fn friend_balances(&self) -> impl Iterator<Item = Amount> + '_ {
        self.store
            .users()
            .into_iter()
            .filter(|u| u.is_friend())
            .map(|u| u.balance)
    }

    /// What the current user owes, over all friends they owe money to.
    pub fn total_owed(&self) -> Amount {
        self.friend_balances()
            .filter(|b| b.is_negative())
            .map(Amount::abs)
            .sum()
    }

    /// What friends owe the current user.
    pub fn total_owed_to_you(&self) -> Amount {
        self.friend_balances().filter(|b| b.is_positive()).sum()
    }

    pub fn net_balance(&self) -> Amount {
        self.friend_balances().sum()
    }

    /// Sum of the current user's own entries in loans.
    ///
    /// Scans the log instead of reading `User::balance`, which mixes every
    /// transaction type.
    pub fn loan_balance(&self) -> Amount {
        self.own_amount_in(TransactionType::Loan)
    }

    /// Sum of the current user's own game results.
    pub fn game_balance(&self) -> Amount {
        self.own_amount_in(TransactionType::Game)
    }

    fn own_amount_in(&self, kind: TransactionType) -> Amount {
        self.store
            .transactions()
            .into_iter()
            .filter(|tx| tx.transaction_type() == kind)
            .filter_map(|tx| tx.amount_for(CURRENT_USER_ID))
            .sum()
    }

    /// Friends by balance, highest first; equal balances keep creation order.
    pub fn leaderboard(&self, include_current: bool) -> Vec<&User> {
        let mut ranked: Vec<&User> = self
            .store
            .users()
            .into_iter()
            .filter(|u| u.is_friend() || (include_current && u.is_current()))
            .collect();
        // `users()` is in creation order and the sort is stable.
        ranked.sort_by(|a, b| b.balance.cmp(&a.balance));
        ranked
    }

    /// Number of games per type; types never played count 0.
    pub fn game_type_counts(&self) -> GameTypeCounts {
        let mut counts = GameTypeCounts::default();
        for game_type in self.store.transactions().into_iter().filter_map(Transaction::game_type) {
            counts.bump(game_type);
        }
        counts
    }

    /// The most recent game.
    pub fn last_game(&self) -> Option<&Transaction> {
        self.store
            .transactions()
            .into_iter()
            .find(|tx| tx.transaction_type() == TransactionType::Game)
    }

    pub fn achievements(&self) -> Achievements {
        let biggest_winner = self.leaderboard(true).first().map(|u| Standing {
            user_id: u.id.clone(),
            name: u.name.clone(),
            balance: u.balance,
        });

        let mut games: HashMap<&str, usize> = HashMap::new();
        for tx in self.transactions_of_type(TransactionType::Game) {
            for involvement in &tx.involved_users {
                *games.entry(involvement.user_id.as_str()).or_default() += 1;
            }
        }
        let most_played = self
            .store
            .users()
            .into_iter()
            .filter(|u| u.is_friend() || u.is_current())
            .filter_map(|u| games.get(u.id.as_str()).map(|count| (u, *count)))
            .fold(None::<(&User, usize)>, |best, (user, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((user, count)),
            })
            .map(|(user, games)| GameCount {
                user_id: user.id.clone(),
                name: user.name.clone(),
                games,
            });

        Achievements {
            biggest_winner,
            most_played,
        }
    }
}
