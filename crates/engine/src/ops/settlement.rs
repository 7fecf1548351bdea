use chrono::NaiveDate;

use crate::{
    Amount, CURRENT_USER_ID, NewTransaction, ResultEngine, SettlementError, Store, Transaction,
    ValidationError,
};

use super::Engine;

impl<S: Store> Engine<S> {
    /// Record a real-world payment of `amount` between the current user and
    /// `user_id`, moving their balance towards zero.
    ///
    /// The payment stores both sides: the friend's entry and the mirrored
    /// entry of the current user. It goes through the ordinary create path.
    pub fn settle_up(
        &mut self,
        user_id: &str,
        amount: Amount,
        date: NaiveDate,
    ) -> ResultEngine<Transaction> {
        let candidate = self.settlement_for(user_id, amount, date)?;
        self.create_transaction(candidate)
    }

    /// Settle the whole outstanding balance with `user_id`.
    pub fn settle_all(&mut self, user_id: &str, date: NaiveDate) -> ResultEngine<Transaction> {
        let user = self.user(user_id)?;
        if user.is_friend() && user.balance.is_zero() {
            return Err(SettlementError::NothingToSettle {
                user_id: user_id.to_string(),
            }
            .into());
        }
        let outstanding = user.balance.abs();
        self.settle_up(user_id, outstanding, date)
    }

    fn settlement_for(
        &self,
        user_id: &str,
        amount: Amount,
        date: NaiveDate,
    ) -> ResultEngine<NewTransaction> {
        let user = self.user(user_id)?;
        if user.is_current() {
            return Err(ValidationError::SelfSettlement.into());
        }
        if user.is_group() {
            return Err(ValidationError::GroupParticipant {
                user_id: user_id.to_string(),
            }
            .into());
        }
        if !amount.is_positive() {
            return Err(ValidationError::InvalidAmount(format!(
                "settlement amount must be > 0, got {amount}"
            ))
            .into());
        }
        if user.balance.is_zero() {
            return Err(SettlementError::NothingToSettle {
                user_id: user_id.to_string(),
            }
            .into());
        }
        if amount > user.balance.abs() {
            return Err(SettlementError::AmountExceedsBalance {
                requested: amount,
                available: user.balance.abs(),
            }
            .into());
        }

        let owed_to_you = user.balance.is_positive();
        let (title, friend_delta) = if owed_to_you {
            (format!("{} paid you", user.name), -amount)
        } else {
            (format!("You paid {}", user.name), amount)
        };

        Ok(NewTransaction::payment(title, date, amount)
            .participant(user_id, friend_delta)
            .participant(CURRENT_USER_ID, -friend_delta))
    }
}
