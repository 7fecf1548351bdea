//! Transaction admission rules.
//!
//! [`validate`] is the only way to obtain a [`ValidatedTransaction`], and the
//! engine only inserts validated transactions. All checks run against the
//! store without mutating it.

use std::collections::HashSet;

use crate::{
    Amount, CURRENT_USER_ID, NewTransaction, SplitMode, Store, TransactionKind, ValidationError,
};

/// A candidate that passed every admission rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedTransaction(NewTransaction);

impl ValidatedTransaction {
    pub fn get(&self) -> &NewTransaction {
        &self.0
    }

    pub(crate) fn into_inner(self) -> NewTransaction {
        self.0
    }
}

/// Checks `candidate` against the per-type invariants; the first failing rule
/// is reported.
pub fn validate<S: Store>(
    store: &S,
    candidate: NewTransaction,
) -> Result<ValidatedTransaction, ValidationError> {
    if candidate.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if !candidate.total_amount.in_range() {
        return Err(ValidationError::InvalidAmount(format!(
            "total amount {} is too large",
            candidate.total_amount
        )));
    }
    if candidate.total_amount.is_negative() {
        return Err(ValidationError::InvalidAmount(format!(
            "total amount must be >= 0, got {}",
            candidate.total_amount
        )));
    }
    if candidate.involved_users.is_empty() {
        return Err(ValidationError::EmptyParticipants);
    }

    let mut seen = HashSet::new();
    for involvement in &candidate.involved_users {
        let user_id = involvement.user_id.as_str();
        let user = store
            .user(user_id)
            .ok_or_else(|| ValidationError::UnknownParticipant {
                user_id: user_id.to_string(),
            })?;
        if user.is_group() {
            return Err(ValidationError::GroupParticipant {
                user_id: user_id.to_string(),
            });
        }
        if !seen.insert(user_id) {
            return Err(ValidationError::DuplicateParticipant {
                user_id: user_id.to_string(),
            });
        }
        if !involvement.amount.in_range() {
            return Err(ValidationError::InvalidAmount(format!(
                "amount {} for \"{user_id}\" is too large",
                involvement.amount
            )));
        }
        if user.balance.checked_add(involvement.amount).is_none() {
            return Err(ValidationError::BalanceOutOfRange {
                user_id: user_id.to_string(),
            });
        }
    }

    let sum = Amount::checked_sum(candidate.involved_users.iter().map(|i| i.amount))
        .ok_or_else(|| ValidationError::InvalidAmount("amounts add up to too much".to_string()))?;
    match &candidate.kind {
        TransactionKind::Game { .. } => validate_game(&candidate, sum)?,
        TransactionKind::Loan { .. } | TransactionKind::Expense { .. } => {
            if candidate.split == SplitMode::Custom
                && !sum.within_tolerance(candidate.total_amount)
            {
                return Err(ValidationError::SplitMismatch {
                    expected: candidate.total_amount,
                    actual: sum,
                });
            }
        }
        TransactionKind::Payment => validate_payment(&candidate)?,
    }

    Ok(ValidatedTransaction(candidate))
}

fn validate_game(candidate: &NewTransaction, sum: Amount) -> Result<(), ValidationError> {
    if !candidate.total_amount.is_zero() {
        return Err(ValidationError::InvalidAmount(format!(
            "a game redistributes money, its total must be 0, got {}",
            candidate.total_amount
        )));
    }
    let non_zero = candidate
        .involved_users
        .iter()
        .filter(|i| !i.amount.is_zero())
        .count();
    if non_zero < 2 {
        return Err(ValidationError::NotEnoughPlayers { non_zero });
    }
    if !sum.within_tolerance(Amount::ZERO) {
        return Err(ValidationError::GameNotZeroSum { sum });
    }
    Ok(())
}

/// A payment has exactly one counterpart, optionally mirrored by an entry for
/// the current user.
fn validate_payment(candidate: &NewTransaction) -> Result<(), ValidationError> {
    let (own, others): (Vec<_>, Vec<_>) = candidate
        .involved_users
        .iter()
        .partition(|i| i.user_id == CURRENT_USER_ID);

    let [counterpart] = others.as_slice() else {
        return Err(ValidationError::InvalidPayment(format!(
            "expected exactly one counterpart, got {}",
            others.len()
        )));
    };
    if counterpart.amount.is_zero() {
        return Err(ValidationError::InvalidPayment(
            "payment amount must not be 0".to_string(),
        ));
    }
    if let Some(mirror) = own.first()
        && mirror.amount != -counterpart.amount
    {
        return Err(ValidationError::InvalidPayment(format!(
            "current user entry {} does not mirror {}",
            mirror.amount, counterpart.amount
        )));
    }
    if !candidate.total_amount.within_tolerance(counterpart.amount.abs()) {
        return Err(ValidationError::SplitMismatch {
            expected: candidate.total_amount,
            actual: counterpart.amount.abs(),
        });
    }
    Ok(())
}
