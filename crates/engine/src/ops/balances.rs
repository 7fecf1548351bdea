use std::collections::HashMap;

use crate::{Amount, Store, Transaction};

use super::Engine;

/// A user whose cached balance disagrees with a replay of the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceDrift {
    pub user_id: String,
    pub cached: Amount,
    pub replayed: Amount,
}

impl<S: Store> Engine<S> {
    /// Add every entry of `tx` to the matching user's balance. Entries whose
    /// user no longer exists are skipped.
    pub(crate) fn apply_transaction(&mut self, tx: &Transaction) {
        for involvement in &tx.involved_users {
            if let Some(user) = self.store.user_mut(&involvement.user_id) {
                user.balance += involvement.amount;
            }
        }
    }

    pub(crate) fn reverse_transaction(&mut self, tx: &Transaction) {
        for involvement in &tx.involved_users {
            if let Some(user) = self.store.user_mut(&involvement.user_id) {
                user.balance -= involvement.amount;
            }
        }
    }

    /// Balances obtained by replaying every stored transaction from zero.
    ///
    /// Only users that still exist are reported.
    pub fn replayed_balances(&self) -> HashMap<String, Amount> {
        let mut balances: HashMap<String, Amount> = self
            .store
            .users()
            .into_iter()
            .map(|u| (u.id.clone(), Amount::ZERO))
            .collect();
        for tx in self.store.transactions() {
            for involvement in &tx.involved_users {
                if let Some(balance) = balances.get_mut(&involvement.user_id) {
                    *balance += involvement.amount;
                }
            }
        }
        balances
    }

    /// Every user whose cached balance differs from the replayed one, in
    /// creation order. Empty when the ledger is consistent.
    pub fn audit_balances(&self) -> Vec<BalanceDrift> {
        let replayed = self.replayed_balances();
        self.store
            .users()
            .into_iter()
            .filter_map(|user| {
                let expected = replayed.get(&user.id).copied().unwrap_or(Amount::ZERO);
                (expected != user.balance).then(|| BalanceDrift {
                    user_id: user.id.clone(),
                    cached: user.balance,
                    replayed: expected,
                })
            })
            .collect()
    }

    /// Overwrite every drifted cached balance with its replayed value and
    /// return what was corrected.
    pub fn recompute_balances(&mut self) -> Vec<BalanceDrift> {
        let drifts = self.audit_balances();
        for drift in &drifts {
            if let Some(user) = self.store.user_mut(&drift.user_id) {
                user.balance = drift.replayed;
            }
        }
        drifts
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{Amount, Engine, NewTransaction, NewUser, Store};

    #[test]
    fn recompute_repairs_a_tampered_cache() {
        let mut engine = Engine::builder().build();
        let alex = engine.create_user(NewUser::friend("Alex", "a")).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 11, 27).unwrap();
        engine
            .create_transaction(
                NewTransaction::loan("Dinner", date, Amount::from_tenths(850))
                    .participant(&alex.id, Amount::from_tenths(425)),
            )
            .unwrap();
        assert!(engine.audit_balances().is_empty());

        if let Some(user) = engine.store.user_mut(&alex.id) {
            user.balance = Amount::from_tenths(1);
        }
        let drifts = engine.recompute_balances();
        assert_eq!(drifts.len(), 1);
        assert_eq!(drifts[0].cached, Amount::from_tenths(1));
        assert_eq!(drifts[0].replayed, Amount::from_tenths(425));
        assert_eq!(engine.balance(&alex.id).unwrap(), Amount::from_tenths(425));
        assert!(engine.audit_balances().is_empty());
    }
}
