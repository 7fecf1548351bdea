use uuid::Uuid;

use crate::{
    EngineError, NewTransaction, ResultEngine, Store, Transaction, TransactionType,
    ValidationError,
    validation::{self, ValidatedTransaction},
};

use super::Engine;

impl<S: Store> Engine<S> {
    pub fn transaction(&self, id: &str) -> ResultEngine<&Transaction> {
        self.store
            .transaction(id)
            .ok_or_else(|| EngineError::transaction_not_found(id))
    }

    /// All transactions, most recent first (date descending, then creation
    /// order descending).
    pub fn transactions(&self) -> Vec<&Transaction> {
        self.store.transactions()
    }

    pub fn transactions_of_type(&self, kind: TransactionType) -> Vec<&Transaction> {
        self.store
            .transactions()
            .into_iter()
            .filter(|tx| tx.transaction_type() == kind)
            .collect()
    }

    /// History shared with one user, most recent first. Works for deleted
    /// users too, since their transactions are kept.
    pub fn transactions_for_user(&self, user_id: &str) -> Vec<&Transaction> {
        self.store
            .transactions()
            .into_iter()
            .filter(|tx| tx.involves(user_id))
            .collect()
    }

    /// Run the admission rules without touching the ledger.
    pub fn validate(&self, candidate: NewTransaction) -> ResultEngine<ValidatedTransaction> {
        Ok(validation::validate(&self.store, candidate)?)
    }

    /// Validate `candidate`, store it and apply its deltas to every involved
    /// user. A rejected candidate leaves the ledger untouched.
    pub fn create_transaction(&mut self, candidate: NewTransaction) -> ResultEngine<Transaction> {
        let validated = self.validate(candidate)?;
        Ok(self.insert_validated(validated))
    }

    /// Store a transaction validated against this store under a fresh id and
    /// apply it. Callers must not release `&mut self` between the two steps.
    fn insert_validated(&mut self, validated: ValidatedTransaction) -> Transaction {
        let candidate = validated.into_inner();
        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            seq: self.store.next_seq(),
            title: candidate.title.trim().to_string(),
            kind: candidate.kind,
            date: candidate.date,
            total_amount: candidate.total_amount,
            involved_users: candidate.involved_users,
            notes: candidate.notes.filter(|n| !n.trim().is_empty()),
        };

        self.store.insert_transaction(tx.clone());
        self.apply_transaction(&tx);
        tracing::debug!(
            transaction_id = %tx.id,
            kind = %tx.transaction_type(),
            "transaction created"
        );
        tx
    }

    /// Reverse a transaction's deltas and remove it. Unknown ids are a no-op.
    ///
    /// Fails without touching the ledger when a reversed balance would leave
    /// the supported range.
    pub fn delete_transaction(&mut self, id: &str) -> ResultEngine<Option<Transaction>> {
        let Some(tx) = self.store.transaction(id).cloned() else {
            return Ok(None);
        };
        for involvement in &tx.involved_users {
            let Some(user) = self.store.user(&involvement.user_id) else {
                continue;
            };
            if user.balance.checked_sub(involvement.amount).is_none() {
                return Err(ValidationError::BalanceOutOfRange {
                    user_id: user.id.clone(),
                }
                .into());
            }
        }
        self.reverse_transaction(&tx);
        let removed = self.store.remove_transaction(id);
        tracing::debug!(transaction_id = %id, "transaction deleted");
        Ok(removed)
    }
}
