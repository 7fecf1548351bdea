//! Command structs for engine write operations.
//!
//! [`NewTransaction`] is the candidate handed to the validator; builder-style
//! setters keep call sites readable.

use chrono::NaiveDate;

use crate::{Amount, GameType, Involvement, TransactionKind};

/// How a loan or expense was divided among its participants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitMode {
    /// Shares were computed by [`Engine::split_equally`](crate::Engine::split_equally);
    /// the payer keeps one share so entries do not add up to the total.
    #[default]
    Equal,
    /// Shares were entered by hand and must add up to the total.
    Custom,
}

/// Candidate transaction, not yet validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTransaction {
    pub title: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub total_amount: Amount,
    pub involved_users: Vec<Involvement>,
    pub notes: Option<String>,
    pub split: SplitMode,
}

impl NewTransaction {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        kind: TransactionKind,
        date: NaiveDate,
        total_amount: Amount,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            date,
            total_amount,
            involved_users: Vec::new(),
            notes: None,
            split: SplitMode::default(),
        }
    }

    #[must_use]
    pub fn loan(title: impl Into<String>, date: NaiveDate, total_amount: Amount) -> Self {
        Self::new(
            title,
            TransactionKind::Loan { category: None },
            date,
            total_amount,
        )
    }

    #[must_use]
    pub fn expense(title: impl Into<String>, date: NaiveDate, total_amount: Amount) -> Self {
        Self::new(
            title,
            TransactionKind::Expense { category: None },
            date,
            total_amount,
        )
    }

    /// Games redistribute rather than create value, so their total is 0.
    #[must_use]
    pub fn game(title: impl Into<String>, game_type: GameType, date: NaiveDate) -> Self {
        Self::new(
            title,
            TransactionKind::Game { game_type },
            date,
            Amount::ZERO,
        )
    }

    #[must_use]
    pub fn payment(title: impl Into<String>, date: NaiveDate, total_amount: Amount) -> Self {
        Self::new(title, TransactionKind::Payment, date, total_amount)
    }

    #[must_use]
    pub fn participant(mut self, user_id: impl Into<String>, amount: Amount) -> Self {
        self.involved_users.push(Involvement::new(user_id, amount));
        self
    }

    #[must_use]
    pub fn participants(mut self, involved: impl IntoIterator<Item = Involvement>) -> Self {
        self.involved_users.extend(involved);
        self
    }

    /// Sets the category of a loan or expense; ignored for other types.
    #[must_use]
    pub fn category(mut self, value: impl Into<String>) -> Self {
        if let TransactionKind::Loan { category } | TransactionKind::Expense { category } =
            &mut self.kind
        {
            *category = Some(value.into());
        }
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn split(mut self, split: SplitMode) -> Self {
        self.split = split;
        self
    }
}
