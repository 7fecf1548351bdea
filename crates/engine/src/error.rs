//! The module contains the errors the engine can return.
//!
//! Every error leaves the ledger untouched: validation always runs before any
//! store or balance mutation.
//!
//! - [`Validation`] malformed or invariant-violating input.
//! - [`NotFound`] an id that must exist does not.
//! - [`Settlement`] a settle-up request outside the outstanding balance.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`NotFound`]: EngineError::NotFound
//!  [`Settlement`]: EngineError::Settlement
use std::fmt;

use thiserror::Error;

use crate::Amount;

/// Kind of entity referenced by [`EngineError::NotFound`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    User,
    Transaction,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Transaction => f.write_str("transaction"),
        }
    }
}

/// Rejections raised before a user or transaction is admitted.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("name must not be empty")]
    EmptyName,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("at least one participant is required")]
    EmptyParticipants,
    #[error("unknown participant \"{user_id}\"")]
    UnknownParticipant { user_id: String },
    #[error("\"{user_id}\" is a group and cannot take part directly")]
    GroupParticipant { user_id: String },
    #[error("participant \"{user_id}\" is listed more than once")]
    DuplicateParticipant { user_id: String },
    #[error("at least 2 players with a non-zero score are required, got {non_zero}")]
    NotEnoughPlayers { non_zero: usize },
    #[error("game scores must sum to 0, got {sum}")]
    GameNotZeroSum { sum: Amount },
    #[error("split amounts add up to {actual}, expected {expected}")]
    SplitMismatch { expected: Amount, actual: Amount },
    #[error("Invalid payment: {0}")]
    InvalidPayment(String),
    #[error("unknown type: {0}")]
    UnknownType(String),
    #[error("a group needs at least one member")]
    EmptyGroup,
    #[error("\"{user_id}\" cannot be a group member")]
    InvalidMember { user_id: String },
    #[error("the current user cannot be deleted")]
    CurrentUserImmutable,
    #[error("cannot settle up with yourself")]
    SelfSettlement,
    #[error("the balance of \"{user_id}\" would leave the supported range")]
    BalanceOutOfRange { user_id: String },
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::EmptyName => "empty_name",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::EmptyParticipants => "empty_participants",
            Self::UnknownParticipant { .. } => "unknown_participant",
            Self::GroupParticipant { .. } => "group_participant",
            Self::DuplicateParticipant { .. } => "duplicate_participant",
            Self::NotEnoughPlayers { .. } => "not_enough_players",
            Self::GameNotZeroSum { .. } => "game_not_zero_sum",
            Self::SplitMismatch { .. } => "split_mismatch",
            Self::InvalidPayment(_) => "invalid_payment",
            Self::UnknownType(_) => "unknown_type",
            Self::EmptyGroup => "empty_group",
            Self::InvalidMember { .. } => "invalid_member",
            Self::CurrentUserImmutable => "current_user_immutable",
            Self::SelfSettlement => "self_settlement",
            Self::BalanceOutOfRange { .. } => "balance_out_of_range",
        }
    }
}

/// Settle-up requests outside the range allowed by the outstanding balance.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SettlementError {
    #[error("nothing to settle with \"{user_id}\"")]
    NothingToSettle { user_id: String },
    #[error("settlement of {requested} exceeds the outstanding balance of {available}")]
    AmountExceedsBalance { requested: Amount, available: Amount },
}

impl SettlementError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NothingToSettle { .. } => "nothing_to_settle",
            Self::AmountExceedsBalance { .. } => "amount_exceeds_balance",
        }
    }
}

/// Engine custom errors.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} \"{id}\" not found")]
    NotFound { entity: Entity, id: String },
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

impl EngineError {
    pub(crate) fn user_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: Entity::User,
            id: id.to_string(),
        }
    }

    pub(crate) fn transaction_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: Entity::Transaction,
            id: id.to_string(),
        }
    }

    /// Stable snake_case identifier of the failure, suitable for clients.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.kind(),
            Self::NotFound { .. } => "not_found",
            Self::Settlement(err) => err.kind(),
        }
    }
}
