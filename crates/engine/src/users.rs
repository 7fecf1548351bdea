//! Friends and groups.
//!
//! A [`User`] is either a friend, who carries a running balance against the
//! current user, or a group, which only expands into its members when used as
//! a participant shortcut.

use serde::{Deserialize, Serialize};

use crate::Amount;

/// Id of the app owner. Every balance is expressed relative to this user.
pub const CURRENT_USER_ID: &str = "current";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserKind {
    Friend,
    Group { members: Vec<String> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Opaque key into the avatar renderer.
    pub avatar: String,
    /// Positive: this user owes the current user. Negative: the current user
    /// owes them.
    pub balance: Amount,
    pub kind: UserKind,
    /// Creation order, used as a stable tiebreak.
    pub seq: u64,
}

impl User {
    pub fn is_group(&self) -> bool {
        matches!(self.kind, UserKind::Group { .. })
    }

    pub fn is_current(&self) -> bool {
        self.id == CURRENT_USER_ID
    }

    /// A non-group user other than the current user.
    pub fn is_friend(&self) -> bool {
        !self.is_group() && !self.is_current()
    }

    pub fn members(&self) -> &[String] {
        match &self.kind {
            UserKind::Group { members } => members,
            UserKind::Friend => &[],
        }
    }
}

/// Request to create a friend or a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub avatar: String,
    pub kind: UserKind,
}

impl NewUser {
    #[must_use]
    pub fn friend(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
            kind: UserKind::Friend,
        }
    }

    #[must_use]
    pub fn group<I, T>(name: impl Into<String>, avatar: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            avatar: avatar.into(),
            kind: UserKind::Group {
                members: members.into_iter().map(Into::into).collect(),
            },
        }
    }
}
