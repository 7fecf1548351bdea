use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    Amount, CURRENT_USER_ID, EngineError, Involvement, NewUser, ResultEngine, Store, User,
    UserKind, ValidationError,
};

use super::Engine;

fn normalize_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    Ok(trimmed.to_string())
}

impl<S: Store> Engine<S> {
    pub fn user(&self, id: &str) -> ResultEngine<&User> {
        self.store
            .user(id)
            .ok_or_else(|| EngineError::user_not_found(id))
    }

    /// Every user, including groups and the current user, in creation order.
    pub fn users(&self) -> Vec<&User> {
        self.store.users()
    }

    /// Non-group users other than the current user.
    pub fn friends(&self) -> Vec<&User> {
        self.store.users().into_iter().filter(|u| u.is_friend()).collect()
    }

    pub fn groups(&self) -> Vec<&User> {
        self.store.users().into_iter().filter(|u| u.is_group()).collect()
    }

    pub fn current_user(&self) -> ResultEngine<&User> {
        self.user(CURRENT_USER_ID)
    }

    pub fn balance(&self, user_id: &str) -> ResultEngine<Amount> {
        Ok(self.user(user_id)?.balance)
    }

    /// Create a friend or a group with a zero balance.
    ///
    /// Group members must be existing friends; repeated ids are collapsed.
    pub fn create_user(&mut self, new_user: NewUser) -> ResultEngine<User> {
        let name = normalize_name(&new_user.name)?;
        let kind = match new_user.kind {
            UserKind::Friend => UserKind::Friend,
            UserKind::Group { members } => UserKind::Group {
                members: self.resolve_group_members(members)?,
            },
        };

        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            avatar: new_user.avatar,
            balance: Amount::ZERO,
            kind,
            seq: self.store.next_seq(),
        };
        tracing::debug!(user_id = %user.id, group = user.is_group(), "user created");
        self.store.insert_user(user.clone());
        Ok(user)
    }

    fn resolve_group_members(&self, members: Vec<String>) -> ResultEngine<Vec<String>> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(members.len());
        for member in members {
            let user = self
                .store
                .user(&member)
                .ok_or_else(|| ValidationError::UnknownParticipant {
                    user_id: member.clone(),
                })?;
            if !user.is_friend() {
                return Err(ValidationError::InvalidMember { user_id: member }.into());
            }
            if seen.insert(member.clone()) {
                resolved.push(member);
            }
        }
        if resolved.is_empty() {
            return Err(ValidationError::EmptyGroup.into());
        }
        Ok(resolved)
    }

    /// Remove a user. Unknown ids are ignored.
    ///
    /// Transactions referencing the user are kept as they are; their entries
    /// for this id simply stop resolving.
    pub fn delete_user(&mut self, id: &str) -> ResultEngine<Option<User>> {
        if id == CURRENT_USER_ID {
            return Err(ValidationError::CurrentUserImmutable.into());
        }
        let removed = self.store.remove_user(id);
        if removed.is_some() {
            tracing::debug!(user_id = %id, "user deleted");
        }
        Ok(removed)
    }

    /// Rename the current user and change their avatar.
    pub fn update_current_user(&mut self, name: &str, avatar: &str) -> ResultEngine<User> {
        let name = normalize_name(name)?;
        let user = self
            .store
            .user_mut(CURRENT_USER_ID)
            .ok_or_else(|| EngineError::user_not_found(CURRENT_USER_ID))?;
        user.name = name;
        user.avatar = avatar.to_string();
        Ok(user.clone())
    }

    /// Friends taking part in a split: groups expand into their members, the
    /// current user and ids that no longer resolve are skipped, first
    /// occurrence wins.
    pub fn expand_participants<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut expanded = Vec::new();
        for id in ids {
            let Some(user) = self.store.user(id) else {
                continue;
            };
            let candidates: Vec<&str> = if user.is_group() {
                user.members().iter().map(String::as_str).collect()
            } else {
                vec![id]
            };
            for candidate in candidates {
                let is_friend = self.store.user(candidate).is_some_and(User::is_friend);
                if is_friend && seen.insert(candidate.to_string()) {
                    expanded.push(candidate.to_string());
                }
            }
        }
        expanded
    }

    /// Equal shares of `total` for the selected friends and groups.
    ///
    /// The payer keeps one share, so each friend owes `total / (friends + 1)`
    /// rounded to the nearest tenth.
    pub fn split_equally<'a, I>(&self, total: Amount, ids: I) -> ResultEngine<Vec<Involvement>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let friends = self.expand_participants(ids);
        let parts = u32::try_from(friends.len() + 1).map_err(|_| {
            ValidationError::InvalidAmount("too many participants".to_string())
        })?;
        if friends.is_empty() {
            return Err(ValidationError::EmptyParticipants.into());
        }
        let share = total.share(parts).unwrap_or(Amount::ZERO);
        Ok(friends
            .into_iter()
            .map(|id| Involvement::new(id, share))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Amount, CURRENT_USER_ID, Engine, EngineError, NewUser, ValidationError};

    #[test]
    fn group_members_must_be_friends() {
        let mut engine = Engine::builder().build();
        let alex = engine.create_user(NewUser::friend("Alex", "adventurer")).unwrap();

        let err = engine
            .create_user(NewUser::group("Night", "initials", [CURRENT_USER_ID]))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation(ValidationError::InvalidMember {
                user_id: CURRENT_USER_ID.to_string()
            })
        );

        let group = engine
            .create_user(NewUser::group(
                "Night",
                "initials",
                [alex.id.as_str(), alex.id.as_str()],
            ))
            .unwrap();
        assert_eq!(group.members(), [alex.id.clone()]);

        let err = engine
            .create_user(NewUser::group("Empty", "initials", Vec::<String>::new()))
            .unwrap_err();
        assert_eq!(err, EngineError::Validation(ValidationError::EmptyGroup));
    }

    #[test]
    fn names_are_trimmed_and_required() {
        let mut engine = Engine::builder().build();
        let user = engine.create_user(NewUser::friend("  Emma ", "big-smile")).unwrap();
        assert_eq!(user.name, "Emma");
        assert_eq!(user.balance, Amount::ZERO);

        let err = engine.create_user(NewUser::friend("   ", "x")).unwrap_err();
        assert_eq!(err, EngineError::Validation(ValidationError::EmptyName));
    }

    #[test]
    fn current_user_cannot_be_deleted_but_can_be_renamed() {
        let mut engine = Engine::builder().build();
        assert!(engine.delete_user(CURRENT_USER_ID).is_err());
        let me = engine.update_current_user("Robin", "bottts").unwrap();
        assert_eq!(me.name, "Robin");
        assert_eq!(engine.current_user().unwrap().avatar, "bottts");
    }

    #[test]
    fn split_equally_expands_groups_and_keeps_payer_share() {
        let mut engine = Engine::builder().build();
        let alex = engine.create_user(NewUser::friend("Alex", "a")).unwrap();
        let sarah = engine.create_user(NewUser::friend("Sarah", "b")).unwrap();
        let mike = engine.create_user(NewUser::friend("Mike", "c")).unwrap();
        let group = engine
            .create_user(NewUser::group(
                "Poker Night",
                "initials",
                [alex.id.as_str(), sarah.id.as_str()],
            ))
            .unwrap();

        let shares = engine
            .split_equally(
                Amount::from_tenths(1000),
                [group.id.as_str(), alex.id.as_str(), mike.id.as_str(), CURRENT_USER_ID],
            )
            .unwrap();
        let ids: Vec<_> = shares.iter().map(|s| s.user_id.clone()).collect();
        assert_eq!(ids, [alex.id, sarah.id, mike.id]);
        assert!(shares.iter().all(|s| s.amount == Amount::from_tenths(250)));

        let err = engine
            .split_equally(Amount::from_tenths(10), [CURRENT_USER_ID])
            .unwrap_err();
        assert_eq!(err, EngineError::Validation(ValidationError::EmptyParticipants));
    }
}
