//! Follow relation and the aggregates derived from the current state.
//!
//! Following is one-directional: `actor.following` names the target, and
//! nothing is required of the target. Follower and unread counts are
//! recomputed from the collections on every call, never cached.

use sueahhahn_shared::types::{EntityKind, Uid};

use crate::error::{Result, StoreError, ValidationError};
use crate::models::{Notification, User};
use crate::store::Store;

/// Outcome of [`Store::toggle_follow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowChange {
    Followed,
    Unfollowed,
}

/// Number of users whose `following` contains `uid`.
pub fn count_followers(users: &[User], uid: &Uid) -> usize {
    users.iter().filter(|u| u.following.contains(uid)).count()
}

/// Number of unread notifications addressed to `uid`.
pub fn count_unread(notifications: &[Notification], uid: &Uid) -> usize {
    notifications
        .iter()
        .filter(|n| &n.user_uid == uid && !n.is_read)
        .count()
}

impl Store {
    /// Follow `target` if `actor` doesn't yet, unfollow otherwise. Calling it
    /// twice restores the original state. `friends` is never touched.
    pub fn toggle_follow(&self, actor: &Uid, target: &Uid) -> Result<FollowChange> {
        if actor == target {
            return Err(ValidationError::SelfFollow.into());
        }

        let change = {
            let mut state = self.state.borrow_mut();
            if !state.has_user(target) {
                return Err(StoreError::not_found(EntityKind::User, target));
            }
            let user = state
                .user_mut(actor)
                .ok_or_else(|| StoreError::not_found(EntityKind::User, actor))?;

            if user.following.remove(target) {
                FollowChange::Unfollowed
            } else {
                user.following.insert(target.clone());
                FollowChange::Followed
            }
        };

        tracing::debug!(actor = %actor, target = %target, ?change, "follow toggled");
        self.commit("toggle_follow");
        Ok(change)
    }

    pub fn is_following(&self, actor: &Uid, target: &Uid) -> bool {
        self.state
            .borrow()
            .user(actor)
            .is_some_and(|u| u.following.contains(target))
    }

    pub fn followers_of(&self, uid: &Uid) -> usize {
        count_followers(&self.state.borrow().users, uid)
    }

    /// The users following `uid`, in insertion order.
    pub fn followers(&self, uid: &Uid) -> Vec<User> {
        self.state
            .borrow()
            .users
            .iter()
            .filter(|u| u.following.contains(uid))
            .cloned()
            .collect()
    }

    pub fn unread_count(&self, uid: &Uid) -> usize {
        count_unread(&self.state.borrow().notifications, uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{empty_store, user};

    fn pair(store: &Store) -> (User, User) {
        (
            store.add_user(user("a")).unwrap(),
            store.add_user(user("b")).unwrap(),
        )
    }

    #[test]
    fn double_toggle_restores_following() {
        let store = empty_store();
        let (a, b) = pair(&store);
        let before = store.user(&a.uid).unwrap().following;

        assert_eq!(
            store.toggle_follow(&a.uid, &b.uid).unwrap(),
            FollowChange::Followed
        );
        assert!(store.is_following(&a.uid, &b.uid));
        assert_eq!(
            store.toggle_follow(&a.uid, &b.uid).unwrap(),
            FollowChange::Unfollowed
        );

        assert_eq!(store.user(&a.uid).unwrap().following, before);
    }

    #[test]
    fn follower_count_tracks_toggles() {
        let store = empty_store();
        let (a, b) = pair(&store);
        let c = store.add_user(user("c")).unwrap();
        store.toggle_follow(&c.uid, &b.uid).unwrap();
        let base = store.followers_of(&b.uid);

        store.toggle_follow(&a.uid, &b.uid).unwrap();
        assert_eq!(store.followers_of(&b.uid), base + 1);

        store.toggle_follow(&a.uid, &b.uid).unwrap();
        assert_eq!(store.followers_of(&b.uid), base);
    }

    #[test]
    fn follow_is_one_directional() {
        let store = empty_store();
        let (a, b) = pair(&store);
        store.toggle_follow(&a.uid, &b.uid).unwrap();

        assert!(!store.is_following(&b.uid, &a.uid));
        assert_eq!(store.followers_of(&a.uid), 0);
        assert_eq!(store.followers(&b.uid), vec![store.user(&a.uid).unwrap()]);
        assert!(store.user(&a.uid).unwrap().friends.is_empty());
        assert!(store.user(&b.uid).unwrap().friends.is_empty());
    }

    #[test]
    fn self_follow_is_rejected_without_change() {
        let store = empty_store();
        let (a, _) = pair(&store);
        assert_eq!(
            store.toggle_follow(&a.uid, &a.uid),
            Err(StoreError::Validation(ValidationError::SelfFollow))
        );
        assert!(store.user(&a.uid).unwrap().following.is_empty());
    }

    #[test]
    fn unknown_parties_are_not_found() {
        let store = empty_store();
        let (a, _) = pair(&store);
        let ghost = Uid::from("u-ghost");

        assert!(matches!(
            store.toggle_follow(&a.uid, &ghost),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.toggle_follow(&ghost, &a.uid),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn pure_counters_match_store() {
        let store = empty_store();
        let (a, b) = pair(&store);
        store.toggle_follow(&a.uid, &b.uid).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(count_followers(&snapshot.users, &b.uid), 1);
        assert_eq!(count_unread(&snapshot.notifications, &b.uid), 0);
    }
}
