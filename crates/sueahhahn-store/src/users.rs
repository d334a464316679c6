//! Users: append-only, unique by `uid` and (case-insensitively) by `username`.

use sueahhahn_shared::types::{EntityKind, Uid};

use crate::error::{Result, StoreError, ValidationError};
use crate::models::{User, UserPatch};
use crate::store::Store;
use crate::validation::{check_bio, check_user_fields, check_username, same_username};

impl Store {
    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// All users in insertion order.
    pub fn users(&self) -> Vec<User> {
        self.state.borrow().users.clone()
    }

    pub fn user(&self, uid: &Uid) -> Option<User> {
        self.state.borrow().user(uid).cloned()
    }

    /// Case-insensitive lookup by login name.
    pub fn user_by_username(&self, username: &str) -> Option<User> {
        self.state
            .borrow()
            .users
            .iter()
            .find(|u| same_username(&u.username, username))
            .cloned()
    }

    /// Users whose username, display name or uid contains `term`, ignoring
    /// case. An empty term matches everyone.
    pub fn search_users(&self, term: &str) -> Vec<User> {
        let term = term.trim().to_lowercase();
        self.state
            .borrow()
            .users
            .iter()
            .filter(|u| {
                term.is_empty()
                    || u.username.to_lowercase().contains(&term)
                    || u.display_name.to_lowercase().contains(&term)
                    || u.uid.as_str().to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Append a new user.
    ///
    /// Rejects a taken `uid` or `username`, and a `following` set that names
    /// the user itself or anyone unknown.
    pub fn add_user(&self, user: User) -> Result<User> {
        {
            let mut state = self.state.borrow_mut();
            check_user_fields(&user)?;
            if state.has_user(&user.uid) {
                return Err(ValidationError::DuplicateId {
                    kind: EntityKind::User,
                    id: user.uid.to_string(),
                }
                .into());
            }
            if state
                .users
                .iter()
                .any(|u| same_username(&u.username, &user.username))
            {
                return Err(ValidationError::DuplicateUsername(user.username.clone()).into());
            }
            if let Some(unknown) = user.following.iter().find(|uid| !state.has_user(uid)) {
                return Err(ValidationError::UnknownUser(unknown.clone()).into());
            }
            state.users.push(user.clone());
        }

        tracing::info!(uid = %user.uid, username = %user.username, "user added");
        self.commit("add_user");
        Ok(user)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Merge the provided fields into the user. `uid` never changes.
    pub fn update_user(&self, uid: &Uid, patch: UserPatch) -> Result<User> {
        let updated = {
            let mut state = self.state.borrow_mut();
            let Some(pos) = state.users.iter().position(|u| &u.uid == uid) else {
                return Err(StoreError::not_found(EntityKind::User, uid));
            };

            if let Some(username) = &patch.username {
                check_username(username)?;
                let taken = state
                    .users
                    .iter()
                    .any(|u| &u.uid != uid && same_username(&u.username, username));
                if taken {
                    return Err(ValidationError::DuplicateUsername(username.clone()).into());
                }
            }
            if let Some(bio) = &patch.bio {
                check_bio(bio)?;
            }

            let user = &mut state.users[pos];
            if let Some(username) = patch.username {
                user.username = username;
            }
            if let Some(credential) = patch.credential {
                user.credential = credential;
            }
            if let Some(display_name) = patch.display_name {
                user.display_name = display_name;
            }
            if let Some(bio) = patch.bio {
                user.bio = bio;
            }
            if let Some(profile_pic) = patch.profile_pic {
                user.profile_pic = profile_pic;
            }
            if let Some(is_admin) = patch.is_admin {
                user.is_admin = is_admin;
            }
            user.clone()
        };

        tracing::debug!(uid = %uid, "user updated");
        self.commit("update_user");
        Ok(updated)
    }
}
