//! The persisted document: all four collections in one JSON object.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sueahhahn_shared::types::{EntityKind, Uid};

use crate::error::{PersistenceError, ValidationError};
use crate::models::{Notification, Product, Review, User};
use crate::validation::{check_product_fields, check_review_fields, check_user_fields};

/// Full store contents, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub reviews: Vec<Review>,
    pub notifications: Vec<Notification>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored document and check it against the store invariants.
    pub fn from_json(doc: &str) -> Result<Self, PersistenceError> {
        let snapshot: Snapshot = serde_json::from_str(doc)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check every invariant the write API enforces, across the whole
    /// document: unique ids, unique usernames, well-formed fields, and
    /// every reference (seller, review party, recipient, followed user)
    /// naming a user that exists.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut uids = HashSet::new();
        let mut usernames = HashSet::new();
        for user in &self.users {
            check_user_fields(user)?;
            if !uids.insert(&user.uid) {
                return Err(duplicate(EntityKind::User, &user.uid));
            }
            if !usernames.insert(user.username.to_lowercase()) {
                return Err(ValidationError::DuplicateUsername(user.username.clone()));
            }
        }
        let known = |uid: &Uid| -> Result<(), ValidationError> {
            if uids.contains(uid) {
                Ok(())
            } else {
                Err(ValidationError::UnknownUser(uid.clone()))
            }
        };

        for user in &self.users {
            user.following.iter().try_for_each(&known)?;
        }

        let mut ids = HashSet::new();
        for product in &self.products {
            check_product_fields(product)?;
            if !ids.insert(product.id.as_str()) {
                return Err(duplicate(EntityKind::Product, &product.id));
            }
            known(&product.seller_uid)?;
        }

        let mut ids = HashSet::new();
        for review in &self.reviews {
            check_review_fields(review)?;
            if !ids.insert(review.id.as_str()) {
                return Err(duplicate(EntityKind::Review, &review.id));
            }
            known(&review.seller_uid)?;
            known(&review.buyer_uid)?;
        }

        let mut ids = HashSet::new();
        for notification in &self.notifications {
            if !ids.insert(notification.id.as_str()) {
                return Err(duplicate(EntityKind::Notification, &notification.id));
            }
            known(&notification.user_uid)?;
        }

        Ok(())
    }

    pub(crate) fn user(&self, uid: &Uid) -> Option<&User> {
        self.users.iter().find(|u| &u.uid == uid)
    }

    pub(crate) fn user_mut(&mut self, uid: &Uid) -> Option<&mut User> {
        self.users.iter_mut().find(|u| &u.uid == uid)
    }

    pub(crate) fn has_user(&self, uid: &Uid) -> bool {
        self.user(uid).is_some()
    }
}

fn duplicate(kind: EntityKind, id: impl std::fmt::Display) -> ValidationError {
    ValidationError::DuplicateId {
        kind,
        id: id.to_string(),
    }
}
