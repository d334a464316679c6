//! Domain model structs held by the [`Store`](crate::Store).
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names so the persisted document matches what the presentation layer reads.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sueahhahn_shared::credential::Credential;
use sueahhahn_shared::types::{NotificationId, NotificationKind, ProductId, ReviewId, Uid};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A marketplace member. Buyers and sellers are the same entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier, immutable once the user exists.
    pub uid: Uid,
    /// Login name, unique across all users (case-insensitive).
    pub username: String,
    /// Argon2id hash of the user's password.
    pub credential: Credential,
    pub display_name: String,
    /// Free text, at most 500 characters.
    pub bio: String,
    /// Image reference (URL or data URI).
    pub profile_pic: String,
    /// Users this user follows. Never contains `uid`.
    #[serde(default)]
    pub following: BTreeSet<Uid>,
    /// Reserved; nothing mutates it.
    #[serde(default)]
    pub friends: BTreeSet<Uid>,
    /// Mean review rating, 0..=5.
    pub rating: f64,
    pub review_count: u32,
    pub is_admin: bool,
}

impl User {
    /// A regular member with empty profile fields and no relations.
    pub fn new(username: impl Into<String>, credential: Credential) -> Self {
        let username = username.into();
        Self {
            uid: Uid::generate(),
            display_name: username.clone(),
            username,
            credential,
            bio: String::new(),
            profile_pic: String::new(),
            following: BTreeSet::new(),
            friends: BTreeSet::new(),
            rating: 0.0,
            review_count: 0,
            is_admin: false,
        }
    }
}

/// Fields of a [`User`] that may change after creation.
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub credential: Option<Credential>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub is_admin: Option<bool>,
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// A dish or item offered by a seller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// Must reference an existing user.
    pub seller_uid: Uid,
    pub name: String,
    pub description: String,
    /// Non-negative, finite.
    pub price: f64,
    /// Image reference (URL or data URI).
    pub image: String,
    pub stock: u32,
    /// Hidden products stay stored but are left out of buyer-facing listings.
    pub is_hidden: bool,
}

impl Product {
    pub fn new(seller_uid: Uid, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: ProductId::generate(),
            seller_uid,
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            stock: 0,
            is_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub seller_uid: Option<Uid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub stock: Option<u32>,
    pub is_hidden: Option<bool>,
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

/// A buyer's rating of a seller. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub seller_uid: Uid,
    pub buyer_uid: Uid,
    /// Stars, 0..=5.
    pub rating: u8,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

impl Review {
    pub fn new(seller_uid: Uid, buyer_uid: Uid, rating: u8, comment: impl Into<String>) -> Self {
        Self {
            id: ReviewId::generate(),
            seller_uid,
            buyer_uid,
            rating,
            comment: comment.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// An inbox entry for one user. Only `is_read` changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    /// Recipient.
    pub user_uid: Uid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// An unread notification stamped with the current time.
    pub fn new(
        user_uid: Uid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: NotificationId::generate(),
            user_uid,
            title: title.into(),
            message: message.into(),
            kind,
            is_read: false,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    pub is_read: Option<bool>,
}
