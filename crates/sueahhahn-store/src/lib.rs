//! # sueahhahn-store
//!
//! Local reactive data store for the Sue AhHahn marketplace client.
//!
//! The [`Store`] is the single source of truth for users, products, reviews
//! and notifications.  Every successful mutation is validated, written to a
//! [`DurableSlot`] as one JSON [`Snapshot`], and announced through a
//! payload-less change signal that views subscribe to.  On first run (or when
//! the stored document is unusable) the store seeds itself with demo data.

pub mod changes;
pub mod database;
pub mod kv;
pub mod migrations;
pub mod models;
pub mod notifications;
pub mod products;
pub mod relationships;
pub mod reviews;
pub mod seed;
pub mod slot;
pub mod snapshot;
pub mod store;
pub mod users;

mod error;
mod validation;

pub use changes::{ChangeChannel, Subscription};
pub use database::Database;
pub use error::{PersistenceError, StoreError, ValidationError};
pub use models::*;
pub use relationships::FollowChange;
pub use slot::{DurableSlot, MemorySlot};
pub use snapshot::Snapshot;
pub use store::{Origin, Store};
