//! Application state shared across all command handlers.
//!
//! [`AppState`] owns the store handle and the login session. Like the store
//! it is single-threaded; handlers take it by shared reference.

use std::cell::RefCell;
use std::rc::Rc;

use sueahhahn_shared::types::Uid;
use sueahhahn_store::{Store, User};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

pub struct AppState {
    /// The marketplace store. Shared so change forwarders can hold a `Weak`.
    pub store: Rc<Store>,

    /// Uid of the logged-in user. `None` until login or registration.
    pub session: RefCell<Option<Uid>>,

    pub config: ClientConfig,
}

impl AppState {
    pub fn new(store: Store, config: ClientConfig) -> Self {
        Self {
            store: Rc::new(store),
            session: RefCell::new(None),
            config,
        }
    }

    pub fn session_uid(&self) -> Result<Uid> {
        self.session.borrow().clone().ok_or(ClientError::NotLoggedIn)
    }

    /// The logged-in user as currently stored. A session whose user has
    /// since disappeared counts as logged out.
    pub fn current_user(&self) -> Result<User> {
        let uid = self.session_uid()?;
        self.store.user(&uid).ok_or(ClientError::NotLoggedIn)
    }

    pub(crate) fn set_session(&self, uid: Option<Uid>) {
        *self.session.borrow_mut() = uid;
    }
}
