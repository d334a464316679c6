//! Notifications: created by flows such as a new follower; afterwards only
//! `is_read` changes.

use sueahhahn_shared::types::{EntityKind, NotificationId, Uid};

use crate::error::{Result, StoreError, ValidationError};
use crate::models::{Notification, NotificationPatch};
use crate::store::Store;

impl Store {
    pub fn notifications(&self) -> Vec<Notification> {
        self.state.borrow().notifications.clone()
    }

    pub fn notification(&self, id: &NotificationId) -> Option<Notification> {
        self.state
            .borrow()
            .notifications
            .iter()
            .find(|n| &n.id == id)
            .cloned()
    }

    /// A user's inbox, newest first.
    pub fn notifications_for(&self, uid: &Uid) -> Vec<Notification> {
        let mut inbox: Vec<Notification> = self
            .state
            .borrow()
            .notifications
            .iter()
            .filter(|n| &n.user_uid == uid)
            .cloned()
            .collect();
        inbox.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        inbox
    }

    pub fn add_notification(&self, notification: Notification) -> Result<Notification> {
        {
            let mut state = self.state.borrow_mut();
            if state.notifications.iter().any(|n| n.id == notification.id) {
                return Err(ValidationError::DuplicateId {
                    kind: EntityKind::Notification,
                    id: notification.id.to_string(),
                }
                .into());
            }
            if !state.has_user(&notification.user_uid) {
                return Err(ValidationError::UnknownUser(notification.user_uid.clone()).into());
            }
            state.notifications.push(notification.clone());
        }

        tracing::debug!(
            id = %notification.id,
            recipient = %notification.user_uid,
            kind = ?notification.kind,
            "notification added"
        );
        self.commit("add_notification");
        Ok(notification)
    }

    pub fn update_notification(
        &self,
        id: &NotificationId,
        patch: NotificationPatch,
    ) -> Result<Notification> {
        let updated = {
            let mut state = self.state.borrow_mut();
            let notification = state
                .notifications
                .iter_mut()
                .find(|n| &n.id == id)
                .ok_or_else(|| StoreError::not_found(EntityKind::Notification, id))?;
            if let Some(is_read) = patch.is_read {
                notification.is_read = is_read;
            }
            notification.clone()
        };

        self.commit("update_notification");
        Ok(updated)
    }

    pub fn mark_notification_read(&self, id: &NotificationId) -> Result<Notification> {
        self.update_notification(id, NotificationPatch { is_read: Some(true) })
    }

    /// Mark every unread notification of `uid` as read. Returns how many
    /// changed; nothing is persisted or broadcast when that is zero.
    pub fn mark_all_notifications_read(&self, uid: &Uid) -> usize {
        let changed = {
            let mut state = self.state.borrow_mut();
            let mut changed = 0;
            for notification in state
                .notifications
                .iter_mut()
                .filter(|n| &n.user_uid == uid && !n.is_read)
            {
                notification.is_read = true;
                changed += 1;
            }
            changed
        };

        if changed > 0 {
            self.commit("mark_all_notifications_read");
        }
        changed
    }
}
