use sueahhahn_shared::types::{EntityKind, NotificationId};
use sueahhahn_store::{Notification, StoreError};

use crate::error::Result;
use crate::state::AppState;

/// The session user's notifications, newest first.
pub fn inbox(state: &AppState) -> Result<Vec<Notification>> {
    let uid = state.session_uid()?;
    Ok(state.store.notifications_for(&uid))
}

pub fn unread_count(state: &AppState) -> Result<usize> {
    let uid = state.session_uid()?;
    Ok(state.store.unread_count(&uid))
}

/// Mark one of the session user's notifications as read. Someone else's
/// notification is reported as not found.
pub fn mark_read(state: &AppState, id: &NotificationId) -> Result<Notification> {
    let uid = state.session_uid()?;
    let owned = state
        .store
        .notification(id)
        .is_some_and(|n| n.user_uid == uid);
    if !owned {
        return Err(StoreError::NotFound {
            kind: EntityKind::Notification,
            id: id.to_string(),
        }
        .into());
    }
    Ok(state.store.mark_notification_read(id)?)
}

/// Returns how many notifications changed.
pub fn mark_all_read(state: &AppState) -> Result<usize> {
    let uid = state.session_uid()?;
    Ok(state.store.mark_all_notifications_read(&uid))
}

#[cfg(test)]
mod tests {
    use sueahhahn_store::seed::DEMO_PASSWORD;

    use super::*;
    use crate::commands::auth::login;
    use crate::error::ClientError;

    fn demo() -> AppState {
        let state = crate::run(crate::test_support::config());
        login(&state, "foodie_may", DEMO_PASSWORD).unwrap();
        state
    }

    #[test]
    fn welcome_notification_is_unread() {
        let state = demo();
        let inbox = inbox(&state).unwrap();
        assert_eq!(inbox.len(), 1);
        assert!(!inbox[0].is_read);
        assert_eq!(unread_count(&state).unwrap(), 1);
    }

    #[test]
    fn mark_read_clears_unread() {
        let state = demo();
        let id = inbox(&state).unwrap()[0].id.clone();

        assert!(mark_read(&state, &id).unwrap().is_read);
        assert_eq!(unread_count(&state).unwrap(), 0);
        assert_eq!(mark_all_read(&state).unwrap(), 0);
    }

    #[test]
    fn mark_all_read_counts_changes() {
        let state = demo();
        assert_eq!(mark_all_read(&state).unwrap(), 1);
        assert_eq!(unread_count(&state).unwrap(), 0);
    }

    #[test]
    fn cannot_touch_someone_elses_notification() {
        let state = demo();
        let id = inbox(&state).unwrap()[0].id.clone();

        login(&state, "noodle_uncle", DEMO_PASSWORD).unwrap();
        assert!(matches!(
            mark_read(&state, &id),
            Err(ClientError::Store(StoreError::NotFound { .. }))
        ));
        assert!(!state.store.notification(&id).unwrap().is_read);
    }

    #[test]
    fn inbox_requires_login() {
        let state = crate::test_support::state();
        assert!(matches!(inbox(&state), Err(ClientError::NotLoggedIn)));
    }
}
