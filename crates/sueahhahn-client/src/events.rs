use sueahhahn_store::{Store, Subscription};

/// Emitted to the presentation layer after every successful store mutation.
pub const EVENT_STORE_CHANGED: &str = "db-update";

/// Relay store change signals to `emit` as [`EVENT_STORE_CHANGED`] for as
/// long as the returned subscription is held.
pub fn forward_store_changes(store: &Store, emit: impl Fn(&str) + 'static) -> Subscription {
    store.subscribe(move || {
        tracing::trace!(event = EVENT_STORE_CHANGED, "emitting store change");
        emit(EVENT_STORE_CHANGED);
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::commands::auth::{register, RegisterForm};
    use crate::test_support::state;

    fn form(username: &str) -> RegisterForm {
        RegisterForm {
            username: username.into(),
            password: "pw".into(),
            ..Default::default()
        }
    }

    #[test]
    fn forwards_one_event_per_mutation() {
        let state = state();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&seen);
        let sub = forward_store_changes(&state.store, move |e| sink.borrow_mut().push(e.into()));

        register(&state, form("somchai")).unwrap();
        assert_eq!(*seen.borrow(), vec![EVENT_STORE_CHANGED.to_string()]);

        drop(sub);
        register(&state, form("somsri")).unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }
}
