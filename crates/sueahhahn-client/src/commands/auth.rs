use serde::{Deserialize, Serialize};
use sueahhahn_shared::constants::DEFAULT_BIO;
use sueahhahn_shared::credential::Credential;
use sueahhahn_store::User;
use tracing::info;

use crate::commands::check_image;
use crate::commands::profile::UserDto;
use crate::error::{ClientError, Result};
use crate::state::AppState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    /// Defaults to the username when blank.
    #[serde(default)]
    pub display_name: String,
    /// Defaults to the welcome text when blank.
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_pic: String,
}

/// Create a regular member and log them in.
pub fn register(state: &AppState, form: RegisterForm) -> Result<UserDto> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return Err(ClientError::MissingCredentials);
    }
    check_image(&form.profile_pic)?;

    let credential = Credential::hash(&form.password, &state.config.credentials)?;
    let mut user = User::new(username, credential);
    if !form.display_name.trim().is_empty() {
        user.display_name = form.display_name.trim().to_string();
    }
    user.bio = if form.bio.trim().is_empty() {
        DEFAULT_BIO.to_string()
    } else {
        form.bio
    };
    user.profile_pic = form.profile_pic;

    let user = state.store.add_user(user)?;
    state.set_session(Some(user.uid.clone()));
    info!(uid = %user.uid, "registered and logged in");
    Ok(UserDto::from(&user))
}

/// Log in by username (case-insensitive) and password.
///
/// Unknown usernames and wrong passwords produce the same error.
pub fn login(state: &AppState, username: &str, password: &str) -> Result<UserDto> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ClientError::MissingCredentials);
    }

    let user = state
        .store
        .user_by_username(username.trim())
        .filter(|u| u.credential.verify(password))
        .ok_or(ClientError::InvalidCredentials)?;

    state.set_session(Some(user.uid.clone()));
    info!(uid = %user.uid, "logged in");
    Ok(UserDto::from(&user))
}

pub fn logout(state: &AppState) {
    if let Some(uid) = state.session.borrow_mut().take() {
        info!(uid = %uid, "logged out");
    }
}

pub fn current_user(state: &AppState) -> Result<UserDto> {
    Ok(UserDto::from(&state.current_user()?))
}

#[cfg(test)]
mod tests {
    use sueahhahn_store::{StoreError, ValidationError};

    use super::*;
    use crate::test_support::state;

    fn form(username: &str, password: &str) -> RegisterForm {
        RegisterForm {
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    #[test]
    fn register_applies_defaults_and_logs_in() {
        let state = state();
        let me = register(&state, form("Somchai", "pw")).unwrap();

        assert_eq!(me.display_name, "Somchai");
        assert_eq!(me.bio, DEFAULT_BIO);
        assert!(!me.is_admin);
        assert_eq!(state.session_uid().unwrap(), me.uid);
    }

    #[test]
    fn register_requires_username_and_password() {
        let state = state();
        assert!(matches!(
            register(&state, form("  ", "pw")),
            Err(ClientError::MissingCredentials)
        ));
        assert!(matches!(
            register(&state, form("somchai", "")),
            Err(ClientError::MissingCredentials)
        ));
        assert!(state.store.users().is_empty());
    }

    #[test]
    fn register_rejects_taken_username() {
        let state = state();
        register(&state, form("somchai", "pw")).unwrap();
        let err = register(&state, form("SOMCHAI", "other")).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Store(StoreError::Validation(ValidationError::DuplicateUsername(_)))
        ));
        assert_eq!(state.store.users().len(), 1);
    }

    #[test]
    fn login_checks_password() {
        let state = state();
        let me = register(&state, form("somchai", "pw")).unwrap();
        logout(&state);
        assert!(matches!(state.session_uid(), Err(ClientError::NotLoggedIn)));

        assert!(matches!(
            login(&state, "somchai", "wrong"),
            Err(ClientError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&state, "nobody", "pw"),
            Err(ClientError::InvalidCredentials)
        ));

        let again = login(&state, "SomChai", "pw").unwrap();
        assert_eq!(again.uid, me.uid);
        assert_eq!(current_user(&state).unwrap().uid, me.uid);
    }

    #[test]
    fn dto_never_carries_credential() {
        let state = state();
        let me = register(&state, form("somchai", "pw")).unwrap();
        let json = serde_json::to_string(&me).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("credential"));
    }
}
