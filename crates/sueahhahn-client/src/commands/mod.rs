//! Command handlers invoked by the presentation layer.
//!
//! Each sub-module groups related commands by page. Handlers take the
//! [`AppState`](crate::state::AppState) by reference, act on behalf of the
//! session user, and return serializable values or a
//! [`ClientError`](crate::error::ClientError).

pub mod admin;
pub mod auth;
pub mod notifications;
pub mod products;
pub mod profile;
pub mod reviews;

use crate::error::{ClientError, Result};

const ALLOWED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg"];

/// Accept a remote URL or a PNG/JPEG data URI. Empty is accepted; callers
/// that require an image check that separately.
pub(crate) fn check_image(image: &str) -> Result<()> {
    let Some(rest) = image.strip_prefix("data:") else {
        return Ok(());
    };
    let mime = rest.split([';', ',']).next().unwrap_or_default();
    if ALLOWED_IMAGE_TYPES.contains(&mime) {
        Ok(())
    } else {
        Err(ClientError::Form(format!(
            "unsupported image type {mime:?}, use PNG or JPEG"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_types() {
        assert!(check_image("").is_ok());
        assert!(check_image("https://picsum.photos/seed/x/400/400").is_ok());
        assert!(check_image("data:image/png;base64,iVBORw0KGgo=").is_ok());
        assert!(check_image("data:image/jpeg;base64,/9j/4AAQ").is_ok());
        assert!(check_image("data:image/gif;base64,R0lGOD").is_err());
        assert!(check_image("data:text/html,<b>hi</b>").is_err());
    }
}
