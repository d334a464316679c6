//! Field-level invariant checks shared by the write API and snapshot loading.

use sueahhahn_shared::constants::{MAX_BIO_CHARS, MAX_RATING};

use crate::error::ValidationError;
use crate::models::{Product, Review, User};

/// Usernames compare case-insensitively.
pub(crate) fn same_username(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub(crate) fn check_username(username: &str) -> Result<(), ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if trimmed.len() != username.len() {
        return Err(ValidationError::PaddedUsername(username.to_string()));
    }
    Ok(())
}

pub(crate) fn check_bio(bio: &str) -> Result<(), ValidationError> {
    let len = bio.chars().count();
    if len > MAX_BIO_CHARS {
        return Err(ValidationError::BioTooLong {
            len,
            max: MAX_BIO_CHARS,
        });
    }
    Ok(())
}

pub(crate) fn check_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice(price));
    }
    Ok(())
}

pub(crate) fn check_rating(rating: f64) -> Result<(), ValidationError> {
    if !(0.0..=f64::from(MAX_RATING)).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange(rating));
    }
    Ok(())
}

/// Checks that need nothing but the user itself.
pub(crate) fn check_user_fields(user: &User) -> Result<(), ValidationError> {
    check_username(&user.username)?;
    check_bio(&user.bio)?;
    check_rating(user.rating)?;
    if user.following.contains(&user.uid) {
        return Err(ValidationError::SelfFollow);
    }
    Ok(())
}

pub(crate) fn check_product_fields(product: &Product) -> Result<(), ValidationError> {
    check_price(product.price)
}

pub(crate) fn check_review_fields(review: &Review) -> Result<(), ValidationError> {
    check_rating(f64::from(review.rating))?;
    if review.seller_uid == review.buyer_uid {
        return Err(ValidationError::SelfReview);
    }
    Ok(())
}
