use sueahhahn_shared::types::Uid;
use sueahhahn_store::Review;
use tracing::info;

use crate::error::Result;
use crate::state::AppState;

/// Rate `seller` as the session user. The seller's rating and review count
/// are updated in the same mutation.
pub fn leave_review(state: &AppState, seller: &Uid, rating: u8, comment: &str) -> Result<Review> {
    let buyer = state.session_uid()?;
    let review = state
        .store
        .add_review(Review::new(seller.clone(), buyer, rating, comment.trim()))?;
    info!(id = %review.id, seller = %seller, rating, "review left");
    Ok(review)
}
