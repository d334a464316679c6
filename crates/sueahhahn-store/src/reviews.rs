//! Reviews: append-only. Adding one folds its rating into the seller's
//! `rating` / `review_count`.

use sueahhahn_shared::types::{EntityKind, ReviewId, Uid};

use crate::error::{Result, ValidationError};
use crate::models::Review;
use crate::store::Store;
use crate::validation::check_review_fields;

impl Store {
    pub fn reviews(&self) -> Vec<Review> {
        self.state.borrow().reviews.clone()
    }

    pub fn review(&self, id: &ReviewId) -> Option<Review> {
        self.state
            .borrow()
            .reviews
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }

    pub fn reviews_for_seller(&self, seller: &Uid) -> Vec<Review> {
        self.state
            .borrow()
            .reviews
            .iter()
            .filter(|r| &r.seller_uid == seller)
            .cloned()
            .collect()
    }

    /// Store a review. Both parties must exist and differ.
    pub fn add_review(&self, review: Review) -> Result<Review> {
        {
            let mut state = self.state.borrow_mut();
            check_review_fields(&review)?;
            if state.reviews.iter().any(|r| r.id == review.id) {
                return Err(ValidationError::DuplicateId {
                    kind: EntityKind::Review,
                    id: review.id.to_string(),
                }
                .into());
            }
            if !state.has_user(&review.buyer_uid) {
                return Err(ValidationError::UnknownUser(review.buyer_uid.clone()).into());
            }
            let Some(seller) = state.user_mut(&review.seller_uid) else {
                return Err(ValidationError::UnknownUser(review.seller_uid.clone()).into());
            };

            let count = f64::from(seller.review_count);
            seller.rating = (seller.rating * count + f64::from(review.rating)) / (count + 1.0);
            seller.review_count += 1;

            state.reviews.push(review.clone());
        }

        tracing::info!(
            id = %review.id,
            seller = %review.seller_uid,
            rating = review.rating,
            "review added"
        );
        self.commit("add_review");
        Ok(review)
    }
}
