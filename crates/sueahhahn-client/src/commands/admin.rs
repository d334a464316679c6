use serde::Serialize;
use sueahhahn_shared::types::Uid;
use sueahhahn_store::User;

use crate::error::{ClientError, Result};
use crate::state::AppState;

/// One row of the admin user table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub uid: Uid,
    pub username: String,
    pub display_name: String,
    pub profile_pic: String,
    pub is_admin: bool,
    pub followers_count: usize,
    pub following_count: usize,
    pub product_count: usize,
    pub rating: f64,
    pub review_count: u32,
}

/// Users whose username or display name contains `search`. Admin only.
pub fn list_users(state: &AppState, search: &str) -> Result<Vec<UserSummary>> {
    let me = state.current_user()?;
    if !me.is_admin {
        return Err(ClientError::Forbidden("admin only"));
    }

    let users = state.store.search_users(search.trim());
    tracing::debug!(search, matches = users.len(), "admin user search");
    Ok(users.iter().map(|u| summarize(state, u)).collect())
}

fn summarize(state: &AppState, user: &User) -> UserSummary {
    UserSummary {
        uid: user.uid.clone(),
        username: user.username.clone(),
        display_name: user.display_name.clone(),
        profile_pic: user.profile_pic.clone(),
        is_admin: user.is_admin,
        followers_count: state.store.followers_of(&user.uid),
        following_count: user.following.len(),
        product_count: state.store.products_by_seller(&user.uid).len(),
        rating: user.rating,
        review_count: user.review_count,
    }
}
