use serde::{Deserialize, Serialize};
use sueahhahn_shared::types::{EntityKind, NotificationKind, Uid};
use sueahhahn_store::{FollowChange, Notification, Product, Review, StoreError, User, UserPatch};
use tracing::info;

use crate::commands::check_image;
use crate::error::{ClientError, Result};
use crate::state::AppState;

/// A user as shown to the presentation layer. Never carries the credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub uid: Uid,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub profile_pic: String,
    pub following: Vec<Uid>,
    pub rating: f64,
    pub review_count: u32,
    pub is_admin: bool,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            uid: user.uid.clone(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
            profile_pic: user.profile_pic.clone(),
            following: user.following.iter().cloned().collect(),
            rating: user.rating,
            review_count: user.review_count,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub display_name: String,
    pub bio: String,
    pub profile_pic: String,
}

/// A review with the reviewer's display name resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    pub buyer_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub user: UserDto,
    pub is_me: bool,
    pub is_following: bool,
    pub followers_count: usize,
    pub products: Vec<Product>,
    pub reviews: Vec<ReviewView>,
}

/// Edit the session user's display name, bio and picture.
pub fn update_profile(state: &AppState, form: ProfileForm) -> Result<UserDto> {
    let uid = state.session_uid()?;
    let display_name = form.display_name.trim();
    if display_name.is_empty() {
        return Err(ClientError::Form("display name is required".into()));
    }
    check_image(&form.profile_pic)?;

    let user = state.store.update_user(
        &uid,
        UserPatch {
            display_name: Some(display_name.to_string()),
            bio: Some(form.bio),
            profile_pic: Some(form.profile_pic),
            ..Default::default()
        },
    )?;
    info!(uid = %uid, "profile updated");
    Ok(UserDto::from(&user))
}

/// Everything the profile page shows for `uid`, seen by the session user.
pub fn view_profile(state: &AppState, uid: &Uid) -> Result<ProfileView> {
    let viewer = state.session_uid()?;
    let user = state
        .store
        .user(uid)
        .ok_or_else(|| StoreError::NotFound {
            kind: EntityKind::User,
            id: uid.to_string(),
        })?;
    let is_me = &viewer == uid;

    let products = state
        .store
        .products_by_seller(uid)
        .into_iter()
        .filter(|p| is_me || !p.is_hidden)
        .collect();

    let reviews = state
        .store
        .reviews_for_seller(uid)
        .into_iter()
        .map(|review| {
            let buyer_name = state
                .store
                .user(&review.buyer_uid)
                .map(|u| u.display_name)
                .unwrap_or_default();
            ReviewView { review, buyer_name }
        })
        .collect();

    Ok(ProfileView {
        is_following: state.store.is_following(&viewer, uid),
        followers_count: state.store.followers_of(uid),
        user: UserDto::from(&user),
        is_me,
        products,
        reviews,
    })
}

/// Follow or unfollow `target`. A new follow notifies the target.
pub fn toggle_follow(state: &AppState, target: &Uid) -> Result<FollowChange> {
    let me = state.current_user()?;
    let change = state.store.toggle_follow(&me.uid, target)?;

    if change == FollowChange::Followed {
        state.store.add_notification(Notification::new(
            target.clone(),
            NotificationKind::System,
            "มีเพื่อนใหม่ติดตามคุณ! 👤",
            format!("{} เริ่มติดตามคุณแล้ว", me.display_name),
        ))?;
    }
    Ok(change)
}
