use serde::Deserialize;
use sueahhahn_shared::types::{EntityKind, ProductId, Uid};
use sueahhahn_store::{Product, StoreError};
use tracing::info;

use crate::commands::check_image;
use crate::error::{ClientError, Result};
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub stock: u32,
}

/// List a new, visible product for the session user.
pub fn add_product(state: &AppState, form: ProductForm) -> Result<Product> {
    let seller = state.session_uid()?;
    if form.image.is_empty() {
        return Err(ClientError::Form("a product image is required".into()));
    }
    check_image(&form.image)?;
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ClientError::Form("a product name is required".into()));
    }

    let product = Product {
        description: form.description,
        image: form.image,
        stock: form.stock,
        ..Product::new(seller, name, form.price)
    };
    let product = state.store.add_product(product)?;
    info!(id = %product.id, seller = %product.seller_uid, "product listed");
    Ok(product)
}

pub fn toggle_product_hidden(state: &AppState, id: &ProductId) -> Result<Product> {
    authorize(state, id)?;
    Ok(state.store.toggle_product_hidden(id)?)
}

pub fn delete_product(state: &AppState, id: &ProductId) -> Result<()> {
    let actor = authorize(state, id)?;
    if state.store.delete_product(id) {
        info!(id = %id, actor = %actor, "listing removed");
    }
    Ok(())
}

/// Products buyers can see, across all sellers.
pub fn marketplace(state: &AppState) -> Vec<Product> {
    state.store.visible_products()
}

/// Only the seller or an admin may change a listing. Returns the actor.
fn authorize(state: &AppState, id: &ProductId) -> Result<Uid> {
    let me = state.current_user()?;
    let product = state.store.product(id).ok_or_else(|| StoreError::NotFound {
        kind: EntityKind::Product,
        id: id.to_string(),
    })?;
    if product.seller_uid != me.uid && !me.is_admin {
        return Err(ClientError::Forbidden("only the seller or an admin may do this"));
    }
    Ok(me.uid)
}

#[cfg(test)]
mod tests {
    use sueahhahn_store::seed::DEMO_PASSWORD;

    use super::*;
    use crate::commands::auth::{login, register, RegisterForm};
    use crate::test_support::state;

    fn join(state: &AppState, username: &str) {
        register(
            state,
            RegisterForm {
                username: username.into(),
                password: "pw".into(),
                ..Default::default()
            },
        )
        .unwrap();
    }

    fn form(name: &str) -> ProductForm {
        ProductForm {
            name: name.into(),
            price: 40.0,
            image: "data:image/jpeg;base64,/9j/4AAQ".into(),
            stock: 5,
            ..Default::default()
        }
    }

    #[test]
    fn add_product_requires_image_and_name() {
        let state = state();
        join(&state, "seller");

        let no_image = ProductForm {
            image: String::new(),
            ..form("ข้าวผัด")
        };
        assert!(matches!(add_product(&state, no_image), Err(ClientError::Form(_))));
        assert!(matches!(add_product(&state, form("  ")), Err(ClientError::Form(_))));
        assert!(state.store.products().is_empty());

        let product = add_product(&state, form("ข้าวผัด")).unwrap();
        assert!(!product.is_hidden);
        assert_eq!(product.seller_uid, state.session_uid().unwrap());
        assert_eq!(marketplace(&state), vec![product]);
    }

    #[test]
    fn add_product_requires_login() {
        let state = state();
        assert!(matches!(
            add_product(&state, form("ข้าวผัด")),
            Err(ClientError::NotLoggedIn)
        ));
    }

    #[test]
    fn hidden_products_leave_the_marketplace() {
        let state = state();
        join(&state, "seller");
        let product = add_product(&state, form("ข้าวผัด")).unwrap();

        assert!(toggle_product_hidden(&state, &product.id).unwrap().is_hidden);
        assert!(marketplace(&state).is_empty());
        assert!(!toggle_product_hidden(&state, &product.id).unwrap().is_hidden);
        assert_eq!(marketplace(&state).len(), 1);
    }

    #[test]
    fn only_owner_or_admin_may_change_listing() {
        let state = crate::run(crate::test_support::config());
        join(&state, "seller");
        let product = add_product(&state, form("ข้าวผัด")).unwrap();

        join(&state, "stranger");
        assert!(matches!(
            delete_product(&state, &product.id),
            Err(ClientError::Forbidden(_))
        ));
        assert!(matches!(
            toggle_product_hidden(&state, &product.id),
            Err(ClientError::Forbidden(_))
        ));

        login(&state, "admin", DEMO_PASSWORD).unwrap();
        delete_product(&state, &product.id).unwrap();
        assert!(state.store.product(&product.id).is_none());
    }

    #[test]
    fn deleting_unknown_product_is_not_found() {
        let state = state();
        join(&state, "seller");
        assert!(matches!(
            delete_product(&state, &ProductId::from("prod-missing")),
            Err(ClientError::Store(StoreError::NotFound { .. }))
        ));
    }
}
