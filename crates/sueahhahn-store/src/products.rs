//! Products: full create/update/delete. The seller must exist.

use sueahhahn_shared::types::{EntityKind, ProductId, Uid};

use crate::error::{Result, StoreError, ValidationError};
use crate::models::{Product, ProductPatch};
use crate::store::Store;
use crate::validation::{check_price, check_product_fields};

impl Store {
    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// All products, hidden ones included, in insertion order.
    pub fn products(&self) -> Vec<Product> {
        self.state.borrow().products.clone()
    }

    pub fn product(&self, id: &ProductId) -> Option<Product> {
        self.state
            .borrow()
            .products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    pub fn products_by_seller(&self, seller: &Uid) -> Vec<Product> {
        self.state
            .borrow()
            .products
            .iter()
            .filter(|p| &p.seller_uid == seller)
            .cloned()
            .collect()
    }

    /// Products a buyer may see.
    pub fn visible_products(&self) -> Vec<Product> {
        self.state
            .borrow()
            .products
            .iter()
            .filter(|p| !p.is_hidden)
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    pub fn add_product(&self, product: Product) -> Result<Product> {
        {
            let mut state = self.state.borrow_mut();
            check_product_fields(&product)?;
            if state.products.iter().any(|p| p.id == product.id) {
                return Err(ValidationError::DuplicateId {
                    kind: EntityKind::Product,
                    id: product.id.to_string(),
                }
                .into());
            }
            if !state.has_user(&product.seller_uid) {
                return Err(ValidationError::UnknownUser(product.seller_uid.clone()).into());
            }
            state.products.push(product.clone());
        }

        tracing::info!(id = %product.id, seller = %product.seller_uid, "product added");
        self.commit("add_product");
        Ok(product)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Merge the provided fields. Retargeting `seller_uid` to an unknown
    /// user is rejected.
    pub fn update_product(&self, id: &ProductId, patch: ProductPatch) -> Result<Product> {
        let updated = {
            let mut state = self.state.borrow_mut();
            let Some(pos) = state.products.iter().position(|p| &p.id == id) else {
                return Err(StoreError::not_found(EntityKind::Product, id));
            };

            if let Some(seller) = &patch.seller_uid {
                if !state.has_user(seller) {
                    return Err(ValidationError::UnknownUser(seller.clone()).into());
                }
            }
            if let Some(price) = patch.price {
                check_price(price)?;
            }

            let product = &mut state.products[pos];
            if let Some(seller_uid) = patch.seller_uid {
                product.seller_uid = seller_uid;
            }
            if let Some(name) = patch.name {
                product.name = name;
            }
            if let Some(description) = patch.description {
                product.description = description;
            }
            if let Some(price) = patch.price {
                product.price = price;
            }
            if let Some(image) = patch.image {
                product.image = image;
            }
            if let Some(stock) = patch.stock {
                product.stock = stock;
            }
            if let Some(is_hidden) = patch.is_hidden {
                product.is_hidden = is_hidden;
            }
            product.clone()
        };

        tracing::debug!(id = %id, "product updated");
        self.commit("update_product");
        Ok(updated)
    }

    /// Flip visibility: `Visible ⇄ Hidden`.
    pub fn toggle_product_hidden(&self, id: &ProductId) -> Result<Product> {
        let current = self
            .product(id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))?;
        self.update_product(
            id,
            ProductPatch {
                is_hidden: Some(!current.is_hidden),
                ..Default::default()
            },
        )
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Remove a product. Returns `false` (and changes nothing) when no
    /// product has that id, including one that was already deleted.
    pub fn delete_product(&self, id: &ProductId) -> bool {
        let removed = {
            let mut state = self.state.borrow_mut();
            let before = state.products.len();
            state.products.retain(|p| &p.id != id);
            state.products.len() != before
        };

        if !removed {
            tracing::debug!(id = %id, "delete of unknown product ignored");
            return false;
        }

        tracing::info!(id = %id, "product deleted");
        self.commit("delete_product");
        true
    }
}
