//! The authoritative in-memory store.
//!
//! A [`Store`] owns the four entity collections, a [`DurableSlot`] that holds
//! the serialized copy, and the [`ChangeChannel`] its consumers subscribe to.
//! Every successful mutation follows the same path: validate, apply, persist
//! the whole snapshot, broadcast. Failed mutations change nothing and stay
//! silent.
//!
//! The store is single-threaded (`!Send`) and every operation takes `&self`.
//! No state borrow is held while subscribers run, so a callback may read or
//! mutate the store again; hold the store in an `Rc` and capture a `Weak` in
//! such callbacks.

use std::cell::{Cell, RefCell};

use sueahhahn_shared::credential::CredentialConfig;
use tracing::{debug, info, warn};

use crate::changes::{ChangeChannel, Subscription};
use crate::error::ValidationError;
use crate::seed;
use crate::slot::DurableSlot;
use crate::snapshot::Snapshot;

/// Where the state a store started from came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Parsed from the slot's stored document.
    Restored,
    /// The slot was empty or unusable; demo data was written.
    Seeded,
    /// Handed in by the caller via [`Store::from_snapshot`].
    Provided,
}

pub struct Store {
    pub(crate) state: RefCell<Snapshot>,
    slot: Box<dyn DurableSlot>,
    changes: ChangeChannel,
    origin: Origin,
    durable: Cell<bool>,
}

impl Store {
    /// Load the stored snapshot from `slot`, or seed demo data when there is
    /// none (or it cannot be read or parsed). Never fails: storage problems
    /// are logged and the store runs from memory.
    pub fn open(slot: impl DurableSlot + 'static, credentials: &CredentialConfig) -> Self {
        if let Some(snapshot) = load(&slot) {
            info!(
                users = snapshot.users.len(),
                products = snapshot.products.len(),
                reviews = snapshot.reviews.len(),
                notifications = snapshot.notifications.len(),
                "restored marketplace snapshot"
            );
            return Self::assemble(Box::new(slot), snapshot, Origin::Restored);
        }

        let snapshot = seed::demo_snapshot(credentials).unwrap_or_else(|e| {
            warn!(error = %e, "failed to build demo data, starting empty");
            Snapshot::default()
        });
        info!(
            users = snapshot.users.len(),
            products = snapshot.products.len(),
            "seeded marketplace with demo data"
        );

        let store = Self::assemble(Box::new(slot), snapshot, Origin::Seeded);
        store.persist();
        store
    }

    /// Start from an explicit snapshot, ignoring whatever `slot` holds, and
    /// write it out immediately.
    pub fn from_snapshot(
        slot: impl DurableSlot + 'static,
        snapshot: Snapshot,
    ) -> Result<Self, ValidationError> {
        snapshot.validate()?;
        let store = Self::assemble(Box::new(slot), snapshot, Origin::Provided);
        store.persist();
        Ok(store)
    }

    fn assemble(slot: Box<dyn DurableSlot>, snapshot: Snapshot, origin: Origin) -> Self {
        Self {
            state: RefCell::new(snapshot),
            slot,
            changes: ChangeChannel::new(),
            origin,
            durable: Cell::new(true),
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// `false` if the most recent write to the durable slot failed. The
    /// in-memory state is authoritative either way.
    pub fn is_durable(&self) -> bool {
        self.durable.get()
    }

    /// Copy of all four collections.
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Register for the payload-less "store changed" signal.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.changes.subscribe(callback)
    }

    pub fn subscriber_count(&self) -> usize {
        self.changes.subscriber_count()
    }

    /// Persist the new state, then notify subscribers.
    pub(crate) fn commit(&self, mutation: &'static str) {
        self.persist();
        debug!(mutation, "store changed");
        self.changes.broadcast();
    }

    fn persist(&self) {
        let result = self
            .state
            .borrow()
            .to_json()
            .and_then(|doc| self.slot.save(&doc));

        match result {
            Ok(()) => self.durable.set(true),
            Err(e) => {
                warn!(error = %e, "failed to persist snapshot, keeping in-memory state");
                self.durable.set(false);
            }
        }
    }
}

fn load(slot: &dyn DurableSlot) -> Option<Snapshot> {
    match slot.load() {
        Ok(Some(doc)) => match Snapshot::from_json(&doc) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "stored snapshot unusable, falling back to demo data");
                None
            }
        },
        Ok(None) => {
            info!("no stored snapshot found");
            None
        }
        Err(e) => {
            warn!(error = %e, "failed to read stored snapshot, falling back to demo data");
            None
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Store")
            .field("origin", &self.origin)
            .field("users", &state.users.len())
            .field("products", &state.products.len())
            .field("reviews", &state.reviews.len())
            .field("notifications", &state.notifications.len())
            .field("durable", &self.durable.get())
            .field("changes", &self.changes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::models::{Product, ProductPatch};
    use crate::slot::MemorySlot;
    use crate::test_support::{cheap_config, change_counter, empty_store, user, FailingSlot};

    #[test]
    fn empty_slot_is_seeded_and_persisted() {
        let slot = MemorySlot::new();
        let store = Store::open(slot.clone(), &cheap_config());

        assert_eq!(store.origin(), Origin::Seeded);
        assert!(!store.users().is_empty());
        assert!(!store.products().is_empty());

        let saved = Snapshot::from_json(&slot.contents().unwrap()).unwrap();
        assert_eq!(saved, store.snapshot());
    }

    #[test]
    fn stored_document_is_restored_not_reseeded() {
        let slot = MemorySlot::new();
        let first = Store::open(slot.clone(), &cheap_config());
        let seeded = first.snapshot();
        drop(first);

        let second = Store::open(slot, &cheap_config());
        assert_eq!(second.origin(), Origin::Restored);
        assert_eq!(second.snapshot(), seeded);
    }

    #[test]
    fn emptied_store_is_not_reseeded() {
        let slot = MemorySlot::new();
        let store = Store::open(slot.clone(), &cheap_config());
        for product in store.products() {
            assert!(store.delete_product(&product.id));
        }
        assert!(store.products().is_empty());
        drop(store);

        let reopened = Store::open(slot, &cheap_config());
        assert_eq!(reopened.origin(), Origin::Restored);
        assert!(reopened.products().is_empty());
    }

    #[test]
    fn malformed_document_falls_back_to_seed() {
        let slot = MemorySlot::with_document("{\"users\": 42");
        let store = Store::open(slot.clone(), &cheap_config());

        assert_eq!(store.origin(), Origin::Seeded);
        assert!(!store.users().is_empty());
        // the broken document was replaced by the seed
        assert!(Snapshot::from_json(&slot.contents().unwrap()).is_ok());
    }

    #[test]
    fn dangling_reference_falls_back_to_seed() {
        let doc = r#"{"users":[],"products":[],"reviews":[],"notifications":[
            {"id":"notif-1","userUid":"u-ghost","title":"t","message":"m",
             "type":"SYSTEM","isRead":false,"timestamp":"2024-01-01T00:00:00Z"}]}"#;
        let slot = MemorySlot::with_document(doc);
        let store = Store::open(slot.clone(), &cheap_config());

        assert_eq!(store.origin(), Origin::Seeded);
        assert!(store
            .notifications()
            .iter()
            .all(|n| n.user_uid.as_str() != "u-ghost"));
        assert!(Snapshot::from_json(&slot.contents().unwrap()).is_ok());
    }

    #[test]
    fn unreadable_slot_falls_back_to_seed() {
        let store = Store::open(FailingSlot, &cheap_config());
        assert_eq!(store.origin(), Origin::Seeded);
        assert!(!store.users().is_empty());
        assert!(!store.is_durable());
    }

    #[test]
    fn write_failure_keeps_in_memory_state() {
        let store = Store::from_snapshot(FailingSlot, Snapshot::default()).unwrap();
        assert!(!store.is_durable());

        let (hits, _sub) = change_counter(&store);
        let seller = store.add_user(user("jay_fai")).unwrap();

        assert_eq!(store.user(&seller.uid), Some(seller));
        assert_eq!(hits.get(), 1);
        assert!(!store.is_durable());
    }

    #[test]
    fn deleted_product_absent_after_reload() {
        let slot = MemorySlot::new();
        let store = Store::from_snapshot(slot.clone(), Snapshot::default()).unwrap();
        let seller = store.add_user(user("seller")).unwrap();
        let keep = store
            .add_product(Product::new(seller.uid.clone(), "Khao Man Gai", 55.0))
            .unwrap();
        let gone = store
            .add_product(Product::new(seller.uid.clone(), "Boat Noodles", 50.0))
            .unwrap();

        assert!(store.delete_product(&gone.id));
        drop(store);

        let reloaded = Store::open(slot, &cheap_config());
        assert_eq!(reloaded.products(), vec![keep]);
        assert!(reloaded.product(&gone.id).is_none());
    }

    #[test]
    fn every_mutation_broadcasts_once() {
        let store = empty_store();
        let (hits, _sub) = change_counter(&store);

        let seller = store.add_user(user("seller")).unwrap();
        let buyer = store.add_user(user("buyer")).unwrap();
        assert_eq!(hits.get(), 2);

        let product = store
            .add_product(Product::new(seller.uid.clone(), "Moo Ping", 10.0))
            .unwrap();
        store
            .update_product(
                &product.id,
                ProductPatch {
                    stock: Some(3),
                    ..Default::default()
                },
            )
            .unwrap();
        store.toggle_follow(&buyer.uid, &seller.uid).unwrap();
        assert!(store.delete_product(&product.id));
        assert_eq!(hits.get(), 6);
    }

    #[test]
    fn rejected_mutations_stay_silent() {
        let slot = MemorySlot::new();
        let store = Store::from_snapshot(slot.clone(), Snapshot::default()).unwrap();
        let seller = store.add_user(user("seller")).unwrap();
        let before = slot.contents();
        let (hits, _sub) = change_counter(&store);

        assert!(store.add_user(user("SELLER")).is_err());
        assert!(store.toggle_follow(&seller.uid, &seller.uid).is_err());
        assert!(!store.delete_product(&"prod-missing".into()));

        assert_eq!(hits.get(), 0);
        assert_eq!(slot.contents(), before);
    }

    #[test]
    fn subscriber_may_mutate_from_callback() {
        let store = Rc::new(empty_store());
        let seller = store.add_user(user("seller")).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let (log, weak) = (Rc::clone(&seen), Rc::downgrade(&store));
        let _observer = store.subscribe(move || {
            if let Some(store) = weak.upgrade() {
                log.borrow_mut().push(store.products()[0].stock);
            }
        });

        // Restock whenever a product sells out.
        let weak = Rc::downgrade(&store);
        let _restock = store.subscribe(move || {
            let Some(store) = weak.upgrade() else { return };
            for product in store.products() {
                if product.stock == 0 {
                    store
                        .update_product(
                            &product.id,
                            ProductPatch {
                                stock: Some(10),
                                ..Default::default()
                            },
                        )
                        .unwrap();
                }
            }
        });

        let product = store
            .add_product(Product::new(seller.uid.clone(), "Sai Krok", 20.0))
            .unwrap();
        assert_eq!(product.stock, 0);

        // Round one sees the sold-out product, the queued round the restock.
        assert_eq!(*seen.borrow(), vec![0, 10]);
        assert_eq!(store.product(&product.id).unwrap().stock, 10);
    }

    #[test]
    fn from_snapshot_rejects_inconsistent_state() {
        let mut snapshot = Snapshot::default();
        snapshot
            .products
            .push(Product::new("u-nobody".into(), "Orphan", 1.0));
        assert!(Store::from_snapshot(MemorySlot::new(), snapshot).is_err());
    }
}
