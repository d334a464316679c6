//! Durable slots: where the serialized snapshot document lives.

use std::cell::RefCell;
use std::rc::Rc;

use sueahhahn_shared::constants::SNAPSHOT_KEY;

use crate::database::Database;
use crate::error::PersistenceError;

/// A single durable value holding the whole snapshot document.
pub trait DurableSlot {
    /// Read the stored document. `Ok(None)` means nothing was ever saved.
    fn load(&self) -> Result<Option<String>, PersistenceError>;

    /// Replace the stored document.
    fn save(&self, doc: &str) -> Result<(), PersistenceError>;
}

impl DurableSlot for Database {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        self.get_value(SNAPSHOT_KEY)
    }

    fn save(&self, doc: &str) -> Result<(), PersistenceError> {
        self.put_value(SNAPSHOT_KEY, doc)
    }
}

impl<S: DurableSlot + ?Sized> DurableSlot for Box<S> {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        (**self).load()
    }

    fn save(&self, doc: &str) -> Result<(), PersistenceError> {
        (**self).save(doc)
    }
}

/// Process-local slot. Clones share the same contents, so a test (or a
/// second store in the same session) can read what another handle saved.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    doc: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with `doc`, as if saved by an earlier session.
    pub fn with_document(doc: impl Into<String>) -> Self {
        Self {
            doc: Rc::new(RefCell::new(Some(doc.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.doc.borrow().clone()
    }
}

impl DurableSlot for MemorySlot {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.contents())
    }

    fn save(&self, doc: &str) -> Result<(), PersistenceError> {
        *self.doc.borrow_mut() = Some(doc.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_slot_clones_share_contents() {
        let slot = MemorySlot::new();
        let other = slot.clone();
        assert_eq!(other.load().unwrap(), None);

        slot.save("{\"users\":[]}").unwrap();
        assert_eq!(other.load().unwrap().as_deref(), Some("{\"users\":[]}"));
    }

    #[test]
    fn database_slot_uses_snapshot_key() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(DurableSlot::load(&db).unwrap(), None);

        DurableSlot::save(&db, "doc").unwrap();
        assert_eq!(db.get_value(SNAPSHOT_KEY).unwrap().as_deref(), Some("doc"));
    }
}
