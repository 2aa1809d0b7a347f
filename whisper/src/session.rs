use std::{cell::RefCell, rc::Rc};

use tracing::warn;

use crate::{error::Result, types::Identity};

/// key/value slot that survives page reloads, localStorage in the browser
pub trait SessionStore {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;

    fn restore_identity(&self) -> Option<Identity> {
        let raw = self.load()?;
        let identity = Identity::restore(&raw);

        if identity.is_none() {
            warn!("ignoring malformed stored identity");
        }

        identity
    }

    fn persist_identity(&self, identity: &Identity) -> Result<()> {
        self.save(&identity.to_json()?)
    }
}

/// in-memory store, used when the browser refuses access to localStorage;
/// clones share the same slot
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn with_value(value: &str) -> Self {
        MemoryStore {
            slot: Rc::new(RefCell::new(Some(value.to_owned()))),
        }
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, value: &str) -> Result<()> {
        *self.slot.borrow_mut() = Some(value.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_slot() {
        let store = MemoryStore::default();
        let other = store.clone();

        store
            .persist_identity(&Identity {
                id: "1".to_owned(),
                username: "bob".to_owned(),
            })
            .unwrap();

        assert_eq!(other.restore_identity().map(|i| i.username), Some("bob".to_owned()));

        other.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn malformed_value_is_ignored() {
        let store = MemoryStore::with_value("{\"id\":");

        assert_eq!(store.restore_identity(), None);
        assert!(store.load().is_some());
    }
}
