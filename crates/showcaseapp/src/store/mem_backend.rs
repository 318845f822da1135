use super::backend::StorageBackend;
use crate::error::{Result, ShowcaseError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the catalog is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Test helper to plant raw text under a key, bypassing serialization.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(ShowcaseError::Store("Simulated read error".to_string()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ShowcaseError::Store("Simulated write error".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let backend = MemBackend::new();
        backend.set_item("a", "1").unwrap();
        assert_eq!(backend.get_item("a").unwrap(), Some("1".to_string()));
        assert_eq!(backend.get_item("b").unwrap(), None);
    }

    #[test]
    fn remove_is_idempotent() {
        let backend = MemBackend::new();
        backend.set_item("a", "1").unwrap();
        backend.remove_item("a").unwrap();
        backend.remove_item("a").unwrap();
        assert_eq!(backend.get_item("a").unwrap(), None);
        assert!(backend.keys().unwrap().is_empty());
    }

    #[test]
    fn simulated_write_error_leaves_value_untouched() {
        let backend = MemBackend::new();
        backend.set_item("a", "1").unwrap();
        backend.set_simulate_write_error(true);
        assert!(backend.set_item("a", "2").is_err());
        assert_eq!(backend.get_item("a").unwrap(), Some("1".to_string()));
    }
}
