use super::{BlobBackend, BlobConnection, BlobKey, StoredBlob};
use crate::error::{Result, ShowcaseError};
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

struct MemBlobState {
    next_key: BlobKey,
    records: BTreeMap<BlobKey, StoredBlob>,
}

impl Default for MemBlobState {
    fn default() -> Self {
        Self {
            next_key: 1,
            records: BTreeMap::new(),
        }
    }
}

/// In-memory blob backend for testing.
///
/// Records survive `BlobStore::close` (they live in the backend, not the
/// connection), so reopen behaviour can be exercised.
#[derive(Default)]
pub struct MemBlobBackend {
    state: Rc<RefCell<MemBlobState>>,
    fail_open: Cell<bool>,
    fail_writes: Rc<Cell<bool>>,
    opens: Cell<usize>,
}

impl MemBlobBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_open(&self, fail: bool) {
        self.fail_open.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful opens so far.
    pub fn open_count(&self) -> usize {
        self.opens.get()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct MemBlobConnection {
    state: Rc<RefCell<MemBlobState>>,
    fail_writes: Rc<Cell<bool>>,
}

impl BlobBackend for MemBlobBackend {
    type Connection = MemBlobConnection;

    fn open(&self) -> Result<MemBlobConnection> {
        if self.fail_open.get() {
            return Err(ShowcaseError::Blob("Simulated open error".to_string()));
        }
        self.opens.set(self.opens.get() + 1);
        Ok(MemBlobConnection {
            state: Rc::clone(&self.state),
            fail_writes: Rc::clone(&self.fail_writes),
        })
    }
}

impl BlobConnection for MemBlobConnection {
    fn add(&self, data: &[u8], created_at: DateTime<Utc>) -> Result<BlobKey> {
        if self.fail_writes.get() {
            return Err(ShowcaseError::Blob("Simulated write error".to_string()));
        }
        let mut state = self.state.borrow_mut();
        let key = state.next_key;
        state.next_key += 1;
        state.records.insert(
            key,
            StoredBlob {
                key,
                data: data.to_vec(),
                created_at,
            },
        );
        Ok(key)
    }

    fn get(&self, key: BlobKey) -> Result<Option<StoredBlob>> {
        Ok(self.state.borrow().records.get(&key).cloned())
    }
}
