//! # Blob Store
//!
//! Uploaded images are kept out of the catalog collections. The catalog only holds
//! *reference strings*; the binary payloads live here, keyed by an auto-incrementing
//! integer that is handed out as a string (`"1"`, `"2"`, ...).
//!
//! ## Connection Lifecycle
//!
//! [`BlobStore`] opens its backend lazily. The first call to [`BlobStore::initialize`]
//! (directly or via `save_image` / `lookup`) opens the database and memoizes the
//! connection; later calls reuse it. A failed open is reported to the caller and is
//! not memoized, so the next call tries again. [`BlobStore::close`] drops the
//! connection and revokes every transient reference minted through it.
//!
//! ## Transient References
//!
//! A successful lookup does not return the payload itself but a freshly minted
//! `blob:` reference, valid only for this `BlobStore` instance (the session). It is
//! never a durable URL: persist the key, not the reference. Use
//! [`BlobStore::read_transient`] to get the bytes behind a reference.
//!
//! ## Implementations
//!
//! - [`fs::FsBlobBackend`]: payload files plus a JSON index under a directory.
//! - [`mem::MemBlobBackend`]: in-memory fake with failure injection for tests.

use crate::error::{Result, ShowcaseError};
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use uuid::Uuid;

pub mod fs;
pub mod mem;

pub type BlobKey = u64;

pub const TRANSIENT_PREFIX: &str = "blob:";

/// One record of the object collection.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBlob {
    pub key: BlobKey,
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// Opens connections to an embedded object database.
pub trait BlobBackend {
    type Connection: BlobConnection;

    /// Open the database, creating its object collection if needed.
    fn open(&self) -> Result<Self::Connection>;
}

/// An open handle on the object collection.
pub trait BlobConnection {
    /// Insert a payload under the next key. Keys are never reused.
    fn add(&self, data: &[u8], created_at: DateTime<Utc>) -> Result<BlobKey>;

    /// Fetch a record. Ok(None) when no record has that key.
    fn get(&self, key: BlobKey) -> Result<Option<StoredBlob>>;
}

pub struct BlobStore<B: BlobBackend> {
    backend: B,
    connection: RefCell<Option<Rc<B::Connection>>>,
    session: Uuid,
    transient: RefCell<HashMap<String, Rc<[u8]>>>,
    next_ref: Cell<u64>,
}

impl<B: BlobBackend> BlobStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            connection: RefCell::new(None),
            session: Uuid::new_v4(),
            transient: RefCell::new(HashMap::new()),
            next_ref: Cell::new(1),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Open the backend once and hand out the shared connection.
    pub fn initialize(&self) -> Result<Rc<B::Connection>> {
        if let Some(conn) = self.connection.borrow().as_ref() {
            return Ok(Rc::clone(conn));
        }

        let conn = Rc::new(self.backend.open().map_err(|e| {
            tracing::warn!(error = %e, "failed to open blob store");
            ShowcaseError::Blob(format!("open failed: {}", e))
        })?);
        tracing::debug!("blob store opened");
        *self.connection.borrow_mut() = Some(Rc::clone(&conn));
        Ok(conn)
    }

    pub fn is_open(&self) -> bool {
        self.connection.borrow().is_some()
    }

    /// Drop the memoized connection and revoke all transient references.
    pub fn close(&self) {
        self.connection.borrow_mut().take();
        self.transient.borrow_mut().clear();
    }

    /// Store a payload, returning its key as a string.
    pub fn save_image(&self, data: &[u8]) -> Result<String> {
        let conn = self.initialize()?;
        let key = conn.add(data, Utc::now()).map_err(|e| match e {
            ShowcaseError::Blob(_) => e,
            other => ShowcaseError::Blob(format!("insert failed: {}", other)),
        })?;
        tracing::info!(key, bytes = data.len(), "image stored");
        Ok(key.to_string())
    }

    /// Look up a key and mint a transient reference to its payload.
    /// Ok(None) when the key is unknown.
    pub fn lookup(&self, key: BlobKey) -> Result<Option<String>> {
        let conn = self.initialize()?;
        match conn.get(key)? {
            Some(record) => Ok(Some(self.mint(record.data))),
            None => Ok(None),
        }
    }

    fn mint(&self, data: Vec<u8>) -> String {
        let n = self.next_ref.get();
        self.next_ref.set(n + 1);
        let url = format!("{}showcase/{}/{}", TRANSIENT_PREFIX, self.session, n);
        self.transient
            .borrow_mut()
            .insert(url.clone(), Rc::from(data.into_boxed_slice()));
        url
    }

    /// Bytes behind a transient reference minted by this store.
    pub fn read_transient(&self, url: &str) -> Option<Rc<[u8]>> {
        self.transient.borrow().get(url).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::mem::MemBlobBackend;
    use super::*;

    #[test]
    fn initialize_is_memoized() {
        let blobs = BlobStore::new(MemBlobBackend::new());
        let a = blobs.initialize().unwrap();
        let b = blobs.initialize().unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(blobs.backend().open_count(), 1);
    }

    #[test]
    fn failed_open_is_rejected_and_retried() {
        let blobs = BlobStore::new(MemBlobBackend::new());
        blobs.backend().set_fail_open(true);
        assert!(matches!(blobs.initialize(), Err(ShowcaseError::Blob(_))));
        assert!(!blobs.is_open());

        blobs.backend().set_fail_open(false);
        assert!(blobs.initialize().is_ok());
        assert_eq!(blobs.backend().open_count(), 2);
    }

    #[test]
    fn save_returns_increasing_string_keys() {
        let blobs = BlobStore::new(MemBlobBackend::new());
        assert_eq!(blobs.save_image(b"one").unwrap(), "1");
        assert_eq!(blobs.save_image(b"two").unwrap(), "2");
    }

    #[test]
    fn failed_insert_is_rejected() {
        let blobs = BlobStore::new(MemBlobBackend::new());
        blobs.backend().set_fail_writes(true);
        assert!(matches!(blobs.save_image(b"x"), Err(ShowcaseError::Blob(_))));
    }

    #[test]
    fn lookup_mints_fresh_references() {
        let blobs = BlobStore::new(MemBlobBackend::new());
        let key: BlobKey = blobs.save_image(b"png-bytes").unwrap().parse().unwrap();

        let first = blobs.lookup(key).unwrap().unwrap();
        let second = blobs.lookup(key).unwrap().unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with(TRANSIENT_PREFIX));
        assert_eq!(&*blobs.read_transient(&first).unwrap(), b"png-bytes");
    }

    #[test]
    fn lookup_of_unknown_key_is_none() {
        let blobs = BlobStore::new(MemBlobBackend::new());
        assert_eq!(blobs.lookup(42).unwrap(), None);
    }

    #[test]
    fn close_revokes_references_and_reopens_lazily() {
        let blobs = BlobStore::new(MemBlobBackend::new());
        let key: BlobKey = blobs.save_image(b"data").unwrap().parse().unwrap();
        let url = blobs.lookup(key).unwrap().unwrap();

        blobs.close();
        assert!(!blobs.is_open());
        assert!(blobs.read_transient(&url).is_none());

        // Payload is durable, only the reference was transient.
        let again = blobs.lookup(key).unwrap().unwrap();
        assert_eq!(&*blobs.read_transient(&again).unwrap(), b"data");
    }
}
