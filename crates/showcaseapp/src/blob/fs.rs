use super::{BlobBackend, BlobConnection, BlobKey, StoredBlob};
use crate::error::{Result, ShowcaseError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const INDEX_FILE: &str = "index.json";

/// Filesystem blob backend.
///
/// ```text
/// images/
/// ├── index.json     # next key + creation time of every record
/// ├── 1.bin
/// └── 2.bin
/// ```
pub struct FsBlobBackend {
    root: PathBuf,
}

impl FsBlobBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlobIndex {
    next_key: BlobKey,
    records: BTreeMap<BlobKey, DateTime<Utc>>,
}

impl Default for BlobIndex {
    fn default() -> Self {
        Self {
            next_key: 1,
            records: BTreeMap::new(),
        }
    }
}

pub struct FsBlobConnection {
    root: PathBuf,
    index: RefCell<BlobIndex>,
}

impl FsBlobConnection {
    fn payload_path(&self, key: BlobKey) -> PathBuf {
        self.root.join(format!("{}.bin", key))
    }

    fn write_atomic(&self, target: &Path, bytes: &[u8]) -> Result<()> {
        let tmp = self.root.join(format!(".blob-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, bytes).map_err(ShowcaseError::Io)?;
        fs::rename(&tmp, target).map_err(ShowcaseError::Io)?;
        Ok(())
    }

    fn save_index(&self, index: &BlobIndex) -> Result<()> {
        let content = serde_json::to_string_pretty(index).map_err(ShowcaseError::Serialization)?;
        self.write_atomic(&self.root.join(INDEX_FILE), content.as_bytes())
    }
}

impl BlobBackend for FsBlobBackend {
    type Connection = FsBlobConnection;

    fn open(&self) -> Result<FsBlobConnection> {
        fs::create_dir_all(&self.root).map_err(ShowcaseError::Io)?;

        let index_path = self.root.join(INDEX_FILE);
        let index = if index_path.exists() {
            let content = fs::read_to_string(&index_path).map_err(ShowcaseError::Io)?;
            serde_json::from_str(&content).map_err(ShowcaseError::Serialization)?
        } else {
            BlobIndex::default()
        };

        Ok(FsBlobConnection {
            root: self.root.clone(),
            index: RefCell::new(index),
        })
    }
}

impl BlobConnection for FsBlobConnection {
    fn add(&self, data: &[u8], created_at: DateTime<Utc>) -> Result<BlobKey> {
        let mut index = self.index.borrow_mut();
        let key = index.next_key;

        // 1. Payload first, so the index never points at a missing file
        self.write_atomic(&self.payload_path(key), data)?;

        // 2. Index
        index.next_key += 1;
        index.records.insert(key, created_at);
        self.save_index(&index)?;

        Ok(key)
    }

    fn get(&self, key: BlobKey) -> Result<Option<StoredBlob>> {
        let created_at = match self.index.borrow().records.get(&key) {
            Some(ts) => *ts,
            None => return Ok(None),
        };

        let path = self.payload_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read(path).map_err(ShowcaseError::Io)?;
        Ok(Some(StoredBlob {
            key,
            data,
            created_at,
        }))
    }
}
