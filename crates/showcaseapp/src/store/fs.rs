use super::catalog_store::CatalogStore;
use super::fs_backend::FsBackend;
use std::path::PathBuf;

/// Production store: collections persisted as files under `root`.
pub type FileStore = CatalogStore<FsBackend>;

impl FileStore {
    pub fn new_fs(root: PathBuf) -> Self {
        CatalogStore::with_backend(FsBackend::new(root))
    }
}
