use crate::blob::{BlobBackend, BlobConnection, BlobKey, BlobStore};
use crate::error::{Result, ShowcaseError};
use crate::resolver::{self, Resolution};

/// Store an uploaded payload; the returned key string is what goes into an image field.
pub fn upload<B: BlobBackend>(blobs: &BlobStore<B>, data: &[u8]) -> Result<String> {
    blobs.save_image(data)
}

pub fn resolve<B: BlobBackend>(blobs: &BlobStore<B>, reference: &str) -> Resolution {
    resolver::try_resolve(blobs, reference)
}

/// Raw bytes stored under `key`.
pub fn export<B: BlobBackend>(blobs: &BlobStore<B>, key: BlobKey) -> Result<Vec<u8>> {
    let conn = blobs.initialize()?;
    conn.get(key)?
        .map(|record| record.data)
        .ok_or_else(|| ShowcaseError::Blob(format!("No image stored under key {}", key)))
}

/// Bytes behind a transient reference minted in this session.
pub fn read_transient<B: BlobBackend>(blobs: &BlobStore<B>, url: &str) -> Option<Vec<u8>> {
    blobs.read_transient(url).map(|bytes| bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::mem::MemBlobBackend;

    #[test]
    fn upload_then_export() {
        let blobs = BlobStore::new(MemBlobBackend::new());
        let key = upload(&blobs, b"jpeg-bytes").unwrap();
        assert_eq!(key, "1");
        assert_eq!(export(&blobs, 1).unwrap(), b"jpeg-bytes");
    }

    #[test]
    fn export_of_unknown_key_fails() {
        let blobs = BlobStore::new(MemBlobBackend::new());
        assert!(matches!(export(&blobs, 9), Err(ShowcaseError::Blob(_))));
    }

    #[test]
    fn resolved_reference_reads_back_in_session() {
        let blobs = BlobStore::new(MemBlobBackend::new());
        let key = upload(&blobs, b"png").unwrap();
        let url = match resolve(&blobs, &key) {
            Resolution::Blob(url) => url,
            other => panic!("expected blob resolution, got {:?}", other),
        };
        assert_eq!(read_transient(&blobs, &url).unwrap(), b"png");

        blobs.close();
        assert!(read_transient(&blobs, &url).is_none());
    }

    #[test]
    fn upload_failure_is_reported() {
        let blobs = BlobStore::new(MemBlobBackend::new());
        blobs.backend().set_fail_writes(true);
        assert!(upload(&blobs, b"x").is_err());
    }
}
