use crate::error::Result;

/// Abstract interface for raw key-value storage.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while CatalogStore handles the "what" (typed collections, defaults, notification).
///
/// All methods take `&self`; implementations handle their own interior mutability.
pub trait StorageBackend {
    /// Read the text stored under `key`.
    /// Returns Ok(None) if the key was never written or has been removed.
    /// Returns Err only on actual I/O errors.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// All keys currently stored, in no particular order.
    fn keys(&self) -> Result<Vec<String>>;
}
