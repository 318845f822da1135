//! # Image Reference Resolution
//!
//! Every image field in the catalog holds a reference string of one of four shapes:
//!
//! | Shape                | Example                         | Resolves to                 |
//! |----------------------|---------------------------------|-----------------------------|
//! | absolute URL         | `https://cdn.example/a.png`     | itself                      |
//! | data URI             | `data:image/png;base64,AAAA`    | itself                      |
//! | bundled asset path   | `pic\icons\a.png`               | `pic/icons/a.png`           |
//! | blob key             | `17`                            | transient `blob:` reference |
//!
//! Rules are evaluated in that order, after trimming surrounding whitespace. An asset
//! path is anything containing the `pic/` or `pic\` marker (case-insensitive); its
//! backslashes become forward slashes and it otherwise stays relative (no leading `/`
//! is added). Anything else is read as a blob key. A key that is not an integer is
//! passed through unchanged; a key with no record, or a failed lookup, yields `""`.
//!
//! Only the blob-key branch performs I/O. [`try_resolve`] reports which branch was
//! taken (and why a lookup produced nothing); [`resolve`] collapses that to the
//! displayable string.

use crate::blob::{BlobBackend, BlobKey, BlobStore};

const ASSET_MARKERS: [&str; 2] = ["pic/", "pic\\"];

/// Which of the reference shapes a string has. Pure, no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef<'a> {
    Empty,
    Url(&'a str),
    Asset(String),
    BlobKey(BlobKey),
    /// Not a URL, not an asset, not an integer key.
    Opaque(&'a str),
}

pub fn classify(reference: &str) -> ImageRef<'_> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return ImageRef::Empty;
    }

    if trimmed.starts_with("http") || trimmed.starts_with("data:") {
        return ImageRef::Url(trimmed);
    }

    let lower = trimmed.to_lowercase();
    if ASSET_MARKERS.iter().any(|m| lower.contains(m)) {
        return ImageRef::Asset(trimmed.replace('\\', "/"));
    }

    // Keys must be whole non-negative integers. A leading-digits prefix ("12abc") or a
    // sign ("-3") is not read as a key, so such strings pass through unchanged instead
    // of resolving to "" after a failed lookup.
    match trimmed.parse::<BlobKey>() {
        Ok(key) => ImageRef::BlobKey(key),
        Err(_) => ImageRef::Opaque(trimmed),
    }
}

/// Resolution outcome with the masked cases kept apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Displayable without a lookup (URL, data URI, asset path, opaque fallback, or empty).
    Direct(String),
    /// Blob found; carries the transient reference.
    Blob(String),
    /// Blob key has no record.
    NotFound(BlobKey),
    /// Opening the store or reading the record failed.
    Failed(String),
}

impl Resolution {
    pub fn into_url(self) -> String {
        match self {
            Resolution::Direct(url) | Resolution::Blob(url) => url,
            Resolution::NotFound(_) | Resolution::Failed(_) => String::new(),
        }
    }
}

pub fn try_resolve<B: BlobBackend>(blobs: &BlobStore<B>, reference: &str) -> Resolution {
    match classify(reference) {
        ImageRef::Empty => Resolution::Direct(String::new()),
        ImageRef::Url(url) => Resolution::Direct(url.to_string()),
        ImageRef::Asset(path) => Resolution::Direct(path),
        ImageRef::Opaque(raw) => Resolution::Direct(raw.to_string()),
        ImageRef::BlobKey(key) => match blobs.lookup(key) {
            Ok(Some(url)) => Resolution::Blob(url),
            Ok(None) => Resolution::NotFound(key),
            Err(e) => {
                tracing::warn!(key, error = %e, "image lookup failed");
                Resolution::Failed(e.to_string())
            }
        },
    }
}

/// Turn a reference into something displayable; `""` when nothing can be shown.
pub fn resolve<B: BlobBackend>(blobs: &BlobStore<B>, reference: &str) -> String {
    try_resolve(blobs, reference).into_url()
}
