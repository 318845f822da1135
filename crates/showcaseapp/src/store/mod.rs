//! # Storage Layer
//!
//! This module defines the persistence abstraction for the catalog. The [`DataStore`]
//! trait is what the command layer talks to; [`catalog_store::CatalogStore`] implements
//! it on top of any raw key-value [`backend::StorageBackend`].
//!
//! ## Two Layers
//!
//! 1. **Backend** (`StorageBackend`): string keys to string values, nothing more.
//!    This is the "how" (filesystem vs memory).
//! 2. **CatalogStore**: typed collections, default-value policy, change notification.
//!    This is the "what".
//!
//! ## Collections
//!
//! Each collection is stored whole under one key as a JSON list:
//!
//! | Key            | Contents                    |
//! |----------------|-----------------------------|
//! | `servicesData` | `Vec<ServiceProduct>`       |
//! | `featuredData` | `Vec<FeaturedContent>`      |
//! | `theme`        | raw `light` / `dark` string |
//!
//! There is no partial access: readers get the full list, writers replace the full list.
//! Read-modify-write is not atomic; if two write paths interleave the later one wins.
//!
//! ## Read Policy
//!
//! A collection read yields the caller's default when the key is absent, when the text
//! is not a JSON list, or when it is an empty list. An emptied collection therefore
//! looks "never seeded" to [`crate::seed`]. Records are deserialized one by one: an
//! entry with the wrong shape is skipped and the rest of the list survives. The
//! distinction is kept as a [`CollectionRead`] so tests (and logs) can tell the
//! cases apart.
//!
//! ## Change Notification
//!
//! Every successful collection write fires the store's [`notify::ChangeNotifier`].
//! Views register on it explicitly; there is no global event bus.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one file per key under the data directory, atomic writes.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.

use crate::error::Result;
use crate::model::{FeaturedContent, ServiceProduct, Theme};

pub mod backend;
pub mod catalog_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod notify;

pub const SERVICES_KEY: &str = "servicesData";
pub const FEATURED_KEY: &str = "featuredData";
pub const THEME_KEY: &str = "theme";

/// Outcome of reading one collection, before the default-value policy is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionRead<T> {
    /// Stored text is a non-empty JSON list. `records` holds every entry that
    /// deserialized; `skipped` counts the entries that did not.
    Loaded { records: Vec<T>, skipped: usize },
    /// Key absent (or stored as an empty string).
    Missing,
    /// Stored list was empty.
    Empty,
    /// Stored text is not a JSON list; carries the parser message.
    Corrupt(String),
}

impl<T> CollectionRead<T> {
    /// Apply the read policy: anything but a list with usable records becomes `default`.
    pub fn unwrap_or(self, default: Vec<T>) -> Vec<T> {
        match self {
            CollectionRead::Loaded { records, .. } if !records.is_empty() => records,
            _ => default,
        }
    }

    /// Nothing was ever stored here, as far as seeding is concerned.
    ///
    /// A list whose entries all fail to deserialize still holds data, so it is not
    /// treated as unseeded.
    pub fn is_unseeded(&self) -> bool {
        !matches!(self, CollectionRead::Loaded { .. })
    }
}

/// Abstract interface for catalog persistence.
pub trait DataStore {
    /// All service products, or an empty list under the read policy.
    fn load_services(&self) -> Result<Vec<ServiceProduct>>;

    /// Replace the service collection and fire change notification.
    fn save_services(&mut self, services: &[ServiceProduct]) -> Result<()>;

    /// All featured entries, or an empty list under the read policy.
    fn load_featured(&self) -> Result<Vec<FeaturedContent>>;

    /// Replace the featured collection and fire change notification.
    fn save_featured(&mut self, featured: &[FeaturedContent]) -> Result<()>;

    /// Services with the read outcome kept, for callers that must not mistake damaged
    /// data for an empty collection.
    fn read_services(&self) -> Result<CollectionRead<ServiceProduct>>;

    fn read_featured(&self) -> Result<CollectionRead<FeaturedContent>>;

    /// Stored theme preference, `None` if unset or unrecognized.
    fn load_theme(&self) -> Result<Option<Theme>>;

    fn save_theme(&mut self, theme: Theme) -> Result<()>;

    /// The notifier fired after collection writes.
    fn notifier(&self) -> &notify::ChangeNotifier;
}
