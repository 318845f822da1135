//! # Showcase Architecture
//!
//! Showcase is a **UI-agnostic service catalog library**: a list of service products,
//! a list of featured editorial entries, uploaded images, and a theme preference, all
//! kept on the local machine. The storefront and admin console are clients of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/showcase)                                      │
//! │  - Parses arguments, renders output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                  StorefrontView (storefront)  │
//! │  - Thin facade over commands   - Live snapshot + debounce   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)   Queries (query.rs)  Seed        │
//! │  - Validation, create/update/delete, publish, retire       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage                                                    │
//! │  - store/: DataStore over a string key-value backend        │
//! │  - blob/:  binary payloads keyed by integer                 │
//! │  - resolver.rs: image reference → displayable URL           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From the API inward nothing writes to stdout/stderr or exits the process. Failures
//! are `Result`s; the few failures the catalog deliberately hides (a corrupt collection,
//! a missing image) are kept as typed outcomes internally and masked at the edge.
//!
//! ## Execution Model
//!
//! One thread of control. Stores use `RefCell`/`Rc` for interior state and every call
//! completes before returning. Collection writes are whole-list read-modify-write, so
//! interleaved writers follow last-write-wins.
//!
//! ## Testing
//!
//! Commands and queries are tested against [`store::memory::InMemoryStore`] and
//! [`blob::mem::MemBlobBackend`]; the filesystem backends get their own tests under
//! `tests/`. Enable the `test_utils` feature to use `StoreFixture` from other crates.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade used by every client
//! - [`blob`]: Blob store, transient references, backends
//! - [`commands`]: Admin and storefront operations
//! - [`config`]: Layered configuration
//! - [`error`]: Error type and `Result` alias
//! - [`init`]: Data directory resolution and startup
//! - [`model`]: Records, drafts, theme, id allocation
//! - [`query`]: Filtering, sorting and selection
//! - [`resolver`]: Image reference classification and resolution
//! - [`seed`]: First-run data and one-shot patches
//! - [`store`]: Collection store and change notification
//! - [`storefront`]: Storefront view model
//! - [`vocab`]: Fixed vocabularies, tag colors, price formatting

pub mod api;
pub mod blob;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod query;
pub mod resolver;
pub mod seed;
pub mod store;
pub mod storefront;
pub mod vocab;
