//! # Command Layer
//!
//! The catalog's business operations. Each area lives in its own submodule as plain
//! functions over a [`DataStore`](crate::store::DataStore) (or a
//! [`BlobStore`](crate::blob::BlobStore) for images).
//!
//! Commands do no terminal I/O, take no parsed arguments and pick no exit codes. They
//! return a [`CmdResult`] carrying the records they touched or listed plus leveled
//! messages, and the caller decides how to show it.
//!
//! Every collection write follows the same shape: load the whole collection, change it
//! in memory, write it back. The store fires the change notification on that write.
//! Two callers interleaving this cycle means the later write wins; nothing here guards
//! against it because there is only one thread of control.
//!
//! ## Modules
//!
//! - [`services`]: admin listing, create/update, delete, publish, retire/restore
//! - [`featured`]: featured listing, create/update, delete, recommendation picking
//! - [`images`]: upload, resolve and export image payloads
//! - [`theme`]: read, set and toggle the theme preference

use crate::model::{FeaturedContent, ServiceProduct};
use serde::Serialize;

pub mod featured;
pub mod images;
pub mod services;
pub mod theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_services: Vec<ServiceProduct>,
    pub listed_services: Vec<ServiceProduct>,
    pub affected_featured: Vec<FeaturedContent>,
    pub listed_featured: Vec<FeaturedContent>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_services(mut self, services: Vec<ServiceProduct>) -> Self {
        self.listed_services = services;
        self
    }

    pub fn with_listed_featured(mut self, featured: Vec<FeaturedContent>) -> Self {
        self.listed_featured = featured;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
