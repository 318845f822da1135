//! # Startup
//!
//! [`initialize`] wires the production stack together:
//!
//! ```text
//! <data dir>/
//! ├── showcase.toml   # optional configuration
//! ├── storage/        # one file per collection key (FileStore)
//! └── images/         # blob payloads and index (FsBlobBackend)
//! ```
//!
//! The data directory is, in priority order: the explicit override, the
//! `SHOWCASE_DATA` environment variable, then the OS data directory from the
//! `directories` crate. Startup always runs the seed routine, so a fresh directory
//! comes up with the sample catalog and known data fixes are applied once.

use crate::api::ShowcaseApi;
use crate::blob::fs::FsBlobBackend;
use crate::blob::BlobStore;
use crate::config::ShowcaseConfig;
use crate::error::{Result, ShowcaseError};
use crate::seed::SeedReport;
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DATA_ENV: &str = "SHOWCASE_DATA";

pub struct ShowcaseContext {
    pub api: ShowcaseApi<FileStore, FsBlobBackend>,
    pub data_dir: PathBuf,
    pub seed_report: SeedReport,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "showcase", "showcase")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ShowcaseError::Store("Could not determine data directory".to_string()))
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<ShowcaseContext> {
    let data_dir = resolve_data_dir(data_override)?;
    std::fs::create_dir_all(&data_dir)?;

    let config = ShowcaseConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default configuration");
        ShowcaseConfig::default()
    });

    let store = FileStore::new_fs(data_dir.join("storage"));
    let blobs = BlobStore::new(FsBlobBackend::new(data_dir.join("images")));
    let mut api = ShowcaseApi::new(store, blobs, config);

    let seed_report = api.seed()?;
    tracing::debug!(path = %data_dir.display(), "showcase initialized");

    Ok(ShowcaseContext {
        api,
        data_dir,
        seed_report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ServiceQuery;

    #[test]
    fn override_wins() {
        let dir = PathBuf::from("/tmp/showcase-override");
        assert_eq!(resolve_data_dir(Some(dir.clone())).unwrap(), dir);
    }

    #[test]
    fn fresh_directory_is_seeded_once() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
        assert!(ctx.seed_report.changed_anything());
        assert!(dir.path().join("storage").exists());
        let shop = ctx.api.storefront_services(&ServiceQuery::default()).unwrap();
        assert!(!shop.listed_services.is_empty());
        drop(ctx);

        let again = initialize(Some(dir.path().to_path_buf())).unwrap();
        assert!(!again.seed_report.changed_anything());
    }
}
