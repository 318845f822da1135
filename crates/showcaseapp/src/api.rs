//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UIs. It owns
//! the collection store, the blob store and the loaded configuration, and forwards each
//! call to the matching command with the configured limits filled in.
//!
//! The facade carries no business logic and does no terminal I/O.
//!
//! ## Generic Over Storage
//!
//! `ShowcaseApi<S: DataStore, B: BlobBackend>`:
//! - Production: `ShowcaseApi<FileStore, FsBlobBackend>`
//! - Testing: `ShowcaseApi<InMemoryStore, MemBlobBackend>`

use crate::blob::{BlobBackend, BlobKey, BlobStore};
use crate::commands::services::BulkAction;
use crate::commands::{self, CmdResult};
use crate::config::ShowcaseConfig;
use crate::error::Result;
use crate::model::{FeaturedContent, FeaturedDraft, RecordId, ServiceDraft, ServiceProduct, Theme};
use crate::query::{AdminSort, Selection, ServiceQuery};
use crate::resolver::Resolution;
use crate::seed::{self, SeedReport};
use crate::store::DataStore;
use crate::storefront::{StorefrontView, SyncOutcome};
use std::time::Instant;

pub struct ShowcaseApi<S: DataStore, B: BlobBackend> {
    store: S,
    blobs: BlobStore<B>,
    config: ShowcaseConfig,
}

impl<S: DataStore, B: BlobBackend> ShowcaseApi<S, B> {
    pub fn new(store: S, blobs: BlobStore<B>, config: ShowcaseConfig) -> Self {
        Self {
            store,
            blobs,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn blobs(&self) -> &BlobStore<B> {
        &self.blobs
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn seed(&mut self) -> Result<SeedReport> {
        seed::run(&mut self.store)
    }

    // --- Storefront ---

    pub fn storefront_services(&self, query: &ServiceQuery) -> Result<CmdResult> {
        commands::services::storefront(&self.store, query)
    }

    pub fn storefront_featured(&self) -> Result<CmdResult> {
        commands::featured::storefront(&self.store)
    }

    /// A view subscribed to this store's change notifications.
    pub fn storefront_view(&self) -> StorefrontView {
        StorefrontView::new(&self.store, self.config.reload_debounce())
    }

    pub fn sync_storefront(&self, view: &mut StorefrontView, now: Instant) -> Result<SyncOutcome> {
        view.sync(&self.store, now)
    }

    // --- Services (admin) ---

    pub fn admin_services(&self, sort: &AdminSort) -> Result<CmdResult> {
        commands::services::list(&self.store, sort)
    }

    pub fn get_service(&self, id: RecordId) -> Result<ServiceProduct> {
        commands::services::get(&self.store, id)
    }

    pub fn save_service(&mut self, draft: ServiceDraft, id: Option<RecordId>) -> Result<CmdResult> {
        commands::services::save(&mut self.store, draft, id)
    }

    pub fn toggle_published(&mut self, id: RecordId) -> Result<CmdResult> {
        commands::services::toggle_published(&mut self.store, id)
    }

    /// Select every service, or clear the selection if it already covers all of them.
    pub fn toggle_select_all(&self, selection: &mut Selection) -> Result<()> {
        commands::services::toggle_select_all(&self.store, selection)
    }

    /// Publish, unpublish, retire, restore or delete the selected services.
    pub fn apply_to_selection(
        &mut self,
        selection: &mut Selection,
        action: BulkAction,
    ) -> Result<CmdResult> {
        commands::services::apply_to_selection(&mut self.store, selection, action)
    }

    // --- Featured (admin) ---

    pub fn admin_featured(&self) -> Result<CmdResult> {
        commands::featured::list(&self.store)
    }

    pub fn get_featured(&self, id: RecordId) -> Result<FeaturedContent> {
        commands::featured::get(&self.store, id)
    }

    pub fn recommended_services(&self, item: &FeaturedContent) -> Result<Vec<ServiceProduct>> {
        commands::featured::recommended(&self.store, item)
    }

    pub fn save_featured(&mut self, draft: FeaturedDraft, id: Option<RecordId>) -> Result<CmdResult> {
        let cap = self.config.max_recommended_services;
        commands::featured::save(&mut self.store, draft, id, cap)
    }

    pub fn delete_featured(&mut self, id: RecordId) -> Result<CmdResult> {
        commands::featured::delete(&mut self.store, id)
    }

    pub fn toggle_recommended(&self, draft: &mut FeaturedDraft, service_id: RecordId) -> Result<bool> {
        commands::featured::toggle_recommended(draft, service_id, self.config.max_recommended_services)
    }

    // --- Images ---

    pub fn upload_image(&self, data: &[u8]) -> Result<String> {
        commands::images::upload(&self.blobs, data)
    }

    pub fn resolve_image(&self, reference: &str) -> String {
        commands::images::resolve(&self.blobs, reference).into_url()
    }

    pub fn try_resolve_image(&self, reference: &str) -> Resolution {
        commands::images::resolve(&self.blobs, reference)
    }

    pub fn read_transient(&self, url: &str) -> Option<Vec<u8>> {
        commands::images::read_transient(&self.blobs, url)
    }

    pub fn export_image(&self, key: BlobKey) -> Result<Vec<u8>> {
        commands::images::export(&self.blobs, key)
    }

    // --- Theme ---

    pub fn theme(&self) -> Result<Theme> {
        commands::theme::current(&self.store, self.config.default_theme())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme> {
        commands::theme::set(&mut self.store, theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let default = self.config.default_theme();
        commands::theme::toggle(&mut self.store, default)
    }

    /// Release the blob connection and every transient reference of this session.
    pub fn close(&self) {
        self.blobs.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::mem::MemBlobBackend;
    use crate::store::memory::InMemoryStore;
    use std::time::Duration;

    type TestApi = ShowcaseApi<InMemoryStore, MemBlobBackend>;

    fn api() -> TestApi {
        ShowcaseApi::new(
            InMemoryStore::new(),
            BlobStore::new(MemBlobBackend::new()),
            ShowcaseConfig::default(),
        )
    }

    #[test]
    fn seeded_catalog_is_visible_on_storefront() {
        let mut api = api();
        let report = api.seed().unwrap();
        assert!(report.changed_anything());

        let shop = api.storefront_services(&ServiceQuery::default()).unwrap();
        assert!(!shop.listed_services.is_empty());
        let featured = api.storefront_featured().unwrap();
        assert!(!featured.listed_featured.is_empty());
    }

    #[test]
    fn featured_cap_comes_from_config() {
        let config = ShowcaseConfig {
            max_recommended_services: 2,
            ..Default::default()
        };
        let mut api = ShowcaseApi::new(
            InMemoryStore::new(),
            BlobStore::new(MemBlobBackend::new()),
            config,
        );
        let mut draft = FeaturedDraft::new("F", "<p/>", "pic/f.png");
        api.toggle_recommended(&mut draft, 1).unwrap();
        api.toggle_recommended(&mut draft, 2).unwrap();
        assert!(api.toggle_recommended(&mut draft, 3).is_err());

        draft.recommended_services.push(3);
        assert!(api.save_featured(draft, None).is_err());
    }

    #[test]
    fn uploaded_image_can_be_referenced_by_a_service() {
        let mut api = api();
        let key = api.upload_image(b"icon-bytes").unwrap();
        api.save_service(ServiceDraft::new("Uploaded", key.clone()), None)
            .unwrap();

        let admin = api.admin_services(&AdminSort::default()).unwrap();
        let icon = &admin.listed_services[0].icon;
        let url = api.resolve_image(icon);
        assert_eq!(api.read_transient(&url).unwrap(), b"icon-bytes");

        api.close();
        assert!(api.read_transient(&url).is_none());
    }

    #[test]
    fn theme_uses_configured_default() {
        let config = ShowcaseConfig {
            default_theme: "dark".into(),
            ..Default::default()
        };
        let mut api = ShowcaseApi::new(
            InMemoryStore::new(),
            BlobStore::new(MemBlobBackend::new()),
            config,
        );
        assert_eq!(api.theme().unwrap(), Theme::Dark);
        assert_eq!(api.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(api.theme().unwrap(), Theme::Light);
    }

    #[test]
    fn storefront_view_uses_configured_debounce() {
        let mut api = api();
        let mut view = api.storefront_view();
        let start = Instant::now();
        assert_eq!(api.sync_storefront(&mut view, start).unwrap(), SyncOutcome::Reloaded);

        api.seed().unwrap();
        assert_eq!(
            api.sync_storefront(&mut view, start + Duration::from_millis(100))
                .unwrap(),
            SyncOutcome::Dropped
        );
        assert!(view.services().is_empty());

        let mut selection = Selection::new();
        selection.toggle(1);
        api.apply_to_selection(&mut selection, BulkAction::Publish)
            .unwrap();
        assert_eq!(
            api.sync_storefront(&mut view, start + Duration::from_millis(600))
                .unwrap(),
            SyncOutcome::Reloaded
        );
        assert!(!view.services().is_empty());
    }

    #[test]
    fn bulk_unpublish_over_whole_catalog() {
        let mut api = api();
        api.seed().unwrap();

        let mut selection = Selection::new();
        api.toggle_select_all(&mut selection).unwrap();
        let result = api
            .apply_to_selection(&mut selection, BulkAction::Unpublish)
            .unwrap();
        assert!(!result.affected_services.is_empty());
        assert!(selection.is_empty());

        let shop = api.storefront_services(&ServiceQuery::default()).unwrap();
        assert!(shop.listed_services.is_empty());
    }
}
