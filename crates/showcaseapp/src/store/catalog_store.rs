use super::backend::StorageBackend;
use super::notify::ChangeNotifier;
use super::{CollectionRead, DataStore, FEATURED_KEY, SERVICES_KEY, THEME_KEY};
use crate::error::{Result, ShowcaseError};
use crate::model::{FeaturedContent, ServiceProduct, Theme};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub struct CatalogStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    notifier: ChangeNotifier,
}

impl<B: StorageBackend> CatalogStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Use a notifier owned by the caller instead of a private one.
    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read a collection without applying the default-value policy.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<CollectionRead<T>> {
        let raw = match self.backend.get_item(key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(CollectionRead::Missing),
        };

        let entries = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => entries,
            Err(e) => return Ok(CollectionRead::Corrupt(e.to_string())),
        };
        if entries.is_empty() {
            return Ok(CollectionRead::Empty);
        }

        let total = entries.len();
        let records: Vec<T> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        let skipped = total - records.len();
        Ok(CollectionRead::Loaded { records, skipped })
    }

    /// Read a collection, falling back to `default` when it is absent, empty or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: Vec<T>) -> Result<Vec<T>> {
        let read = self.read::<T>(key)?;
        match &read {
            CollectionRead::Loaded { records, skipped } => {
                if *skipped > 0 {
                    tracing::warn!(key, skipped, "skipped stored records with an unexpected shape");
                }
                tracing::debug!(key, records = records.len(), "collection loaded")
            }
            CollectionRead::Corrupt(reason) => {
                tracing::warn!(key, %reason, "stored collection is unreadable, using default")
            }
            CollectionRead::Missing | CollectionRead::Empty => {
                tracing::debug!(key, "collection empty, using default")
            }
        }
        Ok(read.unwrap_or(default))
    }

    /// Serialize and store a whole collection, then broadcast the change.
    pub fn set<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let text = serde_json::to_string(items).map_err(ShowcaseError::Serialization)?;
        self.backend.set_item(key, &text)?;
        tracing::debug!(key, records = items.len(), "collection written");
        self.notifier.notify();
        Ok(())
    }
}

impl<B: StorageBackend> DataStore for CatalogStore<B> {
    fn load_services(&self) -> Result<Vec<ServiceProduct>> {
        self.get(SERVICES_KEY, Vec::new())
    }

    fn save_services(&mut self, services: &[ServiceProduct]) -> Result<()> {
        self.set(SERVICES_KEY, services)
    }

    fn read_services(&self) -> Result<CollectionRead<ServiceProduct>> {
        self.read(SERVICES_KEY)
    }

    fn read_featured(&self) -> Result<CollectionRead<FeaturedContent>> {
        self.read(FEATURED_KEY)
    }

    fn load_featured(&self) -> Result<Vec<FeaturedContent>> {
        self.get(FEATURED_KEY, Vec::new())
    }

    fn save_featured(&mut self, featured: &[FeaturedContent]) -> Result<()> {
        self.set(FEATURED_KEY, featured)
    }

    fn load_theme(&self) -> Result<Option<Theme>> {
        let raw = self.backend.get_item(THEME_KEY)?;
        Ok(raw.and_then(|value| value.parse().ok()))
    }

    fn save_theme(&mut self, theme: Theme) -> Result<()> {
        // Preferences are not collections: no change broadcast.
        self.backend.set_item(THEME_KEY, theme.as_str())
    }

    fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceDraft;
    use crate::store::memory::InMemoryStore;
    use std::cell::Cell;
    use std::rc::Rc;

    fn product(id: i64, title: &str) -> ServiceProduct {
        ServiceProduct::from_draft(id, id, ServiceDraft::new(title, "pic/a.png"))
    }

    #[test]
    fn round_trips_non_empty_collection() {
        let mut store = InMemoryStore::new();
        let services = vec![product(1, "One"), product(2, "Two")];
        store.save_services(&services).unwrap();
        assert_eq!(store.load_services().unwrap(), services);
    }

    #[test]
    fn empty_list_reads_back_as_default() {
        let store = InMemoryStore::new();
        store.set::<ServiceProduct>(SERVICES_KEY, &[]).unwrap();

        let default = vec![product(9, "Fallback")];
        let read = store.get(SERVICES_KEY, default.clone()).unwrap();
        assert_eq!(read, default);
        assert_eq!(
            store.read::<ServiceProduct>(SERVICES_KEY).unwrap(),
            CollectionRead::Empty
        );
    }

    #[test]
    fn missing_key_reads_as_default() {
        let store = InMemoryStore::new();
        assert_eq!(
            store.read::<ServiceProduct>(SERVICES_KEY).unwrap(),
            CollectionRead::Missing
        );
        assert!(store.load_services().unwrap().is_empty());
    }

    #[test]
    fn corrupt_text_is_masked_but_distinguishable() {
        let store = InMemoryStore::new();
        store.backend().put_raw(SERVICES_KEY, "{not json");

        assert!(store.load_services().unwrap().is_empty());
        assert!(matches!(
            store.read::<ServiceProduct>(SERVICES_KEY).unwrap(),
            CollectionRead::Corrupt(_)
        ));
    }

    #[test]
    fn badly_shaped_record_is_skipped_and_the_rest_kept() {
        let store = InMemoryStore::new();
        let good = serde_json::to_value(product(1, "Customer Service A")).unwrap();
        let raw = serde_json::json!([good, {"id": "nope"}, {"title": "no id"}]).to_string();
        store.backend().put_raw(SERVICES_KEY, &raw);

        let loaded = store.load_services().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Customer Service A");
        assert!(matches!(
            store.read::<ServiceProduct>(SERVICES_KEY).unwrap(),
            CollectionRead::Loaded { skipped: 2, .. }
        ));
    }

    #[test]
    fn record_without_timestamps_is_kept() {
        let store = InMemoryStore::new();
        store.backend().put_raw(
            SERVICES_KEY,
            r#"[{"id": 7, "title": "Legacy", "icon": "pic/a.png"}]"#,
        );
        let loaded = store.load_services().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 7);
    }

    #[test]
    fn list_of_unusable_records_is_not_unseeded() {
        let store = InMemoryStore::new();
        store.backend().put_raw(FEATURED_KEY, r#"[{"id": "nope"}]"#);

        assert!(store.load_featured().unwrap().is_empty());
        let read = store.read::<FeaturedContent>(FEATURED_KEY).unwrap();
        assert!(!read.is_unseeded());
    }

    #[test]
    fn write_fires_notification_once() {
        let mut store = InMemoryStore::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        store.notifier().subscribe(move || h.set(h.get() + 1));

        store.save_services(&[product(1, "One")]).unwrap();
        assert_eq!(hits.get(), 1);
        store.save_featured(&[]).unwrap();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn failed_write_does_not_notify() {
        let mut store = InMemoryStore::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        store.notifier().subscribe(move || h.set(h.get() + 1));
        store.backend().set_simulate_write_error(true);

        assert!(store.save_services(&[product(1, "One")]).is_err());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn shared_notifier_is_used() {
        let notifier = ChangeNotifier::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        notifier.subscribe(move || h.set(h.get() + 1));

        let mut store = InMemoryStore::new().with_notifier(notifier);
        store.save_services(&[product(1, "One")]).unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn theme_round_trip_without_notification() {
        let mut store = InMemoryStore::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        store.notifier().subscribe(move || h.set(h.get() + 1));

        assert_eq!(store.load_theme().unwrap(), None);
        store.save_theme(Theme::Dark).unwrap();
        assert_eq!(store.load_theme().unwrap(), Some(Theme::Dark));
        assert_eq!(
            store.backend().get_item(THEME_KEY).unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn unknown_theme_value_reads_as_unset() {
        let store = InMemoryStore::new();
        store.backend().put_raw(THEME_KEY, "sepia");
        assert_eq!(store.load_theme().unwrap(), None);
    }
}
