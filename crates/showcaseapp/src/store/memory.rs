use super::catalog_store::CatalogStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = CatalogStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        CatalogStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{FeaturedContent, FeaturedDraft, ServiceDraft, ServiceProduct};
    use crate::store::DataStore;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        fn push_service(&mut self, product: ServiceProduct) {
            let mut services = self.store.load_services().unwrap();
            services.push(product);
            self.store.save_services(&services).unwrap();
        }

        fn next_id(&self) -> i64 {
            self.store.load_services().unwrap().len() as i64 + 1
        }

        /// Published service with the given title and category; ids count up from 1.
        pub fn with_service(mut self, title: &str, category: &str) -> Self {
            let id = self.next_id();
            let mut draft = ServiceDraft::new(title, "pic/icons/default.png");
            draft.category = category.to_string();
            draft.is_published = true;
            self.push_service(ServiceProduct::from_draft(id, id, draft));
            self
        }

        pub fn with_unpublished_service(mut self, title: &str, category: &str) -> Self {
            let id = self.next_id();
            let mut draft = ServiceDraft::new(title, "pic/icons/default.png");
            draft.category = category.to_string();
            self.push_service(ServiceProduct::from_draft(id, id, draft));
            self
        }

        pub fn with_retired_service(mut self, title: &str, category: &str) -> Self {
            let id = self.next_id();
            let mut draft = ServiceDraft::new(title, "pic/icons/default.png");
            draft.category = category.to_string();
            draft.is_published = true;
            let mut product = ServiceProduct::from_draft(id, id, draft);
            product.deleted_at = Some(chrono::Utc::now());
            self.push_service(product);
            self
        }

        pub fn with_featured(mut self, title: &str, recommended: Vec<i64>) -> Self {
            let mut featured = self.store.load_featured().unwrap();
            let id = 100 + featured.len() as i64 + 1;
            let mut draft = FeaturedDraft::new(title, "<p>Spotlight</p>", "pic/banner.png");
            draft.is_published = true;
            draft.recommended_services = recommended;
            featured.push(FeaturedContent::from_draft(id, featured.len() as i64, draft));
            self.store.save_featured(&featured).unwrap();
            self
        }
    }
}
