//! Storefront view model.
//!
//! [`StorefrontView`] holds the live snapshot of both collections and answers the
//! storefront's queries from it. It registers with the store's [`ChangeNotifier`]
//! when built; a notification only marks it dirty. The host calls [`StorefrontView::sync`]
//! when it is ready to re-render, and the reload runs only if the view is dirty and
//! the [`ReloadGate`] admits it.
//!
//! The gate drops requests: a reload asked for inside the debounce window of the
//! previous reload is discarded along with the dirty mark, not postponed. This keeps
//! the burst of notifications fired while seeding from causing repeated reloads.

use crate::error::Result;
use crate::model::{FeaturedContent, ServiceProduct};
use crate::query::{self, CategoryFilter, ServiceQuery};
use crate::store::notify::{ChangeNotifier, ListenerId};
use crate::store::DataStore;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Leading-edge debounce: admits a request unless one was admitted less than
/// `window` ago.
#[derive(Debug, Clone)]
pub struct ReloadGate {
    window: Duration,
    last: Option<Instant>,
}

impl ReloadGate {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a request at `now` would be admitted, without recording it.
    pub fn is_open(&self, now: Instant) -> bool {
        match self.last {
            Some(last) => now.saturating_duration_since(last) >= self.window,
            None => true,
        }
    }

    pub fn admit(&mut self, now: Instant) -> bool {
        if !self.is_open(now) {
            return false;
        }
        self.last = Some(now);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing changed since the last reload.
    Clean,
    /// Change pending but inside the debounce window; the request was dropped.
    Dropped,
    Reloaded,
}

pub struct StorefrontView {
    notifier: ChangeNotifier,
    listener: ListenerId,
    dirty: Rc<Cell<bool>>,
    gate: ReloadGate,
    services: Vec<ServiceProduct>,
    featured: Vec<FeaturedContent>,
    query: ServiceQuery,
}

impl StorefrontView {
    /// Subscribe to `store`'s notifier. The view starts dirty so the first
    /// `sync` loads the snapshot.
    pub fn new<S: DataStore>(store: &S, debounce: Duration) -> Self {
        let notifier = store.notifier().clone();
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let listener = notifier.subscribe(move || flag.set(true));

        Self {
            notifier,
            listener,
            dirty,
            gate: ReloadGate::new(debounce),
            services: Vec::new(),
            featured: Vec::new(),
            query: ServiceQuery::default(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Reload the snapshot if a change is pending and the debounce window allows it.
    ///
    /// A failed load leaves the view dirty and the window unused, so the next call
    /// retries.
    pub fn sync<S: DataStore>(&mut self, store: &S, now: Instant) -> Result<SyncOutcome> {
        if !self.dirty.get() {
            return Ok(SyncOutcome::Clean);
        }

        if !self.gate.is_open(now) {
            self.dirty.set(false);
            tracing::debug!("storefront reload dropped inside debounce window");
            return Ok(SyncOutcome::Dropped);
        }

        let services: Vec<ServiceProduct> = store
            .load_services()?
            .into_iter()
            .filter(ServiceProduct::is_live)
            .collect();
        let featured: Vec<FeaturedContent> = store
            .load_featured()?
            .into_iter()
            .filter(FeaturedContent::is_live)
            .collect();

        self.gate.admit(now);
        self.dirty.set(false);
        self.services = services;
        self.featured = featured;
        tracing::debug!(
            services = self.services.len(),
            featured = self.featured.len(),
            "storefront reloaded"
        );
        Ok(SyncOutcome::Reloaded)
    }

    pub fn query(&self) -> &ServiceQuery {
        &self.query
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.query.category = category;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn services(&self) -> Vec<ServiceProduct> {
        query::storefront_services(&self.services, &self.query)
    }

    /// Featured entries are only shown on the unfiltered ("all") storefront.
    pub fn featured(&self) -> Vec<FeaturedContent> {
        if self.query.category.is_all() {
            query::storefront_featured(&self.featured)
        } else {
            Vec::new()
        }
    }

    pub fn recommended_for(&self, item: &FeaturedContent) -> Vec<&ServiceProduct> {
        query::recommended_services(item, &self.services)
    }
}

impl Drop for StorefrontView {
    fn drop(&mut self) {
        self.notifier.unsubscribe(self.listener);
    }
}
