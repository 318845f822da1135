//! # Catalog Queries
//!
//! Filtering, ordering and selection shared by the storefront and the admin console.
//!
//! ## Storefront
//!
//! Only *live* records (`is_published` and no `deleted_at`) are eligible. Services are
//! then filtered by [`ServiceQuery`] (category AND case-insensitive title substring)
//! and ordered by `sort_order` ascending. The sort is stable, so equal `sort_order`
//! values keep their stored order.
//!
//! ## Admin
//!
//! The admin table shows every record. [`AdminSort`] orders by any [`SortField`];
//! picking the active field again flips the direction, picking a new field starts
//! ascending. Records without a value for the field (e.g. no `author`) never move
//! relative to each other: they keep their slots and the valued records are sorted
//! around them.

use crate::model::{FeaturedContent, RecordId, ServiceProduct};
use crate::vocab::ALL_CATEGORIES;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` is the wildcard; anything else is an exact category.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceQuery {
    pub category: CategoryFilter,
    pub search: String,
}

impl ServiceQuery {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    pub fn matches(&self, service: &ServiceProduct) -> bool {
        self.category.matches(&service.category)
            && service
                .title
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }
}

/// Live services matching `query`, ordered by `sort_order`.
pub fn storefront_services(services: &[ServiceProduct], query: &ServiceQuery) -> Vec<ServiceProduct> {
    let mut visible: Vec<ServiceProduct> = services
        .iter()
        .filter(|s| s.is_live() && query.matches(s))
        .cloned()
        .collect();
    visible.sort_by_key(|s| s.sort_order);
    visible
}

/// Live featured entries, ordered by `sort_order`.
pub fn storefront_featured(featured: &[FeaturedContent]) -> Vec<FeaturedContent> {
    let mut visible: Vec<FeaturedContent> =
        featured.iter().filter(|f| f.is_live()).cloned().collect();
    visible.sort_by_key(|f| f.sort_order);
    visible
}

/// Services recommended by a featured entry, in catalog order.
/// Ids that no longer exist are skipped.
pub fn recommended_services<'a>(
    item: &FeaturedContent,
    services: &'a [ServiceProduct],
) -> Vec<&'a ServiceProduct> {
    services
        .iter()
        .filter(|s| item.recommended_services.contains(&s.id))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Title,
    Category,
    ServiceType,
    PricingModel,
    Price,
    IsPublished,
    SortOrder,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    Author,
    Version,
}

impl SortField {
    pub const ALL: [SortField; 13] = [
        SortField::Id,
        SortField::Title,
        SortField::Category,
        SortField::ServiceType,
        SortField::PricingModel,
        SortField::Price,
        SortField::IsPublished,
        SortField::SortOrder,
        SortField::CreatedAt,
        SortField::UpdatedAt,
        SortField::DeletedAt,
        SortField::Author,
        SortField::Version,
    ];

    /// The stored (camelCase) name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Category => "category",
            SortField::ServiceType => "serviceType",
            SortField::PricingModel => "pricingModel",
            SortField::Price => "price",
            SortField::IsPublished => "isPublished",
            SortField::SortOrder => "sortOrder",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
            SortField::DeletedAt => "deletedAt",
            SortField::Author => "author",
            SortField::Version => "version",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortField {
    type Err = String;

    /// Accepts the stored camelCase name or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| *c != '_').collect::<String>().to_lowercase();
        SortField::ALL
            .iter()
            .find(|f| f.name().to_lowercase() == wanted)
            .copied()
            .ok_or_else(|| format!("Unknown sort field: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for AdminSort {
    fn default() -> Self {
        Self {
            field: SortField::SortOrder,
            direction: SortDirection::Asc,
        }
    }
}

impl AdminSort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click: same field ascending flips to descending, anything else is ascending.
    pub fn select(&mut self, field: SortField) {
        self.direction = if self.field == field && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.field = field;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Bool(bool),
    Int(i64),
    Time(DateTime<Utc>),
    Text(&'a str),
}

fn sort_value(service: &ServiceProduct, field: SortField) -> Option<SortValue<'_>> {
    let value = match field {
        SortField::Id => SortValue::Int(service.id),
        SortField::Title => SortValue::Text(&service.title),
        SortField::Category => SortValue::Text(&service.category),
        SortField::ServiceType => SortValue::Text(&service.service_type),
        SortField::PricingModel => SortValue::Text(&service.pricing_model),
        SortField::Price => SortValue::Text(&service.price),
        SortField::IsPublished => SortValue::Bool(service.is_published),
        SortField::SortOrder => SortValue::Int(service.sort_order),
        SortField::CreatedAt => SortValue::Time(service.created_at),
        SortField::UpdatedAt => SortValue::Time(service.updated_at),
        SortField::DeletedAt => SortValue::Time(service.deleted_at?),
        SortField::Author => SortValue::Text(service.author.as_deref()?),
        SortField::Version => SortValue::Text(service.version.as_deref()?),
    };
    Some(value)
}

/// Every service, ordered for the admin table.
pub fn admin_services(services: &[ServiceProduct], sort: &AdminSort) -> Vec<ServiceProduct> {
    // Slots of records with a value are refilled in sorted order; the rest stay put.
    let mut valued: Vec<(usize, SortValue<'_>)> = services
        .iter()
        .enumerate()
        .filter_map(|(i, s)| sort_value(s, sort.field).map(|v| (i, v)))
        .collect();
    let slots: Vec<usize> = valued.iter().map(|(i, _)| *i).collect();

    valued.sort_by(|(_, a), (_, b)| match sort.direction {
        SortDirection::Asc => a.cmp(b),
        SortDirection::Desc => b.cmp(a),
    });

    let mut ordered: Vec<Option<&ServiceProduct>> = services.iter().map(Some).collect();
    for (slot, (source, _)) in slots.iter().zip(valued.iter()) {
        ordered[*slot] = Some(&services[*source]);
    }
    ordered.into_iter().flatten().cloned().collect()
}

/// Row selection for bulk admin actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<RecordId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: RecordId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Select everything, or clear if everything is already selected.
    pub fn toggle_all(&mut self, all: &[RecordId]) {
        if !all.is_empty() && self.ids.len() == all.len() {
            self.ids.clear();
        } else {
            self.ids = all.iter().copied().collect();
        }
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.ids.iter().copied().collect()
    }
}
