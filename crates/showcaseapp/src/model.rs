//! # Data Model
//!
//! Two record kinds live in the catalog:
//!
//! - [`ServiceProduct`]: a catalog entry shown in the storefront grid and the admin table.
//! - [`FeaturedContent`]: a promotional spotlight shown in the storefront carousel, which
//!   points at up to a handful of services through `recommended_services`.
//!
//! Records are persisted as camelCase JSON lists (see [`crate::store`]). Image fields
//! (`icon`, `case_images`, `image`) hold *reference strings*, never binary data; see
//! [`crate::resolver`] for the four shapes a reference may take.
//!
//! ## Identity
//!
//! Ids are numeric and unique within their collection. New ids are drawn from the
//! wall clock in milliseconds but bumped past the current maximum, so two records
//! created inside the same millisecond never collide (see [`next_record_id`]).
//!
//! ## Deletion
//!
//! `deleted_at` marks a retired record. Hard deletion removes the record from the
//! collection; retiring keeps it (visible to admins) but hides it from the storefront.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::vocab::{AVAILABLE_CATEGORIES, PRICING_MODELS, SERVICE_TYPES};

pub type RecordId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProduct {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub case_images: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub pricing_model: String,
    #[serde(default)]
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub feature_tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ServiceProduct {
    /// Build a brand new record from an admin draft.
    pub fn from_draft(id: RecordId, sort_order: i64, draft: ServiceDraft) -> Self {
        let now = Utc::now();
        let mut product = Self {
            id,
            title: String::new(),
            description: String::new(),
            short_desc: None,
            icon: String::new(),
            case_images: Vec::new(),
            highlights: Vec::new(),
            service_type: String::new(),
            pricing_model: String::new(),
            price: String::new(),
            contact_info: None,
            feature_tags: Vec::new(),
            category: String::new(),
            is_published: false,
            sort_order,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            author: None,
            version: None,
        };
        product.apply_draft(draft);
        product.updated_at = now;
        product
    }

    /// Replace every editable field with the draft's values and bump `updated_at`.
    /// Identity, creation time, ordering and retirement state are preserved.
    pub fn apply_draft(&mut self, draft: ServiceDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.short_desc = draft.short_desc;
        self.icon = draft.icon;
        self.case_images = draft.case_images;
        self.highlights = draft.highlights;
        self.service_type = draft.service_type;
        self.category = draft.category;
        self.pricing_model = draft.pricing_model;
        self.price = draft.price;
        self.contact_info = draft.contact_info;
        self.feature_tags = draft.feature_tags;
        self.is_published = draft.is_published;
        self.author = draft.author;
        self.version = draft.version;
        self.updated_at = Utc::now();
    }

    /// Eligible for the storefront: published and not retired.
    pub fn is_live(&self) -> bool {
        self.is_published && self.deleted_at.is_none()
    }

    pub fn to_draft(&self) -> ServiceDraft {
        ServiceDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            short_desc: self.short_desc.clone(),
            icon: self.icon.clone(),
            case_images: self.case_images.clone(),
            highlights: self.highlights.clone(),
            service_type: self.service_type.clone(),
            category: self.category.clone(),
            pricing_model: self.pricing_model.clone(),
            price: self.price.clone(),
            contact_info: self.contact_info.clone(),
            feature_tags: self.feature_tags.clone(),
            is_published: self.is_published,
            author: self.author.clone(),
            version: self.version.clone(),
        }
    }
}

/// The editable part of a [`ServiceProduct`], as filled in by an admin form.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub title: String,
    pub description: String,
    pub short_desc: Option<String>,
    pub icon: String,
    pub case_images: Vec<String>,
    pub highlights: Vec<String>,
    pub service_type: String,
    pub category: String,
    pub pricing_model: String,
    pub price: String,
    pub contact_info: Option<String>,
    pub feature_tags: Vec<String>,
    pub is_published: bool,
    pub author: Option<String>,
    pub version: Option<String>,
}

impl Default for ServiceDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            short_desc: None,
            icon: String::new(),
            case_images: Vec::new(),
            highlights: Vec::new(),
            service_type: SERVICE_TYPES[0].to_string(),
            category: AVAILABLE_CATEGORIES[0].to_string(),
            pricing_model: PRICING_MODELS[0].to_string(),
            price: String::new(),
            contact_info: None,
            feature_tags: Vec::new(),
            is_published: false,
            author: Some("Official".to_string()),
            version: None,
        }
    }
}

impl ServiceDraft {
    pub fn new(title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedContent {
    pub id: RecordId,
    pub title: String,
    /// Rich-text markup produced by an editor; rendered as formatted content.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub recommended_services: Vec<RecordId>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl FeaturedContent {
    pub fn from_draft(id: RecordId, sort_order: i64, draft: FeaturedDraft) -> Self {
        let now = Utc::now();
        let mut item = Self {
            id,
            title: String::new(),
            description: String::new(),
            content: String::new(),
            image: String::new(),
            images: Vec::new(),
            author: None,
            publish_date: None,
            is_published: false,
            sort_order,
            recommended_services: Vec::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        item.apply_draft(draft);
        item.updated_at = now;
        item
    }

    pub fn apply_draft(&mut self, draft: FeaturedDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.content = draft.content;
        self.image = draft.image;
        self.author = draft.author;
        self.publish_date = draft.publish_date;
        self.is_published = draft.is_published;
        self.recommended_services = draft.recommended_services;
        self.updated_at = Utc::now();
    }

    pub fn is_live(&self) -> bool {
        self.is_published && self.deleted_at.is_none()
    }

    pub fn to_draft(&self) -> FeaturedDraft {
        FeaturedDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            image: self.image.clone(),
            author: self.author.clone(),
            publish_date: self.publish_date.clone(),
            is_published: self.is_published,
            recommended_services: self.recommended_services.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedDraft {
    pub title: String,
    pub description: String,
    pub content: String,
    pub image: String,
    pub author: Option<String>,
    pub publish_date: Option<String>,
    pub is_published: bool,
    pub recommended_services: Vec<RecordId>,
}

impl FeaturedDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
            is_published: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// Allocate an id for a new record.
///
/// Starts from the current time in milliseconds and moves past every id already in
/// use, so rapid successive creations stay unique and ids remain increasing. When the
/// top of the id range is already taken, the first free id at or after now is used.
pub fn next_record_id<I>(existing: I) -> RecordId
where
    I: IntoIterator<Item = RecordId>,
{
    let taken: BTreeSet<RecordId> = existing.into_iter().collect();
    let now = Utc::now().timestamp_millis();
    match taken.last() {
        Some(&max) if max >= now => match max.checked_add(1) {
            Some(id) => id,
            None => (now..=RecordId::MAX)
                .find(|id| !taken.contains(id))
                .unwrap_or(now),
        },
        _ => now,
    }
}
