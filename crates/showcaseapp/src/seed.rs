//! # Seeding and Point Migrations
//!
//! Runs once at startup, before any view reads the collections.
//!
//! For each collection:
//! - **Empty** (absent, not a JSON list, or an empty list): write the fixed sample set.
//! - **Non-empty**: any stored list with entries counts, even if some entries no longer
//!   deserialize. Run the ordered [`Patch`] list. A patch is a predicate plus a
//!   transform, each targeting one known record id and one known-bad value. When any
//!   predicate matches, the whole collection is rewritten once (which fires the
//!   ordinary change notification). A patched record no longer matches its predicate,
//!   so repeated startups are no-ops.
//!
//! There is no schema version: every patch is a hand-written point fix, and new ones
//! are appended to the lists below.

use crate::error::Result;
use crate::model::{FeaturedContent, RecordId, ServiceProduct};
use crate::store::DataStore;
use crate::vocab::{
    PRICING_FREE, PRICING_NEGOTIABLE, PRICING_ONE_TIME, PRICING_SUBSCRIPTION,
};
use chrono::Utc;

/// A one-time correction for records already in storage.
pub struct Patch<T> {
    pub name: &'static str,
    pub applies: fn(&T) -> bool,
    pub apply: fn(&mut T),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub seeded_services: usize,
    pub seeded_featured: usize,
    pub patched_services: usize,
    pub patched_featured: usize,
}

impl SeedReport {
    pub fn changed_anything(&self) -> bool {
        self.seeded_services + self.seeded_featured + self.patched_services + self.patched_featured
            > 0
    }
}

/// Seed empty collections and patch populated ones.
pub fn run<S: DataStore>(store: &mut S) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    let services = store.read_services()?;
    if services.is_unseeded() {
        let seed = seed_services();
        report.seeded_services = seed.len();
        store.save_services(&seed)?;
        tracing::info!(records = seed.len(), "seeded service catalog");
    } else {
        let mut services = services.unwrap_or(Vec::new());
        report.patched_services = apply_patches(&mut services, &service_patches());
        if report.patched_services > 0 {
            store.save_services(&services)?;
        }
    }

    let featured = store.read_featured()?;
    if featured.is_unseeded() {
        let seed = seed_featured();
        report.seeded_featured = seed.len();
        store.save_featured(&seed)?;
        tracing::info!(records = seed.len(), "seeded featured content");
    } else {
        let mut featured = featured.unwrap_or(Vec::new());
        report.patched_featured = apply_patches(&mut featured, &featured_patches());
        if report.patched_featured > 0 {
            store.save_featured(&featured)?;
        }
    }

    Ok(report)
}

/// Apply every matching patch in order; returns how many (record, patch) pairs fired.
pub fn apply_patches<T>(records: &mut [T], patches: &[Patch<T>]) -> usize {
    let mut applied = 0;
    for patch in patches {
        for record in records.iter_mut() {
            if (patch.applies)(record) {
                (patch.apply)(record);
                tracing::info!(patch = patch.name, "applied data patch");
                applied += 1;
            }
        }
    }
    applied
}

const VISITOR_PASS_ICON: &str = "pic/icons/visitor-pass.png";
const ENERGY_CASE_IMAGE: &str = "pic/cases/energy-dashboard.jpg";
const UPGRADE_SEASON_BANNER: &str = "pic/banners/upgrade-season.jpg";

fn service_patches() -> Vec<Patch<ServiceProduct>> {
    vec![
        Patch {
            name: "visitor-pass icon moved out of pic/icon/",
            applies: |s| s.id == 14 && s.icon.contains("pic/icon/"),
            apply: |s| s.icon = VISITOR_PASS_ICON.to_string(),
        },
        Patch {
            name: "energy center case image no longer hosted remotely",
            applies: |s| {
                s.id == 2
                    && s
                        .case_images
                        .iter()
                        .any(|img| img.contains("photo-1551288049"))
            },
            apply: |s| s.case_images = vec![ENERGY_CASE_IMAGE.to_string()],
        },
        Patch {
            name: "meeting room booking price typo",
            applies: |s| s.id == 7 && s.price.contains("9.9.9"),
            apply: |s| s.price = "99/month".to_string(),
        },
    ]
}

fn featured_patches() -> Vec<Patch<FeaturedContent>> {
    vec![Patch {
        name: "upgrade season banner bundled locally",
        applies: |f| f.id == 101 && f.image.contains("photo-1497366811353"),
        apply: |f| f.image = UPGRADE_SEASON_BANNER.to_string(),
    }]
}

struct ServiceSeed {
    id: RecordId,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    case_images: &'static [&'static str],
    highlights: &'static [&'static str],
    service_type: &'static str,
    category: &'static str,
    pricing_model: &'static str,
    price: &'static str,
    feature_tags: &'static [&'static str],
    author: &'static str,
}

const SERVICE_SEEDS: [ServiceSeed; 6] = [
    ServiceSeed {
        id: 1,
        title: "Smart Access 2.0",
        description: "Face recognition and multi-device entry for office towers.\nSub-second gates, visitor loop included.",
        icon: "https://images.unsplash.com/photo-1558002038-1055907df827?w=400",
        case_images: &["https://images.unsplash.com/photo-1497366216548-37526070297c?w=1000"],
        highlights: &["0.3s recognition", "Touchless entry", "Closed-loop visitor flow"],
        service_type: "Workspace Service",
        category: "Workspace",
        pricing_model: PRICING_SUBSCRIPTION,
        price: "399/month",
        feature_tags: &["Hot"],
        author: "Tower Tech",
    },
    ServiceSeed {
        id: 2,
        title: "Energy Control Center",
        description: "Real-time building energy monitoring with adaptive savings.",
        icon: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=400",
        case_images: &[ENERGY_CASE_IMAGE],
        highlights: &["Live consumption", "Adaptive saving strategies"],
        service_type: "Workspace Service",
        category: "Workspace",
        pricing_model: PRICING_ONE_TIME,
        price: "29800",
        feature_tags: &["Editor's Choice"],
        author: "Cloud Ops",
    },
    ServiceSeed {
        id: 3,
        title: "Lobby Event Programme",
        description: "Curated seasonal events that turn the lobby into a destination.",
        icon: "pic/icons/events.png",
        case_images: &["pic/cases/lobby-market.jpg", "pic/cases/lobby-concert.jpg"],
        highlights: &["Monthly themes", "Tenant engagement reports"],
        service_type: "Building IP",
        category: "Building IP Operations",
        pricing_model: PRICING_NEGOTIABLE,
        price: "",
        feature_tags: &["New", "Enterprise"],
        author: "Tower Tech",
    },
    ServiceSeed {
        id: 7,
        title: "Meeting Room Booking",
        description: "Book shared rooms across floors from one calendar.",
        icon: "pic/icons/meeting.png",
        case_images: &[],
        highlights: &["Cross-floor availability", "Calendar sync"],
        service_type: "Business Admin",
        category: "Business Admin Services",
        pricing_model: PRICING_SUBSCRIPTION,
        price: "99/month",
        feature_tags: &["Best Value"],
        author: "Tower Tech",
    },
    ServiceSeed {
        id: 12,
        title: "Tenant Mail Room",
        description: "Parcel intake, notification and pickup lockers.",
        icon: "pic/icons/mail.png",
        case_images: &[],
        highlights: &["SMS pickup codes"],
        service_type: "Business Admin",
        category: "Business Admin Services",
        pricing_model: PRICING_FREE,
        price: "",
        feature_tags: &["Free to Use"],
        author: "Tower Tech",
    },
    ServiceSeed {
        id: 14,
        title: "Visitor Pass",
        description: "Pre-register guests and issue QR passes ahead of arrival.",
        icon: VISITOR_PASS_ICON,
        case_images: &[],
        highlights: &["QR passes", "Host notifications"],
        service_type: "Exclusive",
        category: "Exclusive",
        pricing_model: PRICING_FREE,
        price: "",
        feature_tags: &["Smart Pick"],
        author: "Tower Tech",
    },
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn seed_services() -> Vec<ServiceProduct> {
    let now = Utc::now();
    SERVICE_SEEDS
        .iter()
        .enumerate()
        .map(|(i, seed)| ServiceProduct {
            id: seed.id,
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            short_desc: None,
            icon: seed.icon.to_string(),
            case_images: to_strings(seed.case_images),
            highlights: to_strings(seed.highlights),
            service_type: seed.service_type.to_string(),
            pricing_model: seed.pricing_model.to_string(),
            price: seed.price.to_string(),
            contact_info: None,
            feature_tags: to_strings(seed.feature_tags),
            category: seed.category.to_string(),
            is_published: true,
            sort_order: i as i64 + 1,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            author: Some(seed.author.to_string()),
            version: None,
        })
        .collect()
}

pub fn seed_featured() -> Vec<FeaturedContent> {
    let now = Utc::now();
    vec![
        FeaturedContent {
            id: 101,
            title: "Smart Building Upgrade Season".to_string(),
            description: "<p>A complete digital upgrade for your <strong>office</strong>.</p>"
                .to_string(),
            content: "A hand-picked set of core smart-office services.".to_string(),
            image: UPGRADE_SEASON_BANNER.to_string(),
            images: Vec::new(),
            author: None,
            publish_date: None,
            is_published: true,
            sort_order: 1,
            recommended_services: vec![1, 2],
            created_at: now,
            updated_at: now,
            deleted_at: None,
        },
        FeaturedContent {
            id: 102,
            title: "Welcome Your Guests".to_string(),
            description: "<p>Everything a front desk needs, from passes to events.</p>"
                .to_string(),
            content: String::new(),
            image: "pic/banners/front-desk.jpg".to_string(),
            images: Vec::new(),
            author: None,
            publish_date: None,
            is_published: true,
            sort_order: 2,
            recommended_services: vec![14, 3],
            created_at: now,
            updated_at: now,
            deleted_at: None,
        },
    ]
}
