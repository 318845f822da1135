//! Fixed vocabularies used by the catalog.
//!
//! Records store these values as free text: nothing rejects a category or tag that is
//! not listed here. Unknown feature tags simply render with [`DEFAULT_TAG_COLOR`].

/// Category filter value that matches every category.
pub const ALL_CATEGORIES: &str = "all";

pub const AVAILABLE_CATEGORIES: [&str; 5] = [
    "Workspace",
    "Building IP Operations",
    "Business Admin Services",
    "Exclusive",
    "Other Services",
];

pub const SERVICE_TYPES: [&str; 4] = ["Workspace Service", "Building IP", "Business Admin", "Exclusive"];

pub const PRICING_FREE: &str = "Free";
pub const PRICING_ONE_TIME: &str = "One-time";
pub const PRICING_SUBSCRIPTION: &str = "Subscription";
pub const PRICING_IN_SERVICE: &str = "In-service purchase";
pub const PRICING_AD_PARTNERSHIP: &str = "Ad partnership";
pub const PRICING_NEGOTIABLE: &str = "Negotiable";

pub const PRICING_MODELS: [&str; 6] = [
    PRICING_FREE,
    PRICING_ONE_TIME,
    PRICING_SUBSCRIPTION,
    PRICING_IN_SERVICE,
    PRICING_AD_PARTNERSHIP,
    PRICING_NEGOTIABLE,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagColor {
    pub color: &'static str,
    pub bg: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureTag {
    pub name: &'static str,
    pub colors: TagColor,
}

const fn tag(name: &'static str, color: &'static str, bg: &'static str) -> FeatureTag {
    FeatureTag {
        name,
        colors: TagColor { color, bg },
    }
}

pub const FEATURE_TAGS: [FeatureTag; 8] = [
    tag("Hot", "#FF3B30", "#FFF1F0"),
    tag("New", "#34C759", "#F2F9F3"),
    tag("Limited Offer", "#FF9500", "#FFF9F2"),
    tag("Free to Use", "#007AFF", "#F0F7FF"),
    tag("Enterprise", "#5856D6", "#F5F5FF"),
    tag("Smart Pick", "#32ADE6", "#F0FAFF"),
    tag("Editor's Choice", "#AF52DE", "#F9F2FF"),
    tag("Best Value", "#FF2D55", "#FFF0F3"),
];

pub const DEFAULT_TAG_COLOR: TagColor = TagColor {
    color: "#86868b",
    bg: "#f5f5f7",
};

pub fn tag_color(name: &str) -> TagColor {
    FEATURE_TAGS
        .iter()
        .find(|t| t.name == name)
        .map(|t| t.colors)
        .unwrap_or(DEFAULT_TAG_COLOR)
}

/// First run of digits and dots in `price`, e.g. `"399/mo"` → `"399"`.
fn numeric_part(price: &str) -> Option<&str> {
    let is_num = |c: char| c.is_ascii_digit() || c == '.';
    let start = price.find(is_num)?;
    let rest = &price[start..];
    let end = rest.find(|c: char| !is_num(c)).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Normalized price label for a pricing model and its free-text price.
pub fn format_service_price(model: &str, price: &str) -> String {
    match model {
        PRICING_FREE => return "Free".to_string(),
        PRICING_NEGOTIABLE | PRICING_IN_SERVICE => return "Negotiable".to_string(),
        PRICING_AD_PARTNERSHIP => return "Revenue share".to_string(),
        _ => {}
    }

    let fallback = || {
        if price.is_empty() {
            model.to_string()
        } else {
            price.to_string()
        }
    };

    match numeric_part(price) {
        None | Some("0") => {
            if model == PRICING_ONE_TIME || model == PRICING_SUBSCRIPTION {
                "Negotiable".to_string()
            } else {
                fallback()
            }
        }
        Some(n) if model == PRICING_SUBSCRIPTION => format!("{}/month", n),
        Some(n) if model == PRICING_ONE_TIME => n.to_string(),
        Some(_) => fallback(),
    }
}
