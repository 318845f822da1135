//! Plain-text rendering of command results.
//!
//! Every function returns a `String` so output can be checked in tests without a
//! terminal. Column alignment is computed on display width, not bytes, so wide
//! characters in titles do not break the table.

use super::styles::{self, COL_ID, COL_PRICE, COL_STATUS, COL_TIME, LINE_WIDTH};
use chrono::{DateTime, Utc};
use showcaseapp::commands::{CmdMessage, MessageLevel};
use showcaseapp::model::{FeaturedContent, ServiceProduct};
use showcaseapp::resolver::Resolution;
use showcaseapp::vocab::format_service_price;
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A featured entry ready for display.
pub struct FeaturedCard {
    pub item: FeaturedContent,
    pub image_url: String,
    pub recommended: Vec<ServiceProduct>,
}

pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let elapsed = Utc::now()
        .signed_duration_since(timestamp)
        .to_std()
        .unwrap_or_default();
    timeago::Formatter::new().convert(elapsed)
}

/// Cut `text` to at most `width` columns, ending with an ellipsis when shortened.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
    }
    out
}

/// Truncate then right-pad with spaces to exactly `width` columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let cut = truncate_to_width(text, width);
    let fill = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(fill))
}

const INLINE_TAGS: [&str; 8] = ["a", "b", "code", "em", "i", "span", "strong", "u"];

fn is_inline_tag(raw: &str) -> bool {
    let name = raw
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    INLINE_TAGS.contains(&name.as_str())
}

/// Rich text reduced to one line of plain text: tags dropped, whitespace collapsed and
/// the common entities decoded. Block tags separate words, inline tags do not.
pub fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut tag: Option<String> = None;
    for c in html.chars() {
        match tag.take() {
            None if c == '<' => tag = Some(String::new()),
            None => text.push(c),
            Some(name) if c == '>' => {
                if !is_inline_tag(&name) {
                    text.push(' ');
                }
            }
            Some(mut name) => {
                name.push(c);
                tag = Some(name);
            }
        }
    }
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn status_label(service: &ServiceProduct) -> String {
    let label = if service.deleted_at.is_some() {
        "retired"
    } else if service.is_published {
        "live"
    } else {
        "draft"
    };
    let padded = pad_to_width(label, COL_STATUS);
    match label {
        "retired" => styles::retired(&padded).to_string(),
        "live" => styles::live(&padded).to_string(),
        _ => styles::draft(&padded).to_string(),
    }
}

fn tags_line(tags: &[String]) -> String {
    tags.iter()
        .map(|t| styles::tag(t).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Storefront cards. `icons` holds the resolved icon of each service, same order.
pub fn render_storefront(services: &[ServiceProduct], icons: &[String]) -> String {
    if services.is_empty() {
        return format!("{}\n", styles::muted("No services match."));
    }
    let mut out = String::new();
    let title_width = LINE_WIDTH.saturating_sub(COL_PRICE + 2);
    for (service, icon) in services.iter().zip(icons.iter()) {
        let price = format_service_price(&service.pricing_model, &service.price);
        let _ = writeln!(
            out,
            "{}  {}",
            styles::title(&pad_to_width(&service.title, title_width)),
            styles::price(&price)
        );
        let summary = service.short_desc.as_deref().unwrap_or(&service.description);
        if !summary.is_empty() {
            let _ = writeln!(out, "  {}", truncate_to_width(summary, LINE_WIDTH - 2));
        }
        let _ = writeln!(
            out,
            "  {} · {}",
            styles::muted(&service.category),
            styles::muted(&service.service_type)
        );
        if !service.feature_tags.is_empty() {
            let _ = writeln!(out, "  {}", tags_line(&service.feature_tags));
        }
        if !icon.is_empty() {
            let _ = writeln!(out, "  {}", styles::muted(icon));
        }
        out.push('\n');
    }
    out
}

pub fn render_featured(cards: &[FeaturedCard]) -> String {
    if cards.is_empty() {
        return format!("{}\n", styles::muted("Nothing featured right now."));
    }
    let mut out = String::new();
    for card in cards {
        let _ = writeln!(out, "{}", styles::title(&card.item.title));
        let byline: Vec<&str> = [card.item.author.as_deref(), card.item.publish_date.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !byline.is_empty() {
            let _ = writeln!(out, "  {}", styles::muted(&byline.join(" · ")));
        }
        for body in [&card.item.description, &card.item.content] {
            let excerpt = plain_text(body);
            if !excerpt.is_empty() {
                let _ = writeln!(out, "  {}", truncate_to_width(&excerpt, LINE_WIDTH - 2));
            }
        }
        if !card.image_url.is_empty() {
            let _ = writeln!(out, "  {}", styles::muted(&card.image_url));
        }
        for service in &card.recommended {
            let price = format_service_price(&service.pricing_model, &service.price);
            let _ = writeln!(out, "  → {}  {}", service.title, styles::price(&price));
        }
        out.push('\n');
    }
    out
}

pub fn render_admin_services(services: &[ServiceProduct]) -> String {
    if services.is_empty() {
        return format!("{}\n", styles::muted("No services yet."));
    }
    let title_width = LINE_WIDTH.saturating_sub(COL_ID + COL_STATUS + COL_PRICE + COL_TIME + 4);
    let mut out = String::new();
    for service in services {
        let price = format_service_price(&service.pricing_model, &service.price);
        let _ = writeln!(
            out,
            "{} {} {} {} {}",
            styles::muted(&pad_to_width(&service.id.to_string(), COL_ID)),
            status_label(service),
            pad_to_width(&service.title, title_width),
            styles::price(&pad_to_width(&price, COL_PRICE)),
            styles::time(&format_time_ago(service.updated_at))
        );
    }
    out
}

pub fn render_admin_featured(featured: &[FeaturedContent]) -> String {
    if featured.is_empty() {
        return format!("{}\n", styles::muted("No featured entries yet."));
    }
    let title_width = LINE_WIDTH.saturating_sub(COL_ID + COL_STATUS + COL_TIME + 3);
    let mut out = String::new();
    for item in featured {
        let state = if item.deleted_at.is_some() {
            styles::retired(&pad_to_width("retired", COL_STATUS)).to_string()
        } else if item.is_published {
            styles::live(&pad_to_width("live", COL_STATUS)).to_string()
        } else {
            styles::draft(&pad_to_width("draft", COL_STATUS)).to_string()
        };
        let _ = writeln!(
            out,
            "{} {} {} {}",
            styles::muted(&pad_to_width(&item.id.to_string(), COL_ID)),
            state,
            pad_to_width(&item.title, title_width),
            styles::time(&format_time_ago(item.updated_at))
        );
    }
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for msg in messages {
        let line = match msg.level {
            MessageLevel::Info => styles::info(&msg.content),
            MessageLevel::Success => styles::success(&msg.content),
            MessageLevel::Warning => styles::warning(&msg.content),
        };
        let _ = writeln!(out, "{}", line);
    }
    out
}

pub fn render_resolution(reference: &str, resolution: &Resolution) -> String {
    match resolution {
        Resolution::Direct(url) if url.is_empty() => {
            format!("{} {}\n", styles::muted("empty reference:"), reference)
        }
        Resolution::Direct(url) => format!("{}\n", url),
        Resolution::Blob(url) => format!("{} {}\n", url, styles::muted("(stored image)")),
        Resolution::NotFound(key) => {
            format!("{}\n", styles::warning(&format!("No image stored under key {}", key)))
        }
        Resolution::Failed(reason) => {
            format!("{}\n", styles::error(&format!("Image store unavailable: {}", reason)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcaseapp::model::{FeaturedDraft, ServiceDraft};

    fn plain() {
        colored::control::set_override(false);
    }

    fn service(id: i64, title: &str) -> ServiceProduct {
        let mut draft = ServiceDraft::new(title, "pic/a.png");
        draft.pricing_model = "Subscription".into();
        draft.price = "99".into();
        draft.is_published = true;
        ServiceProduct::from_draft(id, 0, draft)
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("会议室预订", 5), "会议…");
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("会议", 6).width(), 6);
    }

    #[test]
    fn storefront_shows_formatted_price() {
        plain();
        let out = render_storefront(&[service(1, "Smart Access")], &["pic/a.png".into()]);
        assert!(out.contains("Smart Access"));
        assert!(out.contains("99/month"));
        assert!(out.contains("pic/a.png"));
    }

    #[test]
    fn empty_storefront_says_so() {
        plain();
        assert!(render_storefront(&[], &[]).contains("No services match."));
    }

    #[test]
    fn admin_table_marks_status() {
        plain();
        let mut draft_row = service(2, "Draft");
        draft_row.is_published = false;
        let mut retired_row = service(3, "Gone");
        retired_row.deleted_at = Some(Utc::now());
        let out = render_admin_services(&[service(1, "Live"), draft_row, retired_row]);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("live"));
        assert!(lines[1].contains("draft"));
        assert!(lines[2].contains("retired"));
    }

    #[test]
    fn featured_lists_recommendations() {
        plain();
        let mut draft = FeaturedDraft::new("Spring", "<p>Fresh <strong>offers</strong></p>", "pic/b.jpg");
        draft.content = "Book before May.".into();
        let item = FeaturedContent::from_draft(101, 0, draft);
        let card = FeaturedCard {
            item,
            image_url: "pic/b.jpg".into(),
            recommended: vec![service(1, "Smart Access")],
        };
        let out = render_featured(&[card]);
        assert!(out.contains("Spring"));
        assert!(out.contains("→ Smart Access"));
        assert!(out.contains("  Fresh offers\n"));
        assert!(out.contains("  Book before May.\n"));
    }

    #[test]
    fn plain_text_strips_markup() {
        assert_eq!(plain_text("<p>A&amp;B</p>\n<ul><li>one</li><li>two</li></ul>"), "A&B one two");
        assert_eq!(plain_text(""), "");
        assert_eq!(plain_text("<br/>"), "");
        assert_eq!(
            plain_text("<p>your <strong>office</strong>.</p>"),
            "your office."
        );
    }

    #[test]
    fn messages_keep_order() {
        plain();
        let out = render_messages(&[CmdMessage::success("one"), CmdMessage::warning("two")]);
        assert_eq!(out, "one\ntwo\n");
    }

    #[test]
    fn resolution_outcomes_are_distinguished() {
        plain();
        assert_eq!(
            render_resolution("pic/a.png", &Resolution::Direct("pic/a.png".into())),
            "pic/a.png\n"
        );
        assert!(render_resolution("5", &Resolution::NotFound(5)).contains("key 5"));
        assert!(render_resolution("5", &Resolution::Failed("x".into())).contains("unavailable"));
    }
}
