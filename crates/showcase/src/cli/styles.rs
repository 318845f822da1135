//! Terminal styling.
//!
//! Code asks for styles by meaning (`title`, `muted`, `tag`) and this module maps them to
//! actual colors. Feature tags reuse the catalog's own tag palette, converted once from
//! its hex strings into true colors.

use colored::{Color, ColoredString, Colorize};
use once_cell::sync::Lazy;
use showcaseapp::vocab::{tag_color, TagColor, FEATURE_TAGS};
use std::collections::HashMap;

pub const LINE_WIDTH: usize = 100;
pub const COL_ID: usize = 15;
pub const COL_STATUS: usize = 10;
pub const COL_PRICE: usize = 14;
pub const COL_TIME: usize = 10;

static TAG_PALETTE: Lazy<HashMap<&'static str, (Color, Color)>> = Lazy::new(|| {
    FEATURE_TAGS
        .iter()
        .map(|tag| (tag.name, to_colors(&tag.colors)))
        .collect()
});

fn to_colors(colors: &TagColor) -> (Color, Color) {
    (hex_color(colors.color), hex_color(colors.bg))
}

/// `#rrggbb` to a true color; anything unparsable becomes plain white.
fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) if digits.len() == 6 => Color::TrueColor { r, g, b },
        _ => Color::White,
    }
}

pub fn title(text: &str) -> ColoredString {
    text.bold()
}

pub fn muted(text: &str) -> ColoredString {
    text.dimmed()
}

pub fn time(text: &str) -> ColoredString {
    text.dimmed().italic()
}

pub fn live(text: &str) -> ColoredString {
    text.green()
}

pub fn draft(text: &str) -> ColoredString {
    text.yellow()
}

pub fn retired(text: &str) -> ColoredString {
    text.red()
}

pub fn price(text: &str) -> ColoredString {
    text.blue().bold()
}

pub fn tag(name: &str) -> ColoredString {
    let (fg, bg) = TAG_PALETTE
        .get(name)
        .copied()
        .unwrap_or_else(|| to_colors(&tag_color(name)));
    format!(" {} ", name).color(fg).on_color(bg)
}

pub fn success(text: &str) -> ColoredString {
    text.green()
}

pub fn info(text: &str) -> ColoredString {
    text.normal()
}

pub fn warning(text: &str) -> ColoredString {
    text.yellow()
}

pub fn error(text: &str) -> ColoredString {
    text.red().bold()
}
