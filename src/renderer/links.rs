//! Deterministic link and text construction shared by all renderers.

use crate::constants::{APPLE_MAPS_BASE_URL, GOOGLE_MAPS_BASE_URL, NOTES_SEPARATOR};
use crate::models::Place;
use url::Url;

/// Fixed-precision decimal formatting, identical across runs
pub fn format_coordinate(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// Apple Maps deep link: location in `ll`, percent-encoded name in `q`
pub fn apple_maps_url(place: &Place, precision: usize) -> String {
    format!(
        "{}?ll={},{}&q={}",
        APPLE_MAPS_BASE_URL,
        format_coordinate(place.latitude, precision),
        format_coordinate(place.longitude, precision),
        urlencoding::encode(&place.name)
    )
}

/// Schemes a retained source URL may use as a clickable link
const LINKABLE_SCHEMES: &[&str] = &["http", "https"];

/// The source URL when it is safe to link to: non-blank, absolute, http(s)
pub fn linkable_source_url(place: &Place) -> Option<&str> {
    let url = place.source_url.as_deref()?.trim();
    let parsed = Url::parse(url).ok()?;
    LINKABLE_SCHEMES
        .iter()
        .any(|scheme| *scheme == parsed.scheme())
        .then_some(url)
}

/// The linkable source URL, or a Google Maps query rebuilt from the coordinates
pub fn google_maps_url(place: &Place, precision: usize) -> String {
    match linkable_source_url(place) {
        Some(url) => url.to_string(),
        None => format!(
            "{}?q={},{}",
            GOOGLE_MAPS_BASE_URL,
            format_coordinate(place.latitude, precision),
            format_coordinate(place.longitude, precision)
        ),
    }
}

/// Optional parts of the notes text
#[derive(Debug, Clone, Copy)]
pub struct NoteFields {
    pub date: bool,
    pub source_url: bool,
}

impl NoteFields {
    /// Date, address and comment
    pub const STANDARD: Self = Self {
        date: true,
        source_url: false,
    };
    /// Address and comment only, for layouts with a separate date column
    pub const WITHOUT_DATE: Self = Self {
        date: false,
        source_url: false,
    };
    /// Everything, including the source URL
    pub const FULL: Self = Self {
        date: true,
        source_url: true,
    };
}

/// `Saved: … | Address: … | Google Maps: … | comment`, per `fields`
pub fn notes_text(place: &Place, fields: NoteFields) -> String {
    let present = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

    let mut parts = Vec::new();
    if let Some(date) = present(&place.date).filter(|_| fields.date) {
        parts.push(format!("Saved: {}", date));
    }
    if let Some(address) = present(&place.address) {
        parts.push(format!("Address: {}", address));
    }
    if let Some(url) = present(&place.source_url).filter(|_| fields.source_url) {
        parts.push(format!("Google Maps: {}", url));
    }
    if let Some(note) = present(&place.note) {
        parts.push(note);
    }

    parts.join(NOTES_SEPARATOR)
}
