//! Parsing of the `q=` parameter in Google Maps URLs.
//!
//! Takeout URLs carry either a coordinate pair (`?q=50.82253,-0.13150`) or a
//! place label (`?q=Blue+Bottle+Coffee`). Both the coordinate and the name
//! strategies read from here.

use crate::constants::GOOGLE_NAME_PREFIX;
use regex::Regex;
use std::sync::LazyLock;
use url::form_urlencoded;

/// `q=<lat>,<lon>` anywhere in the raw, undecoded URL
static RAW_QUERY_COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]q=([-+]?\d+(?:\.\d+)?),([-+]?\d+(?:\.\d+)?)")
        .expect("raw query coordinate pattern is valid")
});

/// A decoded `q` value consisting of nothing but a coordinate pair
static COORDINATE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([-+]?\d+(?:\.\d+)?)\s*,\s*([-+]?\d+(?:\.\d+)?)\s*$")
        .expect("coordinate pair pattern is valid")
});

/// First `q=<lat>,<lon>` match in the raw URL text
pub fn raw_query_coordinates(url: &str) -> Option<(f64, f64)> {
    let captures = RAW_QUERY_COORDINATES.captures(url)?;
    let latitude = captures.get(1)?.as_str().parse().ok()?;
    let longitude = captures.get(2)?.as_str().parse().ok()?;
    Some((latitude, longitude))
}

/// Parse text of the form `lat,lon` (surrounding whitespace allowed)
pub fn parse_coordinate_pair(text: &str) -> Option<(f64, f64)> {
    let captures = COORDINATE_PAIR.captures(text)?;
    let latitude = captures.get(1)?.as_str().parse().ok()?;
    let longitude = captures.get(2)?.as_str().parse().ok()?;
    Some((latitude, longitude))
}

/// Decoded and trimmed value of the first `q` query parameter
///
/// `+` and percent escapes are decoded. Scheme-less URLs such as
/// `maps.google.com/?q=Cafe` are accepted; the fragment is ignored.
pub fn query_text(url: &str) -> Option<String> {
    let (_, query) = url.trim().split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.trim().to_string())
}

/// Coordinates carried by the decoded `q` value, e.g. `q=50.8%2C-0.13`
pub fn decoded_query_coordinates(url: &str) -> Option<(f64, f64)> {
    query_text(url).as_deref().and_then(parse_coordinate_pair)
}

/// Place label carried by the `q` value, when it is not a coordinate pair
pub fn query_name(url: &str) -> Option<String> {
    let text = query_text(url)?;
    if parse_coordinate_pair(&text).is_some() {
        return None;
    }

    let text = strip_google_prefix(&text).trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn strip_google_prefix(text: &str) -> &str {
    match text.get(..GOOGLE_NAME_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(GOOGLE_NAME_PREFIX) => {
            &text[GOOGLE_NAME_PREFIX.len()..]
        }
        _ => text,
    }
}
