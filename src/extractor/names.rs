//! Name resolution as an ordered chain of strategies.

use super::url_query::query_name;
use crate::models::{NameSource, RawFeature};

/// One step of the name chain
pub struct NameStrategy {
    pub source: NameSource,
    pub resolve: fn(&RawFeature) -> Option<String>,
}

/// Name strategies in priority order; the synthetic label comes after these
pub const NAME_CHAIN: &[NameStrategy] = &[
    NameStrategy {
        source: NameSource::LocationName,
        resolve: from_location_name,
    },
    NameStrategy {
        source: NameSource::UrlQuery,
        resolve: from_url_query,
    },
    NameStrategy {
        source: NameSource::LabelField,
        resolve: from_label_fields,
    },
];

/// First non-empty name in the chain, or a synthetic `"{prefix} {index}"`
pub fn resolve_name(feature: &RawFeature, prefix: &str, index: usize) -> (String, NameSource) {
    NAME_CHAIN
        .iter()
        .find_map(|strategy| (strategy.resolve)(feature).map(|name| (name, strategy.source)))
        .unwrap_or_else(|| (synthetic_name(prefix, index), NameSource::Synthetic))
}

pub fn synthetic_name(prefix: &str, index: usize) -> String {
    format!("{} {}", prefix.trim(), index)
}

pub fn from_location_name(feature: &RawFeature) -> Option<String> {
    feature.location_name().and_then(non_empty_trimmed)
}

pub fn from_url_query(feature: &RawFeature) -> Option<String> {
    feature.google_maps_url().and_then(query_name)
}

pub fn from_label_fields(feature: &RawFeature) -> Option<String> {
    feature
        .properties
        .as_ref()?
        .labels
        .iter()
        .find_map(|label| non_empty_trimmed(label))
}

fn non_empty_trimmed(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
