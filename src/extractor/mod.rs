//! Normalization of raw Takeout features into [`Place`] records.
//!
//! Each feature runs through the coordinate chain, then the name chain,
//! then metadata passthrough. Records that cannot be located are dropped and
//! counted; nothing at the record level aborts the batch. Output order is
//! input order with dropped records removed.

pub mod coordinates;
pub mod names;
pub mod url_query;

use self::coordinates::resolve_coordinates;
use self::names::resolve_name;

use crate::config::LauncherConfig;
use crate::models::{
    CoordinateSource, DropReason, ExtractionStats, FeatureCollection, NameSource, Place, RawFeature,
};
use tracing::{debug, info, warn};

/// Result of normalizing one collection
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub places: Vec<Place>,
    pub stats: ExtractionStats,
}

/// Turns raw features into places
#[derive(Debug, Clone)]
pub struct Extractor {
    fallback_prefix: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::from_config(&LauncherConfig::default())
    }
}

impl Extractor {
    pub fn new(fallback_prefix: impl Into<String>) -> Self {
        Self {
            fallback_prefix: fallback_prefix.into(),
        }
    }

    pub fn from_config(config: &LauncherConfig) -> Self {
        Self::new(config.fallback_prefix.clone())
    }

    /// Normalize every feature in input order
    ///
    /// Synthetic names are numbered by the record's 1-based position in the
    /// input, counted within this call only.
    pub fn normalize(&self, collection: FeatureCollection) -> Extraction {
        let mut extraction = Extraction {
            places: Vec::with_capacity(collection.features.len()),
            stats: ExtractionStats {
                total_records: collection.features.len(),
                ..Default::default()
            },
        };

        for (position, value) in collection.features.into_iter().enumerate() {
            let index = position + 1;

            let Some(feature) = RawFeature::from_value(&value) else {
                debug!("Record {}: dropped ({})", index, DropReason::NotAnObject);
                extraction.stats.record_drop(DropReason::NotAnObject);
                continue;
            };

            match self.normalize_feature(&feature, index) {
                Ok((place, coordinate_source, name_source)) => {
                    debug!(
                        "Record {}: '{}' at {},{} (coordinates from {:?}, name from {:?})",
                        index,
                        place.name,
                        place.latitude,
                        place.longitude,
                        coordinate_source,
                        name_source
                    );
                    extraction
                        .stats
                        .record_place(coordinate_source, name_source);
                    extraction.places.push(place);
                }
                Err(reason) => {
                    debug!("Record {}: dropped ({})", index, reason);
                    extraction.stats.record_drop(reason);
                }
            }
        }

        let dropped = extraction.stats.dropped_total();
        if dropped > 0 {
            warn!(
                "Skipped {} of {} records without usable coordinates",
                dropped, extraction.stats.total_records
            );
        }
        info!(
            "Extracted {} places from {} records",
            extraction.stats.places_emitted, extraction.stats.total_records
        );

        extraction
    }

    fn normalize_feature(
        &self,
        feature: &RawFeature,
        index: usize,
    ) -> Result<(Place, CoordinateSource, NameSource), DropReason> {
        let (coordinates, coordinate_source) = resolve_coordinates(feature)?;
        let (name, name_source) = resolve_name(feature, &self.fallback_prefix, index);

        let props = feature.properties.as_ref();
        let place = Place {
            name,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            date: props.and_then(|p| p.date.clone()),
            note: props.and_then(|p| p.comment.clone()),
            address: props.and_then(|p| p.resolved_address().map(str::to_string)),
            source_url: props.and_then(|p| p.google_maps_url.clone()),
        };

        Ok((place, coordinate_source, name_source))
    }
}

/// Normalize a collection with default settings
pub fn normalize(collection: FeatureCollection) -> Extraction {
    Extractor::default().normalize(collection)
}
