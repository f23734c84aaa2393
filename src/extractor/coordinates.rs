//! Coordinate resolution as an ordered chain of strategies.
//!
//! The first strategy to produce an in-range pair wins. Geometry is tried
//! before the URL, and a `(0,0)` geometry is never accepted: it is how the
//! exporter marks a place whose real location is only in the URL.

use super::url_query::{decoded_query_coordinates, raw_query_coordinates};
use crate::constants::POINT_GEOMETRY;
use crate::models::{CoordinateSource, Coordinates, DropReason, RawFeature};
use tracing::trace;

/// Outcome of a single coordinate strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Found(Coordinates),
    /// The strategy's source is absent or holds no coordinate pair
    Missing,
    /// Geometry was the `(0,0)` placeholder
    Placeholder,
    /// A pair was parsed but lies outside geographic range
    OutOfRange,
}

/// One step of the coordinate chain
pub struct CoordinateStrategy {
    pub source: CoordinateSource,
    pub resolve: fn(&RawFeature) -> Resolution,
}

/// Coordinate strategies in priority order
pub const COORDINATE_CHAIN: &[CoordinateStrategy] = &[
    CoordinateStrategy {
        source: CoordinateSource::Geometry,
        resolve: from_geometry,
    },
    CoordinateStrategy {
        source: CoordinateSource::UrlQuery,
        resolve: from_url_query,
    },
];

/// Run the chain; on failure report why the record must be dropped
pub fn resolve_coordinates(
    feature: &RawFeature,
) -> Result<(Coordinates, CoordinateSource), DropReason> {
    let mut saw_placeholder = false;
    let mut saw_out_of_range = false;

    for strategy in COORDINATE_CHAIN {
        match (strategy.resolve)(feature) {
            Resolution::Found(coordinates) => return Ok((coordinates, strategy.source)),
            Resolution::Placeholder => saw_placeholder = true,
            Resolution::OutOfRange => saw_out_of_range = true,
            Resolution::Missing => {}
        }
        trace!("Coordinate strategy {:?} did not resolve", strategy.source);
    }

    let reason = if saw_out_of_range {
        DropReason::OutOfRange
    } else if saw_placeholder {
        DropReason::PlaceholderWithoutFallback
    } else if feature.geometry.is_none() && feature.google_maps_url().is_none() {
        DropReason::NoLocationData
    } else {
        DropReason::Unresolvable
    };

    Err(reason)
}

/// GeoJSON point geometry, stored as `[longitude, latitude]`
pub fn from_geometry(feature: &RawFeature) -> Resolution {
    let Some(geometry) = &feature.geometry else {
        return Resolution::Missing;
    };

    if geometry
        .kind
        .as_deref()
        .is_some_and(|kind| kind != POINT_GEOMETRY)
    {
        return Resolution::Missing;
    }

    let Some((longitude, latitude)) = geometry.coordinates else {
        return Resolution::Missing;
    };

    if Coordinates::is_placeholder(latitude, longitude) {
        return Resolution::Placeholder;
    }

    validated(latitude, longitude)
}

/// `q=<lat>,<lon>` in the Google Maps URL, raw match first, then decoded
pub fn from_url_query(feature: &RawFeature) -> Resolution {
    let Some(url) = feature.google_maps_url() else {
        return Resolution::Missing;
    };

    match raw_query_coordinates(url).or_else(|| decoded_query_coordinates(url)) {
        Some((latitude, longitude)) => validated(latitude, longitude),
        None => Resolution::Missing,
    }
}

fn validated(latitude: f64, longitude: f64) -> Resolution {
    match Coordinates::checked(latitude, longitude) {
        Some(coordinates) => Resolution::Found(coordinates),
        None => Resolution::OutOfRange,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn feature(value: Value) -> RawFeature {
        RawFeature::from_value(&value).unwrap()
    }

    #[test]
    fn test_geometry_is_reversed_into_lat_lon() {
        let f = feature(json!({"geometry": {"type": "Point", "coordinates": [-0.1315, 50.82253]}}));
        let (coordinates, source) = resolve_coordinates(&f).unwrap();
        assert_eq!(source, CoordinateSource::Geometry);
        assert_eq!(coordinates.latitude, 50.82253);
        assert_eq!(coordinates.longitude, -0.1315);
    }

    #[test]
    fn test_placeholder_geometry_falls_back_to_url() {
        let f = feature(json!({
            "geometry": {"type": "Point", "coordinates": [0, 0]},
            "properties": {"google_maps_url": "http://maps.google.com/?q=12.34,-56.78"}
        }));
        let (coordinates, source) = resolve_coordinates(&f).unwrap();
        assert_eq!(source, CoordinateSource::UrlQuery);
        assert_eq!(coordinates.latitude, 12.34);
        assert_eq!(coordinates.longitude, -56.78);
    }

    #[test]
    fn test_placeholder_without_url_coordinates_is_dropped() {
        let f = feature(json!({
            "geometry": {"type": "Point", "coordinates": [0, 0]},
            "properties": {"google_maps_url": "http://maps.google.com/?cid=1234"}
        }));
        assert_eq!(
            resolve_coordinates(&f),
            Err(DropReason::PlaceholderWithoutFallback)
        );
    }

    #[test]
    fn test_geometry_wins_over_url() {
        let f = feature(json!({
            "geometry": {"type": "Point", "coordinates": [2.0, 1.0]},
            "properties": {"google_maps_url": "http://maps.google.com/?q=30,40"}
        }));
        let (coordinates, source) = resolve_coordinates(&f).unwrap();
        assert_eq!(source, CoordinateSource::Geometry);
        assert_eq!((coordinates.latitude, coordinates.longitude), (1.0, 2.0));
    }

    #[test]
    fn test_out_of_range_geometry_tries_url() {
        let f = feature(json!({
            "geometry": {"type": "Point", "coordinates": [10.0, 95.0]},
            "properties": {"google_maps_url": "http://maps.google.com/?q=45.5,10"}
        }));
        let (coordinates, source) = resolve_coordinates(&f).unwrap();
        assert_eq!(source, CoordinateSource::UrlQuery);
        assert_eq!(coordinates.latitude, 45.5);
    }

    #[test]
    fn test_out_of_range_url_is_dropped() {
        let f = feature(json!({
            "properties": {"google_maps_url": "http://maps.google.com/?q=91.0,10"}
        }));
        assert_eq!(resolve_coordinates(&f), Err(DropReason::OutOfRange));
    }

    #[test]
    fn test_non_point_geometry_is_ignored() {
        let f = feature(json!({
            "geometry": {"type": "LineString", "coordinates": [1.0, 2.0]}
        }));
        assert_eq!(resolve_coordinates(&f), Err(DropReason::Unresolvable));
    }

    #[test]
    fn test_geometry_without_type_is_accepted() {
        let f = feature(json!({"geometry": {"coordinates": [151.2, -33.8]}}));
        let (coordinates, _) = resolve_coordinates(&f).unwrap();
        assert_eq!(coordinates.latitude, -33.8);
    }

    #[test]
    fn test_no_location_data() {
        let f = feature(json!({"properties": {"date": "2020-01-01"}}));
        assert_eq!(resolve_coordinates(&f), Err(DropReason::NoLocationData));

        let f = feature(json!({}));
        assert_eq!(resolve_coordinates(&f), Err(DropReason::NoLocationData));
    }

    #[test]
    fn test_geometry_only_record_without_properties() {
        let f = feature(json!({"geometry": {"type": "Point", "coordinates": [-3.398, 57.006]}}));
        assert!(resolve_coordinates(&f).is_ok());
    }
}
