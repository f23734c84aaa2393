//! Core data structures for saved-places conversion.
//!
//! Raw Takeout records are modelled as structurally optional values built
//! from `serde_json::Value` by hand: every field may be missing or carry an
//! unexpected type, and such fields simply read as absent. Normalized
//! [`Place`] values are what the renderers consume.

use crate::constants::{
    COMMENT_KEYS, LABEL_KEYS, LATITUDE_RANGE, LONGITUDE_RANGE, PLACEHOLDER_TOLERANCE, URL_KEYS,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed top-level document: the raw feature list in input order
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<Value>,
}

/// One saved-place entry as found in the export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFeature {
    pub geometry: Option<RawGeometry>,
    pub properties: Option<RawProperties>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGeometry {
    pub kind: Option<String>,
    /// First two numeric elements, still in GeoJSON `[longitude, latitude]` order
    pub coordinates: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProperties {
    pub google_maps_url: Option<String>,
    pub date: Option<String>,
    pub comment: Option<String>,
    pub address: Option<String>,
    pub location: Option<RawLocation>,
    /// String values of the label-ish keys, in lookup order
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLocation {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl RawFeature {
    /// Build a feature from an arbitrary JSON value; `None` when it is not an object
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        Some(Self {
            geometry: object.get("geometry").and_then(RawGeometry::from_value),
            properties: object.get("properties").and_then(RawProperties::from_value),
        })
    }

    pub fn google_maps_url(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|props| props.google_maps_url.as_deref())
    }

    pub fn location_name(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|props| props.location.as_ref())
            .and_then(|loc| loc.name.as_deref())
    }
}

impl RawGeometry {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let kind = string_field(object, "type");
        let coordinates = object
            .get("coordinates")
            .and_then(Value::as_array)
            .filter(|coords| coords.len() >= 2)
            .and_then(|coords| Some((coords[0].as_f64()?, coords[1].as_f64()?)));

        Some(Self { kind, coordinates })
    }
}

impl RawProperties {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let location = object
            .get("location")
            .and_then(Value::as_object)
            .map(|loc| RawLocation {
                name: string_field(loc, "name"),
                address: string_field(loc, "address"),
            });

        Some(Self {
            google_maps_url: first_string_field(object, URL_KEYS),
            date: string_field(object, "date"),
            comment: first_string_field(object, COMMENT_KEYS),
            address: string_field(object, "address"),
            location,
            labels: LABEL_KEYS
                .iter()
                .filter_map(|key| string_field(object, key))
                .collect(),
        })
    }

    /// Address from the nested location, falling back to a top-level field
    pub fn resolved_address(&self) -> Option<&str> {
        self.location
            .as_ref()
            .and_then(|loc| loc.address.as_deref())
            .or(self.address.as_deref())
    }
}

/// String value of `key`, ignoring values of any other type
fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// First non-empty string value among `keys`
fn first_string_field(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| string_field(object, key))
        .find(|value| !value.is_empty())
}

/// A validated coordinate pair in (latitude, longitude) order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Accept the pair only when both values are finite and in geographic range
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        let in_range = |value: f64, (min, max): (f64, f64)| {
            value.is_finite() && (min..=max).contains(&value)
        };

        (in_range(latitude, LATITUDE_RANGE) && in_range(longitude, LONGITUDE_RANGE)).then_some(
            Self {
                latitude,
                longitude,
            },
        )
    }

    /// Exporter placeholder for missing geometry
    pub fn is_placeholder(latitude: f64, longitude: f64) -> bool {
        latitude.abs() < PLACEHOLDER_TOLERANCE && longitude.abs() < PLACEHOLDER_TOLERANCE
    }
}

/// A normalized saved place ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: Option<String>,
    pub note: Option<String>,
    pub address: Option<String>,
    pub source_url: Option<String>,
}

/// Where a place's coordinates came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CoordinateSource {
    Geometry,
    UrlQuery,
}

/// Where a place's name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NameSource {
    LocationName,
    UrlQuery,
    LabelField,
    Synthetic,
}

/// Why a record contributed nothing to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DropReason {
    /// The feature entry is not a JSON object
    NotAnObject,
    /// Neither geometry nor a URL is present
    NoLocationData,
    /// Geometry was the (0,0) placeholder and the URL held no coordinates
    PlaceholderWithoutFallback,
    /// A coordinate pair was found but lies outside geographic range
    OutOfRange,
    /// Location data exists but none of it parses as coordinates
    Unresolvable,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DropReason::NotAnObject => "not an object",
            DropReason::NoLocationData => "no geometry or URL",
            DropReason::PlaceholderWithoutFallback => "placeholder (0,0) without URL coordinates",
            DropReason::OutOfRange => "coordinates out of range",
            DropReason::Unresolvable => "unresolvable coordinates",
        };
        f.write_str(label)
    }
}

/// Per-run extraction accounting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub total_records: usize,
    pub places_emitted: usize,
    pub dropped: BTreeMap<DropReason, usize>,
    pub coordinate_sources: BTreeMap<CoordinateSource, usize>,
    pub name_sources: BTreeMap<NameSource, usize>,
}

impl ExtractionStats {
    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }

    pub fn record_drop(&mut self, reason: DropReason) {
        *self.dropped.entry(reason).or_default() += 1;
    }

    pub fn record_place(&mut self, coordinates: CoordinateSource, name: NameSource) {
        self.places_emitted += 1;
        *self.coordinate_sources.entry(coordinates).or_default() += 1;
        *self.name_sources.entry(name).or_default() += 1;
    }
}

/// Summary of one complete conversion run
#[derive(Debug, Default)]
pub struct RunStats {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub extraction: ExtractionStats,
    pub bytes_written: usize,
    pub processing_time: Duration,
}
