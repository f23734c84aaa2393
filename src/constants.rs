//! Application constants for the places launcher
//!
//! Property keys found in Google Takeout exports, URL templates for the
//! generated links, and default values used throughout the crate.

// =============================================================================
// Takeout Property Keys
// =============================================================================

/// Keys that may hold the Google Maps URL, in lookup order
pub const URL_KEYS: &[&str] = &["google_maps_url", "Google Maps URL"];

/// Keys that may hold a free-text comment, in lookup order
pub const COMMENT_KEYS: &[&str] = &["Comment", "comment"];

/// Label-ish property keys consulted after location.name and the URL query
pub const LABEL_KEYS: &[&str] = &["name", "Name", "title", "Title", "label", "Label"];

/// GeoJSON geometry type carrying a single coordinate pair
pub const POINT_GEOMETRY: &str = "Point";

/// Prefix Google sometimes inserts before the place name in `q=`
pub const GOOGLE_NAME_PREFIX: &str = "m,";

// =============================================================================
// Coordinate Handling
// =============================================================================

/// Both components within this distance of zero mark a placeholder geometry
pub const PLACEHOLDER_TOLERANCE: f64 = 1e-9;

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Decimal places used when formatting coordinates
pub const DEFAULT_PRECISION: usize = 8;

/// Lowest precision accepted from configuration
pub const MIN_PRECISION: usize = 5;

// =============================================================================
// Link Templates
// =============================================================================

pub const APPLE_MAPS_BASE_URL: &str = "https://maps.apple.com/";
pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.google.com/";

// =============================================================================
// Output Defaults
// =============================================================================

pub const DEFAULT_OUTPUT_STEM: &str = "saved_places";
pub const DEFAULT_TITLE: &str = "Saved Places → Apple Maps";
pub const DEFAULT_FALLBACK_PREFIX: &str = "Saved Place";

/// Separator between parts of the notes text
pub const NOTES_SEPARATOR: &str = " | ";

/// GPX creator attribute
pub const GPX_CREATOR: &str = "places-launcher";

/// CSV header row
pub const CSV_COLUMNS: &[&str] = &["name", "latitude", "longitude", "url", "notes"];
