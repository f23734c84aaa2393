//! Places Launcher Library
//!
//! Converts a Google Takeout saved-places export (a GeoJSON-like feature
//! collection) into a static page of Apple Maps deep links, since Apple Maps
//! has no bulk import. CSV and GPX output are also available.
//!
//! The pipeline is:
//! - [`loader`] reads and shape-checks the input document
//! - [`extractor`] normalizes noisy records into [`Place`] values, dropping
//!   those that cannot be located
//! - [`renderer`] maps the places, in order, onto an output document
//! - [`loader`] writes the result atomically

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod models;
pub mod processor;
pub mod renderer;

pub use config::{LauncherConfig, OutputFormat};
pub use error::{LauncherError, Result};
pub use extractor::{Extraction, Extractor, normalize};
pub use models::{ExtractionStats, FeatureCollection, Place, RawFeature};
pub use processor::PlacesProcessor;
pub use renderer::{Renderer, render};
