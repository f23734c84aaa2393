//! Output document rendering.
//!
//! Every renderer is a pure, order-preserving map over the place sequence
//! with a constant header and footer. No entry depends on another.

pub mod csv;
pub mod gpx;
pub mod html;
pub mod links;

use self::csv::CsvRenderer;
use self::gpx::GpxRenderer;
use self::html::HtmlRenderer;

use crate::config::{LauncherConfig, OutputFormat};
use crate::error::Result;
use crate::models::Place;
use std::borrow::Cow;

/// Produces one output document from a sequence of places
pub trait Renderer {
    fn render(&self, places: &[Place]) -> Result<String>;
}

/// Renderer for the configured output format
pub fn renderer_for(config: &LauncherConfig) -> Box<dyn Renderer> {
    match config.format {
        OutputFormat::Html => Box::new(HtmlRenderer::new(config)),
        OutputFormat::Csv => Box::new(CsvRenderer::new(config)),
        OutputFormat::Gpx => Box::new(GpxRenderer::new(config)),
    }
}

/// Render places with the configured format
pub fn render(places: &[Place], config: &LauncherConfig) -> Result<String> {
    renderer_for(config).render(places)
}

/// Escape text for embedding in HTML or XML, including attribute values
pub(crate) fn escape_markup(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}
