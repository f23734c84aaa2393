//! Conversion configuration.
//!
//! Holds the rendering choices for a run: output format, page title,
//! synthetic-name prefix and coordinate precision.

use crate::constants::{
    DEFAULT_FALLBACK_PREFIX, DEFAULT_OUTPUT_STEM, DEFAULT_PRECISION, DEFAULT_TITLE, MIN_PRECISION,
};
use crate::error::{LauncherError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Supported output documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    /// HTML launcher page with Apple Maps deep links
    #[default]
    Html,
    /// CSV rows for guide-import tools
    Csv,
    /// GPX 1.1 waypoints
    Gpx,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Csv => "csv",
            OutputFormat::Gpx => "gpx",
        }
    }

    /// Infer the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }

    /// Default output file name for this format
    pub fn default_output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", DEFAULT_OUTPUT_STEM, self.extension()))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(OutputFormat::Html),
            "csv" => Ok(OutputFormat::Csv),
            "gpx" => Ok(OutputFormat::Gpx),
            other => Err(LauncherError::configuration(format!(
                "Unknown output format '{}'. Valid formats: html, csv, gpx",
                other
            ))),
        }
    }
}

/// Configuration for one conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Output document format
    pub format: OutputFormat,

    /// Page title for HTML output
    pub title: String,

    /// Prefix for synthetic names, followed by the record's 1-based index
    pub fallback_prefix: String,

    /// Decimal places for formatted coordinates
    pub precision: usize,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            title: DEFAULT_TITLE.to_string(),
            fallback_prefix: DEFAULT_FALLBACK_PREFIX.to_string(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl LauncherConfig {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_fallback_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.fallback_prefix = prefix.into();
        self
    }

    /// Set coordinate precision, raising it to the minimum if lower
    pub fn with_precision(mut self, precision: usize) -> Self {
        if precision < MIN_PRECISION {
            debug!(
                "Precision {} below minimum, using {}",
                precision, MIN_PRECISION
            );
        }
        self.precision = precision.max(MIN_PRECISION);
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.fallback_prefix.trim().is_empty() {
            return Err(LauncherError::configuration(
                "Fallback name prefix must not be empty",
            ));
        }

        if self.precision < MIN_PRECISION {
            return Err(LauncherError::configuration(format!(
                "Precision must be at least {} decimal places, got {}",
                MIN_PRECISION, self.precision
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LauncherConfig::default();
        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.precision, DEFAULT_PRECISION);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = LauncherConfig::default()
            .with_format(OutputFormat::Gpx)
            .with_title("My Places")
            .with_fallback_prefix("Unnamed Place")
            .with_precision(6);

        assert_eq!(config.format, OutputFormat::Gpx);
        assert_eq!(config.title, "My Places");
        assert_eq!(config.fallback_prefix, "Unnamed Place");
        assert_eq!(config.precision, 6);
    }

    #[test]
    fn test_precision_clamped_to_minimum() {
        let config = LauncherConfig::default().with_precision(2);
        assert_eq!(config.precision, MIN_PRECISION);
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let config = LauncherConfig::default().with_fallback_prefix("   ");
        assert!(matches!(
            config.validate(),
            Err(LauncherError::Configuration { .. })
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/places.HTML")),
            Some(OutputFormat::Html)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("places.gpx")),
            Some(OutputFormat::Gpx)
        );
        assert_eq!(OutputFormat::from_path(Path::new("places.txt")), None);
        assert_eq!(OutputFormat::from_path(Path::new("places")), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("kml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            OutputFormat::Html.default_output_path(),
            PathBuf::from("saved_places.html")
        );
        assert_eq!(
            OutputFormat::Csv.default_output_path(),
            PathBuf::from("saved_places.csv")
        );
    }
}
