//! CSV rows for guide-import tools: `name,latitude,longitude,url,notes`.

use super::Renderer;
use super::links::{NoteFields, format_coordinate, notes_text};
use crate::config::LauncherConfig;
use crate::constants::CSV_COLUMNS;
use crate::error::{LauncherError, Result};
use crate::models::Place;

#[derive(Debug, Clone)]
pub struct CsvRenderer {
    precision: usize,
}

impl CsvRenderer {
    pub fn new(config: &LauncherConfig) -> Self {
        Self {
            precision: config.precision,
        }
    }

    fn record(&self, place: &Place) -> [String; 5] {
        [
            place.name.clone(),
            format_coordinate(place.latitude, self.precision),
            format_coordinate(place.longitude, self.precision),
            place.source_url.clone().unwrap_or_default(),
            notes_text(place, NoteFields::STANDARD),
        ]
    }
}

impl Renderer for CsvRenderer {
    fn render(&self, places: &[Place]) -> Result<String> {
        let mut writer = ::csv::WriterBuilder::new()
            .terminator(::csv::Terminator::CRLF)
            .from_writer(Vec::new());

        writer.write_record(CSV_COLUMNS)?;
        for place in places {
            writer.write_record(self.record(place))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| LauncherError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
