//! Run orchestration: read, extract, render, write.

use crate::config::LauncherConfig;
use crate::error::Result;
use crate::extractor::Extractor;
use crate::loader::{read_collection, write_output};
use crate::models::RunStats;
use crate::renderer::{Renderer, renderer_for};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Converts one input export into one output document
#[derive(Debug, Clone)]
pub struct PlacesProcessor {
    input_path: PathBuf,
    output_path: PathBuf,
    config: LauncherConfig,
}

impl PlacesProcessor {
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            input_path,
            output_path,
            config: LauncherConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LauncherConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the full pipeline and write the output document
    pub fn process(&self) -> Result<RunStats> {
        self.run(true)
    }

    /// Run extraction and rendering without touching the output path
    pub fn dry_run(&self) -> Result<RunStats> {
        self.run(false)
    }

    fn run(&self, write: bool) -> Result<RunStats> {
        let start_time = Instant::now();
        info!(
            "Converting {} to {} ({})",
            self.input_path.display(),
            self.output_path.display(),
            self.config.format
        );

        let collection = read_collection(&self.input_path)?;
        let extraction = Extractor::from_config(&self.config).normalize(collection);
        let document = renderer_for(&self.config).render(&extraction.places)?;

        let (output_path, bytes_written) = if write {
            let bytes = write_output(&self.output_path, &document)?;
            info!(
                "Wrote {} entries ({} bytes) to {}",
                extraction.places.len(),
                bytes,
                self.output_path.display()
            );
            (Some(self.output_path.clone()), bytes)
        } else {
            info!("Dry run: rendered {} bytes, nothing written", document.len());
            (None, 0)
        };

        Ok(RunStats {
            input_path: self.input_path.clone(),
            output_path,
            extraction: extraction.stats,
            bytes_written,
            processing_time: start_time.elapsed(),
        })
    }
}
