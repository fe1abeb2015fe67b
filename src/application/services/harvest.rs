//! Harvest specification service
//!
//! Loads species datasets and prescription files and runs the readers over them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::application::error_ext::IoResultExt;
use crate::application::prescription::{Prescription, PrescriptionReader};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::ParserSettings;
use crate::domain::{SpeciesDataset, SpeciesList};
use crate::infrastructure::lines::TextLines;
use crate::infrastructure::traits::FileSystem;

/// Outcome of checking one prescription file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: ApplicationResult<Vec<Prescription>>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Service for parsing harvest prescriptions.
pub struct HarvestService {
    fs: Arc<dyn FileSystem>,
    settings: ParserSettings,
}

impl HarvestService {
    /// Create a new harvest service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: ParserSettings) -> Self {
        Self { fs, settings }
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Load a species file (whitespace-separated names).
    pub fn load_species(&self, path: &Path) -> ApplicationResult<SpeciesList> {
        debug!("load_species: {}", path.display());
        self.ensure_file(path)?;
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read species file", path)?;
        let species = SpeciesList::parse(&content)?;
        debug!("load_species: {} species", species.len());
        Ok(species)
    }

    /// Parse prescriptions from in-memory text.
    pub fn parse_prescriptions(
        &self,
        text: &str,
        dataset: &dyn SpeciesDataset,
    ) -> ApplicationResult<Vec<Prescription>> {
        let mut lines = TextLines::new(text);
        let prescriptions = PrescriptionReader::new(dataset, &self.settings).read_all(&mut lines)?;
        Ok(prescriptions)
    }

    /// Read and parse one prescription file.
    #[instrument(level = "debug", skip(self, dataset))]
    pub fn parse_file(
        &self,
        path: &Path,
        dataset: &dyn SpeciesDataset,
    ) -> ApplicationResult<Vec<Prescription>> {
        self.ensure_file(path)?;
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read prescription file", path)?;
        self.parse_prescriptions(&content, dataset)
            .map_err(|e| match e {
                ApplicationError::Parse(source) => ApplicationError::ParseFile {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            })
    }

    /// Parse several files in parallel, one reader per file.
    ///
    /// Reports are returned in the order of `paths`.
    pub fn check_files(
        &self,
        paths: &[PathBuf],
        dataset: &dyn SpeciesDataset,
    ) -> Vec<FileReport> {
        paths
            .par_iter()
            .map(|path| FileReport {
                path: path.clone(),
                result: self.parse_file(path, dataset),
            })
            .collect()
    }

    fn ensure_file(&self, path: &Path) -> ApplicationResult<()> {
        if self.fs.is_file(path) {
            return Ok(());
        }
        let reason = if self.fs.exists(path) {
            "not a file"
        } else {
            "file does not exist"
        };
        Err(ApplicationError::OperationFailed {
            context: format!("file not found: {}", path.display()),
            source: Box::new(std::io::Error::new(std::io::ErrorKind::NotFound, reason)),
        })
    }
}
