//! Temporary output path allocation
//!
//! Paths are unique per call (`<dir>/<prefix><uuid>.pdf`). Nothing is
//! created on disk and nothing is ever removed; the caller owns the file
//! cpdf writes there.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::CpdfConfig;

#[derive(Debug, Clone)]
pub struct TempPathAllocator {
    dir: PathBuf,
    prefix: String,
}

impl TempPathAllocator {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &CpdfConfig) -> Self {
        Self::new(config.resolved_temp_dir(), config.temp_prefix.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Allocate a fresh path
    pub fn allocate(&self) -> PathBuf {
        self.dir.join(format!("{}{}.pdf", self.prefix, Uuid::new_v4()))
    }
}
