//! Derived artifacts
//!
//! The TABLE body is written to the table file named in the trailer, and an
//! EXEC body (if any) to the executable file named by the executable
//! augmentation. Bodies are written verbatim, replacing existing files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::shoebill::config::ArtifactsConfig;
use crate::shoebill::error::{Result, ShoebillError};
use crate::shoebill::processor::ParsedJob;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobArtifacts {
    table_path: PathBuf,
    exec_path: Option<PathBuf>,
}

impl JobArtifacts {
    /// Write the table and optional executable of `job` into `dir`.
    pub fn write(job: &ParsedJob, dir: impl AsRef<Path>, config: &ArtifactsConfig) -> Result<Self> {
        let dir = dir.as_ref();
        let table_path = write_artifact(dir.join(&config.table_file), job.table())?;
        let exec_path = job
            .exec()
            .map(|exec| write_artifact(dir.join(&config.exec_file), exec))
            .transpose()?;
        Ok(Self {
            table_path,
            exec_path,
        })
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    pub fn exec_path(&self) -> Option<&Path> {
        self.exec_path.as_deref()
    }

    /// Remove the table file. The executable is left in place.
    pub fn cleanup(&self) -> Result<()> {
        match fs::remove_file(&self.table_path) {
            Ok(()) => {
                debug!(path = %self.table_path.display(), "removed table file");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ShoebillError::Artifact {
                path: self.table_path.clone(),
                source,
            }),
        }
    }
}

fn write_artifact(path: PathBuf, contents: &str) -> Result<PathBuf> {
    fs::write(&path, contents).map_err(|source| ShoebillError::Artifact {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(path)
}
