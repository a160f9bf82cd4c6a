//! Submission collaborator contract
//!
//! A backend receives the final template and the path of the written table and
//! either returns a handle or fails. Scheduler access itself lives outside this
//! crate; [`DryRunBackend`] renders the description without contacting one.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::shoebill::artifacts::JobArtifacts;
use crate::shoebill::config::ArtifactsConfig;
use crate::shoebill::error::Result;
use crate::shoebill::processor::ParsedJob;
use crate::shoebill::template::SubmitTemplate;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("scheduler unavailable: {0}")]
    SchedulerUnavailable(String),
    #[error("job table not found at {}", .0.display())]
    MissingTable(PathBuf),
    #[error("submission rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SubmissionHandle {
    DryRun {
        description: String,
        table_path: PathBuf,
    },
    Submitted {
        cluster_id: u64,
    },
}

pub trait SubmitBackend {
    fn submit(
        &self,
        template: &SubmitTemplate,
        table_path: &Path,
    ) -> Result<SubmissionHandle, SubmitError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunBackend;

impl SubmitBackend for DryRunBackend {
    fn submit(
        &self,
        template: &SubmitTemplate,
        table_path: &Path,
    ) -> Result<SubmissionHandle, SubmitError> {
        if !table_path.is_file() {
            return Err(SubmitError::MissingTable(table_path.to_path_buf()));
        }
        Ok(SubmissionHandle::DryRun {
            description: template.as_text(),
            table_path: table_path.to_path_buf(),
        })
    }
}

/// Write the artifacts of `job` into `dir` and hand the template to `backend`.
pub fn submit_job(
    job: &ParsedJob,
    backend: &dyn SubmitBackend,
    dir: impl AsRef<Path>,
    config: &ArtifactsConfig,
) -> Result<(JobArtifacts, SubmissionHandle)> {
    let artifacts = JobArtifacts::write(job, dir, config)?;
    let handle = backend.submit(job.template(), artifacts.table_path())?;
    info!(?handle, "job handed to backend");
    Ok((artifacts, handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shoebill::config::load_defaults;
    use crate::shoebill::error::ShoebillError;
    use crate::shoebill::processor::parse_text;
    use crate::shoebill::testing::samples;
    use std::cell::RefCell;

    struct RecordingBackend {
        seen: RefCell<Vec<(String, PathBuf)>>,
    }

    impl SubmitBackend for RecordingBackend {
        fn submit(
            &self,
            template: &SubmitTemplate,
            table_path: &Path,
        ) -> Result<SubmissionHandle, SubmitError> {
            self.seen
                .borrow_mut()
                .push((template.as_text(), table_path.to_path_buf()));
            Ok(SubmissionHandle::Submitted { cluster_id: 12345 })
        }
    }

    struct OfflineBackend;

    impl SubmitBackend for OfflineBackend {
        fn submit(&self, _: &SubmitTemplate, _: &Path) -> Result<SubmissionHandle, SubmitError> {
            Err(SubmitError::SchedulerUnavailable("no schedd".to_string()))
        }
    }

    #[test]
    fn backend_receives_template_and_table_path() {
        let dir = tempfile::tempdir().unwrap();
        let job = parse_text(samples::SIMPLE).unwrap();
        let backend = RecordingBackend {
            seen: RefCell::new(Vec::new()),
        };
        let config = load_defaults().unwrap().artifacts;

        let (artifacts, handle) = submit_job(&job, &backend, dir.path(), &config).unwrap();
        assert_eq!(handle, SubmissionHandle::Submitted { cluster_id: 12345 });

        let seen = backend.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, job.template().as_text());
        assert_eq!(seen[0].1, artifacts.table_path());
    }

    #[test]
    fn dry_run_renders_description() {
        let dir = tempfile::tempdir().unwrap();
        let job = parse_text(samples::SIMPLE).unwrap();
        let config = load_defaults().unwrap().artifacts;

        let (_, handle) = submit_job(&job, &DryRunBackend, dir.path(), &config).unwrap();
        match handle {
            SubmissionHandle::DryRun { description, .. } => {
                assert!(description.ends_with("queue from TABLE _table.csv"));
            }
            other => panic!("expected dry run, got {:?}", other),
        }
    }

    #[test]
    fn dry_run_requires_table() {
        let job = parse_text(samples::SIMPLE).unwrap();
        let err = DryRunBackend
            .submit(job.template(), Path::new("/nonexistent/_table.csv"))
            .unwrap_err();
        assert!(matches!(err, SubmitError::MissingTable(_)));
    }

    #[test]
    fn scheduler_unavailable_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let job = parse_text(samples::SIMPLE).unwrap();
        let config = load_defaults().unwrap().artifacts;

        let err = submit_job(&job, &OfflineBackend, dir.path(), &config).unwrap_err();
        assert!(matches!(
            err,
            ShoebillError::Submit(SubmitError::SchedulerUnavailable(_))
        ));
    }
}
