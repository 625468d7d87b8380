//! Delivery of rendered documents
//!
//! A batch is delivered as two jobs, BIG and SMALL. Job files are never
//! overwritten, and a batch whose SMALL job fails leaves no BIG job behind.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use std::fmt;
use std::io;

use kitlabel_utils::atomic_write::write_new_file_atomic;
use kitlabel_utils::error::DeliveryError;

use crate::batch::BatchOutput;

/// Names tried per job before giving up: `<job>`, `<job>-2`, ...
pub const MAX_NAME_ATTEMPTS: u32 = 100;

/// Which printer a document is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Big,
    Small,
}

impl Destination {
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Big => "BIG",
            Self::Small => "SMALL",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// `job_%Y%m%d_%H%M%S_<BIG|SMALL>`
#[must_use]
pub fn job_name(destination: Destination, at: DateTime<Utc>) -> String {
    format!("job_{}_{}", at.format("%Y%m%d_%H%M%S"), destination.suffix())
}

/// Receives finished documents.
pub trait OutputSink {
    /// Deliver one document. Returns where it went, or `None` when nothing
    /// was written.
    fn deliver(
        &self,
        destination: Destination,
        job_name: &str,
        document: &str,
    ) -> Result<Option<Utf8PathBuf>, DeliveryError>;

    /// Withdraw a job this sink delivered earlier in the same batch.
    fn retract(&self, delivered: &Utf8Path) -> io::Result<()>;
}

/// Writes each document as `<dir>/<job_name>.<extension>`.
///
/// An existing file is never replaced; the job gets a `-2`, `-3`, ... suffix
/// instead.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: Utf8PathBuf,
    extension: String,
}

impl DirectorySink {
    pub fn new(dir: impl Into<Utf8PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    fn candidate(&self, job_name: &str, attempt: u32) -> Utf8PathBuf {
        if attempt == 1 {
            self.dir.join(format!("{job_name}.{}", self.extension))
        } else {
            self.dir
                .join(format!("{job_name}-{attempt}.{}", self.extension))
        }
    }
}

impl OutputSink for DirectorySink {
    fn deliver(
        &self,
        destination: Destination,
        job_name: &str,
        document: &str,
    ) -> Result<Option<Utf8PathBuf>, DeliveryError> {
        if document.is_empty() {
            tracing::debug!(%destination, job_name, "Empty document, nothing written");
            return Ok(None);
        }

        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let path = self.candidate(job_name, attempt);
            let written =
                write_new_file_atomic(&path, document).map_err(|e| DeliveryError::Write {
                    destination: destination.to_string(),
                    path: path.to_string(),
                    reason: format!("{e:#}"),
                })?;
            if written {
                tracing::info!(%destination, path = %path, bytes = document.len(), "Wrote print job");
                return Ok(Some(path));
            }
            tracing::debug!(path = %path, "Job file exists, trying the next name");
        }

        Err(DeliveryError::NameExhausted {
            job_name: job_name.to_string(),
            dir: self.dir.to_string(),
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    fn retract(&self, delivered: &Utf8Path) -> io::Result<()> {
        std::fs::remove_file(delivered)?;
        tracing::info!(path = %delivered, "Removed print job of an undelivered batch");
        Ok(())
    }
}

/// Where each document of a batch was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveredJobs {
    pub big: Option<Utf8PathBuf>,
    pub small: Option<Utf8PathBuf>,
}

/// Deliver both documents of a batch under job names stamped with `at`.
///
/// When the SMALL job fails, the BIG job already delivered is retracted so
/// the output never holds half a batch.
pub fn deliver_batch(
    sink: &dyn OutputSink,
    output: &BatchOutput,
    at: DateTime<Utc>,
) -> Result<DeliveredJobs, DeliveryError> {
    let big = sink.deliver(
        Destination::Big,
        &job_name(Destination::Big, at),
        &output.big_document,
    )?;
    let small = match sink.deliver(
        Destination::Small,
        &job_name(Destination::Small, at),
        &output.small_document,
    ) {
        Ok(small) => small,
        Err(err) => {
            if let Some(path) = &big
                && let Err(e) = sink.retract(path)
            {
                tracing::warn!(path = %path, error = %e, "Could not remove partial print job");
            }
            return Err(err);
        }
    };
    Ok(DeliveredJobs { big, small })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_job_names() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        assert_eq!(job_name(Destination::Big, at), "job_20240309_070502_BIG");
        assert_eq!(job_name(Destination::Small, at), "job_20240309_070502_SMALL");
    }

    #[test]
    fn test_directory_sink_writes_document() {
        let dir = TempDir::new().unwrap();
        let out = Utf8PathBuf::from_path_buf(dir.path().join("out")).unwrap();
        let sink = DirectorySink::new(out.clone(), "zpl");

        let path = sink
            .deliver(Destination::Big, "job_1_BIG", "^XA^XZ")
            .unwrap()
            .unwrap();

        assert_eq!(path, out.join("job_1_BIG.zpl"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "^XA^XZ");
    }

    #[test]
    fn test_empty_document_not_written() {
        let dir = TempDir::new().unwrap();
        let out = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let sink = DirectorySink::new(out, "zpl");

        assert_eq!(sink.deliver(Destination::Small, "job_1_SMALL", "").unwrap(), None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_deliver_batch_skips_empty_small_document() {
        let dir = TempDir::new().unwrap();
        let out = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let sink = DirectorySink::new(out.clone(), "txt");
        let output = BatchOutput {
            big_document: "^XA^FDbig^FS^XZ".to_string(),
            small_document: String::new(),
            counts: crate::expansion::LabelCounts::new(1, 0, 0),
            warnings: Vec::new(),
        };
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap();

        let delivered = deliver_batch(&sink, &output, at).unwrap();

        assert_eq!(
            delivered.big,
            Some(out.join("job_20250131_235959_BIG.txt"))
        );
        assert_eq!(delivered.small, None);
    }

    #[test]
    fn test_existing_job_file_is_not_replaced() {
        let dir = TempDir::new().unwrap();
        let out = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let sink = DirectorySink::new(out.clone(), "zpl");

        let first = sink.deliver(Destination::Big, "job_1_BIG", "^XA^FDone^FS^XZ").unwrap();
        let second = sink.deliver(Destination::Big, "job_1_BIG", "^XA^FDtwo^FS^XZ").unwrap();

        assert_eq!(first, Some(out.join("job_1_BIG.zpl")));
        assert_eq!(second, Some(out.join("job_1_BIG-2.zpl")));
        assert_eq!(
            std::fs::read_to_string(out.join("job_1_BIG.zpl")).unwrap(),
            "^XA^FDone^FS^XZ"
        );
    }

    /// Writes BIG jobs to a directory and fails every SMALL job.
    struct FailingSmallSink(DirectorySink);

    impl OutputSink for FailingSmallSink {
        fn deliver(
            &self,
            destination: Destination,
            job_name: &str,
            document: &str,
        ) -> Result<Option<Utf8PathBuf>, DeliveryError> {
            match destination {
                Destination::Big => self.0.deliver(destination, job_name, document),
                Destination::Small => Err(DeliveryError::Write {
                    destination: destination.to_string(),
                    path: job_name.to_string(),
                    reason: "disk full".to_string(),
                }),
            }
        }

        fn retract(&self, delivered: &Utf8Path) -> io::Result<()> {
            self.0.retract(delivered)
        }
    }

    #[test]
    fn test_failed_small_job_retracts_big_job() {
        let dir = TempDir::new().unwrap();
        let out = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let sink = FailingSmallSink(DirectorySink::new(out, "zpl"));
        let output = BatchOutput {
            big_document: "^XA^FDbig^FS^XZ".to_string(),
            small_document: "^XA^FDsmall^FS^XZ".to_string(),
            counts: crate::expansion::LabelCounts::new(1, 1, 0),
            warnings: Vec::new(),
        };

        let err = deliver_batch(&sink, &output, Utc::now()).unwrap_err();

        assert!(matches!(err, DeliveryError::Write { ref destination, .. } if destination == "SMALL"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
