//! File sink writing timestamped report files.

use super::Sink;
use crate::error::{Result, ResultExt as _};
use std::path::{Path, PathBuf};

/// Writes each report to `<dir>/report_<unix-seconds>.<ext>`.
///
/// The directory is created on first export. When a file with the same timestamp
/// already exists a `_1`, `_2`, ... suffix is added instead of overwriting it.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    extension: String,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_extension(dir, "html")
    }

    pub fn with_extension(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the report and return the path it was written to.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot be written.
    pub fn write_report(&self, formatted: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create report directory: {}", self.dir.display())
        })?;

        let path = self.next_path();
        std::fs::write(&path, formatted)
            .with_context(|| format!("Cannot write to file: {}", path.display()))?;
        Ok(path)
    }

    fn next_path(&self) -> PathBuf {
        let stamp = chrono::Utc::now().timestamp();
        let mut path = self.dir.join(format!("report_{stamp}.{}", self.extension));
        let mut n = 1;
        while path.exists() {
            path = self
                .dir
                .join(format!("report_{stamp}_{n}.{}", self.extension));
            n += 1;
        }
        path
    }
}

impl Sink for FileSink {
    fn export(&self, formatted: &str) -> bool {
        match self.write_report(formatted) {
            Ok(path) => {
                tracing::info!("Report saved to: {}", path.display());
                true
            }
            Err(e) => {
                tracing::error!("{e}");
                false
            }
        }
    }

    fn method_name(&self) -> String {
        format!("File export to {}", self.dir.display())
    }
}
