use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use tokio::{fs, task};
use tracing::{debug, warn};
use uuid::Uuid;

const SCRATCH_PREFIX: &str = "pdf_svc_";

/// Per-request scratch directory holding the staged input and output files.
///
/// The input file name is random; only the output name derives from the
/// (already sanitized) upload stem. Dropping a `ScratchDir` removes the
/// directory and everything in it.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
    input_path: PathBuf,
    output_path: PathBuf,
}

impl ScratchDir {
    /// Create a fresh directory under `root`, or under the OS temp dir.
    pub fn allocate(root: Option<&Path>, output_stem: &str) -> io::Result<Self> {
        let mut builder = Builder::new();
        builder.prefix(SCRATCH_PREFIX);

        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        let input_path = dir.path().join(format!("{}.pdf", Uuid::new_v4().simple()));
        let output_path = dir.path().join(format!("{output_stem}.docx"));

        debug!(dir = %dir.path().display(), "Allocated scratch directory");

        Ok(Self {
            dir,
            input_path,
            output_path,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub async fn stage_input(&self, bytes: &[u8]) -> io::Result<()> {
        fs::write(&self.input_path, bytes).await
    }

    /// Best-effort removal of the staged input. Never fails.
    pub async fn remove_input(&self) {
        match fs::remove_file(&self.input_path).await {
            Ok(()) => debug!(path = %self.input_path.display(), "Removed staged input"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.input_path.display(),
                error = %e,
                "Failed to remove staged input, ignoring"
            ),
        }
    }

    /// Best-effort removal of the whole directory. Never fails.
    ///
    /// The recursive removal runs on the blocking pool.
    pub async fn close(self) {
        let path = self.dir.path().to_path_buf();
        let dir = self.dir;

        let result = match task::spawn_blocking(move || dir.close()).await {
            Ok(result) => result,
            Err(e) => Err(io::Error::other(e)),
        };

        match result {
            Ok(()) => debug!(path = %path.display(), "Removed scratch directory"),
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove scratch directory, ignoring"
            ),
        }
    }
}
