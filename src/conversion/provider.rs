use async_trait::async_trait;
use std::path::Path;
use std::process::ExitStatus;
use std::time::Duration;

/// An opaque PDF to Word converter.
///
/// Implementations read the PDF at `input` and write the document to
/// `output`. Returning `Ok(())` is not proof of success: callers still
/// check that `output` exists and is non-empty.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("failed to start converter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("converter exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("converter timed out after {0:?}")]
    Timeout(Duration),

    #[error("Conversion produced an empty or missing file.")]
    EmptyOutput,

    #[error("{0}")]
    Other(String),
}
