// PDF to Word conversion
//
// The converter itself is a black box; this module only decides whether an
// attempt produced something usable.

pub mod command;
pub mod provider;

pub use command::*;
pub use provider::*;

use std::path::Path;
use tokio::fs;

/// Run `converter` over `input` and require a non-empty file at `output`.
///
/// Returns the size of the produced document.
pub async fn run_conversion(
    converter: &dyn DocumentConverter,
    input: &Path,
    output: &Path,
) -> Result<u64, ConversionError> {
    converter.convert(input, output).await?;

    match fs::metadata(output).await {
        Ok(metadata) if metadata.is_file() && metadata.len() > 0 => Ok(metadata.len()),
        _ => Err(ConversionError::EmptyOutput),
    }
}
