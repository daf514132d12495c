//! External-process converter
//!
//! Runs a converter executable (by default the `pdf2docx` CLI) as a child
//! process. The argument template may reference the staged paths:
//!
//! ```text
//! pdf2docx convert {input} {output}
//! ```

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::provider::{ConversionError, DocumentConverter};
use crate::config::ConverterConfig;

const INPUT_PLACEHOLDER: &str = "{input}";
const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Longest stderr excerpt carried into an error message.
const MAX_STDERR_CHARS: usize = 2000;

#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandConverter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            timeout: config.timeout,
        }
    }

    /// Kill the converter if it runs longer than `limit`.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    fn render_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        self.args
            .iter()
            .map(|arg| render_arg(arg, input, output))
            .collect()
    }
}

/// Substitute placeholders anywhere in `arg`. Paths are spliced in as
/// `OsStr`, so non-UTF-8 paths pass through untouched.
fn render_arg(arg: &str, input: &Path, output: &Path) -> OsString {
    let mut rendered = OsString::with_capacity(arg.len());
    let mut rest = arg;

    while let Some(idx) = rest.find('{') {
        let (literal, tail) = rest.split_at(idx);
        rendered.push(literal);

        if let Some(after) = tail.strip_prefix(INPUT_PLACEHOLDER) {
            rendered.push(input);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(OUTPUT_PLACEHOLDER) {
            rendered.push(output);
            rest = after;
        } else {
            rendered.push("{");
            rest = &tail[1..];
        }
    }

    rendered.push(rest);
    rendered
}

#[async_trait]
impl DocumentConverter for CommandConverter {
    async fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError> {
        let start = Instant::now();

        let mut cmd = Command::new(&self.program);
        cmd.args(self.render_args(input, output))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        if let Some(dir) = output.parent() {
            cmd.current_dir(dir);
        }

        let result = match self.timeout {
            Some(limit) => timeout(limit, cmd.output())
                .await
                .map_err(|_| ConversionError::Timeout(limit))?,
            None => cmd.output().await,
        };

        let result = result.map_err(|source| ConversionError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        debug!(
            program = %self.program,
            status = %result.status,
            duration_ms = start.elapsed().as_millis() as u64,
            "Converter process finished"
        );

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ConversionError::Failed {
                status: result.status,
                stderr: stderr.trim().chars().take(MAX_STDERR_CHARS).collect(),
            });
        }

        Ok(())
    }

    fn name(&self) -> &str {
        &self.program
    }
}
