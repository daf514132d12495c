use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Origins that may always call the service from a browser.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:3001",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub converter: ConverterConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub service_name: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub program: String,
    /// Argument template; `{input}` and `{output}` are replaced per request.
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Parent of the per-request scratch directories. `None` means the OS temp dir.
    pub scratch_root: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 8000,
                host: "0.0.0.0".to_string(),
                service_name: "pdf-python-service".to_string(),
                cors_allowed_origins: DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            converter: ConverterConfig {
                program: "pdf2docx".to_string(),
                args: split_args("convert {input} {output}"),
                timeout: None,
            },
            storage: StorageConfig {
                scratch_root: None,
                max_upload_bytes: 50 * 1024 * 1024,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build a config from an explicit variable map, falling back to defaults.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let mut cors_allowed_origins = defaults.server.cors_allowed_origins;
        if let Some(extra) = var("ALLOWED_ORIGINS") {
            cors_allowed_origins.extend(
                extra
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            );
        }

        Ok(Self {
            server: ServerConfig {
                port: match var("PORT") {
                    Some(port) => port.parse().with_context(|| format!("invalid PORT: {port}"))?,
                    None => defaults.server.port,
                },
                host: var("HOST").map(str::to_string).unwrap_or(defaults.server.host),
                service_name: var("SERVICE_NAME")
                    .map(str::to_string)
                    .unwrap_or(defaults.server.service_name),
                cors_allowed_origins,
            },
            converter: ConverterConfig {
                program: var("CONVERTER_PROGRAM")
                    .map(str::to_string)
                    .unwrap_or(defaults.converter.program),
                args: var("CONVERTER_ARGS")
                    .map(split_args)
                    .unwrap_or(defaults.converter.args),
                timeout: match var("CONVERTER_TIMEOUT_SECS") {
                    Some(secs) => Some(Duration::from_secs(
                        secs.parse()
                            .with_context(|| format!("invalid CONVERTER_TIMEOUT_SECS: {secs}"))?,
                    )),
                    None => defaults.converter.timeout,
                },
            },
            storage: StorageConfig {
                scratch_root: var("SCRATCH_ROOT").map(PathBuf::from),
                max_upload_bytes: match var("MAX_UPLOAD_BYTES") {
                    Some(limit) => limit
                        .parse()
                        .with_context(|| format!("invalid MAX_UPLOAD_BYTES: {limit}"))?,
                    None => defaults.storage.max_upload_bytes,
                },
            },
        })
    }
}

fn split_args(template: &str) -> Vec<String> {
    template.split_whitespace().map(str::to_string).collect()
}
