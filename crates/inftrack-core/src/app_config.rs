use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the tracker binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub env: Environment,
    /// Directory holding one JSON document per storage key.
    pub data_dir: PathBuf,
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// YAML file read by the `seed` command.
    pub sample_path: PathBuf,
}
