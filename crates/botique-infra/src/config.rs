//! Service configuration loader for Botique.
//!
//! Reads `botique.toml` from the data directory and deserializes it into
//! [`ServiceConfig`]. Falls back to sensible defaults when the file is
//! missing or malformed.

use std::path::{Path, PathBuf};

use botique_types::config::ServiceConfig;

/// Load service configuration from `{data_dir}/botique.toml`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_service_config(data_dir: &Path) -> ServiceConfig {
    let config_path = data_dir.join("botique.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No botique.toml found at {}, using defaults",
                config_path.display()
            );
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    }
}

/// Resolve the service data directory.
///
/// Uses `BOTIQUE_DATA_DIR` when set, otherwise the current working
/// directory (the snapshot historically lived next to the process).
pub fn resolve_data_dir() -> PathBuf {
    std::env::var("BOTIQUE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolve the cart snapshot path for a config.
///
/// Absolute `snapshot_file` values are used as-is; relative ones are
/// joined onto the data directory.
pub fn snapshot_path(config: &ServiceConfig, data_dir: &Path) -> PathBuf {
    let file = Path::new(&config.snapshot_file);
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        data_dir.join(file)
    }
}

/// Returns the order-ledger DSN from `DATABASE_URL`, falling back to a
/// local PostgreSQL database named `botique`.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/botique".to_string())
}
