//! Service configuration types for Botique.
//!
//! `ServiceConfig` represents the top-level `botique.toml` that controls
//! where the cart snapshot lives and where the REST surface binds.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Botique storefront service.
///
/// Loaded from `{data_dir}/botique.toml`. All fields have sensible
/// defaults. The order-ledger DSN deliberately does not live here: it is
/// a credential and comes from the `DATABASE_URL` environment variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Cart snapshot file, resolved against the data directory unless
    /// absolute.
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,

    /// Bind address for the REST surface.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_snapshot_file() -> String {
    "cart_store.json".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8090".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            snapshot_file: default_snapshot_file(),
            listen_addr: default_listen_addr(),
        }
    }
}
