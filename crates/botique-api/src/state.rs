//! Application state wiring the storefront services together.
//!
//! AppState holds the concrete checkout service used by both CLI commands
//! and REST API handlers. The service is generic over the store and ledger
//! traits, but AppState pins it to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use botique_core::cart::store::CartStore;
use botique_core::checkout::service::CheckoutService;
use botique_infra::config::{self, load_service_config, resolve_data_dir};
use botique_infra::postgres::ledger::PgOrderLedger;
use botique_infra::snapshot::store::SnapshotCartStore;
use botique_types::config::ServiceConfig;

/// Concrete type alias for the checkout service pinned to infra implementations.
pub type ConcreteCheckoutService = CheckoutService<SnapshotCartStore, PgOrderLedger>;

/// Shared application state.
///
/// Cart handlers reach the store through `checkout.carts()`; constructing
/// the store once keeps every caller on the same in-memory table.
#[derive(Clone)]
pub struct AppState {
    pub checkout: Arc<ConcreteCheckoutService>,
    pub config: ServiceConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: resolve config, wire the store
    /// and ledger, and restore the cart table from its snapshot.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let service_config = load_service_config(&data_dir).await;

        // Restore carts before anything can touch them.
        let store = SnapshotCartStore::new(config::snapshot_path(&service_config, &data_dir));
        store.load().await?;

        let ledger = PgOrderLedger::connect(&config::database_url())?;

        Ok(Self {
            checkout: Arc::new(CheckoutService::new(store, ledger)),
            config: service_config,
            data_dir,
        })
    }
}
