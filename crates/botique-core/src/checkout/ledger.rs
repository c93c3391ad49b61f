//! OrderLedger trait definition.
//!
//! The external system of record for committed orders. Follows the same
//! RPITIT pattern as CartStore.

use botique_types::cart::{LineItem, UserId};
use botique_types::error::LedgerError;
use botique_types::order::{OrderId, OrderRecord, UserProfile};

/// Ledger trait for committed orders.
///
/// Implementations live in botique-infra (e.g., `PgOrderLedger`). The
/// ledger is append-only from the storefront's point of view: orders are
/// created and listed, never updated or removed.
pub trait OrderLedger: Send + Sync {
    /// Register the user in the ledger if absent.
    ///
    /// A no-op when the user already exists; the profile on record is
    /// never overwritten.
    fn upsert_user(
        &self,
        user: UserId,
        profile: &UserProfile,
    ) -> impl std::future::Future<Output = Result<(), LedgerError>> + Send;

    /// Create an order header for the given total and return its id.
    fn create_order(
        &self,
        user: UserId,
        total: i64,
    ) -> impl std::future::Future<Output = Result<OrderId, LedgerError>> + Send;

    /// Attach one line to a previously created order.
    fn add_order_line(
        &self,
        order: OrderId,
        line: &LineItem,
    ) -> impl std::future::Future<Output = Result<(), LedgerError>> + Send;

    /// List the user's committed orders, most recent first.
    fn list_orders(
        &self,
        user: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<OrderRecord>, LedgerError>> + Send;
}
