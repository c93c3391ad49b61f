//! CartStore trait definition.
//!
//! The authoritative keeper of per-user shopping carts. Reads are served
//! from memory; every mutation must be durable before it returns.

use botique_types::cart::{Cart, LineItem, UserId};
use botique_types::error::CartError;

/// Store trait for the per-user cart table.
///
/// Implementations live in botique-infra (e.g., `SnapshotCartStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// Implementations must be safe for many concurrent callers. A mutation
/// that returns `Ok` has already persisted its effect; a mutation that
/// returns `Err` has not, and the caller may retry.
pub trait CartStore: Send + Sync {
    /// Populate the in-memory table from durable storage.
    ///
    /// Called once at process startup, before any other operation. Calling
    /// it again replaces the table with the persisted state. A missing or
    /// unreadable snapshot yields an empty table, never an error, so a
    /// corrupt file cannot block startup.
    fn load(&self) -> impl std::future::Future<Output = Result<(), CartError>> + Send;

    /// Return a copy of the user's cart.
    ///
    /// Users without a record get an empty cart. Mutating the returned
    /// value never affects the stored one.
    fn get_cart(
        &self,
        user: UserId,
    ) -> impl std::future::Future<Output = Result<Cart, CartError>> + Send;

    /// Replace the user's entire cart and persist the table.
    ///
    /// Duplicate codes in `items` merge the way [`CartStore::add_item`]
    /// merges, so the stored cart always holds one line per code.
    fn set_cart(
        &self,
        user: UserId,
        items: Vec<LineItem>,
    ) -> impl std::future::Future<Output = Result<(), CartError>> + Send;

    /// Empty the user's cart and persist the table.
    ///
    /// An empty cart is a valid record, not a deletion; the user keeps an
    /// entry in the table.
    fn clear_cart(
        &self,
        user: UserId,
    ) -> impl std::future::Future<Output = Result<(), CartError>> + Send;

    /// Add an item to the user's cart and persist the table.
    ///
    /// An existing line with the same code absorbs the quantity; its name
    /// and unit price keep their first-written values. A zero quantity is
    /// rejected with [`CartError::InvalidQuantity`] before anything is
    /// touched.
    fn add_item(
        &self,
        user: UserId,
        item: LineItem,
    ) -> impl std::future::Future<Output = Result<(), CartError>> + Send;
}
