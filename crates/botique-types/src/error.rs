use thiserror::Error;

/// Errors from cart store operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// A mutation carried a zero quantity. Negative quantities are
    /// unrepresentable in the domain types.
    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    /// The snapshot flush failed; the mutation is not durable.
    #[error("snapshot persist failed: {0}")]
    Persist(String),
}

/// Errors from the external order ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger connection error: {0}")]
    Connection(String),

    #[error("ledger query error: {0}")]
    Query(String),

    #[error("ledger constraint violation: {0}")]
    Constraint(String),
}

/// Errors from the checkout transition.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was attempted on an empty cart. No ledger calls were made.
    #[error("cart is empty")]
    EmptyCart,

    #[error("cart store failure: {0}")]
    Cart(#[from] CartError),

    #[error("order ledger failure: {0}")]
    Ledger(#[from] LedgerError),
}
