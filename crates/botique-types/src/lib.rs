//! Shared domain types for Botique.
//!
//! This crate contains the core domain types used across the Botique
//! storefront: carts and their line items, order records, and the
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod cart;
pub mod config;
pub mod error;
pub mod order;
