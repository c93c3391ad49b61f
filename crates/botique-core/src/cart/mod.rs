//! Cart keeping abstractions for Botique.
//!
//! This module defines the `CartStore` trait that the infrastructure
//! layer implements for durable per-user cart keeping.

pub mod store;
