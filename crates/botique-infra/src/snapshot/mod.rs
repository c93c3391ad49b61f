//! Snapshot-file persistence for the cart table.

pub mod store;
