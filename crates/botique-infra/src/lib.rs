//! Infrastructure layer for Botique.
//!
//! Contains implementations of the store and ledger traits defined in
//! `botique-core`: the JSON snapshot cart store and the PostgreSQL order
//! ledger, plus the service configuration loader.

pub mod config;
pub mod postgres;
pub mod snapshot;
