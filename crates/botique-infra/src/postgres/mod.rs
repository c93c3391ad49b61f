//! PostgreSQL-backed order ledger.

pub mod ledger;
