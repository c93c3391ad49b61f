//! Business logic and port definitions for Botique.
//!
//! This crate defines the "ports" (the cart store and order ledger traits)
//! that the infrastructure layer implements. It depends only on
//! `botique-types` -- never on `botique-infra` or any database/IO crate.

pub mod cart;
pub mod checkout;
