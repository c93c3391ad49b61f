//! Checkout coordination for Botique.
//!
//! Defines the `OrderLedger` trait for the external system of record and
//! the `CheckoutService` that converts carts into committed orders.

pub mod ledger;
pub mod service;
