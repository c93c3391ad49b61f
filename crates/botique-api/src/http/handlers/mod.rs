//! HTTP request handlers for the REST API.

pub mod cart;
pub mod checkout;
