//! `AquaTrack` - Delivery tracking for water-jar suppliers
//!
//! This crate records customers, daily jar deliveries and payments for each
//! supplier account, and derives a monthly per-customer report of jars still
//! out and money owed. It is served as a JSON API over HTTP.

#![deny(unsafe_code, unused_must_use, rustdoc::broken_intra_doc_links)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::todo,
    clippy::unwrap_used
)]
// Handlers and entities are named after their module (`customer::CustomerOption`)
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

/// HTTP API - axum router, handlers and session extraction
pub mod api;
/// Configuration management for database and application settings
pub mod config;
/// Core business logic - framework-agnostic customer, order, payment and reporting operations
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
