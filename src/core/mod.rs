//! Framework-agnostic business logic.
//!
//! Nothing here knows about HTTP. Every operation takes a database connection
//! and, where data is tenant-owned, the ID of the signed-in user.

/// Customer CRUD, search and pickers
pub mod customer;
/// Decimal money parsing, storage and formatting
pub mod money;
/// Order CRUD and the joined orders listing
pub mod order;
/// Page arithmetic shared by listings
pub mod pagination;
/// Payment ledger
pub mod payment;
/// Monthly per-customer aggregation
pub mod report;
/// Users and session tokens
pub mod session;
/// Request payload validation
pub mod validation;
