//! Core business logic - framework-agnostic employee, claim, limit, and leave operations.

/// Category limit administration
pub mod category_limit;
/// Medical claim lifecycle
pub mod claim;
/// Employee records
pub mod employee;
/// Leave requests
pub mod leave;
/// Annual and category limit accounting
pub mod limits;
/// Cached usage snapshots
pub mod snapshot;
/// Usage summaries and formatting
pub mod summary;
