//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for categories, employees, and other enumerations
pub mod autocomplete;
