//! Unified error type for the crate.
//!
//! Core operations, configuration loading and the bot layer all return
//! [`Result`], so errors flow through `?` from the database up to the command
//! that reports them.

use crate::core::summary::format_pkr;
use thiserror::Error;

#[allow(clippy::trivially_copy_pass_by_ref)]
fn pkr(amount: &i64) -> String {
    format_pkr(*amount)
}

/// All errors produced by `hr-desk`.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or settings problem
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Generic input validation failure
    #[error("Validation error: {message}")]
    Validation {
        /// What was rejected
        message: String,
    },

    /// Amount is zero or negative
    #[error("Invalid amount: {amount} (must be greater than zero)")]
    InvalidAmount {
        /// The rejected amount in PKR
        amount: i64,
    },

    /// Claim would push the employee past the annual ceiling
    #[error(
        "Claim of PKR {} exceeds the annual limit: PKR {} already used of PKR {}",
        pkr(.amount),
        pkr(.used),
        pkr(.limit)
    )]
    AnnualLimitExceeded {
        /// Proposed claim cost
        amount: i64,
        /// Already used this year
        used: i64,
        /// Configured annual ceiling
        limit: i64,
    },

    /// Claim would push the employee past a category ceiling
    #[error(
        "Claim of PKR {} exceeds the {category} limit: PKR {} already used of PKR {}",
        pkr(.amount),
        pkr(.used),
        pkr(.limit)
    )]
    CategoryLimitExceeded {
        /// Medical category being claimed
        category: String,
        /// Proposed claim cost
        amount: i64,
        /// Already used in the category this year
        used: i64,
        /// Configured category ceiling
        limit: i64,
    },

    /// Category name is not one of the fixed medical categories
    #[error("Unknown value '{value}' for {kind}")]
    UnknownCategory {
        /// Which kind of enumeration was parsed
        kind: &'static str,
        /// The unrecognised input
        value: String,
    },

    /// End date precedes start date
    #[error("Invalid date range: {start} to {end}")]
    InvalidDateRange {
        /// Start date
        start: chrono::NaiveDate,
        /// End date
        end: chrono::NaiveDate,
    },

    /// Leave request was already decided
    #[error("Leave request {id} is already {status}")]
    InvalidLeaveTransition {
        /// Leave request id
        id: i64,
        /// Its current status
        status: String,
    },

    /// Employee missing or soft-deleted
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// Employee id or email
        id: String,
    },

    /// Claim missing or soft-deleted
    #[error("Medical claim not found: {id}")]
    ClaimNotFound {
        /// Claim id
        id: i64,
    },

    /// Leave request missing
    #[error("Leave request not found: {id}")]
    LeaveRequestNotFound {
        /// Leave request id
        id: i64,
    },

    /// No active limit configured for the category
    #[error("No limit configured for category: {category}")]
    CategoryLimitNotFound {
        /// Medical category
        category: String,
    },

    /// Database gateway failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or invalid environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// String formatting failure
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Integer conversion failure
    #[error("Integer conversion error: {0}")]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
