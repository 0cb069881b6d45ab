//! Argument parsing shared by commands.
//!
//! Slash command options arrive as plain strings; these helpers turn them
//! into domain values and report bad input through the crate error type.

use crate::{
    core::employee,
    entities::employee as employee_entity,
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate};
use sea_orm::DatabaseConnection;

/// Parses an ISO `YYYY-MM-DD` date, defaulting to today when absent.
pub fn parse_date_or_today(input: Option<&str>) -> Result<NaiveDate> {
    input.map_or_else(|| Ok(chrono::Local::now().date_naive()), parse_date)
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| Error::Validation {
        message: format!("Invalid date '{input}', expected YYYY-MM-DD: {e}"),
    })
}

/// The given year, or the current one.
#[must_use]
pub fn year_or_current(year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| chrono::Local::now().year())
}

/// Looks up an active employee by email.
pub async fn resolve_employee(
    db: &DatabaseConnection,
    email: &str,
) -> Result<employee_entity::Model> {
    employee::get_employee_by_email(db, email)
        .await?
        .ok_or_else(|| Error::EmployeeNotFound {
            id: email.to_string(),
        })
}
