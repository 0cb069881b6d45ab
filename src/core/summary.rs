//! Usage summaries and report formatting.
//!
//! Summaries are built from the claims table on demand and never read the
//! cached snapshot rows, so they always reflect the non-deleted claims. All
//! functions are framework-agnostic and return structured data that the bot
//! layer formats.

use crate::{
    core::{
        category_limit, employee,
        limits::{self, LimitPolicy},
    },
    entities::{employee as employee_entity, medical_benefit},
    errors::Result,
    models::MedicalCategory,
};
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;
use tracing::warn;

/// Usage of one medical category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUsage {
    /// Medical category
    pub category: String,
    /// Amount used in PKR
    pub used: i64,
    /// Configured ceiling, None if unlimited
    pub limit: Option<i64>,
    /// Remaining amount floored at zero, None if unlimited
    pub remaining: Option<i64>,
}

/// Per-employee, per-year usage report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeLimitSummary {
    /// Employee the summary belongs to
    pub employee_id: i64,
    /// Calendar year
    pub year: i32,
    /// Annual ceiling from the policy
    pub annual_limit: i64,
    /// Sum of all non-deleted claims in the year
    pub total_used: i64,
    /// Annual ceiling minus usage, floored at zero
    pub total_remaining: i64,
    /// Usage per category, ordered by category name
    pub categories: Vec<CategoryUsage>,
}

impl EmployeeLimitSummary {
    /// Zero-usage summary, used when an employee's report cannot be built.
    #[must_use]
    pub const fn empty(employee_id: i64, year: i32, policy: &LimitPolicy) -> Self {
        Self {
            employee_id,
            year,
            annual_limit: policy.annual_limit(),
            total_used: 0,
            total_remaining: policy.annual_limit(),
            categories: Vec::new(),
        }
    }
}

/// Builds a summary from already-loaded claims and configured category limits.
///
/// Deleted claims are ignored. Every category that has usage or a configured
/// limit gets a row, listed in [`MedicalCategory`] declaration order.
#[must_use]
pub fn summarize_claims(
    employee_id: i64,
    year: i32,
    policy: &LimitPolicy,
    claims: &[medical_benefit::Model],
    category_limits: &BTreeMap<String, i64>,
) -> EmployeeLimitSummary {
    let mut used: BTreeMap<String, i64> = category_limits
        .keys()
        .map(|category| (category.clone(), 0))
        .collect();
    for claim in claims.iter().filter(|claim| !claim.is_deleted) {
        *used.entry(claim.category.clone()).or_default() += claim.cost_pkr;
    }

    let mut categories: Vec<CategoryUsage> = used
        .into_iter()
        .map(|(category, used)| {
            let limit = category_limits.get(&category).copied();
            CategoryUsage {
                remaining: limit.map(|limit| (limit - used).max(0)),
                category,
                used,
                limit,
            }
        })
        .collect();
    categories.sort_by_key(|usage| usage.category.parse::<MedicalCategory>().map_err(|_| ()));

    let total_used = limits::sum_costs(claims);
    EmployeeLimitSummary {
        employee_id,
        year,
        annual_limit: policy.annual_limit(),
        total_used,
        total_remaining: (policy.annual_limit() - total_used).max(0),
        categories,
    }
}

/// Builds the usage summary of one employee for a year.
///
/// # Errors
/// Returns an error if the employee is missing or a query fails.
pub async fn build_employee_summary(
    db: &DatabaseConnection,
    policy: &LimitPolicy,
    employee_id: i64,
    year: i32,
) -> Result<EmployeeLimitSummary> {
    employee::require_active_employee(db, employee_id).await?;

    let claims = limits::claims_for_year(db, employee_id, year, None, None).await?;
    let category_limits = category_limit::get_all_category_limits(db)
        .await?
        .into_iter()
        .map(|row| (row.category, row.limit_pkr))
        .collect();

    Ok(summarize_claims(
        employee_id,
        year,
        policy,
        &claims,
        &category_limits,
    ))
}

/// Builds summaries for every active employee.
///
/// A failure for one employee is logged and replaced by a zero-usage entry,
/// so one bad record never hides the rest of the report.
///
/// # Errors
/// Returns an error only if the employee list itself cannot be loaded.
pub async fn build_fleet_summary(
    db: &DatabaseConnection,
    policy: &LimitPolicy,
    year: i32,
) -> Result<Vec<(employee_entity::Model, EmployeeLimitSummary)>> {
    let employees = employee::get_all_active_employees(db).await?;
    let mut report = Vec::with_capacity(employees.len());

    for employee in employees {
        let summary = match build_employee_summary(db, policy, employee.id, year).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(
                    employee_id = employee.id,
                    year, "Falling back to empty summary: {e}"
                );
                EmployeeLimitSummary::empty(employee.id, year, policy)
            }
        };
        report.push((employee, summary));
    }

    Ok(report)
}

/// Formats a PKR amount with thousands separators: `1234567` → `1,234,567`.
#[must_use]
pub fn format_pkr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Percentage of a limit that has been used. Zero limits report 0%.
#[must_use]
pub fn calculate_usage_percent(used: i64, limit: i64) -> f64 {
    if limit == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)] // PKR amounts are far below 2^52
    let percent = (used as f64 / limit as f64) * 100.0;
    percent
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // Cast safety: clamped_progress ∈ [0, 100], length is small (10-20).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}

/// One line per category: `dental_care: PKR 48,000 / PKR 50,000 (2,000 left)`.
#[must_use]
pub fn format_category_line(usage: &CategoryUsage) -> String {
    match (usage.limit, usage.remaining) {
        (Some(limit), Some(remaining)) => format!(
            "{}: PKR {} / PKR {} ({} left)",
            usage.category,
            format_pkr(usage.used),
            format_pkr(limit),
            format_pkr(remaining)
        ),
        _ => format!(
            "{}: PKR {} (no limit)",
            usage.category,
            format_pkr(usage.used)
        ),
    }
}
