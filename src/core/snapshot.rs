//! Cached usage snapshots (`employee_medical_limits`).
//!
//! After every claim mutation the snapshot rows of the affected employee and
//! year are rebuilt from scratch: all non-deleted claims are re-summed per
//! category and each row is rewritten or inserted. The pass is O(claims) per
//! mutation and runs in its own transaction, so concurrent refreshes of the
//! same employee serialize instead of racing to insert duplicate rows.

use crate::{
    core::{category_limit, limits},
    entities::{EmployeeMedicalLimit, employee_medical_limit},
    errors::Result,
};
use sea_orm::{
    ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Returns the cached snapshot rows of an employee for a year.
pub async fn get_usage_snapshot<C>(
    db: &C,
    employee_id: i64,
    year: i32,
) -> Result<Vec<employee_medical_limit::Model>>
where
    C: ConnectionTrait,
{
    EmployeeMedicalLimit::find()
        .filter(employee_medical_limit::Column::EmployeeId.eq(employee_id))
        .filter(employee_medical_limit::Column::Year.eq(year))
        .order_by_asc(employee_medical_limit::Column::Category)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Rebuilds the snapshot rows of an employee for a year.
///
/// Rows are written for every category that has claims or already has a row,
/// so a category whose last claim was deleted drops back to zero usage.
pub async fn recompute_employee_limits(
    db: &DatabaseConnection,
    employee_id: i64,
    year: i32,
) -> Result<Vec<employee_medical_limit::Model>> {
    let now = chrono::Utc::now();
    let txn = db.begin().await?;

    // Write first so the transaction holds the write lock before it reads
    EmployeeMedicalLimit::update_many()
        .col_expr(employee_medical_limit::Column::UpdatedAt, Expr::value(now))
        .filter(employee_medical_limit::Column::EmployeeId.eq(employee_id))
        .filter(employee_medical_limit::Column::Year.eq(year))
        .exec(&txn)
        .await?;

    let rows = rebuild_rows(&txn, employee_id, year, now).await?;
    txn.commit().await?;

    debug!(employee_id, year, rows = rows.len(), "Usage snapshot recomputed");
    Ok(rows)
}

async fn rebuild_rows<C>(
    db: &C,
    employee_id: i64,
    year: i32,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<Vec<employee_medical_limit::Model>>
where
    C: ConnectionTrait,
{
    let claims = limits::claims_for_year(db, employee_id, year, None, None).await?;

    let mut used: BTreeMap<String, i64> = BTreeMap::new();
    for claim in claims.iter().filter(|claim| !claim.is_deleted) {
        *used.entry(claim.category.clone()).or_default() += claim.cost_pkr;
    }

    let configured: BTreeMap<String, i64> = category_limit::get_all_category_limits(db)
        .await?
        .into_iter()
        .map(|row| (row.category, row.limit_pkr))
        .collect();

    let mut existing: BTreeMap<String, employee_medical_limit::Model> =
        get_usage_snapshot(db, employee_id, year)
            .await?
            .into_iter()
            .map(|row| (row.category.clone(), row))
            .collect();

    for category in existing.keys() {
        used.entry(category.clone()).or_default();
    }

    let mut rows = Vec::with_capacity(used.len());
    for (category, used_pkr) in used {
        let limit_pkr = configured.get(&category).copied();
        let remaining_pkr = limit_pkr.map(|limit| (limit - used_pkr).max(0));

        let row = if let Some(current) = existing.remove(&category) {
            let mut active: employee_medical_limit::ActiveModel = current.into();
            active.used_pkr = Set(used_pkr);
            active.limit_pkr = Set(limit_pkr);
            active.remaining_pkr = Set(remaining_pkr);
            active.updated_at = Set(now);
            active.update(db).await?
        } else {
            employee_medical_limit::ActiveModel {
                employee_id: Set(employee_id),
                year: Set(year),
                category: Set(category),
                used_pkr: Set(used_pkr),
                limit_pkr: Set(limit_pkr),
                remaining_pkr: Set(remaining_pkr),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?
        };
        rows.push(row);
    }
    Ok(rows)
}

/// Recomputes the snapshot after a committed claim write.
///
/// A failure here leaves the claim correct and only the cache stale, so it is
/// logged and not returned.
pub async fn refresh_after_write(db: &DatabaseConnection, employee_id: i64, year: i32) {
    if let Err(e) = recompute_employee_limits(db, employee_id, year).await {
        warn!(
            employee_id,
            year, "Failed to recompute usage snapshot, cache is stale: {e}"
        );
    }
}
