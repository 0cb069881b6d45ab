//! Medical claim business logic - Handles the claim lifecycle.
//!
//! Claims are created, edited and soft-deleted here. Every write that touches
//! the cost, category or date of a claim re-runs the limit checks from
//! [`crate::core::limits`] first; the check and the write share one database
//! transaction so the used totals they read cannot change underneath them.
//! After a successful commit the usage snapshot of the affected year is
//! recomputed.

use crate::{
    core::{
        employee,
        limits::{self, LimitPolicy},
        snapshot,
    },
    entities::{MedicalBenefit, medical_benefit},
    errors::{Error, Result},
    models::{Beneficiary, MedicalCategory, PaymentType},
};
use chrono::{Datelike, NaiveDate};
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Largest page size accepted by [`list_claims`].
pub const MAX_PAGE_SIZE: u64 = 100;

/// Input for [`create_claim`].
#[derive(Debug, Clone)]
pub struct NewClaim {
    /// Claiming employee
    pub employee_id: i64,
    /// Date of treatment
    pub claim_date: NaiveDate,
    /// Who was treated
    pub beneficiary: Beneficiary,
    /// Medical category
    pub category: MedicalCategory,
    /// Free-text description
    pub description: String,
    /// Amount in PKR
    pub cost_pkr: i64,
    /// Receipt reference
    pub receipt_ref: Option<String>,
    /// Already paid out
    pub paid: bool,
    /// Settlement method
    pub payment_type: PaymentType,
}

/// Fields to change in [`update_claim`]. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct ClaimUpdate {
    /// New amount in PKR
    pub cost_pkr: Option<i64>,
    /// New category
    pub category: Option<MedicalCategory>,
    /// New treatment date
    pub claim_date: Option<NaiveDate>,
    /// New beneficiary
    pub beneficiary: Option<Beneficiary>,
    /// New description
    pub description: Option<String>,
    /// New receipt reference
    pub receipt_ref: Option<String>,
    /// New paid flag
    pub paid: Option<bool>,
    /// New settlement method
    pub payment_type: Option<PaymentType>,
}

/// Filters for [`list_claims`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimQuery {
    /// Only claims of this employee
    pub employee_id: Option<i64>,
    /// Only claims dated in this year
    pub year: Option<i32>,
    /// Only claims in this category
    pub category: Option<MedicalCategory>,
    /// Only paid or only unpaid claims
    pub paid: Option<bool>,
}

/// One page of claims.
#[derive(Debug, Clone)]
pub struct ClaimPage {
    /// Claims on this page, newest first
    pub claims: Vec<medical_benefit::Model>,
    /// Number of claims matching the query
    pub total: u64,
    /// Zero-based page index
    pub page: u64,
    /// Requested page size
    pub page_size: u64,
}

impl ClaimPage {
    /// Number of pages needed for `total` claims.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.page_size)
    }
}

/// Creates a claim after checking it against the annual and category limits.
///
/// # Errors
/// Returns an error if:
/// - The cost is not positive
/// - The employee does not exist or is deleted
/// - The claim would exceed the annual or category limit
/// - A database operation fails
pub async fn create_claim(
    db: &DatabaseConnection,
    policy: &LimitPolicy,
    new_claim: NewClaim,
) -> Result<medical_benefit::Model> {
    limits::validate_cost(new_claim.cost_pkr)?;

    let year = new_claim.claim_date.year();
    let txn = db.begin().await?;

    employee::require_active_employee(&txn, new_claim.employee_id).await?;
    limits::check_claim_limits(
        &txn,
        policy,
        new_claim.employee_id,
        year,
        new_claim.category,
        new_claim.cost_pkr,
        None,
    )
    .await?;

    let now = chrono::Utc::now();
    let claim = medical_benefit::ActiveModel {
        employee_id: Set(new_claim.employee_id),
        claim_date: Set(new_claim.claim_date),
        beneficiary: Set(new_claim.beneficiary.as_str().to_string()),
        category: Set(new_claim.category.as_str().to_string()),
        description: Set(new_claim.description.trim().to_string()),
        cost_pkr: Set(new_claim.cost_pkr),
        receipt_ref: Set(new_claim.receipt_ref),
        paid: Set(new_claim.paid),
        payment_type: Set(new_claim.payment_type.as_str().to_string()),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = claim.insert(&txn).await?;
    txn.commit().await?;

    info!(
        claim_id = result.id,
        employee_id = result.employee_id,
        cost_pkr = result.cost_pkr,
        category = %result.category,
        "Medical claim created"
    );
    snapshot::refresh_after_write(db, result.employee_id, year).await;

    Ok(result)
}

/// Edits a claim. Limits are re-checked only when cost, category or date change.
///
/// The claim's stored cost is excluded from the used totals during the check.
///
/// # Errors
/// Returns an error if:
/// - The new cost is not positive
/// - The claim does not exist or is deleted
/// - The edited claim would exceed the annual or category limit
/// - A database operation fails
pub async fn update_claim(
    db: &DatabaseConnection,
    policy: &LimitPolicy,
    claim_id: i64,
    update: ClaimUpdate,
) -> Result<medical_benefit::Model> {
    if let Some(cost_pkr) = update.cost_pkr {
        limits::validate_cost(cost_pkr)?;
    }

    let txn = db.begin().await?;
    let existing = require_active_claim(&txn, claim_id).await?;

    let old_year = existing.claim_date.year();
    let old_category = existing.category.parse::<MedicalCategory>()?;

    let cost_pkr = update.cost_pkr.unwrap_or(existing.cost_pkr);
    let category = update.category.unwrap_or(old_category);
    let claim_date = update.claim_date.unwrap_or(existing.claim_date);
    let new_year = claim_date.year();

    let limits_touched = cost_pkr != existing.cost_pkr
        || category != old_category
        || claim_date != existing.claim_date;

    if limits_touched {
        limits::check_claim_limits(
            &txn,
            policy,
            existing.employee_id,
            new_year,
            category,
            cost_pkr,
            Some(claim_id),
        )
        .await?;
    }

    let employee_id = existing.employee_id;
    let mut claim: medical_benefit::ActiveModel = existing.into();
    claim.cost_pkr = Set(cost_pkr);
    claim.category = Set(category.as_str().to_string());
    claim.claim_date = Set(claim_date);
    if let Some(beneficiary) = update.beneficiary {
        claim.beneficiary = Set(beneficiary.as_str().to_string());
    }
    if let Some(description) = update.description {
        claim.description = Set(description.trim().to_string());
    }
    if let Some(receipt_ref) = update.receipt_ref {
        claim.receipt_ref = Set(Some(receipt_ref));
    }
    if let Some(paid) = update.paid {
        claim.paid = Set(paid);
    }
    if let Some(payment_type) = update.payment_type {
        claim.payment_type = Set(payment_type.as_str().to_string());
    }
    claim.updated_at = Set(chrono::Utc::now());

    let result = claim.update(&txn).await?;
    txn.commit().await?;

    info!(claim_id, employee_id, cost_pkr, "Medical claim updated");
    snapshot::refresh_after_write(db, employee_id, new_year).await;
    if old_year != new_year {
        snapshot::refresh_after_write(db, employee_id, old_year).await;
    }

    Ok(result)
}

/// Soft deletes a claim so it no longer counts towards usage.
///
/// # Errors
/// Returns [`Error::ClaimNotFound`] if the claim is missing or already deleted.
pub async fn delete_claim(db: &DatabaseConnection, claim_id: i64) -> Result<medical_benefit::Model> {
    let existing = require_active_claim(db, claim_id).await?;
    let employee_id = existing.employee_id;
    let year = existing.claim_date.year();

    let mut claim: medical_benefit::ActiveModel = existing.into();
    claim.is_deleted = Set(true);
    claim.updated_at = Set(chrono::Utc::now());
    let result = claim.update(db).await?;

    info!(claim_id, employee_id, "Medical claim deleted");
    snapshot::refresh_after_write(db, employee_id, year).await;

    Ok(result)
}

/// Retrieves a claim by id, including soft-deleted claims.
pub async fn get_claim_by_id(
    db: &DatabaseConnection,
    claim_id: i64,
) -> Result<Option<medical_benefit::Model>> {
    MedicalBenefit::find_by_id(claim_id)
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_active_claim<C>(db: &C, claim_id: i64) -> Result<medical_benefit::Model>
where
    C: ConnectionTrait,
{
    MedicalBenefit::find_by_id(claim_id)
        .one(db)
        .await?
        .filter(|claim| !claim.is_deleted)
        .ok_or(Error::ClaimNotFound { id: claim_id })
}

/// Lists non-deleted claims matching `query`, newest first, one page at a time.
///
/// `page` is zero-based. `page_size` must be between 1 and [`MAX_PAGE_SIZE`].
///
/// # Errors
/// Returns an error for an invalid page size or a database failure.
pub async fn list_claims(
    db: &DatabaseConnection,
    query: ClaimQuery,
    page: u64,
    page_size: u64,
) -> Result<ClaimPage> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(Error::Validation {
            message: format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
        });
    }

    let mut select =
        MedicalBenefit::find().filter(medical_benefit::Column::IsDeleted.eq(false));

    if let Some(employee_id) = query.employee_id {
        select = select.filter(medical_benefit::Column::EmployeeId.eq(employee_id));
    }
    if let Some(year) = query.year {
        let (start, end) = limits::year_bounds(year)?;
        select = select.filter(medical_benefit::Column::ClaimDate.between(start, end));
    }
    if let Some(category) = query.category {
        select = select.filter(medical_benefit::Column::Category.eq(category.as_str()));
    }
    if let Some(paid) = query.paid {
        select = select.filter(medical_benefit::Column::Paid.eq(paid));
    }

    let paginator = select
        .order_by_desc(medical_benefit::Column::ClaimDate)
        .order_by_desc(medical_benefit::Column::Id)
        .paginate(db, page_size);

    let total = paginator.num_items().await?;
    let claims = paginator.fetch_page(page).await?;

    Ok(ClaimPage {
        claims,
        total,
        page,
        page_size,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{category_limit::upsert_category_limit, limits::annual_usage};
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_claim_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let policy = LimitPolicy::default();

        for cost in [0, -1_000] {
            let result =
                create_claim(&db, &policy, new_claim(1, date(2024, 1, 1), MedicalCategory::Medicines, cost))
                    .await;
            assert!(matches!(result, Err(Error::InvalidAmount { amount }) if amount == cost));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_create_claim_unknown_employee() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_claim(
            &db,
            &LimitPolicy::default(),
            new_claim(42, date(2024, 1, 1), MedicalCategory::Medicines, 500),
        )
        .await;
        assert!(matches!(result, Err(Error::EmployeeNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_annual_limit_example() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let policy = LimitPolicy::default();
        create_test_claim(&db, employee.id, date(2024, 2, 1), MedicalCategory::Hospitalization, 390_000)
            .await?;

        let rejected = create_claim(
            &db,
            &policy,
            new_claim(employee.id, date(2024, 5, 1), MedicalCategory::Medicines, 15_000),
        )
        .await;
        assert!(matches!(
            rejected,
            Err(Error::AnnualLimitExceeded {
                amount: 15_000,
                used: 390_000,
                limit: 400_000
            })
        ));
        // Nothing was written
        assert_eq!(annual_usage(&db, employee.id, 2024, None).await?, 390_000);

        let accepted = create_claim(
            &db,
            &policy,
            new_claim(employee.id, date(2024, 5, 1), MedicalCategory::Medicines, 9_000),
        )
        .await?;
        assert_eq!(accepted.cost_pkr, 9_000);
        assert_eq!(annual_usage(&db, employee.id, 2024, None).await?, 399_000);
        Ok(())
    }

    #[tokio::test]
    async fn test_annual_limit_is_per_year() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        create_test_claim(&db, employee.id, date(2023, 12, 20), MedicalCategory::Hospitalization, 400_000)
            .await?;

        create_test_claim(&db, employee.id, date(2024, 1, 2), MedicalCategory::Medicines, 10_000)
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_category_limit_example() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        upsert_category_limit(&db, MedicalCategory::DentalCare, 50_000).await?;
        create_test_claim(&db, employee.id, date(2024, 3, 1), MedicalCategory::DentalCare, 48_000)
            .await?;

        let result = create_claim(
            &db,
            &LimitPolicy::default(),
            new_claim(employee.id, date(2024, 4, 1), MedicalCategory::DentalCare, 3_000),
        )
        .await;
        assert!(matches!(
            result,
            Err(Error::CategoryLimitExceeded {
                amount: 3_000,
                used: 48_000,
                limit: 50_000,
                ..
            })
        ));
        assert_eq!(annual_usage(&db, employee.id, 2024, None).await?, 48_000);
        Ok(())
    }

    #[tokio::test]
    async fn test_configurable_annual_limit() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let policy = LimitPolicy::new(10_000)?;

        let result = create_claim(
            &db,
            &policy,
            new_claim(employee.id, date(2024, 1, 1), MedicalCategory::Consultation, 10_001),
        )
        .await;
        assert!(matches!(
            result,
            Err(Error::AnnualLimitExceeded { limit: 10_000, .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_excludes_own_cost() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let policy = LimitPolicy::default();
        create_test_claim(&db, employee.id, date(2024, 1, 1), MedicalCategory::Hospitalization, 300_000)
            .await?;
        let claim =
            create_test_claim(&db, employee.id, date(2024, 2, 1), MedicalCategory::Medicines, 50_000)
                .await?;

        // U = 350,000; U - 50,000 + 100,000 = 400,000 is allowed
        let updated = update_claim(
            &db,
            &policy,
            claim.id,
            ClaimUpdate {
                cost_pkr: Some(100_000),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.cost_pkr, 100_000);

        // U = 400,000; U - 100,000 + 100,001 exceeds the limit
        let result = update_claim(
            &db,
            &policy,
            claim.id,
            ClaimUpdate {
                cost_pkr: Some(100_001),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(Error::AnnualLimitExceeded { used: 300_000, .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_category_change_checks_new_category_total() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let policy = LimitPolicy::default();
        upsert_category_limit(&db, MedicalCategory::DentalCare, 50_000).await?;
        create_test_claim(&db, employee.id, date(2024, 1, 1), MedicalCategory::DentalCare, 45_000)
            .await?;
        let claim =
            create_test_claim(&db, employee.id, date(2024, 2, 1), MedicalCategory::EyeCare, 6_000)
                .await?;

        // Moving the eye care claim into dental: its own cost is only excluded
        // from the annual total, the dental total still holds 45,000.
        let result = update_claim(
            &db,
            &policy,
            claim.id,
            ClaimUpdate {
                category: Some(MedicalCategory::DentalCare),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(Error::CategoryLimitExceeded {
                amount: 6_000,
                used: 45_000,
                ..
            })
        ));

        let moved = update_claim(
            &db,
            &policy,
            claim.id,
            ClaimUpdate {
                category: Some(MedicalCategory::DentalCare),
                cost_pkr: Some(5_000),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(moved.category, "dental_care");
        Ok(())
    }

    #[tokio::test]
    async fn test_paid_flag_update_skips_limit_check() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        upsert_category_limit(&db, MedicalCategory::DentalCare, 50_000).await?;
        let claim =
            create_test_claim(&db, employee.id, date(2024, 1, 1), MedicalCategory::DentalCare, 40_000)
                .await?;

        // Limit lowered below existing usage
        upsert_category_limit(&db, MedicalCategory::DentalCare, 10_000).await?;

        let updated = update_claim(
            &db,
            &LimitPolicy::default(),
            claim.id,
            ClaimUpdate {
                paid: Some(true),
                description: Some("  settled  ".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert!(updated.paid);
        assert_eq!(updated.description, "settled");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_cost_from_usage() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let claim =
            create_test_claim(&db, employee.id, date(2024, 1, 1), MedicalCategory::Hospitalization, 395_000)
                .await?;

        delete_claim(&db, claim.id).await?;
        assert_eq!(annual_usage(&db, employee.id, 2024, None).await?, 0);
        assert!(get_claim_by_id(&db, claim.id).await?.unwrap().is_deleted);

        // Room is available again
        create_test_claim(&db, employee.id, date(2024, 2, 1), MedicalCategory::Hospitalization, 395_000)
            .await?;

        let result = delete_claim(&db, claim.id).await;
        assert!(matches!(result, Err(Error::ClaimNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_writes_refresh_snapshot() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let claim =
            create_test_claim(&db, employee.id, date(2024, 1, 1), MedicalCategory::Medicines, 2_000)
                .await?;

        let rows = snapshot::get_usage_snapshot(&db, employee.id, 2024).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].used_pkr, 2_000);

        // Moving the claim to another year refreshes both years
        update_claim(
            &db,
            &LimitPolicy::default(),
            claim.id,
            ClaimUpdate {
                claim_date: Some(date(2025, 1, 1)),
                ..Default::default()
            },
        )
        .await?;
        let old_year = snapshot::get_usage_snapshot(&db, employee.id, 2024).await?;
        assert_eq!(old_year[0].used_pkr, 0);
        let new_year = snapshot::get_usage_snapshot(&db, employee.id, 2025).await?;
        assert_eq!(new_year[0].used_pkr, 2_000);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_claims_filters_and_paginates() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        for day in 1..=5 {
            create_test_claim(&db, employee.id, date(2024, 1, day), MedicalCategory::Medicines, 100)
                .await?;
        }
        create_test_claim(&db, employee.id, date(2024, 2, 1), MedicalCategory::EyeCare, 100).await?;
        create_test_claim(&db, employee.id, date(2023, 2, 1), MedicalCategory::Medicines, 100)
            .await?;

        let query = ClaimQuery {
            employee_id: Some(employee.id),
            year: Some(2024),
            category: Some(MedicalCategory::Medicines),
            paid: None,
        };
        let first = list_claims(&db, query, 0, 2).await?;
        assert_eq!(first.total, 5);
        assert_eq!(first.total_pages(), 3);
        assert_eq!(first.claims.len(), 2);
        assert_eq!(first.claims[0].claim_date, date(2024, 1, 5));

        let last = list_claims(&db, query, 2, 2).await?;
        assert_eq!(last.claims.len(), 1);
        assert_eq!(last.claims[0].claim_date, date(2024, 1, 1));

        let result = list_claims(&db, query, 0, 0).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_cannot_overrun_annual_limit() -> Result<()> {
        let temp = TempDatabase::new("annual_limit").await?;
        let db = &*temp.db;
        let employee = create_test_employee(db, "Bilal Ahmed", "bilal@example.com").await?;
        create_test_claim(db, employee.id, date(2024, 1, 10), MedicalCategory::Hospitalization, 390_000)
            .await?;

        // Each claim fits alone, any two together exceed 400,000
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let db = std::sync::Arc::clone(&temp.db);
                let employee_id = employee.id;
                tokio::spawn(async move {
                    create_test_claim(&db, employee_id, date(2024, 6, 1), MedicalCategory::Medicines, 6_000)
                        .await
                })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 1);
        let used = annual_usage(db, employee.id, 2024, None).await?;
        assert_eq!(used, 396_000);
        assert!(used <= LimitPolicy::default().annual_limit());
        Ok(())
    }
}
