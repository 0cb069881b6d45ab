//! Medical benefit limit accounting.
//!
//! Two ceilings apply to every claim at once: the per-employee annual limit
//! carried by [`LimitPolicy`], and the optional global limit of the claim's
//! medical category. Usage is always recomputed from the non-deleted claims of
//! the employee for the calendar year of the claim date; the cached snapshot
//! rows are never consulted here.

use crate::{
    core::category_limit,
    entities::{MedicalBenefit, medical_benefit},
    errors::{Error, Result},
    models::MedicalCategory,
};
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, prelude::*};
use tracing::debug;

/// Benefit policy handed to the accounting code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitPolicy {
    annual_limit: i64,
}

impl LimitPolicy {
    /// Annual ceiling used when the settings file does not override it.
    pub const DEFAULT_ANNUAL_LIMIT: i64 = 400_000;

    /// Creates a policy with the given annual ceiling in PKR.
    ///
    /// # Errors
    /// Returns [`Error::InvalidAmount`] if the ceiling is not positive.
    pub fn new(annual_limit: i64) -> Result<Self> {
        if annual_limit <= 0 {
            return Err(Error::InvalidAmount {
                amount: annual_limit,
            });
        }
        Ok(Self { annual_limit })
    }

    /// Per-employee yearly ceiling across all categories.
    #[must_use]
    pub const fn annual_limit(&self) -> i64 {
        self.annual_limit
    }
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self {
            annual_limit: Self::DEFAULT_ANNUAL_LIMIT,
        }
    }
}

/// Rejects zero and negative claim costs.
pub fn validate_cost(cost_pkr: i64) -> Result<()> {
    if cost_pkr <= 0 {
        return Err(Error::InvalidAmount { amount: cost_pkr });
    }
    Ok(())
}

/// Sums the cost of every non-deleted claim.
pub fn sum_costs<'a, I>(claims: I) -> i64
where
    I: IntoIterator<Item = &'a medical_benefit::Model>,
{
    claims
        .into_iter()
        .filter(|claim| !claim.is_deleted)
        .map(|claim| claim.cost_pkr)
        .sum()
}

/// Verifies that `used + amount` stays within the annual ceiling.
pub fn check_annual_limit(policy: &LimitPolicy, used: i64, amount: i64) -> Result<()> {
    let limit = policy.annual_limit();
    if used.saturating_add(amount) > limit {
        return Err(Error::AnnualLimitExceeded {
            amount,
            used,
            limit,
        });
    }
    Ok(())
}

/// Verifies that `used + amount` stays within a category ceiling.
///
/// `None` means no limit is configured and the check passes.
pub fn check_category_limit(
    category: MedicalCategory,
    limit: Option<i64>,
    used: i64,
    amount: i64,
) -> Result<()> {
    let Some(limit) = limit else {
        return Ok(());
    };
    if used.saturating_add(amount) > limit {
        return Err(Error::CategoryLimitExceeded {
            category: category.to_string(),
            amount,
            used,
            limit,
        });
    }
    Ok(())
}

/// First and last day of a calendar year.
pub fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);
    start.zip(end).ok_or_else(|| Error::Validation {
        message: format!("Year {year} is out of range"),
    })
}

/// Loads the non-deleted claims of an employee for one year.
///
/// `category` narrows the result to one medical category; `exclude_claim`
/// leaves out a single claim (the one being edited).
pub async fn claims_for_year<C>(
    db: &C,
    employee_id: i64,
    year: i32,
    category: Option<MedicalCategory>,
    exclude_claim: Option<i64>,
) -> Result<Vec<medical_benefit::Model>>
where
    C: ConnectionTrait,
{
    let (start, end) = year_bounds(year)?;

    let mut query = MedicalBenefit::find()
        .filter(medical_benefit::Column::EmployeeId.eq(employee_id))
        .filter(medical_benefit::Column::IsDeleted.eq(false))
        .filter(medical_benefit::Column::ClaimDate.between(start, end));

    if let Some(category) = category {
        query = query.filter(medical_benefit::Column::Category.eq(category.as_str()));
    }
    if let Some(claim_id) = exclude_claim {
        query = query.filter(medical_benefit::Column::Id.ne(claim_id));
    }

    query.all(db).await.map_err(Into::into)
}

/// Total claimed by an employee in a year across all categories.
pub async fn annual_usage<C>(
    db: &C,
    employee_id: i64,
    year: i32,
    exclude_claim: Option<i64>,
) -> Result<i64>
where
    C: ConnectionTrait,
{
    let claims = claims_for_year(db, employee_id, year, None, exclude_claim).await?;
    Ok(sum_costs(&claims))
}

/// Total claimed by an employee in a year within one category.
pub async fn category_usage<C>(
    db: &C,
    employee_id: i64,
    year: i32,
    category: MedicalCategory,
    exclude_claim: Option<i64>,
) -> Result<i64>
where
    C: ConnectionTrait,
{
    let claims = claims_for_year(db, employee_id, year, Some(category), exclude_claim).await?;
    Ok(sum_costs(&claims))
}

/// Runs both limit checks for a proposed claim cost.
///
/// When editing, pass the claim's id as `exclude_claim` so its stored cost is
/// not counted against itself. If the edit also moves the claim to another
/// category, the exclusion only changes the annual total, because the stored
/// claim was never part of the new category's total.
pub async fn check_claim_limits<C>(
    db: &C,
    policy: &LimitPolicy,
    employee_id: i64,
    year: i32,
    category: MedicalCategory,
    amount: i64,
    exclude_claim: Option<i64>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    validate_cost(amount)?;

    let used = annual_usage(db, employee_id, year, exclude_claim).await?;
    check_annual_limit(policy, used, amount)?;

    let limit = category_limit::get_category_limit(db, category)
        .await?
        .map(|row| row.limit_pkr);
    if limit.is_some() {
        let used_in_category =
            category_usage(db, employee_id, year, category, exclude_claim).await?;
        check_category_limit(category, limit, used_in_category, amount)?;
    }

    debug!(
        employee_id,
        year,
        category = %category,
        amount,
        used,
        "Claim is within limits"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::category_limit::upsert_category_limit;
    use crate::test_utils::*;

    fn claim(cost_pkr: i64, is_deleted: bool) -> medical_benefit::Model {
        medical_benefit::Model {
            id: 1,
            employee_id: 1,
            claim_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            beneficiary: "self".to_string(),
            category: "dental_care".to_string(),
            description: "checkup".to_string(),
            cost_pkr,
            receipt_ref: None,
            paid: false,
            payment_type: "reimbursement".to_string(),
            is_deleted,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_policy_rejects_non_positive_ceiling() {
        assert!(matches!(
            LimitPolicy::new(0),
            Err(Error::InvalidAmount { amount: 0 })
        ));
        assert_eq!(LimitPolicy::default().annual_limit(), 400_000);
    }

    #[test]
    fn test_sum_costs_skips_deleted() {
        let claims = vec![claim(100, false), claim(250, true), claim(50, false)];
        assert_eq!(sum_costs(&claims), 150);
    }

    #[test]
    fn test_annual_limit_boundary() {
        let policy = LimitPolicy::default();
        assert!(check_annual_limit(&policy, 390_000, 10_000).is_ok());
        assert!(check_annual_limit(&policy, 390_000, 9_000).is_ok());

        let err = check_annual_limit(&policy, 390_000, 15_000).unwrap_err();
        assert!(matches!(
            err,
            Error::AnnualLimitExceeded {
                amount: 15_000,
                used: 390_000,
                limit: 400_000
            }
        ));
    }

    #[test]
    fn test_category_limit_unset_is_skipped() {
        assert!(check_category_limit(MedicalCategory::Medicines, None, i64::MAX, 1).is_ok());
    }

    #[test]
    fn test_category_limit_exceeded() {
        let err =
            check_category_limit(MedicalCategory::DentalCare, Some(50_000), 48_000, 3_000)
                .unwrap_err();
        assert!(matches!(err, Error::CategoryLimitExceeded { used: 48_000, .. }));
        assert!(
            check_category_limit(MedicalCategory::DentalCare, Some(50_000), 48_000, 2_000).is_ok()
        );
    }

    #[test]
    fn test_year_bounds() {
        let (start, end) = year_bounds(2024).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[tokio::test]
    async fn test_usage_is_scoped_to_year_and_category() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        create_test_claim(&db, employee.id, date(2024, 2, 1), MedicalCategory::DentalCare, 1_000)
            .await?;
        create_test_claim(&db, employee.id, date(2024, 6, 1), MedicalCategory::EyeCare, 2_000)
            .await?;
        create_test_claim(&db, employee.id, date(2023, 12, 31), MedicalCategory::DentalCare, 4_000)
            .await?;

        assert_eq!(annual_usage(&db, employee.id, 2024, None).await?, 3_000);
        assert_eq!(annual_usage(&db, employee.id, 2023, None).await?, 4_000);
        assert_eq!(
            category_usage(&db, employee.id, 2024, MedicalCategory::DentalCare, None).await?,
            1_000
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_check_claim_limits_uses_configured_category_limit() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let policy = LimitPolicy::default();
        upsert_category_limit(&db, MedicalCategory::DentalCare, 50_000).await?;
        create_test_claim(&db, employee.id, date(2024, 1, 10), MedicalCategory::DentalCare, 48_000)
            .await?;

        let result = check_claim_limits(
            &db,
            &policy,
            employee.id,
            2024,
            MedicalCategory::DentalCare,
            3_000,
            None,
        )
        .await;
        assert!(matches!(
            result,
            Err(Error::CategoryLimitExceeded {
                used: 48_000,
                limit: 50_000,
                ..
            })
        ));

        // No limit configured for eye care
        check_claim_limits(
            &db,
            &policy,
            employee.id,
            2024,
            MedicalCategory::EyeCare,
            3_000,
            None,
        )
        .await?;
        Ok(())
    }
}
