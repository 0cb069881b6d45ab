//! Shared test utilities for `hr-desk`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        claim::{self, NewClaim},
        employee::{self, NewEmployee},
        limits::LimitPolicy,
    },
    entities,
    errors::Result,
    models::{Beneficiary, MedicalCategory, PaymentType},
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ConnectOptions, DatabaseConnection, Set};
use std::path::PathBuf;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A file-backed `SQLite` database with a real connection pool.
///
/// Used by tests that need writers on separate connections. The database
/// files are removed on drop.
pub struct TempDatabase {
    /// Pooled connection to the file
    pub db: std::sync::Arc<DatabaseConnection>,
    path: PathBuf,
}

impl TempDatabase {
    /// Creates a fresh database file under the system temp dir with all tables.
    pub async fn new(label: &str) -> Result<Self> {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let path = std::env::temp_dir().join(format!(
            "hr_desk_{label}_{}_{nanos}.sqlite",
            std::process::id()
        ));

        let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
        options.max_connections(8).sqlx_logging(false);
        let db = sea_orm::Database::connect(options).await?;
        crate::config::database::create_tables(&db).await?;
        Ok(Self { db: std::sync::Arc::new(db), path })
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

/// Shorthand for a calendar date.
///
/// # Panics
/// Panics on an invalid date; tests only pass literals.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Employee input with default department and designation.
pub fn new_employee(full_name: &str, email: &str) -> NewEmployee {
    NewEmployee {
        full_name: full_name.to_string(),
        email: email.to_string(),
        department: "Operations".to_string(),
        designation: "Associate".to_string(),
        joining_date: date(2022, 1, 1),
    }
}

/// Creates an employee with default department and designation.
pub async fn create_test_employee(
    db: &DatabaseConnection,
    full_name: &str,
    email: &str,
) -> Result<entities::employee::Model> {
    employee::create_employee(db, new_employee(full_name, email)).await
}

/// Claim input with defaults: beneficiary `self`, unpaid, reimbursement.
pub fn new_claim(
    employee_id: i64,
    claim_date: NaiveDate,
    category: MedicalCategory,
    cost_pkr: i64,
) -> NewClaim {
    NewClaim {
        employee_id,
        claim_date,
        beneficiary: Beneficiary::Employee,
        category,
        description: "Test claim".to_string(),
        cost_pkr,
        receipt_ref: None,
        paid: false,
        payment_type: PaymentType::Reimbursement,
    }
}

/// Creates a claim through the normal lifecycle with the default policy.
pub async fn create_test_claim(
    db: &DatabaseConnection,
    employee_id: i64,
    claim_date: NaiveDate,
    category: MedicalCategory,
    cost_pkr: i64,
) -> Result<entities::medical_benefit::Model> {
    claim::create_claim(
        db,
        &LimitPolicy::default(),
        new_claim(employee_id, claim_date, category, cost_pkr),
    )
    .await
}

/// Inserts a claim row directly, skipping limit checks and snapshot refresh.
pub async fn insert_raw_claim(
    db: &DatabaseConnection,
    employee_id: i64,
    claim_date: NaiveDate,
    category: MedicalCategory,
    cost_pkr: i64,
    is_deleted: bool,
) -> Result<entities::medical_benefit::Model> {
    let now = chrono::Utc::now();
    entities::medical_benefit::ActiveModel {
        employee_id: Set(employee_id),
        claim_date: Set(claim_date),
        beneficiary: Set(Beneficiary::Employee.as_str().to_string()),
        category: Set(category.as_str().to_string()),
        description: Set("Raw claim".to_string()),
        cost_pkr: Set(cost_pkr),
        receipt_ref: Set(None),
        paid: Set(false),
        payment_type: Set(PaymentType::Reimbursement.as_str().to_string()),
        is_deleted: Set(is_deleted),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Marks a claim row deleted directly, skipping the snapshot refresh.
pub async fn mark_raw_claim_deleted(
    db: &DatabaseConnection,
    claim: entities::medical_benefit::Model,
) -> Result<entities::medical_benefit::Model> {
    let mut active: entities::medical_benefit::ActiveModel = claim.into();
    active.is_deleted = Set(true);
    active.update(db).await.map_err(Into::into)
}

/// Sets up a complete test environment with one employee.
/// Returns (db, employee) for common test scenarios.
pub async fn setup_with_employee() -> Result<(DatabaseConnection, entities::employee::Model)> {
    let db = setup_test_db().await?;
    let employee = create_test_employee(&db, "Ayesha Khan", "ayesha@example.com").await?;
    Ok((db, employee))
}
