//! Employee business logic - Handles employee record operations.
//!
//! Provides functions for creating, retrieving, and soft-deleting employees.
//! All functions are async and return Result types for error handling.

use crate::{
    entities::{Employee, employee},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use tracing::info;

/// Input for [`create_employee`].
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// Full name
    pub full_name: String,
    /// Work email
    pub email: String,
    /// Department
    pub department: String,
    /// Job title
    pub designation: String,
    /// First working day
    pub joining_date: NaiveDate,
}

/// Retrieves all active employees, ordered alphabetically by name.
pub async fn get_all_active_employees(db: &DatabaseConnection) -> Result<Vec<employee::Model>> {
    Employee::find()
        .filter(employee::Column::IsDeleted.eq(false))
        .order_by_asc(employee::Column::FullName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an employee by id, including soft-deleted rows.
pub async fn get_employee_by_id<C>(db: &C, employee_id: i64) -> Result<Option<employee::Model>>
where
    C: ConnectionTrait,
{
    Employee::find_by_id(employee_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an active employee by id, failing if missing or deleted.
///
/// # Errors
/// Returns [`Error::EmployeeNotFound`] if there is no active employee with that id.
pub async fn require_active_employee<C>(db: &C, employee_id: i64) -> Result<employee::Model>
where
    C: ConnectionTrait,
{
    get_employee_by_id(db, employee_id)
        .await?
        .filter(|employee| !employee.is_deleted)
        .ok_or_else(|| Error::EmployeeNotFound {
            id: employee_id.to_string(),
        })
}

/// Finds an active employee by email (case-insensitive).
pub async fn get_employee_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<employee::Model>> {
    Employee::find()
        .filter(employee::Column::Email.eq(email.trim().to_lowercase()))
        .filter(employee::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new employee after validating name and email.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The email is not a plausible address
/// - An active employee already uses the email
pub async fn create_employee(
    db: &DatabaseConnection,
    new_employee: NewEmployee,
) -> Result<employee::Model> {
    let full_name = new_employee.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(Error::Validation {
            message: "Employee name cannot be empty".to_string(),
        });
    }

    let email = new_employee.email.trim().to_lowercase();
    if !is_plausible_email(&email) {
        return Err(Error::Validation {
            message: format!("Invalid email address: {email}"),
        });
    }

    if get_employee_by_email(db, &email).await?.is_some() {
        return Err(Error::Validation {
            message: format!("An employee with email {email} already exists"),
        });
    }

    let employee = employee::ActiveModel {
        full_name: Set(full_name),
        email: Set(email),
        department: Set(new_employee.department.trim().to_string()),
        designation: Set(new_employee.designation.trim().to_string()),
        joining_date: Set(new_employee.joining_date),
        is_deleted: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = employee.insert(db).await?;
    info!(employee_id = result.id, "Employee created");
    Ok(result)
}

/// Soft deletes an employee. Claims and leave history are kept.
///
/// # Errors
/// Returns [`Error::EmployeeNotFound`] if the employee is missing or already deleted.
pub async fn delete_employee(db: &DatabaseConnection, employee_id: i64) -> Result<employee::Model> {
    let mut employee: employee::ActiveModel =
        require_active_employee(db, employee_id).await?.into();

    employee.is_deleted = Set(true);
    info!(employee_id, "Employee removed");
    employee.update(db).await.map_err(Into::into)
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_employee_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut input = new_employee("   ", "a@example.com");
        let result = create_employee(&db, input.clone()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        input.full_name = "Ayesha Khan".to_string();
        input.email = "not-an-email".to_string();
        let result = create_employee(&db, input).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_employee(&db, new_employee("Ayesha Khan", "ayesha@example.com")).await?;

        let result =
            create_employee(&db, new_employee("Another Ayesha", "AYESHA@example.com ")).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_soft_delete_hides_employee() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        delete_employee(&db, employee.id).await?;

        assert!(get_all_active_employees(&db).await?.is_empty());
        assert!(get_employee_by_id(&db, employee.id).await?.unwrap().is_deleted);
        assert!(matches!(
            require_active_employee(&db, employee.id).await,
            Err(Error::EmployeeNotFound { .. })
        ));
        assert!(matches!(
            delete_employee(&db, employee.id).await,
            Err(Error::EmployeeNotFound { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_email_check() {
        assert!(is_plausible_email("hr@office.pk"));
        assert!(!is_plausible_email("@office.pk"));
        assert!(!is_plausible_email("hr@office"));
    }
}
