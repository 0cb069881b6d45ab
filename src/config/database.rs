//! Database configuration module for `hr-desk`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models.

use crate::entities::{
    Employee, EmployeeMedicalLimit, LeaveRequest, MedicalBenefit, MedicalCategoryLimit,
    employee_medical_limit,
};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, sea_query::Index,
};
use tracing::debug;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/hr_desk.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns
/// the default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    db.execute(builder.build(statement.if_not_exists())).await?;
    Ok(())
}

/// Creates all tables that don't exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Employee).await?;
    create_table(db, &schema, MedicalBenefit).await?;
    create_table(db, &schema, MedicalCategoryLimit).await?;
    create_table(db, &schema, EmployeeMedicalLimit).await?;
    create_table(db, &schema, LeaveRequest).await?;

    // One snapshot row per employee, year and category
    let snapshot_index = Index::create()
        .name("idx_employee_medical_limits_employee_year_category")
        .table(EmployeeMedicalLimit)
        .col(employee_medical_limit::Column::EmployeeId)
        .col(employee_medical_limit::Column::Year)
        .col(employee_medical_limit::Column::Category)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(db.get_database_backend().build(&snapshot_index))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        EmployeeMedicalLimitModel, EmployeeModel, LeaveRequestModel, MedicalBenefitModel,
        MedicalCategoryLimitModel,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<EmployeeModel> = Employee::find().limit(1).all(&db).await?;
        let _: Vec<MedicalBenefitModel> = MedicalBenefit::find().limit(1).all(&db).await?;
        let _: Vec<MedicalCategoryLimitModel> =
            MedicalCategoryLimit::find().limit(1).all(&db).await?;
        let _: Vec<EmployeeMedicalLimitModel> =
            EmployeeMedicalLimit::find().limit(1).all(&db).await?;
        let _: Vec<LeaveRequestModel> = LeaveRequest::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_rows_are_unique_per_category() -> Result<()> {
        use sea_orm::{ActiveModelTrait, Set};

        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let row = || employee_medical_limit::ActiveModel {
            employee_id: Set(1),
            year: Set(2024),
            category: Set("medicines".to_string()),
            used_pkr: Set(100),
            limit_pkr: Set(None),
            remaining_pkr: Set(None),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        row().insert(&db).await?;
        assert!(row().insert(&db).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
