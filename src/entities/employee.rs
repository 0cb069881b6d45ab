//! Employee entity - Represents a member of staff.
//!
//! Employees own medical claims, usage snapshots and leave requests.
//! Rows are soft-deleted so historical claims keep a valid owner.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name as shown on reports
    pub full_name: String,
    /// Work email address, unique among active employees
    pub email: String,
    /// Department (e.g., "Finance", "Engineering")
    pub department: String,
    /// Job title
    pub designation: String,
    /// First working day
    pub joining_date: Date,
    /// Soft delete flag - if true, employee is hidden but history is preserved
    pub is_deleted: bool,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One employee has many medical claims
    #[sea_orm(has_many = "super::medical_benefit::Entity")]
    MedicalBenefits,
    /// One employee has many leave requests
    #[sea_orm(has_many = "super::leave_request::Entity")]
    LeaveRequests,
}

impl Related<super::medical_benefit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MedicalBenefits.def()
    }
}

impl Related<super::leave_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
