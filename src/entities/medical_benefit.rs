//! Medical benefit entity - A single medical-expense claim.
//!
//! Each claim belongs to one employee and one medical category. `category`,
//! `beneficiary` and `payment_type` hold the text form of the enums in
//! [`crate::models`]. Claims are soft-deleted; deleted rows never count
//! towards usage.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Medical claim database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "medical_benefits")]
pub struct Model {
    /// Unique identifier for the claim
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee this claim belongs to
    pub employee_id: i64,
    /// Date of treatment; its year decides which limits apply
    pub claim_date: Date,
    /// Who was treated (`self`, `spouse`, `parents`, `siblings`, `children`)
    pub beneficiary: String,
    /// Medical category, e.g. `dental_care`
    pub category: String,
    /// Free-text description
    pub description: String,
    /// Claimed amount in PKR
    pub cost_pkr: i64,
    /// Opaque reference to the uploaded receipt
    pub receipt_ref: Option<String>,
    /// Whether the claim has been paid out
    pub paid: bool,
    /// `reimbursement` or `direct_billing`
    pub payment_type: String,
    /// Soft delete flag
    pub is_deleted: bool,
    /// When the claim was submitted
    pub created_at: DateTimeUtc,
    /// Last modification
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between a claim and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each claim belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
