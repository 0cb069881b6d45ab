//! Employee medical limit entity - Cached usage snapshot.
//!
//! One row per employee, year and category, rewritten after every claim
//! mutation. Derived data: the claims table is the source of truth.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Usage snapshot database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee_medical_limits")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee the snapshot belongs to
    pub employee_id: i64,
    /// Calendar year
    pub year: i32,
    /// Medical category
    pub category: String,
    /// Amount used in PKR
    pub used_pkr: i64,
    /// Configured ceiling at recompute time, None if unlimited
    pub limit_pkr: Option<i64>,
    /// Remaining amount floored at zero, None if unlimited
    pub remaining_pkr: Option<i64>,
    /// When the snapshot was last recomputed
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between a snapshot and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each snapshot belongs to one employee
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
