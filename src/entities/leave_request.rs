//! Leave request entity - An absence request awaiting or holding a decision.
//!
//! `status` moves from `pending` to `approved` or `rejected` once.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Leave request database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_requests")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Requesting employee
    pub employee_id: i64,
    /// `annual`, `sick`, `casual` or `unpaid`
    pub leave_type: String,
    /// First day of absence
    pub start_date: Date,
    /// Last day of absence (inclusive)
    pub end_date: Date,
    /// Reason given by the employee
    pub reason: String,
    /// `pending`, `approved` or `rejected`
    pub status: String,
    /// Who decided the request
    pub decided_by: Option<String>,
    /// When the request was decided
    pub decided_at: Option<DateTimeUtc>,
    /// Optional note attached to the decision
    pub decision_note: Option<String>,
    /// When the request was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between a leave request and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each request belongs to one employee
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
