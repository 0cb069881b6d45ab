//! Medical category limit entity - Global yearly ceiling per medical category.
//!
//! A category with no active row has no ceiling.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category limit database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "medical_category_limits")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Medical category, e.g. `dental_care`
    pub category: String,
    /// Yearly ceiling in PKR
    pub limit_pkr: i64,
    /// Soft delete flag
    pub is_deleted: bool,
    /// Last modification
    pub updated_at: DateTimeUtc,
}

/// Category limits have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
