//! Category limit administration.
//!
//! Limits are global per medical category. At most one non-deleted row exists
//! per category; upserting replaces the active row's ceiling.

use crate::{
    entities::{MedicalCategoryLimit, medical_category_limit},
    errors::{Error, Result},
    models::MedicalCategory,
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use tracing::info;

/// Returns the active limit row for a category, if one is configured.
pub async fn get_category_limit<C>(
    db: &C,
    category: MedicalCategory,
) -> Result<Option<medical_category_limit::Model>>
where
    C: ConnectionTrait,
{
    MedicalCategoryLimit::find()
        .filter(medical_category_limit::Column::Category.eq(category.as_str()))
        .filter(medical_category_limit::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns every active limit row, ordered by category.
pub async fn get_all_category_limits<C>(db: &C) -> Result<Vec<medical_category_limit::Model>>
where
    C: ConnectionTrait,
{
    MedicalCategoryLimit::find()
        .filter(medical_category_limit::Column::IsDeleted.eq(false))
        .order_by_asc(medical_category_limit::Column::Category)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sets the ceiling for a category, inserting a row if none is active.
///
/// Lowering a limit below what employees have already used is allowed; it
/// only affects claims written afterwards.
///
/// # Errors
/// Returns an error if the limit is not positive or the write fails.
pub async fn upsert_category_limit(
    db: &DatabaseConnection,
    category: MedicalCategory,
    limit_pkr: i64,
) -> Result<medical_category_limit::Model> {
    if limit_pkr <= 0 {
        return Err(Error::InvalidAmount { amount: limit_pkr });
    }

    let now = chrono::Utc::now();
    let result = if let Some(existing) = get_category_limit(db, category).await? {
        let mut row: medical_category_limit::ActiveModel = existing.into();
        row.limit_pkr = Set(limit_pkr);
        row.updated_at = Set(now);
        row.update(db).await?
    } else {
        medical_category_limit::ActiveModel {
            category: Set(category.as_str().to_string()),
            limit_pkr: Set(limit_pkr),
            is_deleted: Set(false),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?
    };

    info!(category = %category, limit_pkr, "Category limit saved");
    Ok(result)
}

/// Soft deletes the active limit of a category, leaving it unlimited.
///
/// # Errors
/// Returns [`Error::CategoryLimitNotFound`] if no limit is active.
pub async fn delete_category_limit(
    db: &DatabaseConnection,
    category: MedicalCategory,
) -> Result<medical_category_limit::Model> {
    let existing = get_category_limit(db, category)
        .await?
        .ok_or_else(|| Error::CategoryLimitNotFound {
            category: category.to_string(),
        })?;

    let mut row: medical_category_limit::ActiveModel = existing.into();
    row.is_deleted = Set(true);
    row.updated_at = Set(chrono::Utc::now());

    info!(category = %category, "Category limit removed");
    row.update(db).await.map_err(Into::into)
}

/// Inserts limits for categories that have none yet. Existing limits win.
///
/// Returns the number of rows inserted.
pub async fn seed_category_limits(
    db: &DatabaseConnection,
    limits: &[(MedicalCategory, i64)],
) -> Result<usize> {
    let mut inserted = 0;
    for &(category, limit_pkr) in limits {
        if get_category_limit(db, category).await?.is_some() {
            continue;
        }
        upsert_category_limit(db, category, limit_pkr).await?;
        inserted += 1;
    }
    Ok(inserted)
}
