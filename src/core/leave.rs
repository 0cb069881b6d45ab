//! Leave request business logic.
//!
//! A request starts `pending` and is decided exactly once, to either
//! `approved` or `rejected`. Decided requests are never reopened.

use crate::{
    core::employee,
    entities::{LeaveRequest, leave_request},
    errors::{Error, Result},
    models::{LeaveStatus, LeaveType},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Input for [`request_leave`].
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    /// Requesting employee
    pub employee_id: i64,
    /// Kind of leave
    pub leave_type: LeaveType,
    /// First day of absence
    pub start_date: NaiveDate,
    /// Last day of absence (inclusive)
    pub end_date: NaiveDate,
    /// Reason given
    pub reason: String,
}

/// Number of calendar days covered, both ends inclusive.
#[must_use]
pub fn leave_days(request: &leave_request::Model) -> i64 {
    (request.end_date - request.start_date).num_days() + 1
}

/// Files a new pending leave request.
///
/// # Errors
/// Returns an error if the employee is not active or the end date precedes the start date.
pub async fn request_leave(
    db: &DatabaseConnection,
    new_request: NewLeaveRequest,
) -> Result<leave_request::Model> {
    if new_request.end_date < new_request.start_date {
        return Err(Error::InvalidDateRange {
            start: new_request.start_date,
            end: new_request.end_date,
        });
    }

    employee::require_active_employee(db, new_request.employee_id).await?;

    let request = leave_request::ActiveModel {
        employee_id: Set(new_request.employee_id),
        leave_type: Set(new_request.leave_type.as_str().to_string()),
        start_date: Set(new_request.start_date),
        end_date: Set(new_request.end_date),
        reason: Set(new_request.reason.trim().to_string()),
        status: Set(LeaveStatus::Pending.as_str().to_string()),
        decided_by: Set(None),
        decided_at: Set(None),
        decision_note: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = request.insert(db).await?;
    info!(
        leave_request_id = result.id,
        employee_id = result.employee_id,
        "Leave requested"
    );
    Ok(result)
}

/// Retrieves a leave request by id.
pub async fn get_leave_request_by_id(
    db: &DatabaseConnection,
    request_id: i64,
) -> Result<Option<leave_request::Model>> {
    LeaveRequest::find_by_id(request_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists leave requests, newest first, optionally filtered by employee and status.
pub async fn list_leave_requests(
    db: &DatabaseConnection,
    employee_id: Option<i64>,
    status: Option<LeaveStatus>,
) -> Result<Vec<leave_request::Model>> {
    let mut query = LeaveRequest::find();
    if let Some(employee_id) = employee_id {
        query = query.filter(leave_request::Column::EmployeeId.eq(employee_id));
    }
    if let Some(status) = status {
        query = query.filter(leave_request::Column::Status.eq(status.as_str()));
    }

    query
        .order_by_desc(leave_request::Column::StartDate)
        .order_by_desc(leave_request::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Approves a pending request.
///
/// # Errors
/// Returns an error if the request is missing or already decided.
pub async fn approve_leave(
    db: &DatabaseConnection,
    request_id: i64,
    decided_by: &str,
    note: Option<String>,
) -> Result<leave_request::Model> {
    decide(db, request_id, LeaveStatus::Approved, decided_by, note).await
}

/// Rejects a pending request.
///
/// # Errors
/// Returns an error if the request is missing or already decided.
pub async fn reject_leave(
    db: &DatabaseConnection,
    request_id: i64,
    decided_by: &str,
    note: Option<String>,
) -> Result<leave_request::Model> {
    decide(db, request_id, LeaveStatus::Rejected, decided_by, note).await
}

async fn decide(
    db: &DatabaseConnection,
    request_id: i64,
    decision: LeaveStatus,
    decided_by: &str,
    note: Option<String>,
) -> Result<leave_request::Model> {
    let existing = get_leave_request_by_id(db, request_id)
        .await?
        .ok_or(Error::LeaveRequestNotFound { id: request_id })?;

    if existing.status.parse::<LeaveStatus>()? != LeaveStatus::Pending {
        return Err(Error::InvalidLeaveTransition {
            id: request_id,
            status: existing.status,
        });
    }

    let mut request: leave_request::ActiveModel = existing.into();
    request.status = Set(decision.as_str().to_string());
    request.decided_by = Set(Some(decided_by.to_string()));
    request.decided_at = Set(Some(chrono::Utc::now()));
    request.decision_note = Set(note);

    let result = request.update(db).await?;
    info!(leave_request_id = request_id, status = %decision, "Leave request decided");
    Ok(result)
}
