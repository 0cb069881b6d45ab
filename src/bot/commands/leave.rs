//! Leave request Discord commands - request, approve, reject, and list.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::parse, handlers::autocomplete},
        core::leave::{self as leaves, NewLeaveRequest},
        errors::{Error, Result},
        models::{LeaveStatus, LeaveType},
    };
    use std::fmt::Write;

    /// Parent command for leave requests.
    #[poise::command(
        slash_command,
        subcommands("leave_request", "leave_approve", "leave_reject", "leave_list")
    )]
    pub async fn leave(ctx: Context<'_>) -> Result<()> {
        let help_text = "Leave command. Available subcommands:\n\
            `/leave request` - File a leave request\n\
            `/leave approve` - Approve a pending request\n\
            `/leave reject` - Reject a pending request\n\
            `/leave list` - List requests";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Files a leave request for an employee.
    #[poise::command(slash_command, rename = "request")]
    pub async fn leave_request(
        ctx: Context<'_>,
        #[description = "Employee email"]
        #[autocomplete = "autocomplete::autocomplete_employee_email"]
        employee: String,
        #[description = "Leave type"]
        #[autocomplete = "autocomplete::autocomplete_leave_type"]
        leave_type: String,
        #[description = "First day (YYYY-MM-DD)"] start: String,
        #[description = "Last day (YYYY-MM-DD)"] end: String,
        #[description = "Reason"] reason: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let employee = parse::resolve_employee(db, &employee).await?;

        let new_request = NewLeaveRequest {
            employee_id: employee.id,
            leave_type: leave_type.parse::<LeaveType>()?,
            start_date: parse::parse_date(&start)?,
            end_date: parse::parse_date(&end)?,
            reason: reason.unwrap_or_default(),
        };

        match leaves::request_leave(db, new_request).await {
            Ok(request) => {
                ctx.say(format!(
                    "📝 Leave request #{} filed for {}: {} day(s) of {} leave, pending approval.",
                    request.id,
                    employee.full_name,
                    leaves::leave_days(&request),
                    request.leave_type
                ))
                .await?;
            }
            Err(e @ Error::InvalidDateRange { .. }) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Approves a pending leave request.
    #[poise::command(slash_command, rename = "approve")]
    pub async fn leave_approve(
        ctx: Context<'_>,
        #[description = "Leave request id"] id: i64,
        #[description = "Note for the employee"] note: Option<String>,
    ) -> Result<()> {
        let decided_by = ctx.author().name.clone();
        let db = &ctx.data().database;

        match leaves::approve_leave(db, id, &decided_by, note).await {
            Ok(request) => ctx.say(format!("✅ Leave request #{} approved.", request.id)).await?,
            Err(
                e @ (Error::InvalidLeaveTransition { .. } | Error::LeaveRequestNotFound { .. }),
            ) => ctx.say(format!("❌ {e}")).await?,
            Err(e) => return Err(e),
        };
        Ok(())
    }

    /// Rejects a pending leave request.
    #[poise::command(slash_command, rename = "reject")]
    pub async fn leave_reject(
        ctx: Context<'_>,
        #[description = "Leave request id"] id: i64,
        #[description = "Reason for rejection"] note: Option<String>,
    ) -> Result<()> {
        let decided_by = ctx.author().name.clone();
        let db = &ctx.data().database;

        match leaves::reject_leave(db, id, &decided_by, note).await {
            Ok(request) => ctx.say(format!("🚫 Leave request #{} rejected.", request.id)).await?,
            Err(
                e @ (Error::InvalidLeaveTransition { .. } | Error::LeaveRequestNotFound { .. }),
            ) => ctx.say(format!("❌ {e}")).await?,
            Err(e) => return Err(e),
        };
        Ok(())
    }

    /// Lists leave requests, newest first.
    #[poise::command(slash_command, rename = "list")]
    pub async fn leave_list(
        ctx: Context<'_>,
        #[description = "Employee email"]
        #[autocomplete = "autocomplete::autocomplete_employee_email"]
        employee: Option<String>,
        #[description = "Status (pending, approved, rejected)"] status: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let employee_id = match employee.as_deref() {
            Some(email) => Some(parse::resolve_employee(db, email).await?.id),
            None => None,
        };
        let status = status
            .as_deref()
            .map(str::parse::<LeaveStatus>)
            .transpose()?;

        let requests = leaves::list_leave_requests(db, employee_id, status).await?;
        if requests.is_empty() {
            ctx.say("No leave requests found.").await?;
            return Ok(());
        }

        let mut text = String::from("**Leave Requests**\n");
        for request in requests.iter().take(20) {
            writeln!(
                &mut text,
                "• #{} employee {} • {} • {} → {} ({} day(s)) • {}",
                request.id,
                request.employee_id,
                request.leave_type,
                request.start_date,
                request.end_date,
                leaves::leave_days(request),
                request.status
            )?;
        }
        ctx.say(text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
