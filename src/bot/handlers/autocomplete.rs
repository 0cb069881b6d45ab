//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are filtered case-insensitively against the partial input and
//! capped at Discord's limit of 25 choices.

use crate::{
    bot::Context,
    core::employee,
    models::{Beneficiary, LeaveType, MedicalCategory, PaymentType},
};

const DISCORD_CHOICE_LIMIT: usize = 25;

fn matching<'a>(options: impl IntoIterator<Item = &'a str>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    options
        .into_iter()
        .filter(|option| option.contains(&partial_lower))
        .map(str::to_string)
        .take(DISCORD_CHOICE_LIMIT)
        .collect()
}

/// Suggests medical categories.
pub async fn autocomplete_category(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(MedicalCategory::ALL.iter().map(|c| c.as_str()), partial)
}

/// Suggests beneficiaries.
pub async fn autocomplete_beneficiary(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(Beneficiary::ALL.iter().map(|b| b.as_str()), partial)
}

/// Suggests payment types.
pub async fn autocomplete_payment_type(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(PaymentType::ALL.iter().map(|p| p.as_str()), partial)
}

/// Suggests leave types.
pub async fn autocomplete_leave_type(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(LeaveType::ALL.iter().map(|l| l.as_str()), partial)
}

/// Suggests active employees' emails, matching on name or email.
pub async fn autocomplete_employee_email(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(employees) = employee::get_all_active_employees(db).await else {
        return Vec::new();
    };

    let partial_lower = partial.to_lowercase();
    employees
        .into_iter()
        .filter(|emp| {
            emp.email.contains(&partial_lower) || emp.full_name.to_lowercase().contains(&partial_lower)
        })
        .map(|emp| emp.email)
        .take(DISCORD_CHOICE_LIMIT)
        .collect()
}
