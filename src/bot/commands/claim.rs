//! Medical claim Discord commands - submit, edit, delete, and list claims.
//!
//! Limit violations are answered inline with the accounting message so the
//! office admin sees how much of the limit is already used.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::parse, handlers::autocomplete},
        core::{
            claim::{self as claims, ClaimQuery, ClaimUpdate, NewClaim},
            summary::format_pkr,
        },
        errors::{Error, Result},
        models::{Beneficiary, MedicalCategory, PaymentType},
    };
    use poise::serenity_prelude as serenity;

    const DEFAULT_PAGE_SIZE: u64 = 10;

    /// Parent command for medical claims.
    #[poise::command(
        slash_command,
        subcommands("claim_submit", "claim_edit", "claim_delete", "claim_list")
    )]
    pub async fn claim(ctx: Context<'_>) -> Result<()> {
        let help_text = "Medical claim command. Available subcommands:\n\
            `/claim submit` - Submit a new claim\n\
            `/claim edit` - Edit an existing claim\n\
            `/claim delete` - Delete a claim\n\
            `/claim list` - List claims";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Submits a medical claim after checking the annual and category limits.
    #[poise::command(slash_command, rename = "submit")]
    pub async fn claim_submit(
        ctx: Context<'_>,
        #[description = "Employee email"]
        #[autocomplete = "autocomplete::autocomplete_employee_email"]
        employee: String,
        #[description = "Medical category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Cost in PKR"] cost: i64,
        #[description = "Treatment date (YYYY-MM-DD), defaults to today"] date: Option<String>,
        #[description = "Who was treated, defaults to self"]
        #[autocomplete = "autocomplete::autocomplete_beneficiary"]
        beneficiary: Option<String>,
        #[description = "Description of the expense"] description: Option<String>,
        #[description = "Receipt reference"] receipt: Option<String>,
        #[description = "Payment type, defaults to reimbursement"]
        #[autocomplete = "autocomplete::autocomplete_payment_type"]
        payment_type: Option<String>,
        #[description = "Already paid out"] paid: Option<bool>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let employee = parse::resolve_employee(db, &employee).await?;
        let new_claim = NewClaim {
            employee_id: employee.id,
            claim_date: parse::parse_date_or_today(date.as_deref())?,
            beneficiary: beneficiary
                .as_deref()
                .map_or(Ok(Beneficiary::Employee), str::parse)?,
            category: category.parse::<MedicalCategory>()?,
            description: description.unwrap_or_default(),
            cost_pkr: cost,
            receipt_ref: receipt,
            paid: paid.unwrap_or(false),
            payment_type: payment_type
                .as_deref()
                .map_or(Ok(PaymentType::Reimbursement), str::parse)?,
        };

        match claims::create_claim(db, &ctx.data().policy, new_claim).await {
            Ok(claim) => {
                ctx.say(format!(
                    "✅ Claim #{} recorded for {}: PKR {} ({}, {})",
                    claim.id,
                    employee.full_name,
                    format_pkr(claim.cost_pkr),
                    claim.category,
                    claim.claim_date
                ))
                .await?;
            }
            Err(
                e @ (Error::AnnualLimitExceeded { .. }
                | Error::CategoryLimitExceeded { .. }
                | Error::InvalidAmount { .. }),
            ) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Edits a claim. Cost, category, and date changes are re-checked against limits.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn claim_edit(
        ctx: Context<'_>,
        #[description = "Claim id"] id: i64,
        #[description = "New cost in PKR"] cost: Option<i64>,
        #[description = "New medical category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "New treatment date (YYYY-MM-DD)"] date: Option<String>,
        #[description = "New description"] description: Option<String>,
        #[description = "New receipt reference"] receipt: Option<String>,
        #[description = "Mark as paid or unpaid"] paid: Option<bool>,
        #[description = "New payment type"]
        #[autocomplete = "autocomplete::autocomplete_payment_type"]
        payment_type: Option<String>,
    ) -> Result<()> {
        let update = ClaimUpdate {
            cost_pkr: cost,
            category: category.as_deref().map(str::parse).transpose()?,
            claim_date: date.as_deref().map(parse::parse_date).transpose()?,
            beneficiary: None,
            description,
            receipt_ref: receipt,
            paid,
            payment_type: payment_type.as_deref().map(str::parse).transpose()?,
        };

        let db = &ctx.data().database;
        match claims::update_claim(db, &ctx.data().policy, id, update).await {
            Ok(claim) => {
                ctx.say(format!(
                    "✅ Claim #{} updated: PKR {} ({}, {}, {})",
                    claim.id,
                    format_pkr(claim.cost_pkr),
                    claim.category,
                    claim.claim_date,
                    if claim.paid { "paid" } else { "unpaid" }
                ))
                .await?;
            }
            Err(
                e @ (Error::AnnualLimitExceeded { .. }
                | Error::CategoryLimitExceeded { .. }
                | Error::InvalidAmount { .. }
                | Error::ClaimNotFound { .. }),
            ) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Deletes a claim so it no longer counts towards usage.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn claim_delete(
        ctx: Context<'_>,
        #[description = "Claim id"] id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        match claims::delete_claim(db, id).await {
            Ok(claim) => {
                ctx.say(format!(
                    "🗑️ Claim #{} (PKR {}) deleted.",
                    claim.id,
                    format_pkr(claim.cost_pkr)
                ))
                .await?;
            }
            Err(e @ Error::ClaimNotFound { .. }) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Lists claims, newest first.
    #[poise::command(slash_command, rename = "list")]
    pub async fn claim_list(
        ctx: Context<'_>,
        #[description = "Employee email"]
        #[autocomplete = "autocomplete::autocomplete_employee_email"]
        employee: Option<String>,
        #[description = "Year"] year: Option<i32>,
        #[description = "Medical category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "Only paid or only unpaid"] paid: Option<bool>,
        #[description = "Page number, starting at 1"] page: Option<u64>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let employee_id = match employee.as_deref() {
            Some(email) => Some(parse::resolve_employee(db, email).await?.id),
            None => None,
        };
        let query = ClaimQuery {
            employee_id,
            year,
            category: category.as_deref().map(str::parse).transpose()?,
            paid,
        };
        let page_index = page.unwrap_or(1).saturating_sub(1);

        let result = claims::list_claims(db, query, page_index, DEFAULT_PAGE_SIZE).await?;
        if result.claims.is_empty() {
            ctx.say("No claims found.").await?;
            return Ok(());
        }

        let fields: Vec<(String, String, bool)> = result
            .claims
            .iter()
            .map(|claim| {
                (
                    format!("#{} • PKR {}", claim.id, format_pkr(claim.cost_pkr)),
                    format!(
                        "{} • {} • {} • {}{}",
                        claim.claim_date,
                        claim.category,
                        claim.beneficiary,
                        if claim.paid { "paid" } else { "unpaid" },
                        if claim.description.is_empty() {
                            String::new()
                        } else {
                            format!("\n{}", claim.description)
                        }
                    ),
                    false,
                )
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title("**Medical Claims**")
            .color(0x0058_65F2)
            .fields(fields)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Page {} of {} • {} claims",
                result.page + 1,
                result.total_pages(),
                result.total
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
