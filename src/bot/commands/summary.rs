//! Usage summary Discord commands - per-employee and fleet-wide reports.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::parse, handlers::autocomplete},
        core::summary::{self as report, format_pkr},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Parent command for usage summaries.
    #[poise::command(slash_command, subcommands("summary_employee", "summary_fleet"))]
    pub async fn summary(ctx: Context<'_>) -> Result<()> {
        let help_text = "Usage summary command. Available subcommands:\n\
            `/summary employee` - Usage of one employee\n\
            `/summary fleet` - Usage of every employee";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows an employee's usage against the annual and category limits.
    #[poise::command(slash_command, rename = "employee")]
    pub async fn summary_employee(
        ctx: Context<'_>,
        #[description = "Employee email"]
        #[autocomplete = "autocomplete::autocomplete_employee_email"]
        employee: String,
        #[description = "Year, defaults to the current year"] year: Option<i32>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let policy = &ctx.data().policy;
        let year = parse::year_or_current(year);

        let employee = parse::resolve_employee(db, &employee).await?;
        let summary = report::build_employee_summary(db, policy, employee.id, year).await?;

        let percent = report::calculate_usage_percent(summary.total_used, summary.annual_limit);
        let mut description = String::new();
        writeln!(
            &mut description,
            "**Used:** PKR {} of PKR {}",
            format_pkr(summary.total_used),
            format_pkr(summary.annual_limit)
        )?;
        writeln!(
            &mut description,
            "**Remaining:** PKR {}",
            format_pkr(summary.total_remaining)
        )?;
        writeln!(
            &mut description,
            "{}",
            report::format_progress_bar(percent, Some(10))
        )?;
        for usage in &summary.categories {
            writeln!(&mut description, "• {}", report::format_category_line(usage))?;
        }

        let embed = serenity::CreateEmbed::default()
            .title(format!("Medical usage {year} • {}", employee.full_name))
            .description(description)
            .color(0x0058_65F2);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows usage for every active employee.
    #[poise::command(slash_command, rename = "fleet")]
    pub async fn summary_fleet(
        ctx: Context<'_>,
        #[description = "Year, defaults to the current year"] year: Option<i32>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let year = parse::year_or_current(year);

        let rows = report::build_fleet_summary(db, &ctx.data().policy, year).await?;
        if rows.is_empty() {
            ctx.say("No active employees.").await?;
            return Ok(());
        }

        let mut text = format!("**Medical usage {year}**\n");
        for (employee, summary) in &rows {
            writeln!(
                &mut text,
                "• {}: PKR {} used, PKR {} remaining",
                employee.full_name,
                format_pkr(summary.total_used),
                format_pkr(summary.total_remaining)
            )?;
        }

        ctx.say(text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
