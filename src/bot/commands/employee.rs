//! Employee Discord commands - add, list, and remove employee records.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::parse, handlers::autocomplete},
        core::employee::{self as employees, NewEmployee},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Parent command for employee records.
    #[poise::command(
        slash_command,
        subcommands("employee_add", "employee_list", "employee_remove")
    )]
    pub async fn employee(ctx: Context<'_>) -> Result<()> {
        let help_text = "Employee command. Available subcommands:\n\
            `/employee add` - Add an employee\n\
            `/employee list` - List active employees\n\
            `/employee remove` - Remove an employee";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds an employee record.
    #[poise::command(slash_command, rename = "add")]
    pub async fn employee_add(
        ctx: Context<'_>,
        #[description = "Full name"] name: String,
        #[description = "Work email"] email: String,
        #[description = "Department"] department: String,
        #[description = "Job title"] designation: String,
        #[description = "Joining date (YYYY-MM-DD), defaults to today"] joining_date: Option<
            String,
        >,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let new_employee = NewEmployee {
            full_name: name,
            email,
            department,
            designation,
            joining_date: parse::parse_date_or_today(joining_date.as_deref())?,
        };

        match employees::create_employee(db, new_employee).await {
            Ok(employee) => {
                ctx.say(format!(
                    "✅ Added {} <{}> (ID: {})",
                    employee.full_name, employee.email, employee.id
                ))
                .await?;
            }
            Err(e @ Error::Validation { .. }) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Lists active employees.
    #[poise::command(slash_command, rename = "list")]
    pub async fn employee_list(ctx: Context<'_>) -> Result<()> {
        let db = &ctx.data().database;
        let employees = employees::get_all_active_employees(db).await?;

        if employees.is_empty() {
            ctx.say("No employees yet. Use `/employee add` to create one.")
                .await?;
            return Ok(());
        }

        let mut text = String::from("**Employees**\n");
        for employee in &employees {
            writeln!(
                &mut text,
                "• {} <{}> - {}, {}",
                employee.full_name, employee.email, employee.designation, employee.department
            )?;
        }
        ctx.say(text).await?;
        Ok(())
    }

    /// Removes an employee. Their claims and leave history are kept.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn employee_remove(
        ctx: Context<'_>,
        #[description = "Employee email"]
        #[autocomplete = "autocomplete::autocomplete_employee_email"]
        employee: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let employee = parse::resolve_employee(db, &employee).await?;
        employees::delete_employee(db, employee.id).await?;

        ctx.say(format!("🗑️ {} removed.", employee.full_name))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
