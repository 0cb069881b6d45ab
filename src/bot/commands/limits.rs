//! Category limit Discord commands - set, list, and remove limits.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete},
        core::{category_limit, summary::format_pkr},
        errors::{Error, Result},
        models::MedicalCategory,
    };
    use std::fmt::Write;

    /// Parent command for per-category yearly limits.
    #[poise::command(
        slash_command,
        subcommands("limits_set", "limits_list", "limits_remove")
    )]
    pub async fn limits(ctx: Context<'_>) -> Result<()> {
        let help_text = "Category limit command. Available subcommands:\n\
            `/limits set` - Set a category limit\n\
            `/limits list` - Show configured limits\n\
            `/limits remove` - Remove a category limit";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Sets the yearly limit of a medical category.
    #[poise::command(slash_command, rename = "set")]
    pub async fn limits_set(
        ctx: Context<'_>,
        #[description = "Medical category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Yearly limit in PKR"] amount: i64,
    ) -> Result<()> {
        let category = category.parse::<MedicalCategory>()?;
        let db = &ctx.data().database;

        match category_limit::upsert_category_limit(db, category, amount).await {
            Ok(row) => {
                ctx.say(format!(
                    "✅ Limit for {} set to PKR {}.",
                    row.category,
                    format_pkr(row.limit_pkr)
                ))
                .await?;
            }
            Err(e @ Error::InvalidAmount { .. }) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Lists configured category limits and the annual ceiling.
    #[poise::command(slash_command, rename = "list")]
    pub async fn limits_list(ctx: Context<'_>) -> Result<()> {
        let db = &ctx.data().database;
        let rows = category_limit::get_all_category_limits(db).await?;

        let mut text = format!(
            "**Annual limit:** PKR {}\n",
            format_pkr(ctx.data().policy.annual_limit())
        );
        if rows.is_empty() {
            text.push_str("No category limits configured.");
        }
        for row in &rows {
            writeln!(&mut text, "• {}: PKR {}", row.category, format_pkr(row.limit_pkr))?;
        }

        ctx.say(text).await?;
        Ok(())
    }

    /// Removes a category limit; the category becomes unlimited.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn limits_remove(
        ctx: Context<'_>,
        #[description = "Medical category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
    ) -> Result<()> {
        let category = category.parse::<MedicalCategory>()?;
        let db = &ctx.data().database;

        match category_limit::delete_category_limit(db, category).await {
            Ok(_) => ctx.say(format!("🗑️ Limit for {category} removed.")).await?,
            Err(e @ Error::CategoryLimitNotFound { .. }) => ctx.say(format!("❌ {e}")).await?,
            Err(e) => return Err(e),
        };
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
