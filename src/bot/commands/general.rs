//! General Discord commands - ping, help, and other utility commands.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**hr-desk Help**\n\
        Here is a summary of all available commands.\n\n\
        **Medical Claims**\n\
        • `/claim submit <employee> <category> <cost> [date] ...` - Submits a claim after limit checks.\n\
        • `/claim edit <id> [cost] [category] [date] [paid] ...` - Edits a claim.\n\
        • `/claim delete <id>` - Removes a claim from usage totals.\n\
        • `/claim list [employee] [year] [category] [paid] [page]` - Lists claims.\n\n\
        **Limits & Usage**\n\
        • `/limits set|list|remove` - Manage per-category yearly limits.\n\
        • `/summary employee <employee> [year]` - Usage against annual and category limits.\n\
        • `/summary fleet [year]` - Usage for every employee.\n\n\
        **People**\n\
        • `/employee add|list|remove` - Manage employee records.\n\
        • `/leave request|approve|reject|list` - Manage leave requests.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
