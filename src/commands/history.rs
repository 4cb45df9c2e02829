use async_trait::async_trait;

use crate::commands::args::expect_none;
use crate::context::CommandContext;
use crate::error::CommandError;
use crate::line::CommandOutput;
use crate::registry::CommandHandler;

pub(super) struct History;

#[async_trait]
impl CommandHandler for History {
    async fn run(
        &self,
        args: &[String],
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        expect_none(args, "history")?;

        let entries = ctx.history();
        let width = entries.len().to_string().len();
        Ok(CommandOutput::text_lines(
            entries
                .iter()
                .enumerate()
                .map(|(index, entry)| format!("{:>width$}  {entry}", index + 1)),
        ))
    }
}
