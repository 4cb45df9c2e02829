use async_trait::async_trait;

use crate::commands::args::expect_none;
use crate::context::CommandContext;
use crate::error::CommandError;
use crate::line::CommandOutput;
use crate::registry::CommandHandler;

pub(super) struct Echo;

#[async_trait]
impl CommandHandler for Echo {
    async fn run(
        &self,
        args: &[String],
        _ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        Ok(CommandOutput::text(args.join(" ")))
    }
}

pub(super) struct Clear;

#[async_trait]
impl CommandHandler for Clear {
    async fn run(
        &self,
        args: &[String],
        _ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        expect_none(args, "clear")?;
        Ok(CommandOutput::clear())
    }
}
