use async_trait::async_trait;

use crate::commands::args::{column_width, expect_optional, pad_to_width};
use crate::context::CommandContext;
use crate::error::CommandError;
use crate::line::{CommandOutput, LineKind};
use crate::registry::CommandHandler;

const USAGE: &str = "help [command]";

pub(super) struct Help;

#[async_trait]
impl CommandHandler for Help {
    async fn run(
        &self,
        args: &[String],
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        let commands = ctx.commands();

        if let Some(name) = expect_optional(args, USAGE)? {
            let descriptor = commands
                .lookup(name)
                .map_err(|_| CommandError::usage(USAGE))?;
            return Ok(CommandOutput::text(format!("usage: {}", descriptor.usage))
                .line(LineKind::Output, descriptor.description.clone()));
        }

        let width = column_width(commands.descriptors().map(|descriptor| descriptor.name.as_str()));
        let rows = commands.descriptors().map(|descriptor| {
            format!(
                "  {}  {}",
                pad_to_width(&descriptor.name, width),
                descriptor.description
            )
        });

        Ok(CommandOutput::system("available commands:")
            .line_all(LineKind::Output, rows)
            .line(
                LineKind::System,
                "type `help <command>` for usage details",
            ))
    }
}
