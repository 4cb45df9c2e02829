use async_trait::async_trait;

use crate::commands::args::expect_optional;
use crate::context::CommandContext;
use crate::error::CommandError;
use crate::line::{CommandOutput, LineKind};
use crate::registry::CommandHandler;

const USAGE: &str = "theme [name]";

pub(super) struct SwitchTheme;

#[async_trait]
impl CommandHandler for SwitchTheme {
    async fn run(
        &self,
        args: &[String],
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        let Some(name) = expect_optional(args, USAGE)? else {
            let current = ctx.current_theme().name;
            let rows = ctx.themes().iter().map(|theme| {
                let marker = if theme.name == current { "*" } else { " " };
                format!("{marker} {}", theme.name)
            });
            return Ok(CommandOutput::system("available themes:").line_all(LineKind::Output, rows));
        };

        match ctx.set_theme(name) {
            Ok(theme) => Ok(CommandOutput::system(format!("theme set to {}", theme.name))),
            Err(error) => Ok(CommandOutput::default().line(LineKind::Error, error.to_string())),
        }
    }
}
