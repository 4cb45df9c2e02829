use async_trait::async_trait;
use portfolio_source::About;

use crate::commands::args::{expect_none, expect_one};
use crate::context::CommandContext;
use crate::error::CommandError;
use crate::line::{CommandOutput, LineKind};
use crate::registry::CommandHandler;

const OPEN_USAGE: &str = "open <github|linkedin|twitter|website|email>";
const OPEN_TARGETS: [&str; 5] = ["github", "linkedin", "twitter", "website", "email"];

async fn fetch_about(ctx: &CommandContext) -> Result<About, CommandError> {
    ctx.source()
        .get_about()
        .await
        .map_err(|source| CommandError::fetch("profile", source))
}

pub(super) struct WhoAmI;

#[async_trait]
impl CommandHandler for WhoAmI {
    async fn run(
        &self,
        args: &[String],
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        expect_none(args, "whoami")?;

        let about = fetch_about(ctx).await?;
        let mut output = CommandOutput::text(&about.name).line(LineKind::Output, &about.title);
        if let Some(location) = about.location.as_deref() {
            output = output.line(LineKind::Output, location);
        }
        Ok(output
            .line(LineKind::Output, "")
            .line_all(LineKind::Output, about.bio.lines()))
    }
}

pub(super) struct Contact;

#[async_trait]
impl CommandHandler for Contact {
    async fn run(
        &self,
        args: &[String],
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        expect_none(args, "contact")?;

        let about = fetch_about(ctx).await?;
        let links = about
            .social
            .entries()
            .into_iter()
            .map(|(label, url)| format!("{label:<9}{url}"));
        Ok(CommandOutput::text(format!("{:<9}{}", "email", about.email))
            .line_all(LineKind::Output, links)
            .line(LineKind::System, "try `open <name>` to follow a link"))
    }
}

pub(super) struct Open;

#[async_trait]
impl CommandHandler for Open {
    async fn run(
        &self,
        args: &[String],
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        let target = expect_one(args, OPEN_USAGE)?.to_ascii_lowercase();
        if !OPEN_TARGETS.contains(&target.as_str()) {
            return Err(CommandError::usage(OPEN_USAGE));
        }

        let about = fetch_about(ctx).await?;
        if target == "email" {
            return Ok(CommandOutput::redirect(format!("mailto:{}", about.email)));
        }

        match about.social.get(&target) {
            Some(url) => Ok(CommandOutput::redirect(url)),
            None => Ok(CommandOutput::default().line(LineKind::Error, format!("no {target} link listed"))),
        }
    }
}
