use async_trait::async_trait;
use portfolio_source::Project;

use crate::commands::args::{column_width, expect_none, expect_slug, pad_to_width};
use crate::context::CommandContext;
use crate::error::CommandError;
use crate::line::{CommandOutput, LineKind};
use crate::registry::CommandHandler;

pub(super) struct List;

#[async_trait]
impl CommandHandler for List {
    async fn run(
        &self,
        args: &[String],
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        expect_none(args, "ls")?;

        let projects = ctx
            .source()
            .list_projects()
            .await
            .map_err(|source| CommandError::fetch("projects", source))?;
        if projects.is_empty() {
            return Ok(CommandOutput::system("no projects found"));
        }

        let slug_width = column_width(projects.iter().map(|project| project.slug.as_str()));
        let status_width = column_width(projects.iter().map(|project| project.status.as_str())) + 2;
        Ok(CommandOutput::text_lines(projects.iter().map(|project| {
            format!(
                "{}  {}  {}",
                pad_to_width(&project.slug, slug_width),
                pad_to_width(&format!("[{}]", project.status), status_width),
                project.name
            )
        })))
    }
}

pub(super) struct Show;

#[async_trait]
impl CommandHandler for Show {
    async fn run(
        &self,
        args: &[String],
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        let slug = expect_slug(args, "cat <slug>")?;
        let project = fetch_project(ctx, slug).await?;
        Ok(describe(&project))
    }
}

pub(super) struct Visit;

#[async_trait]
impl CommandHandler for Visit {
    async fn run(
        &self,
        args: &[String],
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        let slug = expect_slug(args, "cd <slug>")?;
        let project = fetch_project(ctx, slug).await?;
        Ok(CommandOutput::redirect(project.url))
    }
}

async fn fetch_project(ctx: &CommandContext, slug: &str) -> Result<Project, CommandError> {
    ctx.source()
        .get_project(slug)
        .await
        .map_err(|source| CommandError::fetch("project", source))
}

fn describe(project: &Project) -> CommandOutput {
    let mut output = CommandOutput::text(&project.name).line(LineKind::Output, &project.description);
    if let Some(long_description) = project.long_description.as_deref() {
        output = output
            .line(LineKind::Output, "")
            .line_all(LineKind::Output, long_description.lines());
    }
    output = output.line(LineKind::Output, "");
    if !project.tech_stack.is_empty() {
        output = output.line(
            LineKind::Output,
            format!("tech:   {}", project.tech_stack.join(", ")),
        );
    }
    output = output
        .line(LineKind::Output, format!("status: {}", project.status))
        .line(LineKind::Output, format!("url:    {}", project.url));
    if let Some(github_url) = project.github_url.as_deref() {
        output = output.line(LineKind::Output, format!("repo:   {github_url}"));
    }
    output
}

#[cfg(test)]
mod tests {
    use portfolio_source::{Project, ProjectStatus};
    use pretty_assertions::assert_eq;

    use super::describe;

    #[test]
    fn describe_skips_absent_optional_fields() {
        let project = Project {
            name: "Ledger Sync".to_string(),
            slug: "ledger-sync".to_string(),
            description: "Reconciles ledgers".to_string(),
            url: "https://ledger.example.dev".to_string(),
            tech_stack: Vec::new(),
            status: ProjectStatus::Wip,
            long_description: None,
            github_url: None,
        };

        let contents = describe(&project)
            .lines
            .into_iter()
            .map(|line| line.content)
            .collect::<Vec<_>>();

        assert_eq!(
            contents,
            vec![
                "Ledger Sync",
                "Reconciles ledgers",
                "",
                "status: wip",
                "url:    https://ledger.example.dev",
            ]
        );
    }
}
