use std::io::Write;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::pull_requests::{
    WorkflowOutcome, open_pull_requests, report_on_ticket, resolve_input,
};

#[derive(Debug, Clone, Default)]
pub struct OpenCommandArgs {
    pub branch: Option<String>,
    pub ticket: Option<String>,
}

/// Runs the workflow, writing the pull request links before the ticket is
/// commented so they stay visible when the comment fails.
pub async fn run(ctx: &AppContext, args: OpenCommandArgs, out: &mut dyn Write) -> AppResult<()> {
    let input = resolve_input(ctx, args.branch, args.ticket)?;
    let outcome = open_pull_requests(ctx, &input).await?;

    for line in pull_request_lines(&outcome) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    report_on_ticket(ctx, &outcome).await?;

    for line in closing_lines(&outcome, &ctx.config) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn pull_request_lines(outcome: &WorkflowOutcome) -> Vec<String> {
    let links = &outcome.links;
    let existing = |preexisting: bool| if preexisting { "Existing " } else { "" };

    let mut lines = Vec::with_capacity(3);
    if links.all_preexisting() {
        lines.push("Both PRs already exist".to_string());
    }
    lines.push(format!(
        "{}PR to master: {}",
        existing(links.master.was_preexisting),
        links.master.url
    ));
    lines.push(format!(
        "{}PR to preprod: {}",
        existing(links.preprod.was_preexisting),
        links.preprod.url
    ));
    lines
}

fn closing_lines(outcome: &WorkflowOutcome, config: &AppConfig) -> Vec<String> {
    vec![
        format!("Jira ticket: {}", config.ticket_url(&outcome.ticket.key)),
        "Done 🪄".to_string(),
    ]
}
