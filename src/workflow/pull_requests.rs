use tracing::info;

use crate::context::AppContext;
use crate::domain::branch::{BranchName, ReviewTrack};
use crate::domain::pull_request::{
    PullRequestLinks, PullRequestUpsertRequest, PullRequestUpsertResult,
};
use crate::domain::ticket::TicketInfo;
use crate::error::{AppError, AppResult};
use crate::services::code_host::upsert_pull_request;

const BRANCH_PROMPT: &str = "Enter the branch name: ";
const TICKET_PROMPT: &str = "Enter the Jira ticket number: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowInput {
    pub branch: BranchName,
    pub ticket_key: String,
}

#[derive(Debug)]
pub struct WorkflowOutcome {
    pub ticket: TicketInfo,
    pub links: PullRequestLinks,
}

/// Collects the branch and ticket key, prompting only for what is missing.
pub fn resolve_input(
    ctx: &AppContext,
    branch: Option<String>,
    ticket_key: Option<String>,
) -> AppResult<WorkflowInput> {
    let branch = match branch {
        Some(branch) => branch.trim().to_string(),
        None => ctx.input.prompt(BRANCH_PROMPT)?,
    };
    let branch = BranchName(branch);

    let ticket_key = match ticket_key {
        Some(key) => key.trim().to_string(),
        None => match branch.ticket_key(&ctx.config.ticket_prefix) {
            Some(key) => {
                info!("Using branch name as ticket number: {key}");
                key
            }
            None => ctx.input.prompt(TICKET_PROMPT)?,
        },
    };

    if branch.as_str().is_empty() || ticket_key.is_empty() {
        return Err(AppError::Input(
            "Branch name and ticket number are required".to_string(),
        ));
    }

    Ok(WorkflowInput { branch, ticket_key })
}

pub async fn open_pull_requests(
    ctx: &AppContext,
    input: &WorkflowInput,
) -> AppResult<WorkflowOutcome> {
    let ticket = ctx.issue_tracker.fetch_ticket(&input.ticket_key).await?;
    info!("Title: {}", ticket.title);

    let master = upsert_track(ctx, input, &ticket, ReviewTrack::Master).await?;
    let preprod = upsert_track(ctx, input, &ticket, ReviewTrack::Preprod).await?;

    Ok(WorkflowOutcome {
        ticket,
        links: PullRequestLinks { master, preprod },
    })
}

/// Comments both links on the ticket unless neither pull request is new.
/// Returns whether a comment was posted.
pub async fn report_on_ticket(ctx: &AppContext, outcome: &WorkflowOutcome) -> AppResult<bool> {
    if outcome.links.all_preexisting() {
        return Ok(false);
    }
    ctx.issue_tracker
        .post_pull_request_comment(&outcome.ticket.key, &outcome.links)
        .await?;
    Ok(true)
}

async fn upsert_track(
    ctx: &AppContext,
    input: &WorkflowInput,
    ticket: &TicketInfo,
    track: ReviewTrack,
) -> AppResult<PullRequestUpsertResult> {
    let request = PullRequestUpsertRequest {
        head_branch: input.branch.as_str().to_string(),
        base_branch: track.base_branch().to_string(),
        ticket_key: ticket.key.clone(),
        title: ticket.title.clone(),
        label: track.label().to_string(),
        reviewers: ctx.config.reviewers_for(track).to_vec(),
    };
    upsert_pull_request(
        ctx.code_host.as_ref(),
        &request,
        &ctx.config.ticket_url(&ticket.key),
    )
    .await
}
