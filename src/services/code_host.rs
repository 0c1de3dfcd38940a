use async_trait::async_trait;
use tracing::info;

use crate::domain::pull_request::{
    CreatedPullRequest, PullRequestUpsertRequest, PullRequestUpsertResult,
};
use crate::error::AppResult;

#[async_trait]
pub trait CodeHostService: Send + Sync {
    /// URL of the first open pull request from `head` into `base`, if any.
    async fn find_open_pull_request(&self, head: &str, base: &str) -> AppResult<Option<String>>;
    async fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> AppResult<CreatedPullRequest>;
    async fn add_label(&self, number: u64, label: &str) -> AppResult<()>;
    async fn request_reviewers(&self, number: u64, reviewers: &[String]) -> AppResult<()>;
}

/// Reuses an open pull request or opens, labels and assigns a new one.
///
/// An existing pull request is returned untouched: labels and reviewers are
/// only applied to pull requests created here. Nothing is undone when the
/// label or reviewer step fails after creation.
pub async fn upsert_pull_request(
    host: &dyn CodeHostService,
    request: &PullRequestUpsertRequest,
    ticket_url: &str,
) -> AppResult<PullRequestUpsertResult> {
    let head = request.head_branch.as_str();
    let base = request.base_branch.as_str();

    info!("Checking if open PR from {head} to {base} already exists...");
    if let Some(url) = host.find_open_pull_request(head, base).await? {
        info!("PR already exists for {base}: {url}");
        return Ok(PullRequestUpsertResult {
            url,
            was_preexisting: true,
        });
    }

    info!("Creating PR from {head} to {base}");
    let created = host
        .create_pull_request(head, base, &request.pull_request_title(), ticket_url)
        .await?;
    info!("Created PR for {base}: {}", created.url);

    info!("Adding label \"{}\" to PR #{}", request.label, created.number);
    host.add_label(created.number, &request.label).await?;

    if request.reviewers.is_empty() {
        info!("No reviewers configured for {base}, skipping review request");
    } else {
        info!("Adding reviewers to PR #{}", created.number);
        host.request_reviewers(created.number, &request.reviewers)
            .await?;
    }

    Ok(PullRequestUpsertResult {
        url: created.url,
        was_preexisting: false,
    })
}
