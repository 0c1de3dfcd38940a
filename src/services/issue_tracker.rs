use async_trait::async_trait;

use crate::domain::pull_request::PullRequestLinks;
use crate::domain::ticket::TicketInfo;
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn fetch_ticket(&self, key: &str) -> AppResult<TicketInfo>;
    async fn post_pull_request_comment(&self, key: &str, links: &PullRequestLinks)
    -> AppResult<()>;
}
