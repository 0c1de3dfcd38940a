#[derive(Debug, Clone)]
pub struct PullRequestUpsertRequest {
    pub head_branch: String,
    pub base_branch: String,
    pub ticket_key: String,
    pub title: String,
    pub label: String,
    pub reviewers: Vec<String>,
}

impl PullRequestUpsertRequest {
    pub fn pull_request_title(&self) -> String {
        format!("`{}` - {}", self.ticket_key, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestUpsertResult {
    pub url: String,
    pub was_preexisting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    pub number: u64,
    pub url: String,
}

/// Both upsert outcomes of one run, as reported back to the ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLinks {
    pub master: PullRequestUpsertResult,
    pub preprod: PullRequestUpsertResult,
}

impl PullRequestLinks {
    pub fn all_preexisting(&self) -> bool {
        self.master.was_preexisting && self.preprod.was_preexisting
    }
}
