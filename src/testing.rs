//! In-memory service doubles shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::pull_request::{CreatedPullRequest, PullRequestLinks};
use crate::domain::ticket::TicketInfo;
use crate::error::{AppError, AppResult};
use crate::services::{CodeHostService, InputProvider, IssueTrackerService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Find {
        head: String,
        base: String,
    },
    Create {
        head: String,
        base: String,
        title: String,
        body: String,
    },
    Label {
        number: u64,
        label: String,
    },
    Reviewers {
        number: u64,
        reviewers: Vec<String>,
    },
}

/// Code host keyed by base branch; created pull requests are numbered from 1.
#[derive(Default)]
pub struct FakeCodeHost {
    pub existing: HashMap<String, String>,
    pub fail_label: bool,
    pub fail_create: bool,
    calls: Mutex<Vec<HostCall>>,
}

impl FakeCodeHost {
    pub fn with_existing(base: &str, url: &str) -> Self {
        let mut host = Self::default();
        host.existing.insert(base.to_string(), url.to_string());
        host
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    pub fn failing_label() -> Self {
        Self {
            fail_label: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: HostCall) -> usize {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        calls
            .iter()
            .filter(|call| matches!(call, HostCall::Create { .. }))
            .count()
    }
}

#[async_trait]
impl CodeHostService for FakeCodeHost {
    async fn find_open_pull_request(&self, head: &str, base: &str) -> AppResult<Option<String>> {
        self.record(HostCall::Find {
            head: head.to_string(),
            base: base.to_string(),
        });
        Ok(self.existing.get(base).cloned())
    }

    async fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> AppResult<CreatedPullRequest> {
        if self.fail_create {
            return Err(AppError::RemoteCreate(format!(
                "failed to create PR from {head} to {base}: no commits between branches"
            )));
        }
        let number = self.record(HostCall::Create {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }) as u64;
        Ok(CreatedPullRequest {
            number,
            url: format!("https://github.com/acme/shop/pull/{number}"),
        })
    }

    async fn add_label(&self, number: u64, label: &str) -> AppResult<()> {
        if self.fail_label {
            return Err(AppError::RemoteCreate(format!(
                "failed to add label \"{label}\" to PR #{number}"
            )));
        }
        self.record(HostCall::Label {
            number,
            label: label.to_string(),
        });
        Ok(())
    }

    async fn request_reviewers(&self, number: u64, reviewers: &[String]) -> AppResult<()> {
        self.record(HostCall::Reviewers {
            number,
            reviewers: reviewers.to_vec(),
        });
        Ok(())
    }
}

pub struct FakeIssueTracker {
    pub title: Option<String>,
    pub fail_comment: bool,
    comments: Mutex<Vec<(String, PullRequestLinks)>>,
}

impl FakeIssueTracker {
    pub fn with_title(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            fail_comment: false,
            comments: Mutex::new(Vec::new()),
        }
    }

    pub fn unknown_ticket() -> Self {
        Self {
            title: None,
            fail_comment: false,
            comments: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting_comments(title: &str) -> Self {
        Self {
            fail_comment: true,
            ..Self::with_title(title)
        }
    }

    pub fn comments(&self) -> Vec<(String, PullRequestLinks)> {
        self.comments.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTrackerService for FakeIssueTracker {
    async fn fetch_ticket(&self, key: &str) -> AppResult<TicketInfo> {
        match &self.title {
            Some(title) => Ok(TicketInfo {
                key: key.to_string(),
                title: title.clone(),
            }),
            None => Err(AppError::RemoteFetch {
                key: key.to_string(),
                detail: r#"{"errorMessages":["Issue does not exist"]}"#.to_string(),
            }),
        }
    }

    async fn post_pull_request_comment(
        &self,
        key: &str,
        links: &PullRequestLinks,
    ) -> AppResult<()> {
        if self.fail_comment {
            return Err(AppError::RemoteCreate(format!(
                "failed to comment on Jira ticket {key}, Jira responded with 403 Forbidden"
            )));
        }
        self.comments
            .lock()
            .unwrap()
            .push((key.to_string(), links.clone()));
        Ok(())
    }
}

/// Answers prompts in order and records what was asked.
#[derive(Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInput {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl InputProvider for ScriptedInput {
    fn prompt(&self, message: &str) -> AppResult<String> {
        self.prompts.lock().unwrap().push(message.to_string());
        Ok(self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        github_token: "ghp_secret".to_string(),
        jira_token: "jira_secret".to_string(),
        dev_reviewers: vec!["alice".to_string(), "bob".to_string()],
        scrum_master_reviewers: vec!["carol".to_string()],
        repo_owner: "acme".to_string(),
        repo: "shop".to_string(),
        me: "dev@acme.io".to_string(),
        jira_base_url: "https://acme.atlassian.net".to_string(),
        github_api_url: "https://api.github.com".to_string(),
        ticket_prefix: "GC".to_string(),
    }
}

pub fn test_context(
    host: Arc<FakeCodeHost>,
    tracker: Arc<FakeIssueTracker>,
    input: Arc<ScriptedInput>,
) -> AppContext {
    AppContext::new(test_config(), host, tracker, input)
}
