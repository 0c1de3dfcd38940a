use std::env;

use tracing::debug;

use crate::domain::branch::ReviewTrack;
use crate::error::{AppError, AppResult};

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_TICKET_PREFIX: &str = "GC";

const REQUIRED_VARS: [&str; 7] = [
    "GITHUB_TOKEN",
    "JIRA_TOKEN",
    "DEV_REVIEWERS",
    "SCRUM_MASTER_REVIEWERS",
    "REPO_OWNER",
    "REPO",
    "ME",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_token: String,
    pub jira_token: String,
    pub dev_reviewers: Vec<String>,
    pub scrum_master_reviewers: Vec<String>,
    pub repo_owner: String,
    pub repo: String,
    /// Jira account used for Basic auth.
    pub me: String,
    pub jira_base_url: String,
    pub github_api_url: String,
    pub ticket_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        match dotenv::dotenv() {
            Ok(path) => debug!("loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => {
                return Err(AppError::Configuration(format!("invalid .env file: {err}")));
            }
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let missing = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| read(*name).is_none())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(AppError::Configuration(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let required = |name: &str| read(name).unwrap_or_default();
        let repo_owner = required("REPO_OWNER");

        let jira_base_url = read("JIRA_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("https://{repo_owner}.atlassian.net"));
        let github_api_url = read("GITHUB_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        Ok(Self {
            github_token: required("GITHUB_TOKEN"),
            jira_token: required("JIRA_TOKEN"),
            dev_reviewers: parse_reviewers("DEV_REVIEWERS", &required("DEV_REVIEWERS"))?,
            scrum_master_reviewers: parse_reviewers(
                "SCRUM_MASTER_REVIEWERS",
                &required("SCRUM_MASTER_REVIEWERS"),
            )?,
            repo: required("REPO"),
            me: required("ME"),
            ticket_prefix: read("TICKET_PREFIX")
                .unwrap_or_else(|| DEFAULT_TICKET_PREFIX.to_string()),
            repo_owner,
            jira_base_url,
            github_api_url,
        })
    }

    pub fn reviewers_for(&self, track: ReviewTrack) -> &[String] {
        match track {
            ReviewTrack::Master => &self.dev_reviewers,
            ReviewTrack::Preprod => &self.scrum_master_reviewers,
        }
    }

    pub fn ticket_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.jira_base_url, key)
    }
}

fn parse_reviewers(name: &str, raw: &str) -> AppResult<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|err| {
        AppError::Configuration(format!("{name} must be a JSON array of usernames: {err}"))
    })
}
