use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::pull_request::CreatedPullRequest;
use crate::error::{AppError, AppResult};
use crate::services::CodeHostService;

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: String,
    owner: String,
    repo: String,
}

impl GitHubClient {
    pub fn new(api_url: String, token: String, owner: String, repo: String) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            owner,
            repo,
        })
    }

    fn repo_endpoint(&self, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, self.owner, self.repo, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(API_VERSION_HEADER, API_VERSION)
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> AppResult<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|err| AppError::RemoteCreate(format!("{action}: failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::RemoteCreate(format!(
                "{action}: GitHub responded with {status}: {body}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl CodeHostService for GitHubClient {
    async fn find_open_pull_request(&self, head: &str, base: &str) -> AppResult<Option<String>> {
        let url = self.repo_endpoint("pulls");
        let qualified_head = format!("{}:{}", self.owner, head);
        debug!("GET {url} head={qualified_head} base={base}");

        let request = self.http.get(&url).query(&[
            ("head", qualified_head.as_str()),
            ("base", base),
            ("state", "open"),
        ]);
        let action = format!("failed to list PRs from {head} to {base}");
        let pulls: Vec<GitHubPullRequest> = self
            .send(request, &action)
            .await?
            .json()
            .await
            .map_err(|err| AppError::RemoteCreate(format!("{action}: invalid response: {err}")))?;

        Ok(pulls.into_iter().next().map(|pull| pull.html_url))
    }

    async fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> AppResult<CreatedPullRequest> {
        let url = self.repo_endpoint("pulls");
        debug!("POST {url}");

        let request = self.http.post(&url).json(&GitHubCreatePullRequest {
            title,
            head,
            base,
            body,
        });
        let action = format!("failed to create PR from {head} to {base}");
        let pull: GitHubPullRequest = self
            .send(request, &action)
            .await?
            .json()
            .await
            .map_err(|err| AppError::RemoteCreate(format!("{action}: invalid response: {err}")))?;

        Ok(CreatedPullRequest {
            number: pull.number,
            url: pull.html_url,
        })
    }

    async fn add_label(&self, number: u64, label: &str) -> AppResult<()> {
        let url = self.repo_endpoint(&format!("issues/{number}/labels"));
        debug!("POST {url}");

        let request = self.http.post(&url).json(&GitHubLabels {
            labels: vec![label],
        });
        self.send(request, &format!("failed to add label \"{label}\" to PR #{number}"))
            .await?;
        Ok(())
    }

    async fn request_reviewers(&self, number: u64, reviewers: &[String]) -> AppResult<()> {
        let url = self.repo_endpoint(&format!("pulls/{number}/requested_reviewers"));
        debug!("POST {url}");

        let request = self.http.post(&url).json(&GitHubReviewers { reviewers });
        self.send(request, &format!("failed to request reviewers on PR #{number}"))
            .await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct GitHubPullRequest {
    number: u64,
    html_url: String,
}

#[derive(Serialize)]
struct GitHubCreatePullRequest<'a> {
    title: &'a str,
    head: &'a str,
    base: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct GitHubLabels<'a> {
    labels: Vec<&'a str>,
}

#[derive(Serialize)]
struct GitHubReviewers<'a> {
    reviewers: &'a [String],
}
