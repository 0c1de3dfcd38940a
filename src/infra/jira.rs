use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, Url,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::branch::ReviewTrack;
use crate::domain::pull_request::{PullRequestLinks, PullRequestUpsertResult};
use crate::domain::ticket::TicketInfo;
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

pub struct JiraClient {
    http: Client,
    base_url: String,
    email: String,
    token: String,
}

impl JiraClient {
    pub fn new(base_url: String, email: String, token: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            email,
            token,
        }
    }

    fn auth_header(email: &str, token: &str) -> String {
        let credentials = format!("{email}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    /// Issue URL with `key` and any trailing `segments` percent-encoded.
    fn issue_endpoint(&self, key: &str, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|err| {
            AppError::Configuration(format!("invalid Jira base URL {}: {err}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Configuration(format!("invalid Jira base URL {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["rest", "api", "3", "issue", key])
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn fetch_ticket(&self, key: &str) -> AppResult<TicketInfo> {
        let fetch_error = |detail: String| AppError::RemoteFetch {
            key: key.to_string(),
            detail,
        };

        let url = self.issue_endpoint(key, &[])?;
        debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, Self::auth_header(&self.email, &self.token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| fetch_error(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unable to read response>".to_string());

        let payload = serde_json::from_str::<JiraIssueResponse>(&body)
            .map_err(|_| fetch_error(format!("Jira responded with {status}: {body}")))?;
        if !status.is_success() || !payload.error_messages.is_empty() {
            return Err(fetch_error(format!("Jira responded with {status}: {body}")));
        }

        let title = payload
            .fields
            .and_then(|fields| fields.summary)
            .ok_or_else(|| fetch_error(format!("issue has no summary: {body}")))?;

        Ok(TicketInfo {
            key: key.to_string(),
            title,
        })
    }

    async fn post_pull_request_comment(
        &self,
        key: &str,
        links: &PullRequestLinks,
    ) -> AppResult<()> {
        info!("Adding comment to Jira ticket {key}...");

        let url = self.issue_endpoint(key, &["comment"])?;
        debug!("POST {url}");
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, Self::auth_header(&self.email, &self.token))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&JiraComment::pull_requests(key, links))
            .send()
            .await
            .map_err(|err| AppError::RemoteCreate(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::RemoteCreate(format!(
                "failed to comment on Jira ticket {key}, Jira responded with {status}: {body}"
            )));
        }

        info!("Comment added");
        Ok(())
    }
}

#[derive(Deserialize)]
struct JiraIssueResponse {
    #[serde(rename = "errorMessages", default)]
    error_messages: Vec<String>,
    fields: Option<JiraIssueFields>,
}

#[derive(Deserialize)]
struct JiraIssueFields {
    summary: Option<String>,
}

/// Comment body in Atlassian document format.
#[derive(Serialize)]
struct JiraComment {
    body: JiraDocument,
}

impl JiraComment {
    fn pull_requests(key: &str, links: &PullRequestLinks) -> Self {
        Self {
            body: JiraDocument {
                doc_type: "doc",
                version: 1,
                content: vec![
                    JiraDocNode::pull_request_link(key, ReviewTrack::Master, &links.master),
                    JiraDocNode::pull_request_link(key, ReviewTrack::Preprod, &links.preprod),
                ],
            },
        }
    }
}

#[derive(Serialize)]
struct JiraDocument {
    #[serde(rename = "type")]
    doc_type: &'static str,
    version: u8,
    content: Vec<JiraDocNode>,
}

#[derive(Serialize)]
struct JiraDocNode {
    #[serde(rename = "type")]
    node_type: &'static str,
    content: Vec<JiraDocText>,
}

impl JiraDocNode {
    fn pull_request_link(key: &str, track: ReviewTrack, result: &PullRequestUpsertResult) -> Self {
        let base = track.base_branch();
        let existing = if result.was_preexisting {
            " (existing)"
        } else {
            ""
        };
        Self {
            node_type: "paragraph",
            content: vec![JiraDocText {
                text_type: "text",
                text: format!("PR to {base}{existing}: {}", result.url),
                marks: vec![JiraMark {
                    mark_type: "link",
                    attrs: JiraLinkAttrs {
                        href: result.url.clone(),
                        title: format!("GitHub PR to {base} for Jira ticket {key}"),
                    },
                }],
            }],
        }
    }
}

#[derive(Serialize)]
struct JiraDocText {
    #[serde(rename = "type")]
    text_type: &'static str,
    text: String,
    marks: Vec<JiraMark>,
}

#[derive(Serialize)]
struct JiraMark {
    #[serde(rename = "type")]
    mark_type: &'static str,
    attrs: JiraLinkAttrs,
}

#[derive(Serialize)]
struct JiraLinkAttrs {
    href: String,
    title: String,
}
