pub mod github;
pub mod jira;
pub mod prompt;
