use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the resolved configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

fn run_show() -> AppResult<()> {
    let cfg = AppConfig::from_env()?;
    for line in describe(&cfg) {
        println!("{line}");
    }
    Ok(())
}

fn describe(cfg: &AppConfig) -> Vec<String> {
    vec![
        format!("Repository: {}/{}", cfg.repo_owner, cfg.repo),
        format!("GitHub API: {}", cfg.github_api_url),
        format!("GitHub token: {}", mask_secret(&cfg.github_token)),
        format!("Jira base URL: {}", cfg.jira_base_url),
        format!("Jira account: {}", cfg.me),
        format!("Jira token: {}", mask_secret(&cfg.jira_token)),
        format!("Ticket prefix: {}", cfg.ticket_prefix),
        format!("Dev reviewers: {}", display_list(&cfg.dev_reviewers)),
        format!(
            "Scrum master reviewers: {}",
            display_list(&cfg.scrum_master_reviewers)
        ),
    ]
}

fn display_list(values: &[String]) -> String {
    if values.is_empty() {
        "<none>".to_string()
    } else {
        values.join(", ")
    }
}

fn mask_secret(token: &str) -> String {
    let chars = token.chars().collect::<Vec<_>>();
    if chars.len() > 6 {
        let prefix = chars[..3].iter().collect::<String>();
        let suffix = chars[chars.len() - 3..].iter().collect::<String>();
        format!("{prefix}***{suffix}")
    } else {
        "***".to_string()
    }
}
