mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
#[cfg(test)]
mod testing;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::open::{self, OpenCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;
use crate::infra::jira::JiraClient;
use crate::infra::prompt::StdinPrompt;

#[derive(Parser)]
#[command(
    name = "prdouble",
    author,
    version,
    about = "Open master and preprod pull requests for a Jira ticket"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open or reuse both pull requests and report them on the ticket (default).
    Open(OpenArgs),
    /// Inspect CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args, Default)]
struct OpenArgs {
    /// Head branch; prompted for when omitted.
    #[arg(short, long)]
    branch: Option<String>,
    /// Jira ticket key; derived from the branch or prompted for when omitted.
    #[arg(short, long)]
    ticket: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> AppResult<()> {
    match cli.command.unwrap_or(Commands::Open(OpenArgs::default())) {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Open(args) => run_open(args).await,
    }
}

async fn run_open(args: OpenArgs) -> AppResult<()> {
    let config = AppConfig::from_env()?;

    let code_host = Arc::new(GitHubClient::new(
        config.github_api_url.clone(),
        config.github_token.clone(),
        config.repo_owner.clone(),
        config.repo.clone(),
    )?);
    let issue_tracker = Arc::new(JiraClient::new(
        config.jira_base_url.clone(),
        config.me.clone(),
        config.jira_token.clone(),
    ));

    let context = AppContext::new(config, code_host, issue_tracker, Arc::new(StdinPrompt));

    open::run(
        &context,
        OpenCommandArgs {
            branch: args.branch,
            ticket: args.ticket,
        },
        &mut std::io::stdout(),
    )
    .await?;

    Ok(())
}
