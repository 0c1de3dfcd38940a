use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{CodeHostService, InputProvider, IssueTrackerService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub code_host: Arc<dyn CodeHostService>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub input: Arc<dyn InputProvider>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        code_host: Arc<dyn CodeHostService>,
        issue_tracker: Arc<dyn IssueTrackerService>,
        input: Arc<dyn InputProvider>,
    ) -> Self {
        Self {
            config,
            code_host,
            issue_tracker,
            input,
        }
    }
}
