pub mod code_host;
pub mod input;
pub mod issue_tracker;

pub use code_host::CodeHostService;
pub use input::InputProvider;
pub use issue_tracker::IssueTrackerService;
