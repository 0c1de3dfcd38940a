use crate::domain::ticket::is_ticket_key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName(pub String);

impl BranchName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The branch itself, when it is named after a ticket.
    pub fn ticket_key(&self, prefix: &str) -> Option<String> {
        is_ticket_key(&self.0, prefix).then(|| self.0.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTrack {
    Master,
    Preprod,
}

impl ReviewTrack {
    pub fn base_branch(&self) -> &'static str {
        match self {
            ReviewTrack::Master => "master",
            ReviewTrack::Preprod => "preprod",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReviewTrack::Master => "to master",
            ReviewTrack::Preprod => "to preprod",
        }
    }
}
