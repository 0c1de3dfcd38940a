pub mod branch;
pub mod pull_request;
pub mod ticket;
