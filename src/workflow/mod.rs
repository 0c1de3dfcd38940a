pub mod pull_requests;
