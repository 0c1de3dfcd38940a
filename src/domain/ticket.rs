/// Returns true when `candidate` is exactly `{prefix}-{digits}`.
pub fn is_ticket_key(candidate: &str, prefix: &str) -> bool {
    let tokens = candidate.split('-').collect::<Vec<_>>();
    match tokens.as_slice() {
        [head, number] => {
            *head == prefix && !number.is_empty() && number.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketInfo {
    pub key: String,
    pub title: String,
}
