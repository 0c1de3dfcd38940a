use std::io::{self, Write};

use crate::error::AppResult;
use crate::services::InputProvider;

/// Reads one trimmed line from stdin per prompt.
pub struct StdinPrompt;

impl InputProvider for StdinPrompt {
    fn prompt(&self, message: &str) -> AppResult<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{message}")?;
        stdout.flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}
