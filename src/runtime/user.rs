//! User interaction (install confirmation prompt).

use log::debug;

use super::RealRuntime;

use std::io::{self, BufRead, Write};

const ACCEPTED_ANSWERS: [&str; 3] = ["y", "ye", "yes"];

/// Core, testable implementation that reads from any BufRead and writes to any Write.
/// A failed write or read is treated as a refusal; there is no retry.
pub fn confirm_with_io<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> bool {
    if let Err(e) = write!(output, "{} [y/n] ", prompt).and_then(|_| output.flush()) {
        debug!("Failed to write confirmation prompt: {}", e);
    }

    let mut line = String::new();
    if let Err(e) = input.read_line(&mut line) {
        debug!("Failed to read confirmation answer: {}", e);
        return false;
    }

    let answer = line.trim().to_lowercase();
    ACCEPTED_ANSWERS.contains(&answer.as_str())
}

impl RealRuntime {
    pub(crate) fn confirm_impl(&self, prompt: &str) -> bool {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stdin_lock = stdin.lock();
        confirm_with_io(prompt, &mut stdin_lock, &mut stdout)
    }
}
