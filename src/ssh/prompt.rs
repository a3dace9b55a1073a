//! IOS prompt recognition and transcript helpers.

use regex_lite::Regex;
use std::sync::OnceLock;

/// Error markers IOS prints when it rejects a line
const CLI_ERROR_MARKERS: &[&str] = &["% Invalid", "% Incomplete", "% Ambiguous", "% Unknown"];

/// CLI mode implied by the prompt suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// `host>`
    User,
    /// `host#`
    Privileged,
    /// `host(config...)#`
    Config,
}

/// A prompt found at the end of device output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub hostname: String,
    pub mode: PromptMode,
}

fn prompt_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9][A-Za-z0-9_.\-]*)(\(([A-Za-z0-9_.\-]+)\))?([>#])$")
            .expect("prompt regex is valid")
    })
}

/// Last non-blank line of the output, with surrounding whitespace removed
fn last_line(output: &str) -> Option<&str> {
    output
        .trim_end()
        .rsplit(['\n', '\r'])
        .map(str::trim)
        .find(|line| !line.is_empty())
}

/// Parse the prompt ending the output, if the output ends with one
pub fn parse_prompt(output: &str) -> Option<Prompt> {
    let line = last_line(output)?;
    let caps = prompt_regex().captures(line)?;

    let mode = match (&caps.get(2), &caps[4]) {
        (_, ">") => PromptMode::User,
        (Some(_), _) => PromptMode::Config,
        (None, _) => PromptMode::Privileged,
    };

    Some(Prompt {
        text: line.to_string(),
        hostname: caps[1].to_string(),
        mode,
    })
}

/// True if the device is waiting for a password (e.g. after `enable`)
pub fn is_password_prompt(output: &str) -> bool {
    last_line(output).is_some_and(|line| line.to_ascii_lowercase().ends_with("password:"))
}

/// Lines where IOS rejected input
pub fn cli_errors(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| CLI_ERROR_MARKERS.iter().any(|m| line.starts_with(m)))
        .map(str::to_string)
        .collect()
}

/// Normalize PTY line endings to `\n`
pub fn normalize_output(output: &str) -> String {
    output.replace("\r\n", "\n").replace('\r', "")
}
