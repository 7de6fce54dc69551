use regex::{Regex, RegexBuilder};
use std::fmt;

/// Scrubs credentials out of text before it is logged.
///
/// Provider error bodies and transport errors are logged verbatim on clone
/// failure; these patterns remove anything that looks like the Jira
/// credentials or a generic secret field.
#[derive(Clone)]
pub struct SecretScrubber {
    atlassian_token_pattern: Regex,
    basic_auth_pattern: Regex,
    bearer_pattern: Regex,
    token_field_pattern: Regex,
    password_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new secret scrubber
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // Atlassian API tokens: ATATT3xFfGF0...
            atlassian_token_pattern: Regex::new(r"ATATT[A-Za-z0-9_\-=]{16,}")?,
            // Authorization: Basic <base64 email:token>
            basic_auth_pattern: Regex::new(r"Basic\s+[A-Za-z0-9+/]{16,}={0,2}")?,
            bearer_pattern: Regex::new(r"Bearer\s+[A-Za-z0-9\-_\.]+")?,
            token_field_pattern: RegexBuilder::new(
                r#"(?P<name>["']?(?:api_token|apitoken|api_key|apikey|token|secret)["']?\s*[:=]\s*)["']?[A-Za-z0-9_\-\.=]{8,}["']?"#,
            )
            .case_insensitive(true)
            .build()?,
            password_pattern: Regex::new(r#"(?P<name>["']?password["']?\s*[:=]\s*)["']?[^"'\s,}]+["']?"#)?,
        })
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self
            .atlassian_token_pattern
            .replace_all(message, "[API_TOKEN_REDACTED]");
        let scrubbed = self
            .basic_auth_pattern
            .replace_all(&scrubbed, "Basic [CREDENTIALS_REDACTED]");
        let scrubbed = self
            .bearer_pattern
            .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]");
        let scrubbed = self
            .token_field_pattern
            .replace_all(&scrubbed, "${name}[REDACTED]");
        self.password_pattern
            .replace_all(&scrubbed, "${name}[REDACTED]")
            .into_owned()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
