//! Domain errors for the epic cloner.

use serde_json::Value;
use thiserror::Error;

/// Errors raised by an [`IssueTracker`](crate::domain::ports::IssueTracker).
///
/// These are never reinterpreted by the services; the clone orchestrator
/// wraps them in a [`CloneError`] and the HTTP boundary turns them into a
/// response.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The request never got a response (connect, TLS, timeout).
    #[error("{operation} request failed: {message}")]
    Transport {
        /// Tracker operation that failed
        operation: &'static str,
        /// Client error text
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("{operation} returned {status}: {body}")]
    Api {
        /// Tracker operation that failed
        operation: &'static str,
        /// HTTP status code
        status: u16,
        /// Provider error payload. JSON when the body parsed, a string otherwise.
        body: Value,
    },

    /// A success response could not be decoded.
    #[error("{operation} parse failed: {message}")]
    Decode {
        /// Tracker operation that failed
        operation: &'static str,
        /// Decoder error text
        message: String,
    },
}

/// Result of an issue tracker call.
pub type TrackerResult<T> = Result<T, TrackerError>;

impl TrackerError {
    /// Best-effort diagnostic detail: the provider's error body when one
    /// was returned, the error message otherwise.
    pub fn details(&self) -> Value {
        match self {
            Self::Api { body, .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }

    /// HTTP status returned by the provider, if the call got that far.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Message returned to callers that omit a required clone field.
pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: templateEpicKey, targetProjectKey, newEpicSummary";

/// Failure of a whole clone, naming the stage that failed.
///
/// Remote work done before the failure is not rolled back; the variants
/// carry whatever was already created so it can be logged.
#[derive(Debug, Error)]
pub enum CloneError {
    /// Request fields that were missing or blank, by wire name.
    #[error("Missing required fields: templateEpicKey, targetProjectKey, newEpicSummary")]
    MissingFields(Vec<&'static str>),

    /// The new epic could not be created; nothing was created.
    #[error("Failed to create epic in project {project_key}: {source}")]
    EpicCreation {
        /// Project the epic was created in
        project_key: String,
        /// Provider error
        source: TrackerError,
    },

    /// The epic was created but its template's children could not be listed.
    #[error("Failed to fetch children of {template_epic_key} (new epic {new_epic_key} already created): {source}")]
    ChildFetch {
        /// Epic whose children were queried
        template_epic_key: String,
        /// Epic created before the failure
        new_epic_key: String,
        /// Provider error
        source: TrackerError,
    },

    /// A child copy failed; earlier copies remain.
    #[error(
        "Failed to clone child {template_child_key} under {new_epic_key} ({} created before failure): {source}",
        created_children.len()
    )]
    ChildCreation {
        /// Epic created before the failure
        new_epic_key: String,
        /// Template child whose copy failed
        template_child_key: String,
        /// Copies created before the failure, in template order
        created_children: Vec<String>,
        /// Provider error
        source: TrackerError,
    },
}

impl CloneError {
    /// True when the caller's input was at fault and no remote call was made.
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingFields(_))
    }

    /// The provider error behind this failure, if any.
    pub const fn tracker_error(&self) -> Option<&TrackerError> {
        match self {
            Self::MissingFields(_) => None,
            Self::EpicCreation { source, .. }
            | Self::ChildFetch { source, .. }
            | Self::ChildCreation { source, .. } => Some(source),
        }
    }

    /// Diagnostic detail for the caller.
    pub fn details(&self) -> Value {
        self.tracker_error()
            .map_or_else(|| Value::String(self.to_string()), TrackerError::details)
    }

    /// Key of the epic created before the failure, if one was.
    pub fn new_epic_key(&self) -> Option<&str> {
        match self {
            Self::ChildFetch { new_epic_key, .. } | Self::ChildCreation { new_epic_key, .. } => {
                Some(new_epic_key)
            }
            Self::MissingFields(_) | Self::EpicCreation { .. } => None,
        }
    }

    /// Children created before the failure, in template order.
    pub fn created_children(&self) -> &[String] {
        match self {
            Self::ChildCreation {
                created_children, ..
            } => created_children,
            _ => &[],
        }
    }
}
