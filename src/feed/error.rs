//! Error handling for the feed module

use crate::consts::cli_consts::http::MAX_ERROR_BODY_CHARS;
use crate::logging::LogLevel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// Reading a document from a local data directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The body is not well-formed JSON.
    #[error("Malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body is valid JSON but not an array.
    #[error("Expected a JSON array, found {found}")]
    NotAList { found: &'static str },
}

impl FeedError {
    pub async fn from_response(response: reqwest::Response) -> FeedError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        FeedError::Http {
            status: status.as_u16(),
            message: summarize_body(&body, status.canonical_reason()),
        }
    }

    /// Log level used when this failure degrades a collection to empty.
    pub fn log_level(&self) -> LogLevel {
        match self {
            // Missing document or temporary server issue
            FeedError::Http { status, .. } if *status == 404 => LogLevel::Warn,
            FeedError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,
            // Anything else the server refuses is a configuration problem
            FeedError::Http { .. } => LogLevel::Error,
            FeedError::Reqwest(_) | FeedError::Io(_) => LogLevel::Warn,
            FeedError::Parse(_) | FeedError::NotAList { .. } => LogLevel::Warn,
        }
    }
}

/// Short single-line form of an error body for the activity log. Markup
/// pages are replaced by the status reason.
fn summarize_body(body: &str, reason: Option<&str>) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() || collapsed.starts_with('<') {
        return reason.unwrap_or("no details").to_string();
    }
    if collapsed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return collapsed;
    }
    let mut short: String = collapsed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_by_status() {
        let http = |status| FeedError::Http {
            status,
            message: String::new(),
        };
        assert_eq!(http(404).log_level(), LogLevel::Warn);
        assert_eq!(http(503).log_level(), LogLevel::Warn);
        assert_eq!(http(401).log_level(), LogLevel::Error);
        assert_eq!(
            FeedError::NotAList { found: "object" }.log_level(),
            LogLevel::Warn
        );
    }

    #[test]
    fn test_display_messages() {
        let err = FeedError::NotAList { found: "object" };
        assert_eq!(err.to_string(), "Expected a JSON array, found object");
        let err = FeedError::Http {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error with status 500: boom");
    }

    #[test]
    fn test_error_body_is_summarized() {
        let page = "<!DOCTYPE html>\n<html><head><title>404</title></head><body>...</body></html>";
        assert_eq!(summarize_body(page, Some("Not Found")), "Not Found");
        assert_eq!(summarize_body("  ", None), "no details");
        assert_eq!(
            summarize_body("rate\n  limited", Some("Too Many Requests")),
            "rate limited"
        );

        let long = "x".repeat(MAX_ERROR_BODY_CHARS + 50);
        let short = summarize_body(&long, None);
        assert_eq!(short.len(), MAX_ERROR_BODY_CHARS + 3);
        assert!(short.ends_with("..."));
    }
}
