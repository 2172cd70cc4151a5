//! Error types for popfx.
//!
//! Very little here can fail at runtime: an unavailable surface is a no-op
//! and a stale frame callback is discarded. The one fallible operation is
//! resolving a style selector supplied by the caller, where an unknown
//! value means the two sides of the integration disagree about the style
//! set and the mismatch should surface immediately.

use std::fmt;

/// Error returned when a style or selector string is not recognized.
///
/// The message lists what the failing entry point accepts:
/// [`Style`](crate::Style) parses `"game"` and `"media"`, while
/// [`parse_selector`](crate::parse_selector) also takes `"none"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStyleError {
    selector: String,
    none_accepted: bool,
}

impl ParseStyleError {
    pub(crate) fn unknown_style(selector: &str) -> Self {
        Self {
            selector: selector.to_owned(),
            none_accepted: false,
        }
    }

    pub(crate) fn unknown_selector(selector: &str) -> Self {
        Self {
            selector: selector.to_owned(),
            none_accepted: true,
        }
    }

    /// The selector string that failed to parse.
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl fmt::Display for ParseStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.none_accepted {
            write!(
                f,
                "Unknown burst selector {:?}. Expected \"game\", \"media\" or \"none\".",
                self.selector
            )
        } else {
            write!(
                f,
                "Unknown burst style {:?}. Expected \"game\" or \"media\".",
                self.selector
            )
        }
    }
}

impl std::error::Error for ParseStyleError {}
