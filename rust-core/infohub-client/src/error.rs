// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Error types for the InfoHub client.
//!
//! Operations on [`crate::client::InfoHubClient`] never fail at the call
//! boundary; they resolve to a [`crate::response::Response`] whose problems
//! the caller inspects. [`InfoHubError`] shows up in three places: client
//! construction, the transport seam, and the explicit "raise" operations on
//! [`crate::response::Problems`].

use thiserror::Error;

use crate::types::Problem;

/// Error type for InfoHub client operations.
#[derive(Error, Debug)]
pub enum InfoHubError {
    /// One or more problems reported by the service (or synthesized from a
    /// transport failure), aggregated into a single message.
    #[error("{message}")]
    Problems {
        /// Formatted, capitalized, period-terminated message.
        message: String,
        /// The individual problem records the message was built from.
        problems: Vec<Problem>,
    },

    /// An underlying HTTP / network transport error from `reqwest`.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client-side validation failed (e.g. an unparsable base URL).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl InfoHubError {
    /// The problem records behind a [`InfoHubError::Problems`] error; empty
    /// for every other variant.
    pub fn problems(&self) -> &[Problem] {
        match self {
            InfoHubError::Problems { problems, .. } => problems,
            _ => &[],
        }
    }
}

/// Crate-level result alias using [`InfoHubError`].
pub type Result<T> = std::result::Result<T, InfoHubError>;
