// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Uniform response objects.
//!
//! Every client operation resolves to a [`Response`], whatever happened on
//! the wire. Problems reported by the service travel in [`Response::errors`];
//! transport failures and unreadable bodies are converted into a single
//! synthesized "application configuration error" problem. Callers that want
//! `Result` semantics opt in through [`Problems::raise`].

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{InfoHubError, Result};
use crate::types::Problem;

// ---------------------------------------------------------------------------
// Problems
// ---------------------------------------------------------------------------

/// The problem records of a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Problems(Vec<Problem>);

impl Problems {
    /// Wrap a list of problem records.
    pub fn new(problems: Vec<Problem>) -> Self {
        Self(problems)
    }

    /// Whether any problem is present.
    pub fn any_problems(&self) -> bool {
        !self.0.is_empty()
    }

    /// Aggregate all problems into one error, or `None` when there are none.
    ///
    /// Each problem renders as `message (key value, ...)`; problems are joined
    /// with `"; "`, the first letter is capitalized and a period appended.
    pub fn to_error(&self) -> Option<InfoHubError> {
        if self.0.is_empty() {
            return None;
        }
        let joined = self
            .0
            .iter()
            .map(format_problem)
            .collect::<Vec<_>>()
            .join("; ");
        Some(InfoHubError::Problems {
            message: format!("{}.", capitalize(&joined)),
            problems: self.0.clone(),
        })
    }

    /// `Ok(())` when there are no problems, otherwise the aggregated error.
    pub fn raise(&self) -> Result<()> {
        match self.to_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Consume the wrapper, returning the problem records.
    pub fn into_inner(self) -> Vec<Problem> {
        self.0
    }
}

impl Deref for Problems {
    type Target = [Problem];

    fn deref(&self) -> &[Problem] {
        &self.0
    }
}

impl From<Vec<Problem>> for Problems {
    fn from(problems: Vec<Problem>) -> Self {
        Self(problems)
    }
}

fn format_problem(problem: &Problem) -> String {
    let info: Vec<String> = problem
        .info
        .iter()
        .flatten()
        .map(|(key, value)| format!("{key} {}", render_info_value(value)))
        .collect();
    if info.is_empty() {
        problem.message.clone()
    } else {
        format!("{} ({})", problem.message, info.join(", "))
    }
}

fn render_info_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Normalized result of a client operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Result entities; empty when the service omitted them.
    #[serde(default)]
    pub entities: Vec<Value>,
    /// Reported problems; empty on success.
    #[serde(default)]
    pub errors: Problems,
    /// All other top-level fields (cursor metadata, `schemas`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Response {
    /// Whether the response carries any problem.
    pub fn any_problems(&self) -> bool {
        self.errors.any_problems()
    }

    /// Response holding a single application-configuration-error problem.
    pub fn application_config_error(fault: impl Into<String>) -> Self {
        Self {
            entities: Vec::new(),
            errors: Problems(vec![Problem::application_config_error(fault)]),
            extra: Map::new(),
        }
    }

    /// Normalize a transport outcome.
    ///
    /// - `Err(e)`: one configuration problem whose fault is `e`.
    /// - `Ok(None)`: an empty, problem-free response.
    /// - `Ok(Some(Value::String(s)))`: a plain diagnostic body, treated as a
    ///   fault.
    /// - `Ok(Some(object))`: decoded field by field (see
    ///   [`Response::from_object`]).
    /// - Anything else is a fault describing the unexpected body.
    pub fn from_outcome(outcome: Result<Option<Value>>) -> Self {
        match outcome {
            Err(err) => Self::application_config_error(err.to_string()),
            Ok(None) => Self::default(),
            Ok(Some(Value::String(diagnostic))) => Self::application_config_error(diagnostic),
            Ok(Some(Value::Object(fields))) => Self::from_object(fields),
            Ok(Some(other)) => Self::application_config_error(format!(
                "unexpected response body: {other}"
            )),
        }
    }

    /// Normalize a JSON object body.
    ///
    /// `entities` that is absent, `null`, or not an array becomes empty.
    /// `errors` that is absent or `null` becomes empty; each array item that
    /// is not a valid problem record, or a non-array `errors` value, becomes
    /// a configuration problem carrying the raw value, so a reported failure
    /// is never lost. Every other field lands in `extra`.
    pub fn from_object(mut fields: Map<String, Value>) -> Self {
        let entities = match fields.remove("entities") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                warn!(value = %other, "Ignoring non-array entities field");
                Vec::new()
            }
        };

        let errors = match fields.remove("errors") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(records)) => records.into_iter().map(decode_problem).collect(),
            Some(other) => vec![malformed_problem(other)],
        };

        Self {
            entities,
            errors: Problems(errors),
            extra: fields,
        }
    }
}

fn decode_problem(record: Value) -> Problem {
    match serde_json::from_value(record.clone()) {
        Ok(problem) => problem,
        Err(_) => malformed_problem(record),
    }
}

fn malformed_problem(raw: Value) -> Problem {
    warn!(value = %raw, "Malformed problem record");
    Problem::application_config_error(format!("malformed problem record: {raw}"))
}
