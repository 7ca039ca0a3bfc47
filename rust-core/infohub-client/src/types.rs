// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Wire types for the Information Hub Data API.
//!
//! Entities are opaque JSON objects and are not modelled here. Schemas, links
//! and problems are typed, but every struct keeps unrecognised fields in an
//! ordered `extra` map so they survive a round trip untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message of the problem synthesized when the transport fails outright.
pub const APPLICATION_CONFIG_ERROR_MESSAGE: &str = "application configuration error";

/// Code of the problem synthesized when the transport fails outright.
pub const APPLICATION_CONFIG_ERROR_CODE: i64 = 82;

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// Target of a link: one schema type name or several.
///
/// Only used at the wire boundary; everything downstream works with
/// [`TargetType::as_slice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetType {
    /// A single target type name.
    One(String),
    /// Several target type names, in declaration order.
    Many(Vec<String>),
}

impl TargetType {
    /// The target names as a slice, wrapping a single name.
    pub fn as_slice(&self) -> &[String] {
        match self {
            TargetType::One(name) => std::slice::from_ref(name),
            TargetType::Many(names) => names,
        }
    }
}

impl From<&str> for TargetType {
    fn from(name: &str) -> Self {
        TargetType::One(name.to_string())
    }
}

impl From<Vec<String>> for TargetType {
    fn from(names: Vec<String>) -> Self {
        TargetType::Many(names)
    }
}

/// A relation declared on a schema.
///
/// On a forward link `target_type` names the schemas the relation points at.
/// On a reverse link (see [`Schema::links_reverse`]) it names the *source*
/// schemas that declared the relation, always as [`TargetType::Many`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Relation type name.
    #[serde(rename = "type")]
    pub relation: String,
    /// Target (or, on a reverse link, source) schema type names.
    #[serde(rename = "targetType")]
    pub target_type: TargetType,
    /// Additional link metadata, carried through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Link {
    /// Forward link with no extra metadata.
    pub fn new(relation: impl Into<String>, target_type: impl Into<TargetType>) -> Self {
        Self {
            relation: relation.into(),
            target_type: target_type.into(),
            extra: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

/// Metadata describing one entity type and its declared relations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique schema type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Forward links, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// Reverse links, computed by [`crate::reverse_links::build_reverse_links`].
    #[serde(rename = "linksReverse", default)]
    pub links_reverse: Vec<Link>,
    /// Remaining schema fields (attributes, indexes, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema {
    /// Schema with the given forward links and nothing else.
    pub fn new(type_name: impl Into<String>, links: Vec<Link>) -> Self {
        Self {
            type_name: type_name.into(),
            links,
            links_reverse: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Schemas keyed by type name, in the order the service listed them.
pub type SchemaMap = IndexMap<String, Schema>;

// ---------------------------------------------------------------------------
// Problems
// ---------------------------------------------------------------------------

/// A single failure condition reported in a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Human-readable description.
    pub message: String,
    /// Contextual fields, rendered as `key value` pairs in aggregated messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Map<String, Value>>,
    /// Numeric problem code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Any other fields the service attached.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Problem {
    /// The application-configuration-error problem, carrying `fault` as its
    /// only info field.
    pub fn application_config_error(fault: impl Into<String>) -> Self {
        let mut info = Map::new();
        info.insert("fault".to_string(), Value::String(fault.into()));
        Self {
            message: APPLICATION_CONFIG_ERROR_MESSAGE.to_string(),
            info: Some(info),
            code: Some(APPLICATION_CONFIG_ERROR_CODE),
            extra: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRequest {
    /// Relation type name.
    #[serde(rename = "type")]
    pub relation: String,
    /// Source entity id.
    pub source: String,
    /// Target entity id.
    pub target: String,
}
