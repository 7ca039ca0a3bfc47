// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! # InfoHub Client
//!
//! A Rust client library for the Information Hub Data API, a remote entity,
//! link, and schema store. Every operation issues one HTTP round trip and
//! resolves to a normalized [`response::Response`]; transport failures are
//! folded into the response as problems instead of being returned as errors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use infohub_client::client::InfoHubClient;
//! use infohub_client::config::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> infohub_client::error::Result<()> {
//!     let client = InfoHubClient::new(ClientConfig::from_env())?;
//!     let response = client.get_entity("e-42", None).await;
//!     response.errors.raise()?;
//!     println!("{:?}", response.entities);
//!
//!     let schemas = client.get_schemas(true).await;
//!     for (name, schema) in schemas.iter() {
//!         println!("{name}: {} reverse links", schema.links_reverse.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client`] — Client construction, schema cache slot, request dispatch.
//! - [`config`] — Per-instance configuration (base URL, timeout).
//! - [`transport`] — The `Transport` seam and its `reqwest` implementation.
//! - [`query`] — Query-string assembly from selection/attribute/cursor parameters.
//! - [`response`] — Uniform response and problem-list wrappers.
//! - [`types`] — Wire types: schemas, links, problems.
//! - [`reverse_links`] — Derivation of the reverse-link index from schema metadata.
//! - [`entity`] — Entity CRUD operations.
//! - [`link`] — Link creation.
//! - [`schema`] — Schema retrieval with caching.
//! - [`error`] — Error types and the crate-level `Result` alias.

pub mod client;
pub mod config;
pub mod transport;
pub mod query;
pub mod response;
pub mod types;
pub mod reverse_links;
pub mod entity;
pub mod link;
pub mod schema;
pub mod error;
