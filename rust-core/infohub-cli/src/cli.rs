// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>
//!
//! Argument definitions and command execution for `infohub`.

use std::time::Duration;

use clap::{Parser, Subcommand};
use infohub_client::client::InfoHubClient;
use infohub_client::config::ClientConfig;
use infohub_client::query::Params;
use infohub_client::response::Response;
use serde_json::Value;

/// Version string, pulled from Cargo.toml at compile time.
const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

/// infohub — command-line access to the Information Hub Data API.
#[derive(Parser, Debug)]
#[command(name = "infohub", version = VERSION, about = "Information Hub Data API client")]
pub struct Cli {
    /// Base URL of the Data API (defaults to $INFOHUB_BASE_URL, then
    /// http://localhost/dataapi/).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (defaults to $INFOHUB_TIMEOUT_SECS, then 30).
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get one entity by id.
    Get {
        id: String,
        /// Attribute parameters, as a JSON object.
        #[arg(long, value_parser = parse_params)]
        attrs: Option<Params>,
    },
    /// List entities matching selection parameters.
    List {
        /// Selection parameters, as a JSON object.
        #[arg(long, value_parser = parse_params)]
        sel: Option<Params>,
        /// Attribute parameters, as a JSON object.
        #[arg(long, value_parser = parse_params)]
        attrs: Option<Params>,
        /// Cursor parameters, as a JSON object.
        #[arg(long, value_parser = parse_params)]
        cursor: Option<Params>,
    },
    /// Create an entity from a JSON object.
    Create {
        #[arg(value_parser = parse_params)]
        entity: Params,
    },
    /// Update an entity from a JSON object.
    Update {
        id: String,
        #[arg(value_parser = parse_params)]
        entity: Params,
    },
    /// Delete one entity by id.
    Delete { id: String },
    /// Delete every entity matching selection parameters.
    DeleteMany {
        /// Selection parameters, as a JSON object.
        #[arg(long, value_parser = parse_params)]
        sel: Params,
    },
    /// Link two entities.
    Link {
        /// Relation type.
        relation: String,
        source: String,
        target: String,
    },
    /// Print schemas with their reverse links.
    Schemas {
        /// Only print this schema type.
        #[arg(long = "type")]
        type_name: Option<String>,
    },
}

/// Parse a JSON object argument.
fn parse_params(raw: &str) -> Result<Params, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

impl Cli {
    /// Client configuration: environment first, then command-line overrides.
    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// What a command produced: JSON to print, and an aggregated problem
/// message if the service reported any.
pub struct Outcome {
    pub output: Value,
    pub problem: Option<String>,
}

impl From<Response> for Outcome {
    fn from(response: Response) -> Self {
        let problem = response.errors.to_error().map(|e| e.to_string());
        let output = serde_json::to_value(&response).unwrap_or(Value::Null);
        Self { output, problem }
    }
}

/// Run `command` against `client`.
pub async fn run(client: &InfoHubClient, command: Command) -> Outcome {
    match command {
        Command::Get { id, attrs } => client.get_entity(&id, attrs.as_ref()).await.into(),
        Command::List { sel, attrs, cursor } => client
            .get_entities(sel.as_ref(), attrs.as_ref(), cursor.as_ref())
            .await
            .into(),
        Command::Create { entity } => client.create_entity(&entity).await.into(),
        Command::Update { id, entity } => client.update_entity(&id, &entity).await.into(),
        Command::Delete { id } => client.delete_entity(&id).await.into(),
        Command::DeleteMany { sel } => client.delete_entities(Some(&sel)).await.into(),
        Command::Link {
            relation,
            source,
            target,
        } => client.create_link(&relation, &source, &target).await.into(),
        Command::Schemas { type_name } => {
            let schemas = match client.try_get_schemas(true).await {
                Ok(schemas) => schemas,
                Err(e) => {
                    return Outcome {
                        output: Value::Null,
                        problem: Some(e.to_string()),
                    }
                }
            };
            let output = match type_name {
                Some(name) => match schemas.get(&name) {
                    Some(schema) => serde_json::to_value(schema),
                    None => {
                        return Outcome {
                            output: Value::Null,
                            problem: Some(format!("No schema of type {name}.")),
                        }
                    }
                },
                None => serde_json::to_value(&*schemas),
            };
            Outcome {
                output: output.unwrap_or(Value::Null),
                problem: None,
            }
        }
    }
}
