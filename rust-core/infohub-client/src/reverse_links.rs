// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Reverse-link index derivation.
//!
//! Schemas only declare their outgoing relations. For navigation in both
//! directions, every schema also needs to know which schemas point at it and
//! under which relation type. [`build_reverse_links`] derives that view:
//!
//! - one reverse entry per (target schema, relation type) pair;
//! - the entry is a copy of the first forward link seen for the pair, with
//!   `targetType` replaced by the list of source schema names;
//! - further sources declaring the same pair are appended to that list, in
//!   scan order, without deduplication.
//!
//! The scan order is schema map order × forward link order × target list
//! order, and a target's reverse entries appear in the order their relation
//! type was first seen. Mix-in schemas listed in [`SKIPPED_SOURCE_SCHEMAS`]
//! are never scanned as sources, though they can still receive reverse links.

use indexmap::IndexMap;
use tracing::debug;

use crate::types::{Link, SchemaMap, TargetType};

/// Base mix-in schemas whose forward links do not describe navigable
/// relations and are therefore not scanned.
pub const SKIPPED_SOURCE_SCHEMAS: [&str; 3] = ["cc:common", "cc:common-resource", "cc:comment"];

/// Whether `type_name` is scanned for forward links.
pub fn is_link_source(type_name: &str) -> bool {
    !SKIPPED_SOURCE_SCHEMAS.contains(&type_name)
}

/// Populate `links_reverse` on every schema in `schemas`.
///
/// Any previous `links_reverse` content is discarded first, so the index is
/// always derived from the forward links alone. Links that target a type
/// absent from the map are dropped silently.
///
/// Returns `schemas` for chaining.
pub fn build_reverse_links(schemas: &mut SchemaMap) -> &mut SchemaMap {
    // target type -> relation type -> accumulated reverse link
    let mut reversed: IndexMap<String, IndexMap<String, Link>> = schemas
        .keys()
        .map(|name| (name.clone(), IndexMap::new()))
        .collect();

    for (source, schema) in schemas.iter() {
        if !is_link_source(source) {
            continue;
        }
        for link in &schema.links {
            for target in link.target_type.as_slice() {
                let Some(relations) = reversed.get_mut(target) else {
                    debug!(%source, %target, relation = %link.relation, "Dropping link to unknown schema");
                    continue;
                };
                match relations.get_mut(&link.relation) {
                    Some(existing) => {
                        if let TargetType::Many(sources) = &mut existing.target_type {
                            sources.push(source.clone());
                        }
                    }
                    None => {
                        let mut entry = link.clone();
                        entry.target_type = TargetType::Many(vec![source.clone()]);
                        relations.insert(link.relation.clone(), entry);
                    }
                }
            }
        }
    }

    for schema in schemas.values_mut() {
        schema.links_reverse.clear();
    }
    for (target, relations) in reversed {
        if let Some(schema) = schemas.get_mut(&target) {
            schema.links_reverse.extend(relations.into_values());
        }
    }

    schemas
}
