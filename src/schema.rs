/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The read-only schema-graph interface consumed by the objective builder
//! (`spec.md` §6). The caller holds the schema read lock for the duration of
//! `update_objective`; the planner never acquires or releases it itself.

use std::collections::HashMap;

/// A role edge's shape, used to look up role-specific cardinalities.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// owner ↔ attribute (`has` / `owns`).
    Has,
    /// relation ↔ player via a role (`links` / `plays` / `relates`).
    Links { role: String },
    /// instance ↔ type (`isa` / `sub`).
    Isa,
}

/// A handle to a schema type, giving access to per-type statistics.
pub trait TypeHandle {
    fn instance_count(&self) -> u64;
}

/// Read-only schema-graph statistics consumed by the objective builder.
pub trait SchemaGraph {
    type Handle: TypeHandle;

    /// Look up a type by name (optionally scoped, e.g. by module/namespace).
    fn get_type(&self, name: &str, scope: Option<&str>) -> Option<Self::Handle>;

    fn instance_count(&self, name: &str) -> u64 {
        self.get_type(name, None).map(|t| t.instance_count()).unwrap_or(0)
    }

    fn type_count(&self) -> u64;

    fn attribute_type_count(&self) -> u64;

    /// Expected number of matches when traversing an edge of `kind` forward
    /// from an instance of `from_type` (e.g. mean `has`/role-player count per
    /// owner/relation instance).
    fn edge_cardinality_forward(&self, kind: &EdgeKind, from_type: &str) -> f64;

    /// Expected number of matches when traversing the same edge backward from
    /// an instance of `to_type` (e.g. mean owner/player count per
    /// attribute/player instance).
    fn edge_cardinality_backward(&self, kind: &EdgeKind, to_type: &str) -> f64;
}

/// A simple in-memory schema graph double, used by tests.
#[derive(Clone, Debug, Default)]
pub struct InMemorySchemaGraph {
    pub instance_counts: HashMap<String, u64>,
    pub type_count: u64,
    pub attribute_type_count: u64,
    pub forward_cardinality: HashMap<(EdgeKind, String), f64>,
    pub backward_cardinality: HashMap<(EdgeKind, String), f64>,
}

#[derive(Clone, Copy, Debug)]
pub struct InMemoryTypeHandle {
    count: u64,
}

impl TypeHandle for InMemoryTypeHandle {
    fn instance_count(&self) -> u64 {
        self.count
    }
}

impl InMemorySchemaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instance_count(mut self, type_name: impl Into<String>, count: u64) -> Self {
        self.instance_counts.insert(type_name.into(), count);
        self
    }

    pub fn with_type_count(mut self, count: u64) -> Self {
        self.type_count = count;
        self
    }

    pub fn with_attribute_type_count(mut self, count: u64) -> Self {
        self.attribute_type_count = count;
        self
    }

    pub fn with_forward_cardinality(mut self, kind: EdgeKind, from_type: impl Into<String>, value: f64) -> Self {
        self.forward_cardinality.insert((kind, from_type.into()), value);
        self
    }

    pub fn with_backward_cardinality(mut self, kind: EdgeKind, to_type: impl Into<String>, value: f64) -> Self {
        self.backward_cardinality.insert((kind, to_type.into()), value);
        self
    }
}

impl SchemaGraph for InMemorySchemaGraph {
    type Handle = InMemoryTypeHandle;

    fn get_type(&self, name: &str, _scope: Option<&str>) -> Option<Self::Handle> {
        self.instance_counts.get(name).map(|&count| InMemoryTypeHandle { count })
    }

    fn type_count(&self) -> u64 {
        self.type_count
    }

    fn attribute_type_count(&self) -> u64 {
        self.attribute_type_count
    }

    fn edge_cardinality_forward(&self, kind: &EdgeKind, from_type: &str) -> f64 {
        self.forward_cardinality.get(&(kind.clone(), from_type.to_string())).copied().unwrap_or(1.0)
    }

    fn edge_cardinality_backward(&self, kind: &EdgeKind, to_type: &str) -> f64 {
        self.backward_cardinality.get(&(kind.clone(), to_type.to_string())).copied().unwrap_or(1.0)
    }
}
