/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! MILP-based traversal planner for a hypergraph/knowledge-graph database.
//!
//! Given a normalised pattern (a conjunction of vertices and typed edges)
//! and a read-only schema graph, [`plan`] builds a mixed-integer linear
//! program encoding every valid traversal of the pattern, solves it with a
//! schema-weighted objective, and decodes the optimum into a rooted
//! traversal [`Plan`]. See the module docs under [`graph`], [`milp`], and
//! [`plan`] for the five-component pipeline.

pub mod config;
pub mod error;
pub mod graph;
pub mod identifier;
pub mod milp;
pub mod plan;
pub mod properties;
pub mod schema;
pub mod solver;
pub mod state;

pub use config::PlannerConfig;
pub use error::{PlannerError, PlannerErrorKind};
pub use identifier::Identifier;
pub use plan::Plan;
pub use properties::{ThingProperties, TypeProperties, VertexProperties};
pub use schema::SchemaGraph;

use graph::{vertex::VertexKind, PlannerGraph};

/// One vertex of an input [`Pattern`]: its stable identity, kind, and
/// (optionally, set separately from construction to mirror
/// `setProperties`) its properties.
#[derive(Clone, Debug)]
pub struct PatternVertex {
    pub identifier: Identifier,
    pub kind: VertexKind,
    pub properties: Option<VertexProperties>,
}

/// One undirected edge of an input [`Pattern`], reified by the planner
/// graph into a forward/backward directional pair.
#[derive(Clone, Debug)]
pub struct PatternEdge {
    pub from: Identifier,
    pub to: Identifier,
    pub label: String,
    pub kind: schema::EdgeKind,
}

/// A normalised conjunction of vertices and edges, as produced by query
/// parsing (out of scope for this crate).
#[derive(Clone, Debug, Default)]
pub struct Pattern {
    pub vertices: Vec<PatternVertex>,
    pub edges: Vec<PatternEdge>,
}

impl Pattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertex(mut self, identifier: Identifier, kind: VertexKind, properties: Option<VertexProperties>) -> Self {
        self.vertices.push(PatternVertex { identifier, kind, properties });
        self
    }

    pub fn with_edge(mut self, from: Identifier, to: Identifier, label: impl Into<String>, kind: schema::EdgeKind) -> Self {
        self.edges.push(PatternEdge { from, to, label: label.into(), kind });
        self
    }
}

/// The scoped resources a planning call needs from its caller: a read-only
/// schema-graph view (held for the duration of the call, modelling the
/// caller's schema read lock) and tuning configuration.
pub struct PlanContext<'a, S: SchemaGraph> {
    pub schema: &'a S,
    pub config: PlannerConfig,
}

impl<'a, S: SchemaGraph> PlanContext<'a, S> {
    pub fn new(schema: &'a S) -> Self {
        Self { schema, config: PlannerConfig::default() }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }
}

/// Builds the planner graph for `pattern`, initialises and solves its MILP
/// model against `context.schema`, and decodes the optimum into a [`Plan`].
#[tracing::instrument(skip_all, fields(vertices = pattern.vertices.len(), edges = pattern.edges.len()))]
pub fn plan<S: SchemaGraph>(pattern: Pattern, context: PlanContext<'_, S>) -> Result<Plan, PlannerError> {
    tracing::debug!(vertices = pattern.vertices.len(), edges = pattern.edges.len(), "building planner graph");
    let mut graph = PlannerGraph::new();

    for vertex in &pattern.vertices {
        graph.add_vertex(vertex.identifier, vertex.kind)?;
    }
    for vertex in pattern.vertices {
        if let Some(properties) = vertex.properties {
            graph.set_properties(vertex.identifier, properties)?;
        }
    }
    for edge in pattern.edges {
        graph.add_edge(edge.from, edge.to, edge.label, edge.kind)?;
    }

    let result = plan::solve_and_decode(&mut graph, context.schema, &context.config);
    match &result {
        Ok(decoded) => tracing::debug!(roots = decoded.roots.len(), order = decoded.order.len(), "plan solved"),
        Err(error) => tracing::debug!(%error, "plan failed"),
    }
    result
}
