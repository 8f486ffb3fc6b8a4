/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The in-memory planner graph (component B): planner vertices and the
//! directional edge pairs reified from undirected pattern edges.

pub mod edge;
pub mod vertex;

use std::collections::HashMap;

use crate::{
    error::{PlannerError, PlannerErrorKind},
    identifier::Identifier,
    properties::VertexProperties,
    schema::EdgeKind,
    state::PlannerState,
};

use self::{
    edge::{Direction, EdgeId, PairId, PlannerEdge},
    vertex::{PlannerVertex, ThingVertex, TypeVertex, VertexKind},
};

/// Owns every vertex and edge for the duration of one planning call. The
/// MILP model holds indices back into this structure; after decoding the
/// MILP model may be discarded and this graph remains the plan artefact.
pub struct PlannerGraph {
    vertices: HashMap<Identifier, PlannerVertex>,
    order: Vec<Identifier>,
    edges: Vec<PlannerEdge>,
    next_pair: usize,
    state: PlannerState,
}

impl PlannerGraph {
    pub fn new() -> Self {
        Self { vertices: HashMap::new(), order: Vec::new(), edges: Vec::new(), next_pair: 0, state: PlannerState::Building }
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: PlannerState) {
        self.state = state;
    }

    pub fn vertices(&self) -> impl Iterator<Item = &PlannerVertex> {
        self.order.iter().map(move |id| &self.vertices[id])
    }

    pub fn vertex(&self, identifier: Identifier) -> Option<&PlannerVertex> {
        self.vertices.get(&identifier)
    }

    pub(crate) fn vertex_mut(&mut self, identifier: Identifier) -> Option<&mut PlannerVertex> {
        self.vertices.get_mut(&identifier)
    }

    pub fn edges(&self) -> &[PlannerEdge] {
        &self.edges
    }

    pub(crate) fn edges_mut(&mut self) -> &mut [PlannerEdge] {
        &mut self.edges
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut PlannerEdge {
        &mut self.edges[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &PlannerEdge {
        &self.edges[id.0]
    }

    /// `addVertex(identifier, kind) → vertex`. Idempotent in `identifier`; a
    /// second call with a different `kind` fails with `InconsistentVertexKind`.
    pub fn add_vertex(&mut self, identifier: Identifier, kind: VertexKind) -> Result<(), PlannerError> {
        if let Some(existing) = self.vertices.get(&identifier) {
            if existing.kind() != kind {
                return Err(PlannerError::new(
                    PlannerErrorKind::InconsistentVertexKind { identifier },
                    format!("already registered as {:?}, re-added as {kind:?}", existing.kind()),
                ));
            }
            return Ok(());
        }
        let vertex = match kind {
            VertexKind::Thing => PlannerVertex::Thing(ThingVertex::new(identifier)),
            VertexKind::Type => PlannerVertex::Type(TypeVertex::new(identifier)),
        };
        self.vertices.insert(identifier, vertex);
        self.order.push(identifier);
        Ok(())
    }

    /// `addEdge(from, to, label, metadata)`. Creates a forward `(from→to)`
    /// and backward `(to→from)` directional edge, registering each as
    /// outgoing on its source and incoming on its destination.
    pub fn add_edge(&mut self, from: Identifier, to: Identifier, label: impl Into<String>, kind: EdgeKind) -> Result<(), PlannerError> {
        let label = label.into();
        let pair = PairId(self.next_pair);
        self.next_pair += 1;

        let forward_id = EdgeId(self.edges.len());
        self.edges.push(PlannerEdge::new(pair, from, to, label.clone(), kind.clone(), Direction::Forward));
        let backward_id = EdgeId(self.edges.len());
        self.edges.push(PlannerEdge::new(pair, to, from, label, kind, Direction::Backward));

        self.require_vertex(from)?;
        self.require_vertex(to)?;

        self.vertex_mut(from).unwrap().common_mut().push_out(forward_id);
        self.vertex_mut(to).unwrap().common_mut().push_in(forward_id);
        self.vertex_mut(to).unwrap().common_mut().push_out(backward_id);
        self.vertex_mut(from).unwrap().common_mut().push_in(backward_id);

        Ok(())
    }

    fn require_vertex(&self, identifier: Identifier) -> Result<(), PlannerError> {
        if self.vertices.contains_key(&identifier) {
            Ok(())
        } else {
            Err(PlannerError::new(
                PlannerErrorKind::InconsistentVertexKind { identifier },
                "addEdge referenced a vertex that was never added",
            ))
        }
    }

    /// `setProperties(vertex, properties)`. May be called at most once per
    /// vertex; a second call fails with `PropertiesAlreadySet`.
    pub fn set_properties(&mut self, identifier: Identifier, properties: VertexProperties) -> Result<(), PlannerError> {
        let vertex = self.vertices.get_mut(&identifier).ok_or_else(|| {
            PlannerError::new(PlannerErrorKind::InconsistentVertexKind { identifier }, "setProperties on an unknown vertex")
        })?;
        match (vertex, properties) {
            (PlannerVertex::Thing(v), VertexProperties::Thing(props)) => {
                if v.properties().is_some() {
                    return Err(PlannerError::new(PlannerErrorKind::PropertiesAlreadySet { identifier }, "Thing properties already set"));
                }
                v.set_properties(props);
                Ok(())
            }
            (PlannerVertex::Type(v), VertexProperties::Type(props)) => {
                if v.properties().is_some() {
                    return Err(PlannerError::new(PlannerErrorKind::PropertiesAlreadySet { identifier }, "Type properties already set"));
                }
                v.set_properties(props);
                Ok(())
            }
            _ => Err(PlannerError::new(PlannerErrorKind::IllegalCast { identifier }, "properties kind does not match vertex kind")),
        }
    }
}

impl Default for PlannerGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::ThingProperties;

    #[test]
    fn add_vertex_is_idempotent() {
        let mut graph = PlannerGraph::new();
        let id = Identifier::new(0);
        graph.add_vertex(id, VertexKind::Thing).unwrap();
        graph.add_vertex(id, VertexKind::Thing).unwrap();
        assert_eq!(graph.vertices().count(), 1);
    }

    #[test]
    fn add_vertex_rejects_kind_change() {
        let mut graph = PlannerGraph::new();
        let id = Identifier::new(0);
        graph.add_vertex(id, VertexKind::Thing).unwrap();
        let err = graph.add_vertex(id, VertexKind::Type).unwrap_err();
        assert!(matches!(err.kind, PlannerErrorKind::InconsistentVertexKind { .. }));
    }

    #[test]
    fn set_properties_twice_fails() {
        let mut graph = PlannerGraph::new();
        let id = Identifier::new(0);
        graph.add_vertex(id, VertexKind::Thing).unwrap();
        graph.set_properties(id, VertexProperties::Thing(ThingProperties::new())).unwrap();
        let err = graph.set_properties(id, VertexProperties::Thing(ThingProperties::new())).unwrap_err();
        assert!(matches!(err.kind, PlannerErrorKind::PropertiesAlreadySet { .. }));
    }

    #[test]
    fn add_edge_registers_reciprocal_adjacency() {
        let mut graph = PlannerGraph::new();
        let x = Identifier::new(0);
        let y = Identifier::new(1);
        graph.add_vertex(x, VertexKind::Thing).unwrap();
        graph.add_vertex(y, VertexKind::Thing).unwrap();
        graph.add_edge(x, y, "role", EdgeKind::Links { role: "role".into() }).unwrap();

        let x_outs = graph.vertex(x).unwrap().common().outs();
        let y_ins = graph.vertex(y).unwrap().common().ins();
        assert_eq!(x_outs.len(), 1);
        assert_eq!(y_ins.len(), 1);
        assert_eq!(x_outs[0], y_ins[0]);

        let y_outs = graph.vertex(y).unwrap().common().outs();
        let x_ins = graph.vertex(x).unwrap().common().ins();
        assert_eq!(y_outs[0], x_ins[0]);
    }
}
