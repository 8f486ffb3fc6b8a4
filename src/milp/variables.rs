/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Variable initialisation (component C, part 1): one pass over every
//! vertex and directional edge, creating the decision variables named in
//! `spec.md` §4.2.

use crate::{graph::PlannerGraph, solver::MilpModel, state::PlannerState};

/// Creates every decision variable for `graph` in `model`, advancing
/// `graph`'s lifecycle state to `VarsInit`. Idempotent: calling this twice
/// on the same graph simply re-creates variables under fresh handles, so
/// callers should only do it once per planning call.
pub fn init_variables(graph: &mut PlannerGraph, model: &mut MilpModel) {
    let identifiers: Vec<_> = graph.vertices().map(|v| v.common().identifier()).collect();

    for identifier in identifiers {
        let vertex = graph.vertex_mut(identifier).unwrap();
        let common = vertex.common_mut();
        let d_in = common.ins().len() as i32;
        let d_out = common.outs().len() as i32;

        if common.has_index() {
            common.var_is_starting = Some(model.make_binary_var(format!("vertex::var::{identifier}::isStarting")));
        }
        common.var_is_ending = Some(model.make_binary_var(format!("vertex::var::{identifier}::isEnding")));
        common.var_has_incoming = Some(model.make_binary_var(format!("vertex::var::{identifier}::hasIncoming")));
        common.var_has_outgoing = Some(model.make_binary_var(format!("vertex::var::{identifier}::hasOutgoing")));
        common.var_unselected_incoming = Some(model.make_int_var(0, d_in, format!("vertex::var::{identifier}::unselectedIncoming")));
        common.var_unselected_outgoing = Some(model.make_int_var(0, d_out, format!("vertex::var::{identifier}::unselectedOutgoing")));
    }

    for (index, edge) in graph_edges_mut(graph) {
        edge.var_is_selected = Some(model.make_binary_var(format!("edge::var::{index}::isSelected")));
    }

    graph.set_state(PlannerState::VarsInit);
}

fn graph_edges_mut(graph: &mut PlannerGraph) -> impl Iterator<Item = (usize, &mut crate::graph::edge::PlannerEdge)> {
    graph.edges_mut().iter_mut().enumerate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::vertex::VertexKind, identifier::Identifier, schema::EdgeKind};

    #[test]
    fn starting_var_omitted_without_index() {
        let mut graph = PlannerGraph::new();
        let x = Identifier::new(0);
        graph.add_vertex(x, VertexKind::Thing).unwrap();
        let mut model = MilpModel::new();
        init_variables(&mut graph, &mut model);
        assert!(graph.vertex(x).unwrap().common().var_is_starting.is_none());
    }

    #[test]
    fn starting_var_present_for_type_vertex() {
        let mut graph = PlannerGraph::new();
        let t = Identifier::new(0);
        graph.add_vertex(t, VertexKind::Type).unwrap();
        let mut model = MilpModel::new();
        init_variables(&mut graph, &mut model);
        assert!(graph.vertex(t).unwrap().common().var_is_starting.is_some());
    }

    #[test]
    fn every_edge_gets_a_selection_variable() {
        let mut graph = PlannerGraph::new();
        let x = Identifier::new(0);
        let y = Identifier::new(1);
        graph.add_vertex(x, VertexKind::Thing).unwrap();
        graph.add_vertex(y, VertexKind::Thing).unwrap();
        graph.add_edge(x, y, "role", EdgeKind::Has).unwrap();
        let mut model = MilpModel::new();
        init_variables(&mut graph, &mut model);
        assert!(graph.edges().iter().all(|e| e.var_is_selected.is_some()));
        assert_eq!(graph.state(), PlannerState::VarsInit);
    }
}
