/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Solver driver & decoder (component E): invokes the solver, rounds
//! solution values with tolerance for numerical noise, writes back decoded
//! flags, and derives the rooted traversal plan.

use std::collections::{HashSet, VecDeque};

use crate::{
    config::PlannerConfig,
    error::PlannerError,
    graph::PlannerGraph,
    identifier::Identifier,
    milp,
    schema::SchemaGraph,
    state::PlannerState,
};

/// Values within this distance of `1.0` are treated as decoded `true`; the
/// solver backends return `f64` and MILP solutions can carry small
/// numerical noise around their true integer value.
const DECODE_THRESHOLD: f64 = 0.5;

/// The decoded output of a planning call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    pub roots: Vec<Identifier>,
    pub order: Vec<Identifier>,
    pub edges_selected: Vec<(Identifier, Identifier)>,
}

/// Runs components C, D and E over an assembled `graph`: builds and solves
/// the MILP model, decodes the solution back onto `graph`, and derives the
/// rooted traversal plan.
#[tracing::instrument(skip_all)]
pub fn solve_and_decode(graph: &mut PlannerGraph, schema: &impl SchemaGraph, config: &PlannerConfig) -> Result<Plan, PlannerError> {
    let model = milp::build_model(graph, schema)?;
    tracing::trace!(time_budget = ?config.time_budget, backend = ?config.solver_backend, "model built, invoking solver");
    let solved = model.solve(config)?;

    let identifiers: Vec<_> = graph.vertices().map(|v| v.common().identifier()).collect();
    for identifier in &identifiers {
        let vertex = graph.vertex(*identifier).unwrap();
        let common = vertex.common();
        let is_starting = common.var_is_starting.map(|var| decode_bool(solved.solution_value(var))).unwrap_or(false);
        let is_ending = decode_bool(solved.solution_value(common.var_is_ending.unwrap()));
        let has_incoming = decode_bool(solved.solution_value(common.var_has_incoming.unwrap()));
        let has_outgoing = decode_bool(solved.solution_value(common.var_has_outgoing.unwrap()));
        graph.vertex_mut(*identifier).unwrap().common_mut().set_decoded(is_starting, is_ending, has_incoming, has_outgoing);
    }

    for edge in graph.edges_mut() {
        let var = edge.var_is_selected.unwrap();
        edge.set_decoded(decode_bool(solved.solution_value(var)));
    }

    graph.set_state(PlannerState::Decoded);

    let plan = derive_plan(graph);
    tracing::debug!(roots = ?plan.roots, order_len = plan.order.len(), "decoded plan");
    Ok(plan)
}

fn decode_bool(value: f64) -> bool {
    value > DECODE_THRESHOLD
}

/// Roots are every vertex with `valueIsStartingVertex = 1`; the order is a
/// breadth-first walk from each root (ascending `Identifier`) along selected
/// edges, breaking ties between multiple selected out-edges at the same
/// vertex by ascending `Identifier` of the destination.
fn derive_plan(graph: &PlannerGraph) -> Plan {
    let mut roots: Vec<Identifier> = graph.vertices().filter(|v| v.common().value_is_starting()).map(|v| v.common().identifier()).collect();
    roots.sort();

    let mut order = Vec::new();
    let mut edges_selected = Vec::new();
    let mut visited: HashSet<Identifier> = HashSet::new();

    for &root in &roots {
        if !visited.insert(root) {
            continue;
        }
        let mut queue = VecDeque::new();
        queue.push_back(root);
        order.push(root);

        while let Some(current) = queue.pop_front() {
            let vertex = graph.vertex(current).unwrap();
            let mut selected_outs: Vec<Identifier> = vertex
                .common()
                .outs()
                .iter()
                .map(|&edge_id| graph.edge(edge_id))
                .filter(|edge| edge.value_is_selected())
                .map(|edge| edge.to())
                .collect();
            selected_outs.sort();

            for to in selected_outs {
                edges_selected.push((current, to));
                if visited.insert(to) {
                    order.push(to);
                    queue.push_back(to);
                }
            }
        }
    }

    Plan { roots, order, edges_selected }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_threshold_tolerates_solver_noise() {
        assert!(decode_bool(0.999_999));
        assert!(!decode_bool(0.000_001));
        assert!(decode_bool(1.0));
        assert!(!decode_bool(0.0));
    }
}
