/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Constraint initialisation (component C, part 2): the five constraint
//! families of `spec.md` §4.3, one set per vertex.

use crate::{
    error::{PlannerError, PlannerErrorKind},
    graph::{edge::EdgeId, PlannerGraph},
    solver::MilpModel,
    state::PlannerState,
};

/// Posts every vertex constraint for `graph` into `model`, advancing
/// `graph`'s lifecycle state to `ConstraintsInit`. Requires `graph` to
/// already be in `VarsInit` or later.
pub fn init_constraints(graph: &mut PlannerGraph, model: &mut MilpModel) -> Result<(), PlannerError> {
    if !graph.state().at_least(PlannerState::VarsInit) {
        return Err(PlannerError::new(
            PlannerErrorKind::ConstraintInitBeforeVariableInit,
            format!("graph is in state {:?}", graph.state()),
        ));
    }

    let identifiers: Vec<_> = graph.vertices().map(|v| v.common().identifier()).collect();

    for identifier in identifiers {
        let vertex = graph.vertex(identifier).unwrap();
        let common = vertex.common();

        let ins: Vec<EdgeId> = common.ins().to_vec();
        let outs: Vec<EdgeId> = common.outs().to_vec();
        let d_in = ins.len() as f64;
        let d_out = outs.len() as f64;

        let var_unselected_in = common.var_unselected_incoming.unwrap();
        let var_has_incoming = common.var_has_incoming.unwrap();
        let var_unselected_out = common.var_unselected_outgoing.unwrap();
        let var_has_outgoing = common.var_has_outgoing.unwrap();
        let var_is_ending = common.var_is_ending.unwrap();
        let var_is_starting = common.var_is_starting;

        // 1. Incoming-edge accounting.
        let accounting_in = model.make_constraint(d_in, d_in, format!("vertex::con::{identifier}::incomingAccounting"));
        model.set_coefficient_constraint(accounting_in, var_unselected_in, 1.0);
        for edge in &ins {
            let var = graph.edge(*edge).var_is_selected.unwrap();
            model.set_coefficient_constraint(accounting_in, var, 1.0);
        }

        // [1, d_in], collapsing to the single point [0, 0] when the vertex has
        // no incoming edges at all (var_has_incoming is then forced to 0).
        let bound_in_lo = if d_in >= 1.0 { 1.0 } else { 0.0 };
        let bound_in = model.make_constraint(bound_in_lo, d_in, format!("vertex::con::{identifier}::incomingBound"));
        model.set_coefficient_constraint(bound_in, var_unselected_in, 1.0);
        model.set_coefficient_constraint(bound_in, var_has_incoming, 1.0);

        // 2. Outgoing-edge accounting (symmetric).
        let accounting_out = model.make_constraint(d_out, d_out, format!("vertex::con::{identifier}::outgoingAccounting"));
        model.set_coefficient_constraint(accounting_out, var_unselected_out, 1.0);
        for edge in &outs {
            let var = graph.edge(*edge).var_is_selected.unwrap();
            model.set_coefficient_constraint(accounting_out, var, 1.0);
        }

        let bound_out_lo = if d_out >= 1.0 { 1.0 } else { 0.0 };
        let bound_out = model.make_constraint(bound_out_lo, d_out, format!("vertex::con::{identifier}::outgoingBound"));
        model.set_coefficient_constraint(bound_out, var_unselected_out, 1.0);
        model.set_coefficient_constraint(bound_out, var_has_outgoing, 1.0);

        // 3. Starting OR incoming (entry constraint).
        let entry = model.make_constraint(1.0, 1.0, format!("vertex::con::{identifier}::entry"));
        if let Some(var_is_starting) = var_is_starting {
            model.set_coefficient_constraint(entry, var_is_starting, 1.0);
        }
        model.set_coefficient_constraint(entry, var_has_incoming, 1.0);

        // 4. Ending OR outgoing (exit constraint).
        let exit = model.make_constraint(1.0, 1.0, format!("vertex::con::{identifier}::exit"));
        model.set_coefficient_constraint(exit, var_is_ending, 1.0);
        model.set_coefficient_constraint(exit, var_has_outgoing, 1.0);

        // 5. Vertex flow.
        let flow = model.make_constraint(0.0, 0.0, format!("vertex::con::{identifier}::flow"));
        if let Some(var_is_starting) = var_is_starting {
            model.set_coefficient_constraint(flow, var_is_starting, 1.0);
        }
        model.set_coefficient_constraint(flow, var_has_incoming, 1.0);
        model.set_coefficient_constraint(flow, var_is_ending, -1.0);
        model.set_coefficient_constraint(flow, var_has_outgoing, -1.0);
    }

    graph.set_state(PlannerState::ConstraintsInit);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::vertex::VertexKind, identifier::Identifier, milp::variables::init_variables, schema::EdgeKind};

    #[test]
    fn rejects_constraints_before_variables() {
        let mut graph = PlannerGraph::new();
        graph.add_vertex(Identifier::new(0), VertexKind::Thing).unwrap();
        let mut model = MilpModel::new();
        let err = init_constraints(&mut graph, &mut model).unwrap_err();
        assert!(matches!(err.kind, PlannerErrorKind::ConstraintInitBeforeVariableInit));
    }

    #[test]
    fn posts_constraints_after_variables() {
        let mut graph = PlannerGraph::new();
        let x = Identifier::new(0);
        let y = Identifier::new(1);
        graph.add_vertex(x, VertexKind::Thing).unwrap();
        graph.add_vertex(y, VertexKind::Thing).unwrap();
        graph.add_edge(x, y, "role", EdgeKind::Has).unwrap();

        let mut model = MilpModel::new();
        init_variables(&mut graph, &mut model);
        init_constraints(&mut graph, &mut model).unwrap();
        assert_eq!(graph.state(), PlannerState::ConstraintsInit);
    }
}
