/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! MILP model builder (components C and D): variable initialisation,
//! constraint initialisation, and objective population, orchestrated
//! together in [`build_model`].

pub mod constraints;
pub mod objective;
pub mod variables;

use crate::{error::PlannerError, graph::PlannerGraph, schema::SchemaGraph, solver::MilpModel};

/// Runs the full component C + D pipeline over `graph`: variables, then
/// constraints, then the schema-driven objective. Returns the populated
/// [`MilpModel`], ready for [`MilpModel::solve`].
pub fn build_model(graph: &mut PlannerGraph, schema: &impl SchemaGraph) -> Result<MilpModel, PlannerError> {
    let mut model = MilpModel::new();
    variables::init_variables(graph, &mut model);
    constraints::init_constraints(graph, &mut model)?;
    objective::update_objective(graph, schema, &mut model);
    Ok(model)
}
