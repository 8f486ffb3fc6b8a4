/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Lifecycle of a planner graph / MILP model: `Building` while vertices and
/// edges are added, `VarsInit` once decision variables exist for every
/// element, `ConstraintsInit` once constraints are posted, `Solved` once the
/// solver has returned a solution, `Decoded` once `value*` flags have been
/// written back onto the planner graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlannerState {
    Building,
    VarsInit,
    ConstraintsInit,
    Solved,
    Decoded,
}

impl PlannerState {
    pub(crate) fn at_least(&self, other: PlannerState) -> bool {
        *self >= other
    }
}
