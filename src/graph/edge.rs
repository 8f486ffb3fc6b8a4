/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{identifier::Identifier, schema::EdgeKind, solver::VarId};

/// Index into the planner graph's edge table. Opaque outside this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub(crate) usize);

/// Links a forward/backward directional-edge pair reified from the same
/// undirected pattern edge. `forward.from == backward.to` and
/// `forward.to == backward.from` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PairId(pub(crate) usize);

/// Which orientation of the original `addEdge(from, to, ...)` call a
/// directional edge represents. Forward keeps the caller's `from`/`to`;
/// backward swaps them. Edge objective formulae (`SPEC_FULL.md` §4.4) read
/// different schema cardinalities depending on this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// One orientation of a reified pattern edge.
#[derive(Clone, Debug)]
pub struct PlannerEdge {
    pub(crate) pair: PairId,
    pub(crate) from: Identifier,
    pub(crate) to: Identifier,
    pub(crate) label: String,
    pub(crate) kind: EdgeKind,
    pub(crate) direction: Direction,
    pub(crate) var_is_selected: Option<VarId>,
    pub(crate) value_is_selected: bool,
}

impl PlannerEdge {
    pub(crate) fn new(pair: PairId, from: Identifier, to: Identifier, label: String, kind: EdgeKind, direction: Direction) -> Self {
        Self { pair, from, to, label, kind, direction, var_is_selected: None, value_is_selected: false }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pair(&self) -> PairId {
        self.pair
    }

    pub fn from(&self) -> Identifier {
        self.from
    }

    pub fn to(&self) -> Identifier {
        self.to
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &EdgeKind {
        &self.kind
    }

    pub fn value_is_selected(&self) -> bool {
        self.value_is_selected
    }

    pub(crate) fn set_decoded(&mut self, selected: bool) {
        self.value_is_selected = selected;
    }
}
