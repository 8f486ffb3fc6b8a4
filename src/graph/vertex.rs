/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{
    graph::edge::EdgeId,
    identifier::Identifier,
    properties::{ThingProperties, TypeProperties},
    solver::VarId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexKind {
    Thing,
    Type,
}

/// Fields shared by both vertex variants: identity, adjacency, decision
/// variable handles, and their post-solve decoded values.
#[derive(Clone, Debug)]
pub struct VertexCommon {
    identifier: Identifier,
    ins: Vec<EdgeId>,
    outs: Vec<EdgeId>,
    has_index: bool,

    pub(crate) var_is_starting: Option<VarId>,
    pub(crate) var_is_ending: Option<VarId>,
    pub(crate) var_has_incoming: Option<VarId>,
    pub(crate) var_has_outgoing: Option<VarId>,
    pub(crate) var_unselected_incoming: Option<VarId>,
    pub(crate) var_unselected_outgoing: Option<VarId>,

    value_is_starting: bool,
    value_is_ending: bool,
    value_has_incoming: bool,
    value_has_outgoing: bool,
}

impl VertexCommon {
    fn new(identifier: Identifier, has_index: bool) -> Self {
        Self {
            identifier,
            ins: Vec::new(),
            outs: Vec::new(),
            has_index,
            var_is_starting: None,
            var_is_ending: None,
            var_has_incoming: None,
            var_has_outgoing: None,
            var_unselected_incoming: None,
            var_unselected_outgoing: None,
            value_is_starting: false,
            value_is_ending: false,
            value_has_incoming: false,
            value_has_outgoing: false,
        }
    }

    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    pub fn has_index(&self) -> bool {
        self.has_index
    }

    pub fn ins(&self) -> &[EdgeId] {
        &self.ins
    }

    pub fn outs(&self) -> &[EdgeId] {
        &self.outs
    }

    pub(crate) fn push_in(&mut self, edge: EdgeId) {
        self.ins.push(edge);
    }

    pub(crate) fn push_out(&mut self, edge: EdgeId) {
        self.outs.push(edge);
    }

    pub fn value_is_starting(&self) -> bool {
        self.value_is_starting
    }

    pub fn value_is_ending(&self) -> bool {
        self.value_is_ending
    }

    pub fn value_has_incoming(&self) -> bool {
        self.value_has_incoming
    }

    pub fn value_has_outgoing(&self) -> bool {
        self.value_has_outgoing
    }

    pub(crate) fn set_decoded(&mut self, is_starting: bool, is_ending: bool, has_incoming: bool, has_outgoing: bool) {
        self.value_is_starting = is_starting;
        self.value_is_ending = is_ending;
        self.value_has_incoming = has_incoming;
        self.value_has_outgoing = has_outgoing;
    }
}

#[derive(Clone, Debug)]
pub struct ThingVertex {
    common: VertexCommon,
    properties: Option<ThingProperties>,
}

impl ThingVertex {
    pub(crate) fn new(identifier: Identifier) -> Self {
        Self { common: VertexCommon::new(identifier, false), properties: None }
    }

    pub fn properties(&self) -> Option<&ThingProperties> {
        self.properties.as_ref()
    }

    pub(crate) fn set_properties(&mut self, properties: ThingProperties) {
        self.common.has_index = properties.has_index();
        self.properties = Some(properties);
    }
}

#[derive(Clone, Debug)]
pub struct TypeVertex {
    common: VertexCommon,
    properties: Option<TypeProperties>,
}

impl TypeVertex {
    pub(crate) fn new(identifier: Identifier) -> Self {
        // Type: hasIndex remains true, regardless of properties.
        Self { common: VertexCommon::new(identifier, true), properties: None }
    }

    pub fn properties(&self) -> Option<&TypeProperties> {
        self.properties.as_ref()
    }

    pub(crate) fn set_properties(&mut self, properties: TypeProperties) {
        self.properties = Some(properties);
    }
}

/// A vertex in the planner graph: a Thing (instance-level) or Type
/// (schema-level) variable, cast via [`PlannerVertex::as_thing`] /
/// [`PlannerVertex::as_type`].
#[derive(Clone, Debug)]
pub enum PlannerVertex {
    Thing(ThingVertex),
    Type(TypeVertex),
}

impl PlannerVertex {
    pub(crate) fn kind(&self) -> VertexKind {
        match self {
            PlannerVertex::Thing(_) => VertexKind::Thing,
            PlannerVertex::Type(_) => VertexKind::Type,
        }
    }

    pub fn common(&self) -> &VertexCommon {
        match self {
            PlannerVertex::Thing(v) => &v.common,
            PlannerVertex::Type(v) => &v.common,
        }
    }

    pub(crate) fn common_mut(&mut self) -> &mut VertexCommon {
        match self {
            PlannerVertex::Thing(v) => &mut v.common,
            PlannerVertex::Type(v) => &mut v.common,
        }
    }

    pub fn as_thing(&self) -> Option<&ThingVertex> {
        match self {
            PlannerVertex::Thing(v) => Some(v),
            PlannerVertex::Type(_) => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeVertex> {
        match self {
            PlannerVertex::Type(v) => Some(v),
            PlannerVertex::Thing(_) => None,
        }
    }
}
