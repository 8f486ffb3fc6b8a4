/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{error::Error, fmt};

use crate::identifier::Identifier;

/// A structured planner error: a kind plus enough context to diagnose it.
/// No error is ever recovered inside the planner; every error aborts the
/// planning call and is surfaced to the caller.
#[derive(Debug)]
pub struct PlannerError {
    pub kind: PlannerErrorKind,
    pub context: String,
}

impl PlannerError {
    pub(crate) fn new(kind: PlannerErrorKind, context: impl Into<String>) -> Self {
        Self { kind, context: context.into() }
    }
}

#[derive(Debug)]
pub enum PlannerErrorKind {
    /// `addVertex` called twice for the same identifier with a different kind.
    InconsistentVertexKind { identifier: Identifier },
    /// `setProperties` called twice for the same vertex.
    PropertiesAlreadySet { identifier: Identifier },
    /// Constraint initialisation was attempted before variable initialisation completed.
    ConstraintInitBeforeVariableInit,
    /// The solver reported the model infeasible.
    PlanInfeasible,
    /// The solver backend failed (timeout without a feasible solution, backend error).
    SolverFailure { source: String },
    /// A Thing vertex was asked for its Type view, or vice versa.
    IllegalCast { identifier: Identifier },
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PlannerErrorKind::InconsistentVertexKind { identifier } => {
                write!(f, "vertex {identifier} was re-added with a different kind ({})", self.context)
            }
            PlannerErrorKind::PropertiesAlreadySet { identifier } => {
                write!(f, "properties already set for vertex {identifier} ({})", self.context)
            }
            PlannerErrorKind::ConstraintInitBeforeVariableInit => {
                write!(f, "constraint initialisation requested before variable initialisation completed ({})", self.context)
            }
            PlannerErrorKind::PlanInfeasible => {
                write!(f, "planner graph has no feasible traversal plan ({})", self.context)
            }
            PlannerErrorKind::SolverFailure { source } => {
                write!(f, "solver backend failed: {source} ({})", self.context)
            }
            PlannerErrorKind::IllegalCast { identifier } => {
                write!(f, "illegal cast on vertex {identifier} ({})", self.context)
            }
        }
    }
}

impl Error for PlannerError {}
