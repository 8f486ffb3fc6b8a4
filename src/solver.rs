/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The MILP solver interface consumed by the rest of the planner
//! (`spec.md` §6): `make_int_var`, `make_constraint`, `set_coefficient_*`,
//! `solve`, `solution_value`. Backed by `good_lp`, whose incremental
//! `Variable`/`Expression` API is wrapped here behind the small, named-handle
//! shape the spec names, so the rest of the crate stays solver-agnostic.

use std::collections::HashMap;

use good_lp::{variable, Expression, ProblemVariables, Solution, SolverModel, Variable};

use crate::{
    config::{PlannerConfig, SolverBackend},
    error::{PlannerError, PlannerErrorKind},
};

/// Opaque handle to a decision variable, scoped to one [`MilpModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VarId(usize);

/// Opaque handle to a linear constraint, scoped to one [`MilpModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintId(usize);

struct VarSpec {
    name: String,
    lo: f64,
    hi: f64,
    integer: bool,
}

struct ConstraintSpec {
    name: String,
    lo: f64,
    hi: f64,
    coefficients: HashMap<VarId, f64>,
}

/// A MILP model: a set of named integer variables, named linear constraints
/// over closed intervals, and a linear objective (minimised). Variable and
/// constraint names are namespaced for diagnosability only and carry no
/// semantics.
#[derive(Default)]
pub struct MilpModel {
    vars: Vec<VarSpec>,
    constraints: Vec<ConstraintSpec>,
    objective: HashMap<VarId, f64>,
}

impl MilpModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// `makeIntVar(0, 1, name) → var`, specialised for {0,1} decision variables.
    pub fn make_binary_var(&mut self, name: impl Into<String>) -> VarId {
        self.make_int_var(0, 1, name)
    }

    /// `makeIntVar(lo, hi, name) → var`.
    pub fn make_int_var(&mut self, lo: i32, hi: i32, name: impl Into<String>) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(VarSpec { name: name.into(), lo: lo as f64, hi: hi as f64, integer: true });
        id
    }

    /// `makeConstraint(lo, hi, name) → constraint`.
    pub fn make_constraint(&mut self, lo: f64, hi: f64, name: impl Into<String>) -> ConstraintId {
        let id = ConstraintId(self.constraints.len());
        self.constraints.push(ConstraintSpec { name: name.into(), lo, hi, coefficients: HashMap::new() });
        id
    }

    /// `setCoefficient(constraint, var, coeff)`.
    pub fn set_coefficient_constraint(&mut self, constraint: ConstraintId, var: VarId, coeff: f64) {
        self.constraints[constraint.0].coefficients.insert(var, coeff);
    }

    /// `setCoefficient(objective, var, coeff)`.
    pub fn set_coefficient_objective(&mut self, var: VarId, coeff: f64) {
        self.objective.insert(var, coeff);
    }

    /// `solve() → {optimal | feasible | infeasible | unbounded}`, with an
    /// upper bound on solver wall-clock time and a choice of `good_lp`
    /// backend, both read from `config`. Returns a [`SolvedModel`] on
    /// success from which `solutionValue` may be read back.
    #[tracing::instrument(skip(self, config), fields(vars = self.vars.len(), constraints = self.constraints.len(), backend = ?config.solver_backend))]
    pub fn solve(self, config: &PlannerConfig) -> Result<SolvedModel, PlannerError> {
        let mut problem_vars = ProblemVariables::new();
        let handles: Vec<Variable> = self
            .vars
            .iter()
            .map(|spec| {
                let mut builder = variable().min(spec.lo).max(spec.hi);
                if spec.integer {
                    builder = builder.integer();
                }
                tracing::trace!(name = %spec.name, lo = spec.lo, hi = spec.hi, integer = spec.integer, "declaring variable");
                problem_vars.add(builder)
            })
            .collect();

        let objective: Expression = self.objective.iter().map(|(var, &coeff)| handles[var.0] * coeff).sum();
        let unsolved = problem_vars.minimise(objective);

        match config.solver_backend {
            SolverBackend::CoinCbc => {
                #[cfg(feature = "coin_cbc")]
                {
                    let mut model = unsolved.using(good_lp::solvers::coin_cbc::coin_cbc);
                    model.set_parameter("seconds", &config.time_budget.as_secs_f64().to_string());
                    let values = run(model, &self.constraints, &handles)?;
                    Ok(SolvedModel { values })
                }
                #[cfg(not(feature = "coin_cbc"))]
                Err(backend_not_compiled("coin_cbc"))
            }
            SolverBackend::Highs => {
                #[cfg(feature = "highs")]
                {
                    let model = unsolved.using(good_lp::solvers::highs::highs);
                    let values = run(model, &self.constraints, &handles)?;
                    Ok(SolvedModel { values })
                }
                #[cfg(not(feature = "highs"))]
                Err(backend_not_compiled("highs"))
            }
            SolverBackend::Microlp => {
                #[cfg(feature = "microlp")]
                {
                    // microlp has no incremental time-budget control;
                    // `config.time_budget` is enforced only by the coin_cbc
                    // backend above.
                    let model = unsolved.using(good_lp::solvers::microlp::microlp);
                    let values = run(model, &self.constraints, &handles)?;
                    Ok(SolvedModel { values })
                }
                #[cfg(not(feature = "microlp"))]
                Err(backend_not_compiled("microlp"))
            }
        }
    }
}

/// Adds every constraint to an already-backend-selected `model` and solves
/// it, shared across the three `good_lp` backends since each `.using(...)`
/// call produces a distinct concrete model type.
fn run<M: SolverModel>(mut model: M, constraints: &[ConstraintSpec], handles: &[Variable]) -> Result<Vec<f64>, PlannerError> {
    for spec in constraints {
        let expr: Expression = spec.coefficients.iter().map(|(var, &coeff)| handles[var.0] * coeff).sum();
        tracing::trace!(name = %spec.name, lo = spec.lo, hi = spec.hi, "adding constraint");
        // Closed interval [lo, hi] over a weighted sum, as two half-bound
        // constraints (good_lp's `constraint!` macro only models a single
        // comparison per constraint).
        if spec.lo == spec.hi {
            model.add_constraint(good_lp::constraint!(expr.clone() == spec.lo));
        } else {
            model.add_constraint(good_lp::constraint!(expr.clone() >= spec.lo));
            model.add_constraint(good_lp::constraint!(expr <= spec.hi));
        }
    }

    let solution = model.solve().map_err(|err| match err {
        good_lp::ResolutionError::Infeasible => PlannerError::new(PlannerErrorKind::PlanInfeasible, "solver reported infeasible model"),
        good_lp::ResolutionError::Unbounded => {
            PlannerError::new(PlannerErrorKind::SolverFailure { source: "unbounded".into() }, "all planner variables are bounded; unbounded is an internal error")
        }
        other => PlannerError::new(PlannerErrorKind::SolverFailure { source: other.to_string() }, "solver backend error"),
    })?;

    Ok(handles.iter().map(|&var| solution.value(var)).collect())
}

#[allow(dead_code)] // unreachable only when every backend feature is compiled in at once
fn backend_not_compiled(name: &str) -> PlannerError {
    PlannerError::new(PlannerErrorKind::SolverFailure { source: format!("backend {name} requested but not compiled in") }, "enable the matching cargo feature")
}

/// The decoded solution of a solved [`MilpModel`]: `solutionValue(var) → real`.
pub struct SolvedModel {
    values: Vec<f64>,
}

impl SolvedModel {
    pub fn solution_value(&self, var: VarId) -> f64 {
        self.values[var.0]
    }
}
