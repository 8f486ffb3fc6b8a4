/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Planner tuning knobs, bundled the way the teacher bundles its own
//! `BEAM_WIDTH`/`EXTENSION_WIDTH` planner constants — here as a struct so a
//! caller can vary them per call instead of at compile time.

use std::time::Duration;

/// Which `good_lp` backend a solve should run against. `solve` reads this
/// field at runtime and fails with `SolverFailure` if the requested variant's
/// cargo feature was not compiled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SolverBackend {
    #[default]
    Microlp,
    CoinCbc,
    Highs,
}

/// Tunables threaded through one planning call.
#[derive(Clone, Copy, Debug)]
pub struct PlannerConfig {
    /// Upper bound on solver wall-clock time (`spec.md`'s `timeBudget`).
    /// Honoured by the `coin_cbc` backend only; ignored by `microlp`.
    pub time_budget: Duration,
    pub solver_backend: SolverBackend,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { time_budget: Duration::from_secs(5), solver_backend: SolverBackend::default() }
    }
}
