//! DPLL satisfiability solver.
//!
//! Unit propagation uses two watched literals per clause. Search is
//! depth-first with chronological backtracking: every decision level records
//! whether its decision has already been flipped, and a conflict undoes levels
//! until one with an untried polarity remains.
//!
//! Branching sets a variable true: the first open positive literal of the
//! unsatisfied clause with the fewest open positive literals. On sudoku
//! formulas this is the classic "fewest candidates first" rule.

use super::cnf::{Clause, Cnf, Literal};

/// Outcome of a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    Satisfiable(Model),
    Unsatisfiable,
}

/// A total assignment satisfying the formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    /// Truth value of `var` (1-based). Variables outside the formula are false.
    #[must_use]
    pub fn value(&self, var: u32) -> bool {
        (var as usize)
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// One literal per variable, in variable order, as printed on a DIMACS `v` line.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.values.iter().zip(1u32..).map(|(&value, var)| {
            if value {
                Literal::positive(var)
            } else {
                Literal::negative(var)
            }
        })
    }
}

/// Counters describing the work a solve took.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub decisions: u64,
    pub propagations: u64,
    pub conflicts: u64,
}

/// A decision level on the trail.
#[derive(Debug, Clone, Copy)]
struct Level {
    /// Trail length before the decision literal was pushed.
    trail_start: usize,
    decision: Literal,
    flipped: bool,
}

/// DPLL solver over a single CNF formula.
pub struct Solver {
    num_vars: usize,
    /// Normalized clauses of length two or more. Positions 0 and 1 are watched.
    clauses: Vec<Clause>,
    /// Clause indices watching each literal code.
    watches: Vec<Vec<usize>>,
    assigns: Vec<Option<bool>>,
    trail: Vec<Literal>,
    levels: Vec<Level>,
    queue_head: usize,
    /// Set when normalization alone proves the formula unsatisfiable.
    trivially_unsat: bool,
    stats: SolverStats,
}

impl Solver {
    /// Loads a formula.
    ///
    /// Duplicate literals are removed and tautologies dropped. Unit clauses are
    /// assigned immediately at level 0.
    #[must_use]
    pub fn new(cnf: &Cnf) -> Self {
        let num_vars = cnf.num_vars() as usize;
        let mut solver = Self {
            num_vars,
            clauses: Vec::with_capacity(cnf.clauses().len()),
            watches: vec![Vec::new(); num_vars * 2],
            assigns: vec![None; num_vars],
            trail: Vec::with_capacity(num_vars),
            levels: Vec::new(),
            queue_head: 0,
            trivially_unsat: false,
            stats: SolverStats::default(),
        };

        for clause in cnf.clauses() {
            let mut clause = clause.clone();
            clause.sort_unstable();
            clause.dedup();
            if has_complement(&clause) {
                continue;
            }
            match clause.len() {
                0 => solver.trivially_unsat = true,
                1 => {
                    let unit = clause[0];
                    match solver.value(unit) {
                        Some(false) => solver.trivially_unsat = true,
                        Some(true) => {}
                        None => solver.assign(unit),
                    }
                }
                _ => {
                    let index = solver.clauses.len();
                    solver.watches[clause[0].code()].push(index);
                    solver.watches[clause[1].code()].push(index);
                    solver.clauses.push(clause);
                }
            }
        }
        solver
    }

    #[must_use]
    pub const fn stats(&self) -> SolverStats {
        self.stats
    }

    /// Runs the search to completion.
    pub fn solve(&mut self) -> SatResult {
        if self.trivially_unsat {
            return SatResult::Unsatisfiable;
        }

        loop {
            if self.propagate().is_some() {
                self.stats.conflicts += 1;
                if !self.backtrack() {
                    tracing::trace!(stats = ?self.stats, "formula unsatisfiable");
                    return SatResult::Unsatisfiable;
                }
                continue;
            }

            let Some(decision) = self.pick_branch() else {
                tracing::trace!(stats = ?self.stats, "formula satisfiable");
                return SatResult::Satisfiable(self.model());
            };
            self.stats.decisions += 1;
            self.levels.push(Level {
                trail_start: self.trail.len(),
                decision,
                flipped: false,
            });
            self.assign(decision);
        }
    }

    fn value(&self, lit: Literal) -> Option<bool> {
        lit_value(&self.assigns, lit)
    }

    fn assign(&mut self, lit: Literal) {
        self.assigns[lit.var() as usize - 1] = Some(lit.is_positive());
        self.trail.push(lit);
    }

    /// Propagates queued assignments. Returns the index of a falsified clause on conflict.
    fn propagate(&mut self) -> Option<usize> {
        while self.queue_head < self.trail.len() {
            let falsified = !self.trail[self.queue_head];
            self.queue_head += 1;

            let mut watchers = std::mem::take(&mut self.watches[falsified.code()]);
            let mut i = 0;
            let mut conflict = None;

            while i < watchers.len() {
                let index = watchers[i];
                let clause = &mut self.clauses[index];
                if clause[0] == falsified {
                    clause.swap(0, 1);
                }

                let other = clause[0];
                if lit_value(&self.assigns, other) == Some(true) {
                    i += 1;
                    continue;
                }

                let replacement = (2..clause.len())
                    .find(|&k| lit_value(&self.assigns, clause[k]) != Some(false));
                if let Some(k) = replacement {
                    clause.swap(1, k);
                    self.watches[clause[1].code()].push(index);
                    watchers.swap_remove(i);
                    continue;
                }

                if lit_value(&self.assigns, other) == Some(false) {
                    conflict = Some(index);
                    break;
                }
                self.stats.propagations += 1;
                self.assigns[other.var() as usize - 1] = Some(other.is_positive());
                self.trail.push(other);
                i += 1;
            }

            self.watches[falsified.code()] = watchers;
            if conflict.is_some() {
                self.queue_head = self.trail.len();
                return conflict;
            }
        }
        None
    }

    /// Undoes decision levels until one can try its other polarity.
    ///
    /// Returns `false` when every level has been exhausted.
    fn backtrack(&mut self) -> bool {
        while let Some(level) = self.levels.pop() {
            for lit in self.trail.drain(level.trail_start..) {
                self.assigns[lit.var() as usize - 1] = None;
            }
            self.queue_head = self.trail.len();

            if !level.flipped {
                let flipped = !level.decision;
                self.levels.push(Level {
                    trail_start: self.trail.len(),
                    decision: flipped,
                    flipped: true,
                });
                self.assign(flipped);
                return true;
            }
        }
        false
    }

    /// Picks the next decision, or `None` once the remaining variables can all be false.
    ///
    /// Only positive literals are branched on. If no unsatisfied clause has an
    /// unassigned positive literal, every unsatisfied clause still has an
    /// unassigned negative one, so defaulting the rest to false satisfies them.
    fn pick_branch(&self) -> Option<Literal> {
        let mut best: Option<(usize, Literal)> = None;
        for clause in &self.clauses {
            let mut open = 0;
            let mut first = None;
            let mut satisfied = false;
            for &lit in clause {
                match self.value(lit) {
                    Some(true) => {
                        satisfied = true;
                        break;
                    }
                    None if lit.is_positive() => {
                        open += 1;
                        first.get_or_insert(lit);
                    }
                    _ => {}
                }
            }
            if satisfied {
                continue;
            }
            if let Some(lit) = first {
                if best.map_or(true, |(len, _)| open < len) {
                    best = Some((open, lit));
                    if open == 1 {
                        break;
                    }
                }
            }
        }
        best.map(|(_, lit)| lit)
    }

    fn model(&self) -> Model {
        Model {
            values: (0..self.num_vars)
                .map(|i| self.assigns[i].unwrap_or(false))
                .collect(),
        }
    }
}

fn lit_value(assigns: &[Option<bool>], lit: Literal) -> Option<bool> {
    assigns[lit.var() as usize - 1].map(|v| v == lit.is_positive())
}

/// Whether a sorted, deduplicated clause holds a literal and its negation.
fn has_complement(clause: &[Literal]) -> bool {
    clause
        .iter()
        .any(|&lit| lit.is_positive() && clause.binary_search(&!lit).is_ok())
}
