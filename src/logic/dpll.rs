//! The DPLL (Davis-Putnam-Logemann-Loveland) satisfiability solver.
//!
//! The solver searches recursively over a working copy of the clause set.
//! Each level first runs unit propagation to fixpoint, then pure-literal
//! elimination to fixpoint, checks for an empty clause (conflict) and for a
//! complete assignment, and otherwise branches on the smallest unassigned
//! variable. A decision is injected as a unit clause into the child's clause
//! set, so unit propagation is the single place where assignments are
//! recorded and clauses simplified.
//!
//! Both children of a branch are derived from the parent's state, never from
//! a sibling's: the true-branch gets clones, the false-branch consumes the
//! parent's own copies. Unsatisfiability is an ordinary result and drives
//! backtracking; nothing here aborts the process.

use crate::logic::assignment::Assignment;
use crate::logic::clause::Clause;
use crate::logic::literal::Literal;
use log::{debug, trace};
use std::collections::BTreeSet;

/// The outcome of an exhaustive search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// A total assignment over the solver's variables satisfying every
    /// clause.
    Satisfiable(Assignment),
    /// No assignment satisfies the clause set.
    Unsatisfiable,
}

impl Solution {
    /// Whether a satisfying assignment was found.
    #[must_use]
    pub const fn is_satisfiable(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    /// The satisfying assignment, if any.
    #[must_use]
    pub const fn assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Satisfiable(a) => Some(a),
            Self::Unsatisfiable => None,
        }
    }
}

/// Counters accumulated over a solver's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveStats {
    /// Branch decisions taken.
    pub decisions: u64,
    /// Assignments forced by unit propagation (including injected
    /// decisions).
    pub propagations: u64,
    /// Variables fixed by pure-literal elimination.
    pub pure_literals: u64,
    /// Branches abandoned on a contradiction.
    pub conflicts: u64,
}

/// Unit propagation derived two different required values for one variable.
/// A normal, logical outcome: the branch is unsatisfiable.
struct Conflict;

/// A DPLL solver over a fixed clause set.
#[derive(Debug, Clone)]
pub struct Dpll {
    clauses: BTreeSet<Clause>,
    variables: BTreeSet<String>,
    stats: SolveStats,
}

impl Dpll {
    /// Creates a solver for the given clause set. The variable universe is
    /// everything the clauses mention.
    #[must_use]
    pub fn new(clauses: BTreeSet<Clause>) -> Self {
        let variables = clauses
            .iter()
            .flat_map(|c| c.variables().map(str::to_string))
            .collect();
        Self {
            clauses,
            variables,
            stats: SolveStats::default(),
        }
    }

    /// Searches exhaustively for a satisfying assignment.
    pub fn solve(&mut self) -> Solution {
        let clauses = self.clauses.clone();
        // u64::MAX decisions cannot be reached, so the budget never trips.
        self.solve_rec(clauses, Assignment::default(), u64::MAX)
            .unwrap_or(Solution::Unsatisfiable)
    }

    /// Like [`solve`](Self::solve), but gives up once `max_decisions` branch
    /// decisions have been taken. `None` means the budget ran out before the
    /// search decided either way.
    pub fn solve_bounded(&mut self, max_decisions: u64) -> Option<Solution> {
        let clauses = self.clauses.clone();
        self.stats.decisions = 0;
        self.solve_rec(clauses, Assignment::default(), max_decisions)
    }

    /// Counters from all searches run on this solver.
    #[must_use]
    pub const fn stats(&self) -> SolveStats {
        self.stats
    }

    fn solve_rec(
        &mut self,
        mut remaining: BTreeSet<Clause>,
        mut assignment: Assignment,
        max_decisions: u64,
    ) -> Option<Solution> {
        if propagate_units(&mut remaining, &mut assignment, &mut self.stats).is_err() {
            return Some(Solution::Unsatisfiable);
        }
        while eliminate_pure_literals(&mut remaining, &mut assignment, &mut self.stats) {}

        if remaining.iter().any(Clause::is_empty) {
            self.stats.conflicts += 1;
            return Some(Solution::Unsatisfiable);
        }

        let Some(variable) = self
            .variables
            .iter()
            .find(|v| !assignment.contains_key(*v))
            .cloned()
        else {
            return Some(Solution::Satisfiable(assignment));
        };

        if self.stats.decisions >= max_decisions {
            return None;
        }
        self.stats.decisions += 1;
        debug!("branching on {variable}");

        let mut true_branch = remaining.clone();
        true_branch.insert(Clause::from_literals([Literal::positive(variable.clone())]));
        match self.solve_rec(true_branch, assignment.clone(), max_decisions)? {
            found @ Solution::Satisfiable(_) => return Some(found),
            Solution::Unsatisfiable => {}
        }

        let mut false_branch = remaining;
        false_branch.insert(Clause::from_literals([Literal::negative(variable)]));
        self.solve_rec(false_branch, assignment, max_decisions)
    }
}

/// Applies every unit clause to fixpoint: record the forced value, drop the
/// clauses the literal satisfies, and strip its complement from the rest.
/// Unit clauses are visited in the clause set's lexicographic order.
fn propagate_units(
    remaining: &mut BTreeSet<Clause>,
    assignment: &mut Assignment,
    stats: &mut SolveStats,
) -> Result<(), Conflict> {
    loop {
        let Some(lit) = remaining
            .iter()
            .find_map(|c| c.unit_literal().cloned())
        else {
            return Ok(());
        };

        let forced = !lit.negated;
        if let Some(&current) = assignment.get(&lit.variable) {
            if current != forced {
                debug!("{} is forced both ways", lit.variable);
                stats.conflicts += 1;
                return Err(Conflict);
            }
        }
        trace!("unit propagation assigns {} = {}", lit.variable, forced);
        assignment.insert(lit.variable.clone(), forced);
        stats.propagations += 1;

        let satisfied: Vec<Clause> = remaining
            .iter()
            .filter(|c| c.contains(&lit))
            .cloned()
            .collect();
        for clause in &satisfied {
            remaining.remove(clause);
        }

        let complement = !&lit;
        let weakened: Vec<Clause> = remaining
            .iter()
            .filter(|c| c.contains(&complement))
            .cloned()
            .collect();
        for clause in weakened {
            remaining.remove(&clause);
            let mut shrunk = clause;
            shrunk.remove(&complement);
            remaining.insert(shrunk);
        }
    }
}

/// Fixes every variable that occurs with a single polarity and drops the
/// clauses it satisfies. Returns whether any variable was eliminated.
fn eliminate_pure_literals(
    remaining: &mut BTreeSet<Clause>,
    assignment: &mut Assignment,
    stats: &mut SolveStats,
) -> bool {
    let mut progress = false;
    let variables: BTreeSet<String> = remaining
        .iter()
        .flat_map(|c| c.variables().map(str::to_string))
        .collect();

    for variable in variables {
        let mut seen_positive = false;
        let mut seen_negative = false;
        for lit in remaining.iter().flat_map(Clause::iter) {
            if lit.variable == variable {
                if lit.negated {
                    seen_negative = true;
                } else {
                    seen_positive = true;
                }
            }
        }
        let value = match (seen_positive, seen_negative) {
            (true, false) => true,
            (false, true) => false,
            // Mixed polarity, or already gone after an earlier elimination
            // this round.
            _ => continue,
        };

        trace!("pure literal fixes {variable} = {value}");
        assignment.insert(variable.clone(), value);
        stats.pure_literals += 1;
        progress = true;

        let satisfied: Vec<Clause> = remaining
            .iter()
            .filter(|c| c.contains_variable(&variable))
            .cloned()
            .collect();
        for clause in &satisfied {
            remaining.remove(clause);
        }
    }

    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::equiv;

    fn clauses(lines: &[&str]) -> BTreeSet<Clause> {
        lines.iter().map(|l| Clause::parse(l).unwrap()).collect()
    }

    #[test]
    fn single_positive_unit() {
        let mut solver = Dpll::new(clauses(&["p"]));
        let solution = solver.solve();
        assert_eq!(solution.assignment().and_then(|a| a.get("p")), Some(&true));
    }

    #[test]
    fn contradictory_units_are_unsatisfiable() {
        let mut solver = Dpll::new(clauses(&["p", "-p"]));
        assert_eq!(solver.solve(), Solution::Unsatisfiable);
    }

    #[test]
    fn unit_propagation_alone_solves() {
        let mut solver = Dpll::new(clauses(&["p q", "-p"]));
        let solution = solver.solve();
        let assignment = solution.assignment().unwrap();
        assert_eq!(assignment.get("p"), Some(&false));
        assert_eq!(assignment.get("q"), Some(&true));
    }

    #[test]
    fn all_polarity_combinations_over_two_variables_conflict() {
        let mut solver = Dpll::new(clauses(&["p q", "p -q", "-p q", "-p -q"]));
        assert_eq!(solver.solve(), Solution::Unsatisfiable);
        assert!(solver.stats().decisions > 0);
    }

    #[test]
    fn pure_literal_elimination_solves_without_branching() {
        let mut solver = Dpll::new(clauses(&["p q", "p -q"]));
        let solution = solver.solve();
        let assignment = solution.assignment().unwrap();
        assert_eq!(assignment.get("p"), Some(&true));
        assert!(assignment.contains_key("q"));
    }

    #[test]
    fn solutions_satisfy_every_clause() {
        let sets = [
            clauses(&["a b c", "-a b", "-b c", "-c a"]),
            clauses(&["a -b", "b -c", "c -a", "a b c"]),
            clauses(&["-a -b", "a b", "b c"]),
        ];
        for set in sets {
            let mut solver = Dpll::new(set.clone());
            if let Solution::Satisfiable(assignment) = solver.solve() {
                assert!(set.iter().all(|c| c.is_satisfied_by(&assignment)));
            }
        }
    }

    #[test]
    fn agrees_with_exhaustive_enumeration() {
        let sets = [
            clauses(&["a b", "-a -b"]),
            clauses(&["a", "-a b", "-b"]),
            clauses(&["a b c", "-a -b -c", "a -b", "-a c"]),
            clauses(&["a b", "a -b", "-a b", "-a -b"]),
        ];
        for set in sets {
            let variables: BTreeSet<String> = set
                .iter()
                .flat_map(|c| c.variables().map(str::to_string))
                .collect();
            let brute_force = equiv::all_assignments(&variables)
                .iter()
                .any(|a| set.iter().all(|c| c.is_satisfied_by(a)));
            let mut solver = Dpll::new(set);
            assert_eq!(solver.solve().is_satisfiable(), brute_force);
        }
    }

    #[test]
    fn solution_assigns_every_variable() {
        // c is mentioned only in a clause that unit propagation removes, but
        // a solution still covers it.
        let mut solver = Dpll::new(clauses(&["p", "p c"]));
        let solution = solver.solve();
        let assignment = solution.assignment().unwrap();
        assert!(assignment.contains_key("p"));
        assert!(assignment.contains_key("c"));
    }

    #[test]
    fn propagation_is_idempotent_at_fixpoint() {
        let mut remaining = clauses(&["p", "-p q", "q r s", "-s t"]);
        let mut assignment = Assignment::default();
        let mut stats = SolveStats::default();
        assert!(propagate_units(&mut remaining, &mut assignment, &mut stats).is_ok());

        let snapshot_clauses = remaining.clone();
        let snapshot_assignment = assignment.clone();
        assert!(propagate_units(&mut remaining, &mut assignment, &mut stats).is_ok());
        assert_eq!(remaining, snapshot_clauses);
        assert_eq!(assignment, snapshot_assignment);
    }

    #[test]
    fn pure_elimination_is_idempotent_at_fixpoint() {
        let mut remaining = clauses(&["p q", "p -q", "-q r", "q r"]);
        let mut assignment = Assignment::default();
        let mut stats = SolveStats::default();
        while eliminate_pure_literals(&mut remaining, &mut assignment, &mut stats) {}
        assert!(!eliminate_pure_literals(
            &mut remaining,
            &mut assignment,
            &mut stats
        ));
    }

    #[test]
    fn zero_decision_budget_reports_undecided() {
        let mut solver = Dpll::new(clauses(&["a b", "a -b", "-a b", "-a -b"]));
        assert_eq!(solver.solve_bounded(0), None);
        // The same instance decides with room to branch.
        assert_eq!(solver.solve_bounded(64), Some(Solution::Unsatisfiable));
    }

    #[test]
    fn empty_clause_set_is_trivially_satisfiable() {
        let mut solver = Dpll::new(BTreeSet::new());
        assert!(solver.solve().is_satisfiable());
    }

    #[test]
    fn empty_clause_is_a_contradiction() {
        let mut set = BTreeSet::new();
        set.insert(Clause::new());
        let mut solver = Dpll::new(set);
        assert_eq!(solver.solve(), Solution::Unsatisfiable);
    }
}
