//! Exhaustive truth-table checks.
//!
//! Everything here enumerates all `2^n` assignments over a variable set, so
//! it is strictly a validation and testing aid. The solving path never calls
//! into this module.

use crate::logic::assignment::Assignment;
use crate::logic::clause::Clause;
use crate::logic::expr::Expr;
use crate::logic::kb::KnowledgeBase;
use itertools::Itertools;
use std::collections::BTreeSet;

/// Every total assignment over the given variables. The empty variable set
/// has exactly one assignment, the empty one.
#[must_use]
pub fn all_assignments(variables: &BTreeSet<String>) -> Vec<Assignment> {
    if variables.is_empty() {
        return vec![Assignment::default()];
    }
    variables
        .iter()
        .map(|v| [(v.clone(), false), (v.clone(), true)])
        .multi_cartesian_product()
        .map(|pairs| pairs.into_iter().collect())
        .collect()
}

/// Whether the assignment satisfies every clause of the set.
#[must_use]
pub fn satisfies_all(clauses: &BTreeSet<Clause>, assignment: &Assignment) -> bool {
    clauses.iter().all(|c| c.is_satisfied_by(assignment))
}

/// Whether the clause set, read as a conjunction of disjunctions, evaluates
/// identically to the expression under every total assignment over the
/// union of their variables.
#[must_use]
pub fn equivalent(expr: &Expr, clauses: &BTreeSet<Clause>) -> bool {
    let mut variables = expr.variables();
    variables.extend(
        clauses
            .iter()
            .flat_map(|c| c.variables().map(str::to_string)),
    );
    all_assignments(&variables)
        .iter()
        .all(|a| expr.eval(a) == satisfies_all(clauses, a))
}

/// Whether two knowledge bases agree under every assignment. Bases over
/// different variable sets are never considered equivalent.
#[must_use]
pub fn kb_equivalent(a: &KnowledgeBase, b: &KnowledgeBase) -> bool {
    if a.variables() != b.variables() {
        return false;
    }
    all_assignments(a.variables())
        .iter()
        .all(|m| a.satisfied_by(m) == b.satisfied_by(m))
}
