//! Entailment checking by refutation.
//!
//! A base proves a hypothesis iff the base together with the hypothesis's
//! negation is unsatisfiable; it disproves the hypothesis iff the base
//! together with the hypothesis itself is. When neither union is
//! unsatisfiable the base is consistent with both readings and the answer is
//! unknown.

use crate::logic::clause::Clause;
use crate::logic::cnf::normalize;
use crate::logic::dpll::{Dpll, Solution};
use crate::logic::error::{Error, NormalizeError};
use crate::logic::expr::Expr;
use crate::logic::kb::KnowledgeBase;
use crate::logic::literal::Literal;
use crate::logic::parser::parse;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The relationship between a knowledge base and a hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every model of the base is a model of the hypothesis.
    Proved,
    /// Every model of the base is a model of the hypothesis's negation.
    Disproved,
    /// The base is consistent with the hypothesis and with its negation.
    Unknown,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proved => write!(f, "proved"),
            Self::Disproved => write!(f, "disproved"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Parses a hypothesis sentence and tests it against the base.
///
/// # Errors
///
/// [`Error::Syntax`] if the hypothesis is malformed.
pub fn prove(kb: &KnowledgeBase, hypothesis: &str) -> Result<Verdict, Error> {
    let expr = parse(hypothesis)?;
    Ok(prove_expr(kb, &expr)?)
}

/// Tests an already-parsed hypothesis against the base.
///
/// # Errors
///
/// [`NormalizeError`] if CNF conversion breaks its internal invariant.
pub fn prove_expr(kb: &KnowledgeBase, hypothesis: &Expr) -> Result<Verdict, NormalizeError> {
    let negated = normalize(&Expr::not(hypothesis.clone()))?;
    if refuted(kb, &negated) {
        return Ok(Verdict::Proved);
    }
    let affirmed = normalize(hypothesis)?;
    if refuted(kb, &affirmed) {
        return Ok(Verdict::Disproved);
    }
    Ok(Verdict::Unknown)
}

/// The entailed status of every variable: proved true, proved false, or
/// unknown.
#[must_use]
pub fn audit(kb: &KnowledgeBase) -> BTreeMap<String, Verdict> {
    kb.variables()
        .iter()
        .map(|variable| {
            let negative: BTreeSet<Clause> =
                [Clause::from_literals([Literal::negative(variable.clone())])]
                    .into_iter()
                    .collect();
            let positive: BTreeSet<Clause> =
                [Clause::from_literals([Literal::positive(variable.clone())])]
                    .into_iter()
                    .collect();
            let verdict = if refuted(kb, &negative) {
                Verdict::Proved
            } else if refuted(kb, &positive) {
                Verdict::Disproved
            } else {
                Verdict::Unknown
            };
            (variable.clone(), verdict)
        })
        .collect()
}

/// Whether the base unioned with the extra clauses is unsatisfiable.
fn refuted(kb: &KnowledgeBase, extra: &BTreeSet<Clause>) -> bool {
    let mut clauses = kb.clauses().clone();
    clauses.extend(extra.iter().cloned());
    let mut solver = Dpll::new(clauses);
    solver.solve() == Solution::Unsatisfiable
}
