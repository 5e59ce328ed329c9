use crate::logic::assignment::Assignment;
use crate::logic::clause::Clause;
use crate::logic::cnf::parse_and_normalize;
use crate::logic::dpll::{Dpll, Solution};
use crate::logic::entail::{self, Verdict};
use crate::logic::error::Error;
use itertools::Itertools;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A knowledge base: the conjunction of a set of clauses.
///
/// The variable set is owned by the base and maintained on every clause
/// addition, so independent bases never interfere. Adding a clause only ever
/// restricts the theory; the base is read-only while it is being solved or
/// queried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    clauses: BTreeSet<Clause>,
    variables: BTreeSet<String>,
}

impl KnowledgeBase {
    /// An empty (trivially true) knowledge base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause. Tautological clauses constrain nothing and are
    /// dropped.
    pub fn add_clause(&mut self, clause: Clause) {
        if clause.is_tautology() {
            debug!("dropping tautological clause {clause}");
            return;
        }
        self.variables
            .extend(clause.variables().map(str::to_string));
        self.clauses.insert(clause);
    }

    /// Parses a sentence, converts it to CNF and adds the resulting
    /// clauses.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] if the sentence is malformed; the base is left
    /// unchanged in that case.
    pub fn add_sentence(&mut self, sentence: &str) -> Result<(), Error> {
        for clause in parse_and_normalize(sentence)? {
            self.add_clause(clause);
        }
        Ok(())
    }

    /// The clauses of the base.
    #[must_use]
    pub const fn clauses(&self) -> &BTreeSet<Clause> {
        &self.clauses
    }

    /// Every variable mentioned by some clause.
    #[must_use]
    pub const fn variables(&self) -> &BTreeSet<String> {
        &self.variables
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the base has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Searches for an assignment satisfying every clause.
    #[must_use]
    pub fn solve(&self) -> Solution {
        Dpll::new(self.clauses.clone()).solve()
    }

    /// Whether the assignment makes every clause true.
    #[must_use]
    pub fn satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied_by(assignment))
    }

    /// Whether the base entails, refutes, or is agnostic about the
    /// hypothesis sentence.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] if the hypothesis is malformed.
    pub fn prove(&self, hypothesis: &str) -> Result<Verdict, Error> {
        entail::prove(self, hypothesis)
    }

    /// The entailed status of every variable of the base.
    #[must_use]
    pub fn audit(&self) -> BTreeMap<String, Verdict> {
        entail::audit(self)
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.clauses.iter().map(|c| format!("({c})")).join(" ∧ ")
        )
    }
}
