#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![warn(missing_docs)]
//! Propositional-logic knowledge bases.
//!
//! This crate parses sentences of propositional logic, converts them to
//! Conjunctive Normal Form, and decides satisfiability and entailment with a
//! DPLL-style backtracking solver.

/// The `logic` module implements the propositional engine: literals, clauses,
/// expression trees, the CNF normalizer, the knowledge base, the DPLL solver
/// and the entailment checker.
pub mod logic;
