//! Conversion to Conjunctive Normal Form.
//!
//! The conversion is an ordered pipeline of whole-tree rewrites, each pure
//! and total: eliminate IFF, then IMPLIES, then XOR; push negations inward
//! with De Morgan's laws; distribute OR over AND until no OR node has an AND
//! child, re-pushing negations between rounds; finally walk the top-level
//! conjunction and extract one clause per conjunct. Every pass returns a new
//! tree and leaves its input untouched.

use crate::logic::clause::Clause;
use crate::logic::error::{Error, NormalizeError};
use crate::logic::expr::Expr;
use crate::logic::literal::Literal;
use crate::logic::parser::parse;
use std::collections::BTreeSet;

/// `a ⇔ b` becomes `(a ⇒ b) ∧ (b ⇒ a)`, bottom-up.
fn eliminate_iff(expr: &Expr) -> Expr {
    match expr {
        Expr::Iff(l, r) => {
            let l = eliminate_iff(l);
            let r = eliminate_iff(r);
            Expr::and(
                Expr::implies(l.clone(), r.clone()),
                Expr::implies(r, l),
            )
        }
        Expr::Implies(l, r) => Expr::implies(eliminate_iff(l), eliminate_iff(r)),
        Expr::Xor(l, r) => Expr::xor(eliminate_iff(l), eliminate_iff(r)),
        Expr::And(l, r) => Expr::and(eliminate_iff(l), eliminate_iff(r)),
        Expr::Or(l, r) => Expr::or(eliminate_iff(l), eliminate_iff(r)),
        Expr::Not(e) => Expr::not(eliminate_iff(e)),
        Expr::Var(v) => Expr::Var(v.clone()),
    }
}

/// `a ⇒ b` becomes `¬a ∨ b`.
fn eliminate_implies(expr: &Expr) -> Expr {
    match expr {
        Expr::Implies(l, r) => Expr::or(
            Expr::not(eliminate_implies(l)),
            eliminate_implies(r),
        ),
        Expr::Iff(l, r) => Expr::iff(eliminate_implies(l), eliminate_implies(r)),
        Expr::Xor(l, r) => Expr::xor(eliminate_implies(l), eliminate_implies(r)),
        Expr::And(l, r) => Expr::and(eliminate_implies(l), eliminate_implies(r)),
        Expr::Or(l, r) => Expr::or(eliminate_implies(l), eliminate_implies(r)),
        Expr::Not(e) => Expr::not(eliminate_implies(e)),
        Expr::Var(v) => Expr::Var(v.clone()),
    }
}

/// `a ⊕ b` becomes `(¬a ∧ b) ∨ (a ∧ ¬b)`.
fn eliminate_xor(expr: &Expr) -> Expr {
    match expr {
        Expr::Xor(l, r) => {
            let l = eliminate_xor(l);
            let r = eliminate_xor(r);
            Expr::or(
                Expr::and(Expr::not(l.clone()), r.clone()),
                Expr::and(l, Expr::not(r)),
            )
        }
        Expr::Iff(l, r) => Expr::iff(eliminate_xor(l), eliminate_xor(r)),
        Expr::Implies(l, r) => Expr::implies(eliminate_xor(l), eliminate_xor(r)),
        Expr::And(l, r) => Expr::and(eliminate_xor(l), eliminate_xor(r)),
        Expr::Or(l, r) => Expr::or(eliminate_xor(l), eliminate_xor(r)),
        Expr::Not(e) => Expr::not(eliminate_xor(e)),
        Expr::Var(v) => Expr::Var(v.clone()),
    }
}

/// De Morgan's laws plus double-negation elimination. After a fixpoint of
/// this pass every NOT has an atomic operand.
fn push_negations(expr: &Expr) -> Expr {
    match expr {
        Expr::Not(inner) => match inner.as_ref() {
            Expr::Var(v) => Expr::not(Expr::Var(v.clone())),
            Expr::Not(e) => push_negations(e),
            Expr::And(l, r) => Expr::or(
                push_negations(&Expr::not((**l).clone())),
                push_negations(&Expr::not((**r).clone())),
            ),
            Expr::Or(l, r) => Expr::and(
                push_negations(&Expr::not((**l).clone())),
                push_negations(&Expr::not((**r).clone())),
            ),
            // Connectives the earlier passes remove; left for extraction to
            // reject if they ever survive.
            other => Expr::not(push_negations(other)),
        },
        Expr::And(l, r) => Expr::and(push_negations(l), push_negations(r)),
        Expr::Or(l, r) => Expr::or(push_negations(l), push_negations(r)),
        Expr::Xor(l, r) => Expr::xor(push_negations(l), push_negations(r)),
        Expr::Implies(l, r) => Expr::implies(push_negations(l), push_negations(r)),
        Expr::Iff(l, r) => Expr::iff(push_negations(l), push_negations(r)),
        Expr::Var(v) => Expr::Var(v.clone()),
    }
}

/// `(a ∧ b) ∨ c` becomes `(a ∨ c) ∧ (b ∨ c)`, and symmetrically on the
/// right.
fn distribute_or(expr: &Expr) -> Expr {
    match expr {
        Expr::Or(l, r) => {
            let l = distribute_or(l);
            let r = distribute_or(r);
            match (l, r) {
                (Expr::And(a, b), r) => Expr::and(
                    distribute_or(&Expr::or(*a, r.clone())),
                    distribute_or(&Expr::or(*b, r)),
                ),
                (l, Expr::And(a, b)) => Expr::and(
                    distribute_or(&Expr::or(l.clone(), *a)),
                    distribute_or(&Expr::or(l, *b)),
                ),
                (l, r) => Expr::or(l, r),
            }
        }
        Expr::And(l, r) => Expr::and(distribute_or(l), distribute_or(r)),
        Expr::Not(e) => Expr::not(distribute_or(e)),
        Expr::Xor(l, r) => Expr::xor(distribute_or(l), distribute_or(r)),
        Expr::Implies(l, r) => Expr::implies(distribute_or(l), distribute_or(r)),
        Expr::Iff(l, r) => Expr::iff(distribute_or(l), distribute_or(r)),
        Expr::Var(v) => Expr::Var(v.clone()),
    }
}

/// Converts an expression tree to an equivalent set of clauses.
///
/// Tautological conjuncts (a variable with both polarities) are dropped:
/// they are true under every assignment and add no constraint.
///
/// # Errors
///
/// [`NormalizeError`] if the rewritten tree is not a conjunction of
/// disjunctions of literals. This indicates a defect in the pipeline itself
/// and cannot be provoked by well-formed input.
pub fn normalize(expr: &Expr) -> Result<BTreeSet<Clause>, NormalizeError> {
    let expr = eliminate_iff(expr);
    let expr = eliminate_implies(&expr);
    let expr = eliminate_xor(&expr);
    // Distribution can re-expose negated conjunctions, so negation push-in
    // and distribution alternate until neither makes progress.
    let mut expr = push_negations(&expr);
    loop {
        let next = push_negations(&distribute_or(&expr));
        if next == expr {
            break;
        }
        expr = next;
    }

    let mut clauses = BTreeSet::new();
    collect_clauses(&expr, &mut clauses)?;
    Ok(clauses)
}

/// Parses a sentence and converts it to clauses in one step.
///
/// # Errors
///
/// [`Error::Syntax`] for malformed sentences, [`Error::Normalize`] for an
/// internal normalizer defect.
pub fn parse_and_normalize(sentence: &str) -> Result<BTreeSet<Clause>, Error> {
    let expr = parse(sentence)?;
    Ok(normalize(&expr)?)
}

fn collect_clauses(expr: &Expr, out: &mut BTreeSet<Clause>) -> Result<(), NormalizeError> {
    match expr {
        Expr::And(l, r) => {
            collect_clauses(l, out)?;
            collect_clauses(r, out)?;
        }
        conjunct => {
            let mut clause = Clause::new();
            collect_literals(conjunct, &mut clause)?;
            if !clause.is_tautology() {
                out.insert(clause);
            }
        }
    }
    Ok(())
}

fn collect_literals(expr: &Expr, clause: &mut Clause) -> Result<(), NormalizeError> {
    match expr {
        Expr::Or(l, r) => {
            collect_literals(l, clause)?;
            collect_literals(r, clause)?;
        }
        Expr::Var(v) => clause.insert(Literal::positive(v.clone())),
        Expr::Not(inner) => match inner.as_ref() {
            Expr::Var(v) => clause.insert(Literal::negative(v.clone())),
            other => return Err(NormalizeError::DanglingNegation(other.kind())),
        },
        other => return Err(NormalizeError::MalformedConjunct(other.kind())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::equiv;
    use proptest::prelude::*;

    fn clause_set(lines: &[&str]) -> BTreeSet<Clause> {
        lines.iter().map(|l| Clause::parse(l).unwrap()).collect()
    }

    #[test]
    fn implication_becomes_one_clause() {
        let clauses = parse_and_normalize("p => q").unwrap();
        assert_eq!(clauses, clause_set(&["-p q"]));
    }

    #[test]
    fn iff_becomes_two_clauses() {
        let clauses = parse_and_normalize("p <=> q").unwrap();
        assert_eq!(clauses, clause_set(&["-p q", "p -q"]));
    }

    #[test]
    fn xor_becomes_two_clauses() {
        let clauses = parse_and_normalize("p x q").unwrap();
        assert_eq!(clauses, clause_set(&["p q", "-p -q"]));
    }

    #[test]
    fn double_negation_cancels() {
        let clauses = parse_and_normalize("--p").unwrap();
        assert_eq!(clauses, clause_set(&["p"]));
    }

    #[test]
    fn de_morgan() {
        assert_eq!(
            parse_and_normalize("-(p ^ q)").unwrap(),
            clause_set(&["-p -q"])
        );
        assert_eq!(
            parse_and_normalize("-(p v q)").unwrap(),
            clause_set(&["-p", "-q"])
        );
    }

    #[test]
    fn distribution() {
        let clauses = parse_and_normalize("(a ^ b) v c").unwrap();
        assert_eq!(clauses, clause_set(&["a c", "b c"]));
        let clauses = parse_and_normalize("c v (a ^ b)").unwrap();
        assert_eq!(clauses, clause_set(&["a c", "b c"]));
    }

    #[test]
    fn tautologies_are_dropped() {
        assert!(parse_and_normalize("p v -p").unwrap().is_empty());
        // A tautological conjunct vanishes; the rest stays.
        let clauses = parse_and_normalize("(p v -p) ^ q").unwrap();
        assert_eq!(clauses, clause_set(&["q"]));
    }

    #[test]
    fn duplicate_literals_collapse() {
        let clauses = parse_and_normalize("p v p").unwrap();
        assert_eq!(clauses, clause_set(&["p"]));
    }

    #[test]
    fn chained_equivalences_stay_equivalent() {
        for sentence in [
            "(a <=> b) <=> c",
            "a <=> (b <=> c)",
            "(a => b) => (b => c)",
            "a x (b x c)",
            "-(a <=> b)",
            "(a ^ b) v (c ^ d)",
            "-(p => (q => r))",
        ] {
            let expr = parse(sentence).unwrap();
            let clauses = normalize(&expr).unwrap();
            assert!(
                equiv::equivalent(&expr, &clauses),
                "normalization changed the meaning of {sentence}"
            );
        }
    }

    #[test]
    fn clause_shape_holds() {
        let clauses = parse_and_normalize("(a <=> b) => (c x d)").unwrap();
        for clause in &clauses {
            assert!(!clause.is_empty());
            assert!(!clause.is_tautology());
        }
    }

    fn arb_expr() -> impl Strategy<Value = Expr> {
        let leaf = prop_oneof![
            Just(Expr::var("p")),
            Just(Expr::var("q")),
            Just(Expr::var("r")),
            Just(Expr::var("s")),
        ];
        leaf.prop_recursive(3, 16, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(Expr::not),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::and(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::or(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::xor(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::implies(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::iff(a, b)),
            ]
        })
    }

    proptest! {
        #[test]
        fn normalization_preserves_semantics(expr in arb_expr()) {
            let clauses = normalize(&expr).unwrap();
            prop_assert!(equiv::equivalent(&expr, &clauses));
        }
    }
}
