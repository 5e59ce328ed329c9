//! Random satisfiable-instance generation.
//!
//! Instances are built around a planted solution: a random total assignment
//! is drawn first, and every generated clause contains one literal chosen to
//! be true under it. The remaining literals use distinct other variables
//! with random polarity, so the planted assignment satisfies the whole set
//! by construction. Useful for benchmarking and solver stress tests.

use crate::logic::assignment::Assignment;
use crate::logic::clause::Clause;
use crate::logic::literal::Literal;
use thiserror::Error;

/// Shape of a generated instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of distinct variables, named `p1` through `pN`.
    pub variables: usize,
    /// Number of clauses to generate.
    pub clauses: usize,
    /// Upper bound on literals per clause; widths are drawn from
    /// `max(1, k - 3) ..= k`.
    pub literals_per_clause: usize,
}

/// The requested instance shape is impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Clause literals must name distinct variables, so the width cannot
    /// exceed the variable count.
    #[error("cannot fit {literals} distinct literals into {variables} variables")]
    TooManyLiterals {
        /// Requested literals per clause.
        literals: usize,
        /// Available variables.
        variables: usize,
    },
    /// Zero variables, clauses, or literals per clause.
    #[error("variables, clauses and literals per clause must all be positive")]
    EmptyShape,
}

/// Generates a satisfiable clause set and the assignment planted in it.
///
/// Identical seeds produce identical instances.
///
/// # Errors
///
/// [`GenerateError`] if the shape is empty or the clause width exceeds the
/// variable count.
pub fn generate(
    config: &GeneratorConfig,
    rng: &mut fastrand::Rng,
) -> Result<(Vec<Clause>, Assignment), GenerateError> {
    if config.variables == 0 || config.clauses == 0 || config.literals_per_clause == 0 {
        return Err(GenerateError::EmptyShape);
    }
    if config.literals_per_clause > config.variables {
        return Err(GenerateError::TooManyLiterals {
            literals: config.literals_per_clause,
            variables: config.variables,
        });
    }

    let names: Vec<String> = (1..=config.variables).map(|i| format!("p{i}")).collect();
    let planted: Assignment = names.iter().map(|n| (n.clone(), rng.bool())).collect();

    let mut clauses = Vec::with_capacity(config.clauses);
    for _ in 0..config.clauses {
        let lower = config.literals_per_clause.saturating_sub(3).max(1);
        let width = rng.usize(lower..=config.literals_per_clause);

        // One literal is anchored to the planted solution; the clause can
        // never be falsified by it.
        let anchor = rng.usize(0..names.len());
        let mut literals = vec![Literal::new(names[anchor].clone(), !planted[&names[anchor]])];

        let mut others: Vec<usize> = (0..names.len()).filter(|&i| i != anchor).collect();
        rng.shuffle(&mut others);
        for &i in others.iter().take(width - 1) {
            literals.push(Literal::new(names[i].clone(), rng.bool()));
        }

        clauses.push(Clause::from_literals(literals));
    }

    Ok((clauses, planted))
}
