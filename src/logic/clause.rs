use crate::logic::assignment::Assignment;
use crate::logic::error::SyntaxError;
use crate::logic::literal::Literal;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// A disjunction of literals.
///
/// Literals are kept sorted and deduplicated, so two clauses with the same
/// literal set compare equal and clause sets iterate in a fixed lexicographic
/// order. The empty clause is a contradiction; a unit clause forces its only
/// literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: SmallVec<[Literal; 4]>,
}

impl Clause {
    /// The empty clause.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a clause from literals, dropping duplicates.
    pub fn from_literals(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut clause = Self::new();
        for lit in literals {
            clause.insert(lit);
        }
        clause
    }

    /// Parses the clause-line form: space-separated literals, `-` negates
    /// (e.g. `p -q r`). At least one literal is required.
    pub fn parse(line: &str) -> Result<Self, SyntaxError> {
        let mut clause = Self::new();
        for token in line.split_whitespace() {
            clause.insert(token.parse()?);
        }
        if clause.is_empty() {
            return Err(SyntaxError::UnexpectedEnd);
        }
        Ok(clause)
    }

    /// Adds a literal, keeping the contents sorted. Duplicates are ignored.
    pub fn insert(&mut self, literal: Literal) {
        if let Err(pos) = self.literals.binary_search(&literal) {
            self.literals.insert(pos, literal);
        }
    }

    /// Removes a literal if present. Returns whether it was there.
    pub fn remove(&mut self, literal: &Literal) -> bool {
        match self.literals.binary_search(literal) {
            Ok(pos) => {
                self.literals.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Whether the exact literal (variable and polarity) occurs.
    #[must_use]
    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.binary_search(literal).is_ok()
    }

    /// Whether the variable occurs with either polarity.
    #[must_use]
    pub fn contains_variable(&self, variable: &str) -> bool {
        self.literals.iter().any(|l| l.variable == variable)
    }

    /// Number of literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Whether this is the empty clause, i.e. a contradiction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Whether this clause has exactly one literal.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// The forced literal of a unit clause.
    #[must_use]
    pub fn unit_literal(&self) -> Option<&Literal> {
        if self.is_unit() {
            self.literals.first()
        } else {
            None
        }
    }

    /// Whether some variable occurs with both polarities, making the clause
    /// true under every assignment.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        // Sorted order puts both polarities of a variable next to each other.
        self.literals
            .windows(2)
            .any(|w| w[0].variable == w[1].variable && w[0].negated != w[1].negated)
    }

    /// Iterates the literals in sorted order.
    pub fn iter(&self) -> std::slice::Iter<'_, Literal> {
        self.literals.iter()
    }

    /// Iterates the variables mentioned (a tautology yields its variable
    /// twice).
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.literals.iter().map(|l| l.variable.as_str())
    }

    /// Whether the assignment makes some literal true. Unassigned variables
    /// satisfy nothing.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals
            .iter()
            .any(|l| assignment.get(&l.variable) == Some(&!l.negated))
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "⊥");
        }
        write!(f, "{}", self.literals.iter().join(" ∨ "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::assignment::Assignment;

    #[test]
    fn insert_sorts_and_deduplicates() {
        let mut clause = Clause::new();
        clause.insert(Literal::positive("q"));
        clause.insert(Literal::positive("p"));
        clause.insert(Literal::positive("q"));
        assert_eq!(clause.len(), 2);
        let vars: Vec<_> = clause.variables().collect();
        assert_eq!(vars, vec!["p", "q"]);
    }

    #[test]
    fn same_literal_set_is_same_clause() {
        let a = Clause::from_literals([Literal::positive("p"), Literal::negative("q")]);
        let b = Clause::from_literals([Literal::negative("q"), Literal::positive("p")]);
        assert_eq!(a, b);
    }

    #[test]
    fn unit_and_empty_queries() {
        let empty = Clause::new();
        assert!(empty.is_empty());
        assert!(!empty.is_unit());
        assert_eq!(empty.unit_literal(), None);

        let unit = Clause::from_literals([Literal::negative("p")]);
        assert!(unit.is_unit());
        assert_eq!(unit.unit_literal(), Some(&Literal::negative("p")));
    }

    #[test]
    fn detects_tautologies() {
        let taut = Clause::from_literals([
            Literal::positive("p"),
            Literal::negative("p"),
            Literal::positive("q"),
        ]);
        assert!(taut.is_tautology());

        let plain = Clause::from_literals([Literal::positive("p"), Literal::negative("q")]);
        assert!(!plain.is_tautology());
    }

    #[test]
    fn removal() {
        let mut clause = Clause::from_literals([Literal::positive("p"), Literal::negative("q")]);
        assert!(clause.remove(&Literal::negative("q")));
        assert!(!clause.remove(&Literal::negative("q")));
        assert!(clause.is_unit());
    }

    #[test]
    fn parses_clause_lines() {
        let clause = Clause::parse("p -q r").unwrap();
        assert_eq!(clause.len(), 3);
        assert!(clause.contains(&Literal::negative("q")));
        assert!(Clause::parse("   ").is_err());
        assert!(matches!(
            Clause::parse("p !q"),
            Err(SyntaxError::InvalidLiteral(_))
        ));
    }

    #[test]
    fn evaluation_under_assignment() {
        let clause = Clause::parse("p -q").unwrap();
        let mut assignment = Assignment::default();
        assignment.insert("p".to_string(), false);
        assignment.insert("q".to_string(), true);
        assert!(!clause.is_satisfied_by(&assignment));
        assignment.insert("q".to_string(), false);
        assert!(clause.is_satisfied_by(&assignment));
    }

    #[test]
    fn display_joins_with_disjunction_sign() {
        let clause = Clause::parse("p -q").unwrap();
        assert_eq!(clause.to_string(), "p ∨ ¬q");
        assert_eq!(Clause::new().to_string(), "⊥");
    }
}
