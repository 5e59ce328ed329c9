use crate::logic::assignment::Assignment;
use std::collections::BTreeSet;
use std::fmt;

/// A propositional sentence as a tree.
///
/// Leaves are variable names; internal nodes are one of the six connectives.
/// Trees are never mutated in place: every rewrite pass builds a new tree, so
/// a pass can recurse into already-transformed children without observing
/// partially rewritten siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expr {
    /// An atomic variable.
    Var(String),
    /// `¬e`
    Not(Box<Expr>),
    /// `l ∧ r`
    And(Box<Expr>, Box<Expr>),
    /// `l ∨ r`
    Or(Box<Expr>, Box<Expr>),
    /// `l ⊕ r`
    Xor(Box<Expr>, Box<Expr>),
    /// `l ⇒ r`
    Implies(Box<Expr>, Box<Expr>),
    /// `l ⇔ r`
    Iff(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// An atomic variable.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// `¬e`
    #[must_use]
    pub fn not(e: Self) -> Self {
        Self::Not(Box::new(e))
    }

    /// `l ∧ r`
    #[must_use]
    pub fn and(l: Self, r: Self) -> Self {
        Self::And(Box::new(l), Box::new(r))
    }

    /// `l ∨ r`
    #[must_use]
    pub fn or(l: Self, r: Self) -> Self {
        Self::Or(Box::new(l), Box::new(r))
    }

    /// `l ⊕ r`
    #[must_use]
    pub fn xor(l: Self, r: Self) -> Self {
        Self::Xor(Box::new(l), Box::new(r))
    }

    /// `l ⇒ r`
    #[must_use]
    pub fn implies(l: Self, r: Self) -> Self {
        Self::Implies(Box::new(l), Box::new(r))
    }

    /// `l ⇔ r`
    #[must_use]
    pub fn iff(l: Self, r: Self) -> Self {
        Self::Iff(Box::new(l), Box::new(r))
    }

    /// A short name for the node kind, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Var(_) => "variable",
            Self::Not(_) => "¬",
            Self::And(..) => "∧",
            Self::Or(..) => "∨",
            Self::Xor(..) => "⊕",
            Self::Implies(..) => "⇒",
            Self::Iff(..) => "⇔",
        }
    }

    /// Evaluates the sentence under an assignment. Unbound variables count
    /// as false.
    #[must_use]
    pub fn eval(&self, assignment: &Assignment) -> bool {
        match self {
            Self::Var(v) => assignment.get(v).copied().unwrap_or(false),
            Self::Not(e) => !e.eval(assignment),
            Self::And(l, r) => l.eval(assignment) && r.eval(assignment),
            Self::Or(l, r) => l.eval(assignment) || r.eval(assignment),
            Self::Xor(l, r) => l.eval(assignment) ^ r.eval(assignment),
            Self::Implies(l, r) => !l.eval(assignment) || r.eval(assignment),
            Self::Iff(l, r) => l.eval(assignment) == r.eval(assignment),
        }
    }

    /// Every variable mentioned in the sentence.
    #[must_use]
    pub fn variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<String>) {
        match self {
            Self::Var(v) => {
                out.insert(v.clone());
            }
            Self::Not(e) => e.collect_variables(out),
            Self::And(l, r)
            | Self::Or(l, r)
            | Self::Xor(l, r)
            | Self::Implies(l, r)
            | Self::Iff(l, r) => {
                l.collect_variables(out);
                r.collect_variables(out);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(v) => write!(f, "{v}"),
            Self::Not(e) => match e.as_ref() {
                Self::Var(v) => write!(f, "¬{v}"),
                inner => write!(f, "¬({inner})"),
            },
            Self::And(l, r) => write!(f, "({l} ∧ {r})"),
            Self::Or(l, r) => write!(f, "({l} ∨ {r})"),
            Self::Xor(l, r) => write!(f, "({l} ⊕ {r})"),
            Self::Implies(l, r) => write!(f, "({l} ⇒ {r})"),
            Self::Iff(l, r) => write!(f, "({l} ⇔ {r})"),
        }
    }
}
