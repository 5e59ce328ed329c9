use itertools::Itertools;
use rustc_hash::FxHashMap;

/// A partial mapping from variable identifiers to truth values.
///
/// During search each branch owns its assignment outright; sibling branches
/// never share one. A solution is an assignment covering every variable of
/// the knowledge base.
pub type Assignment = FxHashMap<String, bool>;

/// Renders an assignment as `p=true q=false ...`, sorted by variable.
#[must_use]
pub fn render(assignment: &Assignment) -> String {
    assignment
        .iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .map(|(var, value)| format!("{var}={value}"))
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_sorted() {
        let mut assignment = Assignment::default();
        assignment.insert("q".to_string(), false);
        assignment.insert("p".to_string(), true);
        assert_eq!(render(&assignment), "p=true q=false");
    }

    #[test]
    fn render_empty() {
        assert_eq!(render(&Assignment::default()), "");
    }
}
