//! Knowledge-base files.
//!
//! A knowledge-base file is UTF-8 text with one logical unit per line.
//! Leading and trailing whitespace is trimmed, blank lines are skipped, and
//! a line beginning with `#` is a comment. In sentence mode each line is an
//! arbitrary propositional sentence, parsed and normalized to clauses; in
//! already-CNF mode each line is one clause written as space-separated
//! literals with `-` marking negation (e.g. `p -q r`).

use crate::logic::clause::Clause;
use crate::logic::error::Error;
use crate::logic::kb::KnowledgeBase;
use itertools::Itertools;
use std::io::BufRead;
use std::path::Path;

/// Reads a knowledge base from any buffered reader.
///
/// # Errors
///
/// [`Error::Io`] on read failure, [`Error::Syntax`] on the first malformed
/// line.
pub fn parse_kb<R: BufRead>(reader: R, already_cnf: bool) -> Result<KnowledgeBase, Error> {
    let mut kb = KnowledgeBase::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if already_cnf {
            kb.add_clause(Clause::parse(line)?);
        } else {
            kb.add_sentence(line)?;
        }
    }
    Ok(kb)
}

/// Reads a knowledge base from a file.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be opened or read, [`Error::Syntax`] on
/// the first malformed line.
pub fn load_file(path: impl AsRef<Path>, already_cnf: bool) -> Result<KnowledgeBase, Error> {
    let file = std::fs::File::open(path)?;
    parse_kb(std::io::BufReader::new(file), already_cnf)
}

/// Renders clauses in the already-CNF line format, one clause per line.
#[must_use]
pub fn to_clause_lines<'a>(clauses: impl IntoIterator<Item = &'a Clause>) -> String {
    let mut out = clauses
        .into_iter()
        .map(|clause| {
            clause
                .iter()
                .map(|lit| {
                    if lit.negated {
                        format!("-{}", lit.variable)
                    } else {
                        lit.variable.clone()
                    }
                })
                .join(" ")
        })
        .join("\n");
    out.push('\n');
    out
}
