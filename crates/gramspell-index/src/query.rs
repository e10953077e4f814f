// Disjunctive query description
//
// A query is a flat list of SHOULD clauses: a record matches when at least
// one clause matches, and each matching clause adds its boost-weighted
// contribution to the record's relevance.

use std::fmt;

/// Exact match of one term in one field.
#[derive(Debug, Clone, PartialEq)]
pub struct TermClause {
    pub field: String,
    pub term: String,
    pub boost: f32,
}

/// OR of term clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    clauses: Vec<TermClause>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause with the neutral boost of 1.0.
    pub fn should(&mut self, field: impl Into<String>, term: impl Into<String>) {
        self.should_boosted(field, term, 1.0);
    }

    /// Add a clause with an explicit boost.
    pub fn should_boosted(&mut self, field: impl Into<String>, term: impl Into<String>, boost: f32) {
        self.clauses.push(TermClause {
            field: field.into(),
            term: term.into(),
            boost,
        });
    }

    pub fn clauses(&self) -> &[TermClause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for Query {
    /// Renders as `start3:sne^2 end3:ker gram3:sne ...`; a boost of 1.0 is
    /// omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", clause.field, clause.term)?;
            if clause.boost != 1.0 {
                write!(f, "^{}", clause.boost)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_neutral_boost() {
        let mut q = Query::new();
        q.should_boosted("start2", "ca", 2.0);
        q.should("gram2", "ca");
        q.should_boosted("end2", "at", 1.5);
        assert_eq!(q.to_string(), "start2:ca^2 gram2:ca end2:at^1.5");
    }

    #[test]
    fn empty_query_has_no_clauses() {
        let q = Query::new();
        assert!(q.is_empty());
        assert_eq!(q.to_string(), "");
    }
}
