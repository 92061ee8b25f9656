//! Column resolver: find a source column from an ordered alias list
//!
//! Matching is insensitive to case, diacritics and surrounding whitespace
//! (see [`normalize_name`]). It does not infer synonyms; a header only
//! matches when one of the supplied aliases normalizes to the same key.

use crate::normalize::normalize_name;
use crate::table::Table;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A resolved column together with the alias that matched it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMatch<'a> {
    /// Original column name in the table
    pub column: &'a str,
    /// The candidate alias that produced the match
    pub alias: &'a str,
}

/// Normalized-name lookup over a table's headers
///
/// When two headers normalize to the same key the leftmost one wins.
#[derive(Debug, Clone)]
pub struct ColumnIndex<'t> {
    by_key: HashMap<String, &'t str>,
}

impl<'t> ColumnIndex<'t> {
    /// Index the headers of `table`
    pub fn new(table: &'t Table) -> Self {
        let mut by_key: HashMap<String, &'t str> = HashMap::with_capacity(table.column_count());
        for column in &table.columns {
            let key = normalize_name(&column.name);
            match by_key.get(&key) {
                Some(existing) => {
                    warn!(
                        kept = *existing,
                        ignored = column.name.as_str(),
                        "duplicate header after normalization"
                    );
                }
                None => {
                    by_key.insert(key, column.name.as_str());
                }
            }
        }
        Self { by_key }
    }

    /// Number of distinct normalized headers
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Check whether no header was indexed
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Return the first candidate (in order) that matches a header
    pub fn resolve_match<'c, S: AsRef<str>>(
        &self,
        candidates: &'c [S],
    ) -> Option<ColumnMatch<'c>>
    where
        't: 'c,
    {
        candidates.iter().find_map(|candidate| {
            let alias = candidate.as_ref();
            self.by_key
                .get(&normalize_name(alias))
                .map(|&column| ColumnMatch { column, alias })
        })
    }

    /// Original name of the first header matched by `candidates`
    pub fn resolve<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&'t str> {
        let found = candidates
            .iter()
            .find_map(|candidate| self.by_key.get(&normalize_name(candidate.as_ref())).copied());
        debug!(?found, "resolved column");
        found
    }
}

/// Find the column of `table` matching the first possible alias in `candidates`
pub fn find_column<'t, S: AsRef<str>>(table: &'t Table, candidates: &[S]) -> Option<&'t str> {
    ColumnIndex::new(table).resolve(candidates)
}
