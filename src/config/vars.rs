//! Variable table with declare-or-overwrite semantics and cross-substitution.
use indexmap::IndexMap;

use super::subst::replace;

/// Variable holding the action applied to file records that declare none.
pub const DEFAULT_ACTION_VAR: &str = "$DefaultAction";

/// Variable that, when declared, forces its value as the effective action of
/// every file record.
pub const OVERRIDE_ACTION_VAR: &str = "$OverrideAction";

/// Value seeded into [`DEFAULT_ACTION_VAR`] before any document is loaded.
pub const DEFAULT_ACTION: &str = "link";

/// Insertion-ordered mapping from variable name to string value.
///
/// Names are matched case-sensitively and by literal text; the `$` prefix is
/// a documentation convention, not syntax. Entries are only ever inserted or
/// overwritten, never removed, and the table becomes read-only once
/// [`resolve_all`](Self::resolve_all) has run.
#[derive(Debug, Clone)]
pub struct VariableTable {
    entries: IndexMap<String, String>,
}

impl VariableTable {
    /// Create a table seeded with `$DefaultAction = link`.
    #[must_use]
    pub fn new() -> Self {
        let mut entries = IndexMap::new();
        entries.insert(DEFAULT_ACTION_VAR.to_owned(), DEFAULT_ACTION.to_owned());
        Self { entries }
    }

    /// Insert a new entry or overwrite the existing value for `name`.
    pub fn declare_or_set(&mut self, name: &str, value: &str) {
        self.entries.insert(name.to_owned(), value.to_owned());
    }

    /// Look up the current value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Substitute every variable into every other variable's value, once.
    ///
    /// For each ordered pair of distinct entries (A, B) in insertion order,
    /// literal occurrences of A's name in B's value are replaced with A's
    /// value. One full cross-product pass: chained references resolve
    /// completely only when the pass order happens to visit them in a
    /// dependency-satisfying sequence, and cyclic references splice whatever
    /// value each entry held when visited. Both outcomes are accepted; the
    /// pass never fails.
    pub fn resolve_all(&mut self) {
        for i in 0..self.entries.len() {
            let Some((name, value)) = self
                .entries
                .get_index(i)
                .map(|(k, v)| (k.clone(), v.clone()))
            else {
                continue;
            };
            for j in 0..self.entries.len() {
                if j == i {
                    continue;
                }
                if let Some((_, subject)) = self.entries.get_index_mut(j) {
                    *subject = replace(&name, &value, subject);
                }
            }
        }
    }

    /// Apply every entry, in insertion order, once, to `subject`.
    ///
    /// This is the per-record resolution pass: it runs after
    /// [`resolve_all`](Self::resolve_all), so record fields may reference
    /// variables even though the table's own cross-resolution has finished.
    #[must_use]
    pub fn expand(&self, subject: &str) -> String {
        let mut out = subject.to_owned();
        for (name, value) in &self.entries {
            out = replace(name, value, &out);
        }
        out
    }
}

impl Default for VariableTable {
    fn default() -> Self {
        Self::new()
    }
}
