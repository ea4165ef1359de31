//! Run-scoped resolution of upstream external identifiers.

use std::collections::{HashMap, HashSet};

/// Maps external identifiers (upstream `url` strings) to local surrogate
/// ids for one entity kind, built stage by stage during a sync run and
/// discarded afterwards.
///
/// Absence is not an error: an identifier this run never saw resolves to
/// `None` and the caller omits the reference. This is the single lenient
/// branch for every reference field.
#[derive(Debug, Clone, Default)]
pub struct ResolverMap {
    entries: HashMap<String, String>,
}

impl ResolverMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the local id persisted for an external identifier.
    pub fn record(&mut self, external_id: impl Into<String>, local_id: impl Into<String>) {
        self.entries.insert(external_id.into(), local_id.into());
    }

    /// Resolve one external identifier to its local id, if seen this run.
    pub fn resolve(&self, external_id: &str) -> Option<&str> {
        self.entries.get(external_id).map(String::as_str)
    }

    /// Resolve a list of external identifiers, silently dropping unresolved
    /// entries and collapsing duplicates. First-seen order is kept.
    pub fn resolve_all(&self, external_ids: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        external_ids
            .iter()
            .filter_map(|external_id| self.resolve(external_id))
            .filter(|local_id| seen.insert(local_id.to_string()))
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
