use std::collections::HashMap;

/// Lookup from any known identifier to the canonical id currently
/// representing that media item.
///
/// Only relates keys; the entries themselves live in the reconciler's map.
/// Built fresh for every reconciliation.
#[derive(Debug, Default, Clone)]
pub struct AliasMap {
    by_alias: HashMap<String, String>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `alias` at `canonical`. The first registration of an alias wins,
    /// and an id is never registered as an alias of itself.
    pub fn register(&mut self, alias: &str, canonical: &str) {
        let alias = alias.trim();
        if alias.is_empty() || alias == canonical {
            return;
        }
        self.by_alias
            .entry(alias.to_string())
            .or_insert_with(|| canonical.to_string());
    }

    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.by_alias.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}
