//! Definition registry.

use std::collections::HashMap;
use std::fmt;

use crate::dom::ArenaNodeId;

/// Registry identity of a term: `<tag>-<term>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermKey(String);

impl TermKey {
    pub fn new(tag: &str, term: &str) -> Self {
        TermKey(format!("{tag}-{term}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TermKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Definitions seen so far in one expansion pass.
///
/// Stores node ids, so a lookup sees the definition as it is at that moment,
/// including any references already expanded inside it.
#[derive(Debug, Default)]
pub struct Registry {
    definitions: HashMap<TermKey, ArenaNodeId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definition, returning the one it replaces.
    pub fn register(&mut self, key: TermKey, node: ArenaNodeId) -> Option<ArenaNodeId> {
        self.definitions.insert(key, node)
    }

    pub fn lookup(&self, key: &TermKey) -> Option<ArenaNodeId> {
        self.definitions.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
