//! Per-resource capability table.

use std::collections::HashMap;

/// Realm list of the current principal. Never realm scoped.
pub const MY_REALMS: &str = "myrealms";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCapabilities {
    /// Whether the realm id is part of the resource path.
    pub realm_scoped: bool,
}

impl Default for ResourceCapabilities {
    fn default() -> Self {
        Self { realm_scoped: true }
    }
}

/// Capabilities keyed by resource name. Resources not listed are realm
/// scoped.
#[derive(Debug, Clone)]
pub struct ResourceTable {
    entries: HashMap<String, ResourceCapabilities>,
}

impl Default for ResourceTable {
    fn default() -> Self {
        let mut table = Self {
            entries: HashMap::new(),
        };
        table.insert(MY_REALMS, ResourceCapabilities { realm_scoped: false });
        table
    }
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: impl Into<String>, caps: ResourceCapabilities) {
        self.entries.insert(resource.into(), caps);
    }

    pub fn with(mut self, resource: impl Into<String>, caps: ResourceCapabilities) -> Self {
        self.insert(resource, caps);
        self
    }

    pub fn get(&self, resource: &str) -> ResourceCapabilities {
        self.entries.get(resource).copied().unwrap_or_default()
    }

    pub fn is_realm_scoped(&self, resource: &str) -> bool {
        self.get(resource).realm_scoped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn myrealms_is_the_default_exception() {
        let table = ResourceTable::new();
        assert!(!table.is_realm_scoped(MY_REALMS));
        assert!(table.is_realm_scoped("apps"));
        assert!(table.is_realm_scoped("anything-else"));
    }

    #[test]
    fn entries_can_be_overridden() {
        let table = ResourceTable::new()
            .with("realms", ResourceCapabilities { realm_scoped: false })
            .with(MY_REALMS, ResourceCapabilities { realm_scoped: true });
        assert!(!table.is_realm_scoped("realms"));
        assert!(table.is_realm_scoped(MY_REALMS));
    }
}
