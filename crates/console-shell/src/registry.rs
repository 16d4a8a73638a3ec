use aac_console_provider::{ConsoleKind, ResourceTable};

use crate::resources::{resources_for, ResourceDefinition};

/// Resources registered for one console, in menu order.
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    kind: ConsoleKind,
    resources: Vec<ResourceDefinition>,
}

impl ResourceRegistry {
    pub fn new(kind: ConsoleKind) -> Self {
        Self {
            kind,
            resources: Vec::new(),
        }
    }

    /// Registry preloaded with the console's standard resources.
    pub fn for_console(kind: ConsoleKind) -> Self {
        let mut registry = Self::new(kind);
        for resource in resources_for(kind) {
            registry.register(resource);
        }
        registry
    }

    /// Register a resource, replacing any previous one with the same name.
    pub fn register(&mut self, resource: ResourceDefinition) {
        match self.resources.iter_mut().find(|r| r.name == resource.name) {
            Some(existing) => *existing = resource,
            None => self.resources.push(resource),
        }
    }

    pub fn kind(&self) -> ConsoleKind {
        self.kind
    }

    pub fn get(&self, name: &str) -> Option<&ResourceDefinition> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDefinition> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Capability table handed to the data provider.
    pub fn resource_table(&self) -> ResourceTable {
        self.resources
            .iter()
            .fold(ResourceTable::new(), |table, r| table.with(r.name, r.capabilities()))
    }
}
