//! Application shell for the AAC consoles.
//!
//! Declares the resources each console offers, derives the data provider's
//! capability table from them, and guards realm-scoped resources behind a
//! realm selection in the developer console.

pub mod registry;
pub mod resources;
pub mod root;
pub mod schemas;
pub mod shell;

pub use registry::ResourceRegistry;
pub use resources::{
    admin_resources, developer_resources, resources_for, ConfigSchema, ResourceDefinition,
    ResourceViews, REALMS,
};
pub use root::RootSelector;
pub use shell::ConsoleShell;
