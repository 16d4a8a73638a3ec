//! Resource definitions for both consoles.

use serde_json::Value;

use aac_console_provider::{ConsoleKind, ResourceCapabilities, MY_REALMS};

use crate::schemas;

/// Realm list resource of the admin console.
pub const REALMS: &str = "realms";

/// Which views a resource offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceViews {
    pub list: bool,
    pub edit: bool,
    pub create: bool,
    pub show: bool,
}

impl ResourceViews {
    pub const ALL: ResourceViews = ResourceViews {
        list: true,
        edit: true,
        create: true,
        show: true,
    };

    pub const READ_ONLY: ResourceViews = ResourceViews {
        list: true,
        edit: false,
        create: false,
        show: true,
    };

    pub const LIST_ONLY: ResourceViews = ResourceViews {
        list: true,
        edit: false,
        create: false,
        show: false,
    };
}

/// Source of the configuration schema rendered in a resource's edit form.
#[derive(Debug, Clone, Copy)]
pub enum ConfigSchema {
    None,
    Fixed(fn() -> Value),
    /// Chosen by the record's `authority` field.
    ByAuthority(fn(&str) -> Option<Value>),
}

#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    pub name: &'static str,
    pub icon: &'static str,
    pub views: ResourceViews,
    pub realm_scoped: bool,
    /// Fields tried in order to label a record.
    pub label_fields: &'static [&'static str],
    pub config_schema: ConfigSchema,
}

impl ResourceDefinition {
    pub fn capabilities(&self) -> ResourceCapabilities {
        ResourceCapabilities {
            realm_scoped: self.realm_scoped,
        }
    }

    /// Human label for a record: the first non-empty label field, else its id.
    pub fn record_representation(&self, record: &Value) -> String {
        self.label_fields
            .iter()
            .chain(std::iter::once(&"id"))
            .filter_map(|field| record.get(*field))
            .find_map(|value| match value {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Configuration schema for `record`, if the resource has one.
    pub fn config_schema(&self, record: &Value) -> Option<Value> {
        match self.config_schema {
            ConfigSchema::None => None,
            ConfigSchema::Fixed(schema) => Some(schema()),
            ConfigSchema::ByAuthority(schema) => record
                .get("authority")
                .and_then(Value::as_str)
                .and_then(schema),
        }
    }
}

fn scoped(
    name: &'static str,
    icon: &'static str,
    views: ResourceViews,
    label_fields: &'static [&'static str],
    config_schema: ConfigSchema,
) -> ResourceDefinition {
    ResourceDefinition {
        name,
        icon,
        views,
        realm_scoped: true,
        label_fields,
        config_schema,
    }
}

fn apps() -> ResourceDefinition {
    scoped(
        "apps",
        "apps",
        ResourceViews::ALL,
        &["name", "clientId"],
        ConfigSchema::Fixed(schemas::oauth2_client),
    )
}

fn idps() -> ResourceDefinition {
    scoped(
        "idps",
        "login",
        ResourceViews::ALL,
        &["name", "provider"],
        ConfigSchema::ByAuthority(schemas::identity_provider),
    )
}

fn users() -> ResourceDefinition {
    scoped(
        "users",
        "person",
        ResourceViews::ALL,
        &["username", "email", "subjectId"],
        ConfigSchema::None,
    )
}

fn audit() -> ResourceDefinition {
    scoped(
        "audit",
        "receipt",
        ResourceViews::LIST_ONLY,
        &["type"],
        ConfigSchema::None,
    )
}

pub fn admin_resources() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition {
            name: REALMS,
            icon: "domain",
            views: ResourceViews::ALL,
            realm_scoped: false,
            label_fields: &["name", "slug"],
            config_schema: ConfigSchema::None,
        },
        users(),
        apps(),
        idps(),
        audit(),
    ]
}

pub fn developer_resources() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition {
            name: MY_REALMS,
            icon: "domain",
            views: ResourceViews::LIST_ONLY,
            realm_scoped: false,
            label_fields: &["name", "slug"],
            config_schema: ConfigSchema::None,
        },
        apps(),
        scoped(
            "services",
            "room_service",
            ResourceViews::ALL,
            &["name", "namespace"],
            ConfigSchema::None,
        ),
        idps(),
        scoped(
            "aps",
            "dataset",
            ResourceViews::ALL,
            &["name", "provider"],
            ConfigSchema::ByAuthority(schemas::attribute_provider),
        ),
        users(),
        scoped(
            "roles",
            "supervisor_account",
            ResourceViews::ALL,
            &["name", "role"],
            ConfigSchema::None,
        ),
        scoped(
            "groups",
            "group",
            ResourceViews::ALL,
            &["name", "group"],
            ConfigSchema::None,
        ),
        scoped(
            "scopes",
            "lock",
            ResourceViews::READ_ONLY,
            &["name", "scope"],
            ConfigSchema::None,
        ),
        scoped(
            "attributeset",
            "view_list",
            ResourceViews::ALL,
            &["name", "identifier"],
            ConfigSchema::None,
        ),
        scoped(
            "templates",
            "article",
            ResourceViews::ALL,
            &["template", "language"],
            ConfigSchema::None,
        ),
        audit(),
    ]
}

pub fn resources_for(kind: ConsoleKind) -> Vec<ResourceDefinition> {
    match kind {
        ConsoleKind::Admin => admin_resources(),
        ConsoleKind::Developer => developer_resources(),
    }
}
