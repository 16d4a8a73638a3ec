//! Active realm selection.
//!
//! The developer console keeps every realm-scoped resource unmounted until a
//! realm has been picked from the realm list. The admin console mounts
//! everything and only uses the selection to fill in the realm id.

use log::info;
use std::sync::{Arc, RwLock};

use aac_console_provider::{ConsoleError, ConsoleKind, RequestMeta, Result};

use crate::resources::ResourceDefinition;

#[derive(Debug, Clone)]
pub struct RootSelector {
    guarded: bool,
    selected: Arc<RwLock<Option<String>>>,
}

impl RootSelector {
    pub fn new(kind: ConsoleKind) -> Self {
        Self {
            guarded: kind == ConsoleKind::Developer,
            selected: Arc::new(RwLock::new(None)),
        }
    }

    pub fn is_guarded(&self) -> bool {
        self.guarded
    }

    pub fn selected(&self) -> Option<String> {
        self.selected
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn select(&self, realm: &str) -> Result<()> {
        let realm = realm.trim();
        if realm.is_empty() {
            return Err(ConsoleError::invalid_request("realm id is empty"));
        }
        info!("Selected realm {}", realm);
        *self.selected.write().unwrap_or_else(|e| e.into_inner()) = Some(realm.to_string());
        Ok(())
    }

    pub fn clear(&self) {
        *self.selected.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Whether `resource` is navigable under the current selection.
    pub fn mounts(&self, resource: &ResourceDefinition) -> bool {
        !self.guarded || !resource.realm_scoped || self.selected().is_some()
    }

    /// Request metadata for `resource`, carrying the selected realm when the
    /// resource is realm scoped.
    pub fn request_meta(&self, resource: &ResourceDefinition) -> Result<RequestMeta> {
        if !self.mounts(resource) {
            return Err(ConsoleError::invalid_request(format!(
                "'{}' is not available until a realm is selected",
                resource.name
            )));
        }
        let mut meta = RequestMeta::default();
        if resource.realm_scoped {
            meta.realm_id = self.selected();
        }
        Ok(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ResourceRegistry;
    use aac_console_provider::MY_REALMS;

    #[test]
    fn developer_console_mounts_only_realm_list_until_selection() {
        let registry = ResourceRegistry::for_console(ConsoleKind::Developer);
        let root = RootSelector::new(ConsoleKind::Developer);

        let mounted: Vec<_> = registry
            .iter()
            .filter(|r| root.mounts(r))
            .map(|r| r.name)
            .collect();
        assert_eq!(mounted, vec![MY_REALMS]);

        let apps = registry.get("apps").expect("apps");
        assert!(root.request_meta(apps).is_err());

        root.select("r1").expect("select");
        assert_eq!(registry.iter().filter(|r| root.mounts(r)).count(), registry.len());
        assert_eq!(
            root.request_meta(apps).expect("meta").realm_id.as_deref(),
            Some("r1")
        );

        let realms = registry.get(MY_REALMS).expect("myrealms");
        assert_eq!(root.request_meta(realms).expect("meta").realm_id, None);

        root.clear();
        assert!(!root.mounts(apps));
    }

    #[test]
    fn admin_console_is_not_guarded() {
        let registry = ResourceRegistry::for_console(ConsoleKind::Admin);
        let root = RootSelector::new(ConsoleKind::Admin);
        assert!(registry.iter().all(|r| root.mounts(r)));
        let users = registry.get("users").expect("users");
        assert_eq!(root.request_meta(users).expect("meta").realm_id, None);
    }

    #[test]
    fn empty_realm_is_rejected() {
        let root = RootSelector::new(ConsoleKind::Developer);
        assert!(root.select("  ").is_err());
        assert_eq!(root.selected(), None);
    }
}
