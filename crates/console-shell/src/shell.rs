//! Console bootstrap: configuration, registry, provider and realm guard.

use log::debug;
use std::sync::Arc;

use aac_console_provider::{
    ConsoleConfig, ConsoleDataProvider, ConsoleError, ConsoleKind, ConsoleLinks, DataProvider,
    GetListParams, ListResult, RequestMeta, Result, MY_REALMS,
};

use crate::registry::ResourceRegistry;
use crate::resources::{ResourceDefinition, REALMS};
use crate::root::RootSelector;

pub struct ConsoleShell {
    kind: ConsoleKind,
    links: ConsoleLinks,
    registry: ResourceRegistry,
    provider: Arc<dyn DataProvider>,
    root: RootSelector,
}

impl ConsoleShell {
    /// Build the shell for `kind` with an HTTP provider over `config`.
    pub fn bootstrap(config: &ConsoleConfig, kind: ConsoleKind) -> Result<Self> {
        let registry = ResourceRegistry::for_console(kind);
        let provider =
            ConsoleDataProvider::new(config, kind)?.with_resources(registry.resource_table());
        debug!(
            "Bootstrapped {} console at {} with {} resources",
            kind,
            provider.base_url(),
            registry.len()
        );
        Ok(Self::with_provider(
            kind,
            config.links(),
            registry,
            Arc::new(provider),
        ))
    }

    pub fn with_provider(
        kind: ConsoleKind,
        links: ConsoleLinks,
        registry: ResourceRegistry,
        provider: Arc<dyn DataProvider>,
    ) -> Self {
        Self {
            kind,
            links,
            registry,
            provider,
            root: RootSelector::new(kind),
        }
    }

    pub fn kind(&self) -> ConsoleKind {
        self.kind
    }

    pub fn links(&self) -> &ConsoleLinks {
        &self.links
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn root(&self) -> &RootSelector {
        &self.root
    }

    pub fn provider(&self) -> Arc<dyn DataProvider> {
        Arc::clone(&self.provider)
    }

    /// Name of the resource listing realms in this console.
    pub fn realm_resource(&self) -> &'static str {
        match self.kind {
            ConsoleKind::Admin => REALMS,
            ConsoleKind::Developer => MY_REALMS,
        }
    }

    /// Resources navigable right now.
    pub fn mounted(&self) -> Vec<&ResourceDefinition> {
        self.registry
            .iter()
            .filter(|r| self.root.mounts(r))
            .collect()
    }

    pub fn resource(&self, name: &str) -> Result<&ResourceDefinition> {
        self.registry
            .get(name)
            .ok_or_else(|| ConsoleError::invalid_request(format!("unknown resource '{}'", name)))
    }

    /// Request metadata for `name` under the current realm selection.
    pub fn request_meta(&self, name: &str) -> Result<RequestMeta> {
        self.root.request_meta(self.resource(name)?)
    }

    /// List the realms available to the current principal.
    pub async fn load_realms(&self) -> Result<ListResult> {
        self.provider
            .get_list(self.realm_resource(), GetListParams::default())
            .await
    }

    pub fn select_realm(&self, realm: &str) -> Result<()> {
        self.root.select(realm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aac_console_provider::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Records the resources listed; everything else is unused here.
    #[derive(Default)]
    struct RecordingProvider {
        listed: Mutex<Vec<String>>,
    }

    fn unused<T>() -> Result<T> {
        Err(ConsoleError::invalid_request("not used in this test"))
    }

    #[async_trait]
    impl DataProvider for RecordingProvider {
        async fn get_list(&self, resource: &str, _params: GetListParams) -> Result<ListResult> {
            self.listed.lock().unwrap().push(resource.to_string());
            Ok(ListResult {
                data: vec![json!({"slug": "r1"})],
                total: 1,
            })
        }
        async fn get_one(&self, _: &str, _: GetOneParams) -> Result<RecordResult> {
            unused()
        }
        async fn get_many(&self, _: &str, _: GetManyParams) -> Result<ManyResult> {
            unused()
        }
        async fn get_many_reference(
            &self,
            _: &str,
            _: GetManyReferenceParams,
        ) -> Result<ListResult> {
            unused()
        }
        async fn create(&self, _: &str, _: CreateParams) -> Result<RecordResult> {
            unused()
        }
        async fn update(&self, _: &str, _: UpdateParams) -> Result<RecordResult> {
            unused()
        }
        async fn update_many(&self, _: &str, _: UpdateManyParams) -> Result<IdsResult> {
            unused()
        }
        async fn delete(&self, _: &str, _: DeleteParams) -> Result<RecordResult> {
            unused()
        }
        async fn delete_many(&self, _: &str, _: DeleteManyParams) -> Result<IdsResult> {
            unused()
        }
        async fn invoke(&self, _: InvokeParams) -> Result<Value> {
            unused()
        }
        async fn app_props(&self) -> Result<Value> {
            unused()
        }
        async fn my_authorities(&self) -> Result<Value> {
            unused()
        }
    }

    fn shell(kind: ConsoleKind) -> (ConsoleShell, Arc<RecordingProvider>) {
        let provider = Arc::new(RecordingProvider::default());
        let shell = ConsoleShell::with_provider(
            kind,
            ConsoleLinks::default(),
            ResourceRegistry::for_console(kind),
            provider.clone(),
        );
        (shell, provider)
    }

    #[tokio::test]
    async fn developer_shell_lists_myrealms_then_unlocks_resources() {
        let (shell, provider) = shell(ConsoleKind::Developer);
        assert_eq!(shell.mounted().len(), 1);

        let realms = shell.load_realms().await.expect("realms");
        assert_eq!(realms.total, 1);
        assert_eq!(*provider.listed.lock().unwrap(), vec![MY_REALMS.to_string()]);

        assert!(shell.request_meta("apps").is_err());
        shell.select_realm("r1").expect("select");
        assert_eq!(shell.mounted().len(), shell.registry().len());
        assert_eq!(
            shell.request_meta("apps").expect("meta").realm_id.as_deref(),
            Some("r1")
        );
        assert!(shell.request_meta("nope").is_err());
    }

    #[tokio::test]
    async fn admin_shell_lists_realms() {
        let (shell, provider) = shell(ConsoleKind::Admin);
        shell.load_realms().await.expect("realms");
        assert_eq!(*provider.listed.lock().unwrap(), vec![REALMS.to_string()]);
        assert_eq!(shell.mounted().len(), shell.registry().len());
    }

    #[test]
    fn bootstrap_builds_http_provider() {
        let shell = ConsoleShell::bootstrap(&ConsoleConfig::default(), ConsoleKind::Developer)
            .expect("bootstrap");
        assert_eq!(shell.kind(), ConsoleKind::Developer);
        assert_eq!(shell.realm_resource(), MY_REALMS);
        assert!(shell.links().admin.is_none());
    }
}
