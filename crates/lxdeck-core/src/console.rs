// ── Console ──
//
// The handle front ends hold: one LXD client, the cached collections,
// the notification slot and the lazily fetched server settings.
// Implements `RemoteActions` and `Invalidate` so action buttons run
// against it directly.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::debug;

use lxdeck_api::transport::{TlsMode, TransportConfig};
use lxdeck_api::{Credentials, InstanceStatePut, LxdClient, NetworkPut, NetworksPost};

use crate::action::InstanceAction;
use crate::config::{AuthCredentials, ConsoleConfig, TlsVerification};
use crate::error::CoreError;
use crate::form::{FormSession, from_remote_model};
use crate::model::{Instance, Network, RemoteNetworkModel, ServerSettings};
use crate::notify::Notifications;
use crate::remote::{Invalidate, RemoteActions};
use crate::store::{DataStore, QueryKey};

/// Cheaply cloneable via `Arc<ConsoleInner>`.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    config: ConsoleConfig,
    client: LxdClient,
    store: DataStore,
    notifications: Notifications,
    settings: ArcSwapOption<ServerSettings>,
}

impl Console {
    /// Build the HTTP client from `config`. Does not contact the server.
    pub fn new(config: ConsoleConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = LxdClient::new(config.url.clone(), config.project.clone(), &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Use a pre-built client (tests, custom transports).
    pub fn with_client(config: ConsoleConfig, client: LxdClient) -> Self {
        Self {
            inner: Arc::new(ConsoleInner {
                config,
                client,
                store: DataStore::new(),
                notifications: Notifications::new(),
                settings: ArcSwapOption::empty(),
            }),
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &DataStore {
        &self.inner.store
    }

    pub fn notifications(&self) -> &Notifications {
        &self.inner.notifications
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Settings if already fetched. `None` means the form should show
    /// its loading state.
    pub fn cached_settings(&self) -> Option<Arc<ServerSettings>> {
        self.inner.settings.load_full()
    }

    /// Fetch `GET /1.0` once and keep it for the session.
    pub async fn settings(&self) -> Result<Arc<ServerSettings>, CoreError> {
        if let Some(settings) = self.cached_settings() {
            return Ok(settings);
        }
        let info = self.inner.client.get_server().await?;
        debug!(
            os = %info.environment.os_name,
            version = %info.environment.server_version,
            auth = %info.auth,
            "fetched server settings"
        );
        let settings = Arc::new(ServerSettings::from(info));
        self.inner.settings.store(Some(Arc::clone(&settings)));
        Ok(settings)
    }

    // ── Instances ────────────────────────────────────────────────────

    /// Fetch all instances and replace the cached listing.
    pub async fn refresh_instances(&self) -> Result<Arc<Vec<Arc<Instance>>>, CoreError> {
        let instances = self.inner.client.list_instances().await?;
        self.inner
            .store
            .apply_instances(instances.into_iter().map(Instance::from).collect());
        Ok(self.inner.store.instances_snapshot())
    }

    /// Cached listing, refetched when stale.
    pub async fn instances(&self) -> Result<Arc<Vec<Arc<Instance>>>, CoreError> {
        if self.inner.store.is_stale(QueryKey::Instances) {
            return self.refresh_instances().await;
        }
        Ok(self.inner.store.instances_snapshot())
    }

    /// Fetch one instance fresh from the server.
    pub async fn instance(&self, name: &str) -> Result<Instance, CoreError> {
        match self.inner.client.get_instance(name).await {
            Ok(dto) => {
                let instance = Instance::from(dto);
                self.inner.store.upsert_instance(instance.clone());
                Ok(instance)
            }
            Err(e) if e.is_not_found() => {
                self.inner.store.forget_instance(name);
                Err(CoreError::InstanceNotFound { name: name.into() })
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── Networks ─────────────────────────────────────────────────────

    pub async fn refresh_networks(&self) -> Result<Arc<Vec<Arc<Network>>>, CoreError> {
        let networks = self.inner.client.list_networks().await?;
        self.inner
            .store
            .apply_networks(networks.into_iter().map(Network::from).collect());
        Ok(self.inner.store.networks_snapshot())
    }

    pub async fn networks(&self) -> Result<Arc<Vec<Arc<Network>>>, CoreError> {
        if self.inner.store.is_stale(QueryKey::Networks) {
            return self.refresh_networks().await;
        }
        Ok(self.inner.store.networks_snapshot())
    }

    pub async fn network(&self, name: &str) -> Result<Network, CoreError> {
        match self.inner.client.get_network(name).await {
            Ok(dto) => {
                let network = Network::from(dto);
                self.inner.store.upsert_network(network.clone());
                Ok(network)
            }
            Err(e) if e.is_not_found() => {
                self.inner.store.forget_network(name);
                Err(CoreError::NetworkNotFound { name: name.into() })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load a network into an edit form. Unmanaged networks open read-only.
    pub async fn edit_network(&self, name: &str) -> Result<FormSession, CoreError> {
        let network = self.network(name).await?;
        let mut values = from_remote_model(&RemoteNetworkModel::from(&network))?;
        values.read_only = !network.managed;
        Ok(FormSession::new(values))
    }

    // ── Helpers ──────────────────────────────────────────────────────

    async fn change_state(
        &self,
        name: &str,
        action: InstanceAction,
        force: bool,
    ) -> Result<(), CoreError> {
        let body = InstanceStatePut::new(action.to_string(), force);
        self.inner
            .client
            .change_instance_state(name, &body)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CoreError::InstanceNotFound { name: name.into() }
                } else {
                    e.into()
                }
            })
    }
}

impl RemoteActions for Console {
    async fn start_instance(&self, name: &str) -> Result<(), CoreError> {
        self.change_state(name, InstanceAction::Start, false).await
    }

    async fn stop_instance(&self, name: &str, force: bool) -> Result<(), CoreError> {
        self.change_state(name, InstanceAction::Stop, force).await
    }

    async fn restart_instance(&self, name: &str, force: bool) -> Result<(), CoreError> {
        self.change_state(name, InstanceAction::Restart, force).await
    }

    async fn freeze_instance(&self, name: &str) -> Result<(), CoreError> {
        self.change_state(name, InstanceAction::Freeze, false).await
    }

    async fn unfreeze_instance(&self, name: &str) -> Result<(), CoreError> {
        self.change_state(name, InstanceAction::Unfreeze, false).await
    }

    async fn create_network(&self, model: &RemoteNetworkModel) -> Result<(), CoreError> {
        self.inner
            .client
            .create_network(&NetworksPost::from(model))
            .await?;
        Ok(())
    }

    async fn update_network(&self, model: &RemoteNetworkModel) -> Result<(), CoreError> {
        self.inner
            .client
            .update_network(&model.name, &NetworkPut::from(model))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CoreError::NetworkNotFound {
                        name: model.name.clone(),
                    }
                } else {
                    e.into()
                }
            })
    }

    async fn delete_network(&self, name: &str) -> Result<(), CoreError> {
        self.inner.client.delete_network(name).await?;
        Ok(())
    }
}

impl Invalidate for Console {
    fn invalidate(&self, key: QueryKey) {
        self.inner.store.invalidate(key);
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn build_transport(config: &ConsoleConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
        credentials: match &config.auth {
            AuthCredentials::Untrusted => Credentials::Untrusted,
            AuthCredentials::ClientCertificate { cert, key } => Credentials::ClientCertificate {
                cert: cert.clone(),
                key: key.clone(),
            },
            AuthCredentials::OidcToken(token) => Credentials::Bearer {
                token: token.clone(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use url::Url;

    fn config() -> Option<ConsoleConfig> {
        Url::parse("https://10.0.0.2:8443").ok().map(ConsoleConfig::new)
    }

    #[test]
    fn oidc_token_becomes_bearer() {
        let Some(mut config) = config() else {
            panic!("test URL must parse");
        };
        config.auth = AuthCredentials::OidcToken(SecretString::from("tok".to_string()));
        let transport = build_transport(&config);
        assert_eq!(transport.credentials.label(), "oidc");
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
    }

    #[test]
    fn console_builds_without_contacting_server() {
        let Some(config) = config() else {
            panic!("test URL must parse");
        };
        let console = Console::new(config);
        assert!(console.is_ok());
    }
}
