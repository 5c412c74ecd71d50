//! Credential resolution for the broker and the identity provider

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::{AuthenticationMode, DependencyRefs, Secret};
use crate::domain::repositories::{SecretRepository, TierRepository};
use crate::error::{AppError, Result};
use crate::reconciler::resolver::EffectiveConfig;

pub const IDENTITY_ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerCredentials {
    pub user: String,
    pub password: String,
    pub vhost: String,
}

/// Identity provider admin credentials and connection attributes.
/// Connection attributes stay empty unless keystone authentication is on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityCredentials {
    pub admin_username: String,
    pub admin_password: String,
    pub address: String,
    pub port: u16,
    pub region: String,
    pub auth_protocol: String,
    pub user_domain_name: String,
    pub project_domain_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialBundle {
    pub broker: BrokerCredentials,
    pub identity: IdentityCredentials,
}

pub struct CredentialResolver {
    secrets: Arc<dyn SecretRepository>,
    tiers: Arc<dyn TierRepository>,
}

/// Secret value when present and non-empty, otherwise the fallback
fn pick(secret: Option<&Secret>, field: &str, fallback: &str) -> String {
    secret
        .and_then(|s| s.field(field))
        .unwrap_or(fallback)
        .to_string()
}

impl CredentialResolver {
    pub fn new(secrets: Arc<dyn SecretRepository>, tiers: Arc<dyn TierRepository>) -> Self {
        Self { secrets, tiers }
    }

    /// Resolve both credential sets for one pass.
    ///
    /// `broker_secret` is the secret named by the broker tier status.
    pub async fn resolve(
        &self,
        namespace: &str,
        config: &EffectiveConfig,
        refs: &DependencyRefs,
        broker_secret: Option<&str>,
    ) -> Result<CredentialBundle> {
        let broker = self.resolve_broker(namespace, config, broker_secret).await?;
        let identity = self.resolve_identity(namespace, config, refs).await?;
        Ok(CredentialBundle { broker, identity })
    }

    async fn read_secret(&self, namespace: &str, name: Option<&str>) -> Result<Option<Secret>> {
        match name.filter(|n| !n.is_empty()) {
            Some(name) => {
                let secret = self
                    .secrets
                    .get_secret(namespace, name)
                    .await
                    .map_err(|e| AppError::dependency("secret", name, e))?;
                debug!("🔑 Read secret {}/{}", namespace, name);
                Ok(Some(secret))
            }
            None => Ok(None),
        }
    }

    async fn resolve_broker(
        &self,
        namespace: &str,
        config: &EffectiveConfig,
        secret_name: Option<&str>,
    ) -> Result<BrokerCredentials> {
        let secret = self.read_secret(namespace, secret_name).await?;
        Ok(BrokerCredentials {
            user: pick(secret.as_ref(), "user", &config.rabbitmq_user),
            password: pick(secret.as_ref(), "password", &config.rabbitmq_password),
            vhost: pick(secret.as_ref(), "vhost", &config.rabbitmq_vhost),
        })
    }

    async fn resolve_identity(
        &self,
        namespace: &str,
        config: &EffectiveConfig,
        refs: &DependencyRefs,
    ) -> Result<IdentityCredentials> {
        let secret = self
            .read_secret(namespace, refs.keystone_secret_name.as_deref())
            .await?;
        let mut identity = IdentityCredentials {
            admin_username: IDENTITY_ADMIN_USERNAME.to_string(),
            admin_password: pick(secret.as_ref(), "password", &config.keystone_admin_password),
            ..Default::default()
        };

        if config.auth_mode != AuthenticationMode::Keystone {
            return Ok(identity);
        }

        let name = refs.keystone_instance.as_str();
        let provider = self
            .tiers
            .get_identity_provider(namespace, name)
            .await
            .map_err(|e| AppError::dependency("identity provider", name, e))?;
        let address = match provider.endpoint.as_deref() {
            Some(endpoint) if !endpoint.is_empty() => endpoint.to_string(),
            _ => return Err(AppError::IdentityProviderNotReady(name.to_string())),
        };

        identity.address = address;
        identity.port = provider.listen_port;
        identity.region = provider.region;
        identity.auth_protocol = provider.auth_protocol;
        identity.user_domain_name = provider.user_domain_name;
        identity.project_domain_name = provider.project_domain_name;
        info!(
            "Identity provider {} reachable at {}:{}",
            name, identity.address, identity.port
        );
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ClusterSpec, IdentityProvider};
    use crate::reconciler::resolver::resolve;
    use crate::storage::InMemoryObjectStore;

    const NS: &str = "default";

    fn resolver(store: &Arc<InMemoryObjectStore>) -> CredentialResolver {
        CredentialResolver::new(store.clone(), store.clone())
    }

    fn keystone_provider(endpoint: Option<&str>) -> IdentityProvider {
        IdentityProvider {
            endpoint: endpoint.map(str::to_string),
            listen_port: 5555,
            region: "RegionOne".to_string(),
            auth_protocol: "https".to_string(),
            user_domain_name: "Default".to_string(),
            project_domain_name: "Default".to_string(),
        }
    }

    #[tokio::test]
    async fn test_secret_password_wins_over_cluster_value() {
        let store = Arc::new(InMemoryObjectStore::new());
        store
            .put_secret(NS, "rabbitmq-secret", Secret::from_pairs([("password", "p1")]))
            .await;
        let spec = ClusterSpec {
            rabbitmq_password: Some("p2".to_string()),
            ..Default::default()
        };
        let config = resolve(&spec);

        let bundle = resolver(&store)
            .resolve(NS, &config, &spec.dependencies, Some("rabbitmq-secret"))
            .await
            .unwrap();
        assert_eq!(bundle.broker.password, "p1");
    }

    #[tokio::test]
    async fn test_cluster_password_used_without_secret() {
        let store = Arc::new(InMemoryObjectStore::new());
        let spec = ClusterSpec {
            rabbitmq_password: Some("p2".to_string()),
            ..Default::default()
        };
        let config = resolve(&spec);

        let bundle = resolver(&store)
            .resolve(NS, &config, &spec.dependencies, None)
            .await
            .unwrap();
        assert_eq!(bundle.broker.password, "p2");
        assert_eq!(bundle.broker.user, "guest");
    }

    #[tokio::test]
    async fn test_empty_secret_field_falls_back_per_field() {
        let store = Arc::new(InMemoryObjectStore::new());
        store
            .put_secret(
                NS,
                "rabbitmq-secret",
                Secret::from_pairs([("user", "ops"), ("password", ""), ("vhost", "/contrail")]),
            )
            .await;
        let spec = ClusterSpec {
            rabbitmq_password: Some("p2".to_string()),
            ..Default::default()
        };
        let config = resolve(&spec);

        let broker = resolver(&store)
            .resolve(NS, &config, &spec.dependencies, Some("rabbitmq-secret"))
            .await
            .unwrap()
            .broker;
        assert_eq!(broker.user, "ops");
        assert_eq!(broker.password, "p2");
        assert_eq!(broker.vhost, "/contrail");
    }

    #[tokio::test]
    async fn test_named_but_missing_secret_is_dependency_failure() {
        let store = Arc::new(InMemoryObjectStore::new());
        let spec = ClusterSpec::default();
        let config = resolve(&spec);

        let err = resolver(&store)
            .resolve(NS, &config, &spec.dependencies, Some("rabbitmq-secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DependencyUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_keystone_admin_password_from_secret() {
        let store = Arc::new(InMemoryObjectStore::new());
        store
            .put_secret(NS, "keystone-adminpass", Secret::from_pairs([("password", "s3cret")]))
            .await;
        let mut spec = ClusterSpec::default();
        spec.dependencies.keystone_secret_name = Some("keystone-adminpass".to_string());
        let config = resolve(&spec);

        let identity = resolver(&store)
            .resolve(NS, &config, &spec.dependencies, None)
            .await
            .unwrap()
            .identity;
        assert_eq!(identity.admin_username, "admin");
        assert_eq!(identity.admin_password, "s3cret");
        assert!(identity.address.is_empty());
    }

    #[tokio::test]
    async fn test_keystone_mode_reads_provider_attributes() {
        let store = Arc::new(InMemoryObjectStore::new());
        store
            .put_identity_provider(NS, "keystone", keystone_provider(Some("10.96.0.5")))
            .await;
        let mut spec = ClusterSpec {
            auth_mode: Some(AuthenticationMode::Keystone),
            ..Default::default()
        };
        spec.dependencies.keystone_instance = "keystone".to_string();
        let config = resolve(&spec);

        let identity = resolver(&store)
            .resolve(NS, &config, &spec.dependencies, None)
            .await
            .unwrap()
            .identity;
        assert_eq!(identity.address, "10.96.0.5");
        assert_eq!(identity.port, 5555);
        assert_eq!(identity.region, "RegionOne");
        assert_eq!(identity.auth_protocol, "https");
        assert_eq!(identity.project_domain_name, "Default");
    }

    #[tokio::test]
    async fn test_keystone_without_endpoint_is_not_ready() {
        let store = Arc::new(InMemoryObjectStore::new());
        store
            .put_identity_provider(NS, "keystone", keystone_provider(None))
            .await;
        let mut spec = ClusterSpec {
            auth_mode: Some(AuthenticationMode::Keystone),
            ..Default::default()
        };
        spec.dependencies.keystone_instance = "keystone".to_string();
        let config = resolve(&spec);

        let err = resolver(&store)
            .resolve(NS, &config, &spec.dependencies, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::IdentityProviderNotReady(ref name) if name == "keystone"));
    }
}
