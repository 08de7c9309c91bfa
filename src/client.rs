//! Remote account-service client seam.
//!
//! The wire protocol of the remote service is not implemented here. Hosts
//! supply a transport through the [`ClientFactory`] / [`AccountKeys`] trait
//! pair; this module owns the configuration bundle handed to that factory and
//! the record types that cross the seam.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::signer::{Signer, TestSigner};

/// Default remote endpoint.
///
/// us-west-1 sits closest to the account directory, which keeps identity
/// lookups cheap. A deployment parameter rather than a protocol detail;
/// override it through [`ClientConfig`].
pub const DEFAULT_BASE_URL: &str = "https://us-west-1.api.joyent.com/";

/// Immutable configuration bundle for remote clients.
///
/// Built once per [`Keychain`](crate::keychain::Keychain) and passed to the
/// [`ClientFactory`] on every protocol operation. Owns no mutable state.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base endpoint of the remote service.
    pub base_url: String,
    /// Account whose key set is queried and mutated.
    pub account_name: String,
    /// Credential capability for the service's authentication handshake.
    pub signer: Arc<dyn Signer>,
}

impl ClientConfig {
    /// Config for `account_name` against [`DEFAULT_BASE_URL`], signed with
    /// the placeholder [`TestSigner`].
    pub fn new(account_name: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            account_name: account_name.into(),
            signer: Arc::new(TestSigner),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("account_name", &self.account_name)
            .field("signer", &self.signer.key_id())
            .finish()
    }
}

/// A key record as the remote service holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKey {
    /// Key name; keys owned by this system carry the reserved prefix.
    pub name: String,
    /// Fingerprint computed by the remote service, when it reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// Encoded public key material as registered remotely.
    pub key: String,
}

/// Payload for registering a new key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateKeyInput {
    pub name: String,
    /// Base64-encoded public key, submitted exactly as produced by the
    /// key pair, with no transformation on the way through.
    pub key: String,
}

/// The two remote calls the keychain performs.
///
/// Implementations attach `headers` to the outbound request verbatim (the
/// host's correlation/tracing set) and must return list results in the order
/// the service sent them, since discovery is first-match-wins over that
/// order.
/// Both calls are expected to abort when the caller drops the future.
#[async_trait]
pub trait AccountKeys: Send + Sync {
    /// Fetch every key registered under the configured account.
    async fn list(&self, headers: &HeaderMap) -> Result<Vec<AccountKey>, ClientError>;

    /// Register a new key under the configured account, returning the record
    /// the service created.
    async fn create(
        &self,
        headers: &HeaderMap,
        input: CreateKeyInput,
    ) -> Result<AccountKey, ClientError>;
}

/// Produces a usable [`AccountKeys`] client from a [`ClientConfig`].
///
/// Called once per protocol operation. The config is the only state a client
/// needs, so a fresh client per call keeps the keychain free of connection
/// lifecycle concerns. Construction failures (bad endpoint, unusable signer)
/// surface as [`ClientError::Config`].
pub trait ClientFactory: Send + Sync {
    fn client(&self, config: &ClientConfig) -> Result<Box<dyn AccountKeys>, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_regional_endpoint_and_test_signer() {
        let config = ClientConfig::new("alice");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.account_name, "alice");
        assert_eq!(config.signer.key_id(), "/test/keys/test-signer");
    }

    #[test]
    fn config_debug_shows_signer_key_id() {
        let config = ClientConfig::new("alice");
        let debug = format!("{config:?}");
        assert!(debug.contains("/test/keys/test-signer"));
        assert!(debug.contains("alice"));
    }

    #[test]
    fn account_key_deserializes_service_json() {
        let json = r#"{
            "name": "tsg-20230101000000",
            "fingerprint": "03:7f:8e:ef:c0:aa:d1:61:37:2b:bf:27:23:e6:27:b4",
            "key": "AAAAB3NzaC1yc2EAAAADAQABAAABAQ"
        }"#;
        let key: AccountKey = serde_json::from_str(json).unwrap();
        assert_eq!(key.name, "tsg-20230101000000");
        assert_eq!(
            key.fingerprint.as_deref(),
            Some("03:7f:8e:ef:c0:aa:d1:61:37:2b:bf:27:23:e6:27:b4")
        );
        assert_eq!(key.key, "AAAAB3NzaC1yc2EAAAADAQABAAABAQ");
    }

    #[test]
    fn account_key_tolerates_missing_fingerprint() {
        let json = r#"{"name": "other-key", "key": "AAAA"}"#;
        let key: AccountKey = serde_json::from_str(json).unwrap();
        assert!(key.fingerprint.is_none());
    }

    #[test]
    fn create_key_input_serializes_name_and_key_only() {
        let input = CreateKeyInput {
            name: "tsg-20230101000000".to_string(),
            key: "AAAA".to_string(),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "tsg-20230101000000", "key": "AAAA"})
        );
    }
}
