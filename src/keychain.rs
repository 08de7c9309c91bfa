//! Account keychain reconciliation.
//!
//! One [`Keychain`] is created per inbound request and lives for at most one
//! discover/provision round-trip. [`discover`](Keychain::discover) scans the
//! account's remote keys for one carrying the reserved `tsg-` prefix; when
//! none exists, [`provision`](Keychain::provision) registers the local key
//! pair's public half under a freshly generated prefixed name.
//!
//! Every remote interaction goes through the injected [`ClientFactory`].
//! Nothing retries: a failed call surfaces immediately, tagged with the
//! protocol stage that failed, and the caller decides whether to rerun the
//! whole sequence. Nothing persists: every check is a fresh remote query.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::HeaderMap;
use tracing::debug;

use crate::client::{AccountKey, ClientConfig, ClientFactory, CreateKeyInput};
use crate::error::KeychainError;
use crate::keypair::Keypair;
use crate::request::RequestContext;

/// Names of keys owned by this system start with this prefix; discovery
/// matches on it and provisioning generates names under it.
pub const KEY_NAME_PREFIX: &str = "tsg-";

/// Per-request coordinator for one account's owned SSH key.
///
/// Holds a borrowed [`RequestContext`] (the enclosing request owns it), the
/// immutable client configuration built at construction, and the current key
/// once discovery or provisioning has recorded one. Both protocol operations
/// take `&mut self`, so one instance can never have two remote calls in
/// flight; share nothing and create a fresh keychain per request.
pub struct Keychain<'a> {
    request: &'a RequestContext,
    config: ClientConfig,
    factory: Arc<dyn ClientFactory>,
    account_key: Option<AccountKey>,
}

impl<'a> Keychain<'a> {
    /// Keychain for `request`'s account against the default endpoint, signed
    /// with the placeholder [`TestSigner`](crate::signer::TestSigner).
    ///
    /// No network activity happens here; the current key starts unset.
    pub fn new(request: &'a RequestContext, factory: Arc<dyn ClientFactory>) -> Self {
        Self::with_config(request, factory, ClientConfig::new(request.account_name()))
    }

    /// Keychain with a caller-built [`ClientConfig`], the substitution point
    /// for a production signer or a different regional endpoint.
    pub fn with_config(
        request: &'a RequestContext,
        factory: Arc<dyn ClientFactory>,
        config: ClientConfig,
    ) -> Self {
        Self {
            request,
            config,
            factory,
            account_key: None,
        }
    }

    /// Account this keychain acts on, delegated from the request context.
    pub fn account_name(&self) -> &str {
        self.request.account_name()
    }

    /// Headers forwarded on every remote call, delegated from the request
    /// context.
    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// Scan the account's remote keys for one with the reserved prefix.
    ///
    /// Fetches the full key list and records the first entry, in
    /// server-returned order, whose name starts with [`KEY_NAME_PREFIX`].
    /// Finding nothing is success: the current key is simply left as it was
    /// (an earlier recorded key is never cleared). Dropping the returned
    /// future cancels the in-flight remote call; wrap it in
    /// `tokio::time::timeout` to bound it.
    pub async fn discover(&mut self) -> Result<(), KeychainError> {
        let client = self
            .factory
            .client(&self.config)
            .map_err(KeychainError::Client)?;

        let keys = client
            .list(self.headers())
            .await
            .map_err(KeychainError::List)?;

        let total = keys.len();
        match keys
            .into_iter()
            .find(|key| key.name.starts_with(KEY_NAME_PREFIX))
        {
            Some(key) => {
                debug!(
                    account = %self.account_name(),
                    name = %key.name,
                    "found existing account key"
                );
                self.account_key = Some(key);
            }
            None => {
                debug!(
                    account = %self.account_name(),
                    total,
                    "no key with reserved prefix on account"
                );
            }
        }
        Ok(())
    }

    /// Register `keypair`'s public half as a new remote key and record the
    /// created record as the current key.
    ///
    /// The name is [`KEY_NAME_PREFIX`] plus the current UTC time at seconds
    /// resolution, so two provisioning calls within the same second for one
    /// account would collide. Callers gate provisioning behind
    /// [`discover`](Self::discover) finding nothing, which keeps that window
    /// out of normal operation. The submitted key material is exactly the
    /// string the key pair produced. Dropping the returned future cancels the
    /// in-flight remote call.
    pub async fn provision(&mut self, keypair: &dyn Keypair) -> Result<(), KeychainError> {
        let client = self
            .factory
            .client(&self.config)
            .map_err(KeychainError::Client)?;

        let input = CreateKeyInput {
            name: key_name_at(Utc::now()),
            key: keypair.public_key_base64(),
        };

        let key = client
            .create(self.headers(), input)
            .await
            .map_err(KeychainError::Create)?;

        debug!(
            account = %self.account_name(),
            name = %key.name,
            "registered new account key"
        );
        self.account_key = Some(key);
        Ok(())
    }

    /// Discover, then provision only when discovery found nothing.
    ///
    /// The exact gating a host handler performs; no retries and no extra
    /// calls when a key already exists.
    pub async fn ensure_key(&mut self, keypair: &dyn Keypair) -> Result<(), KeychainError> {
        self.discover().await?;
        if !self.has_key() {
            self.provision(keypair).await?;
        }
        Ok(())
    }

    /// True once discovery or provisioning has recorded a key. Never flips
    /// back to false.
    pub fn has_key(&self) -> bool {
        self.account_key.is_some()
    }

    /// The discovered-or-created key record, if any.
    pub fn account_key(&self) -> Option<&AccountKey> {
        self.account_key.as_ref()
    }
}

/// `tsg-` + `at` formatted `%Y%m%d%H%M%S` (UTC, 14 digits, sortable).
fn key_name_at(at: DateTime<Utc>) -> String {
    format!("{KEY_NAME_PREFIX}{}", at.format("%Y%m%d%H%M%S"))
}
