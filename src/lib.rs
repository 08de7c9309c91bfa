//! Per-account SSH key discovery and provisioning against a remote
//! account-management service.
//!
//! Accounts on the remote service carry a list of named SSH public keys.
//! This crate owns exactly one of them per account: a key whose name starts
//! with the reserved `tsg-` prefix, registered by us so later workflows can
//! authenticate as the account. The [`keychain::Keychain`] is the entry
//! point: a short-lived, per-request coordinator that discovers an existing
//! owned key or provisions a fresh one, and answers whether the account is
//! ready.
//!
//! The remote wire protocol lives outside this crate. Hosts supply the
//! transport by implementing [`client::AccountKeys`] (list/create against
//! one account) and [`client::ClientFactory`] (per-request construction from
//! a [`client::ClientConfig`]); tests substitute in-memory fakes at the same
//! seam. Request signing is injected the same way through
//! [`signer::Signer`], with [`signer::TestSigner`] as the placeholder
//! default, and key material arrives through [`keypair::Keypair`].
//!
//! Modules:
//! - [`keychain`]: the discover/provision protocol and its state
//! - [`client`]: remote service records, configuration, and the client seam
//! - [`request`]: borrowed per-request identity and headers
//! - [`signer`]: request signing seam
//! - [`keypair`]: local key pair seam and the OpenSSH-backed adapter
//! - [`error`]: stage-tagged failures

pub mod client;
pub mod error;
pub mod keychain;
pub mod keypair;
pub mod request;
pub mod signer;

pub use client::{
    AccountKey, AccountKeys, ClientConfig, ClientFactory, CreateKeyInput, DEFAULT_BASE_URL,
};
pub use error::{ClientError, KeychainError};
pub use keychain::{KEY_NAME_PREFIX, Keychain};
pub use keypair::{Keypair, OpenSshKeypair};
pub use request::RequestContext;
pub use signer::{Signer, TestSigner};
