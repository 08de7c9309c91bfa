//! Local key-pair capability.
//!
//! Key pairs are generated by the host, not here. The keychain needs exactly
//! one thing from a pair: the Base64-encoded public half, submitted verbatim
//! when a new remote key is provisioned. [`Keypair`] is that capability;
//! [`OpenSshKeypair`] adapts a parsed [`ssh_key::PublicKey`] to it.

use anyhow::Context;
use ssh_key::PublicKey;

/// The locally-generated key pair, seen through the only capability the
/// keychain uses.
pub trait Keypair: Send + Sync {
    /// Base64-encoded public half, exactly as the remote service expects it.
    fn public_key_base64(&self) -> String;
}

/// [`Keypair`] backed by an OpenSSH public key.
///
/// The Base64 blob (the middle field of the `authorized_keys` line) is
/// extracted once at construction. Private key material never passes through
/// this type.
#[derive(Debug, Clone)]
pub struct OpenSshKeypair {
    public_key_base64: String,
}

impl OpenSshKeypair {
    pub fn new(public: &PublicKey) -> anyhow::Result<Self> {
        let line = public
            .to_openssh()
            .context("failed to encode OpenSSH public key")?;
        let blob = line
            .split_whitespace()
            .nth(1)
            .context("malformed OpenSSH public key line")?;

        Ok(Self {
            public_key_base64: blob.to_string(),
        })
    }

    /// Parse an `authorized_keys`-format line (`<algorithm> <base64> [comment]`).
    pub fn from_authorized_key(line: &str) -> anyhow::Result<Self> {
        let public = PublicKey::from_openssh(line)
            .context("failed to parse OpenSSH public key")?;
        Self::new(&public)
    }
}

impl Keypair for OpenSshKeypair {
    fn public_key_base64(&self) -> String {
        self.public_key_base64.clone()
    }
}
