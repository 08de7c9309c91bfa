//! Credential signer seam.
//!
//! The remote service authenticates requests with an HTTP-signature
//! handshake. The keychain never performs that handshake itself; it only
//! places a [`Signer`] into the client configuration and lets the transport
//! client drive it. Production hosts inject their real implementation;
//! [`TestSigner`] is the placeholder the default construction path uses.

/// Opaque credential capability handed to the remote client.
///
/// `sign` receives the request's date header value and returns the string to
/// send as the `Authorization` header. What happens in between (key lookup,
/// algorithm choice, agent round-trips) is entirely the implementation's
/// business.
pub trait Signer: Send + Sync {
    /// Identifier presented to the remote service (typically a key
    /// fingerprint path).
    fn key_id(&self) -> &str;

    /// Produce the `Authorization` header value for `date`.
    fn sign(&self, date: &str) -> anyhow::Result<String>;
}

/// Placeholder signer for development and tests.
///
/// Produces a syntactically valid `Authorization` value that no real endpoint
/// will accept. Deployments must substitute a real [`Signer`] through
/// [`ClientConfig`](crate::client::ClientConfig) before talking to a live
/// service.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestSigner;

impl Signer for TestSigner {
    fn key_id(&self) -> &str {
        "/test/keys/test-signer"
    }

    fn sign(&self, _date: &str) -> anyhow::Result<String> {
        Ok(format!(
            "Signature keyId=\"{}\",algorithm=\"rsa-sha256\",signature=\"insecure-test-signature\"",
            self.key_id()
        ))
    }
}
