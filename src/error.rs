//! Error types for the keychain and its remote-client seam.

/// Errors produced by [`AccountKeys`](crate::client::AccountKeys) and
/// [`ClientFactory`](crate::client::ClientFactory) implementations.
///
/// Implementations map their transport's failures into these variants so the
/// keychain can wrap them with the failing protocol stage. The underlying
/// cause should be preserved (`Other` keeps the full chain).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configuration cannot produce a usable client. Not retryable
    /// without fixing the configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// The remote service rejected the request's credentials.
    #[error("authentication rejected: {0}")]
    Auth(String),

    /// The remote service answered with a non-success status.
    #[error("remote service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport failure or anything else the client cannot classify.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors returned by [`Keychain`](crate::keychain::Keychain) operations.
///
/// Each variant names the protocol stage that failed and carries the
/// collaborator's error as its source, so callers keep the full cause chain
/// without this crate formatting anything user-facing.
#[derive(Debug, thiserror::Error)]
pub enum KeychainError {
    #[error("failed to create account keys client")]
    Client(#[source] ClientError),

    #[error("failed to list account keys")]
    List(#[source] ClientError),

    #[error("failed to create new account key")]
    Create(#[source] ClientError),
}
