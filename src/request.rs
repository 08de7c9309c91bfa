//! Per-request identity context.
//!
//! A [`RequestContext`] is built by the host handler from one inbound request
//! and borrowed by the [`Keychain`](crate::keychain::Keychain) for its
//! lifetime. It carries the two things every outbound call needs: which
//! account to act on, and which headers to forward for correlation/tracing.

use http::HeaderMap;

/// Identity and correlation context extracted from one inbound request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    account_name: String,
    headers: HeaderMap,
}

impl RequestContext {
    pub fn new(account_name: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            account_name: account_name.into(),
            headers,
        }
    }

    /// The remote account this request acts on behalf of.
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Headers forwarded verbatim on every outbound remote call.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
