//! Sources of the bearer credential attached to outbound requests.

/// Supplies the bearer token for each request.
///
/// Called once per request so a provider backed by a session file sees
/// a fresh login without rebuilding the client.
pub trait CredentialProvider: Send + Sync {
    /// The bearer token, or `None` to send the request unauthenticated.
    fn bearer_token(&self) -> Option<String>;
}

/// A fixed token, typically from a flag or environment variable.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        let token = self.0.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}

/// Sends every request without an `Authorization` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken::new(" abc ").bearer_token().as_deref(), Some("abc"));
        assert!(StaticToken::new("").bearer_token().is_none());
        assert!(NoCredentials.bearer_token().is_none());
    }
}
