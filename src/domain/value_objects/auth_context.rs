use std::fmt;

/// Authenticated session against one SUSE Manager server
///
/// Built once per use case run right after login and never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    host: String,
    session_key: String,
}

impl AuthContext {
    pub fn new(host: impl Into<String>, session_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            session_key: session_key.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn session_key(&self) -> &str {
        &self.session_key
    }
}

// The session key grants full API access; keep it out of logs.
impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("host", &self.host)
            .field("session_key", &"***")
            .finish()
    }
}
