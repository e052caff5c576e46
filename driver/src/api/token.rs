use std::sync::RwLock;

use kernel::interface::credential::{AccessToken, CredentialStore};

/// Process-local credential holder shared between the transport and
/// continuation fetches.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    token: RwLock<Option<AccessToken>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn current(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn store(&self, token: AccessToken) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
    }

    fn clear(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}
