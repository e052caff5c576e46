use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

/*
 * Process-wide bearer credential. Created on login, destroyed on
 * logout or irrecoverable refresh failure; continuation requests
 * read it directly because the transport only attaches it to the
 * first call of a logical operation.
 */
pub trait CredentialStore: 'static + Sync + Send {
    fn current(&self) -> Option<AccessToken>;
    fn store(&self, token: AccessToken);
    fn clear(&self);
}

pub trait DependOnCredentialStore: 'static + Sync + Send {
    type CredentialStore: CredentialStore;
    fn credential_store(&self) -> &Self::CredentialStore;
}

impl<T> DependOnCredentialStore for T
where
    T: CredentialStore,
{
    type CredentialStore = T;
    fn credential_store(&self) -> &Self::CredentialStore {
        self
    }
}
