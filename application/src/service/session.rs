use kernel::interface::credential::{AccessToken, CredentialStore, DependOnCredentialStore};
use kernel::interface::lifecycle::Viewer;
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::remote::{ApiSession, DependOnRemoteConnection, RemoteConnection};
use kernel::KernelError;

use crate::service::DependOnCollectionHandle;
use crate::transfer::UserDto;

pub trait SessionService:
    'static + Sync + Send + DependOnCredentialStore + DependOnCollectionHandle
{
    fn sign_in(&self, token: AccessToken) {
        self.credential_store().store(token);
    }

    /// Credential and views drop together; neither survives alone.
    fn sign_out(&self) {
        self.credential_store().clear();
        self.collection_handle()
            .with(|collection| collection.reset());
    }
}

impl<T> SessionService for T where T: DependOnCredentialStore + DependOnCollectionHandle {}

#[async_trait::async_trait]
pub trait CurrentUserService<Session: ApiSession>:
    'static + Sync + Send + DependOnRemoteConnection<Session> + DependOnUserQuery<Session>
{
    async fn current_user(&self) -> error_stack::Result<UserDto, KernelError> {
        let mut session = self.remote_connection().connect().await?;
        let user = self.user_query().find_me(&mut session).await?;
        Ok(user.into())
    }

    /// The acting identity the permission tables consume.
    async fn current_viewer(&self) -> error_stack::Result<Viewer, KernelError> {
        let mut session = self.remote_connection().connect().await?;
        let user = self.user_query().find_me(&mut session).await?;
        let user = user.into_destruct();
        Ok(Viewer::new(user.id, user.role))
    }
}

impl<Session: ApiSession, T> CurrentUserService<Session> for T where
    T: DependOnRemoteConnection<Session> + DependOnUserQuery<Session>
{
}
