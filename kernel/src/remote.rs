use crate::KernelError;

/*
 * The remote library service is the source of truth; the driver
 * provides the session type every query/modify interface threads
 * through, the way a database driver would thread a connection.
 */
#[async_trait::async_trait]
pub trait RemoteConnection: 'static + Sync + Send {
    type Session: ApiSession;
    async fn connect(&self) -> error_stack::Result<Self::Session, KernelError>;
}

pub trait DependOnRemoteConnection<Session: ApiSession>: 'static + Sync + Send {
    type RemoteConnection: RemoteConnection<Session = Session>;
    fn remote_connection(&self) -> &Self::RemoteConnection;
}

impl<T, Session: ApiSession> DependOnRemoteConnection<Session> for T
where
    T: RemoteConnection<Session = Session>,
{
    type RemoteConnection = T;
    fn remote_connection(&self) -> &Self::RemoteConnection {
        self
    }
}

pub trait ApiSession: 'static + Sync + Send {}
