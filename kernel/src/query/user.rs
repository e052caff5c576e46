use crate::entity::User;
use crate::remote::ApiSession;
use crate::KernelError;

#[async_trait::async_trait]
pub trait UserQuery<Session: ApiSession>: Sync + Send + 'static {
    /// The profile behind the current credential.
    async fn find_me(&self, session: &mut Session) -> error_stack::Result<User, KernelError>;
}

pub trait DependOnUserQuery<Session: ApiSession>: Sync + Send + 'static {
    type UserQuery: UserQuery<Session>;
    fn user_query(&self) -> &Self::UserQuery;
}
