use serde::Deserialize;
use uuid::Uuid;

use kernel::interface::query::UserQuery;
use kernel::prelude::entity::{User, UserId, UserName, UserRole};
use kernel::KernelError;

use crate::api::HttpSession;

#[derive(Debug, Deserialize)]
pub(in crate::api) struct UserRecord {
    id: Uuid,
    name: String,
    role: UserRole,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User::new(
            UserId::new(record.id),
            UserName::new(record.name),
            record.role,
        )
    }
}

pub struct HttpUserRepository;

#[async_trait::async_trait]
impl UserQuery<HttpSession> for HttpUserRepository {
    async fn find_me(&self, session: &mut HttpSession) -> error_stack::Result<User, KernelError> {
        let record = session.get::<UserRecord>("/auth/me").await?;
        Ok(record.into())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use serde_json::json;
    use uuid::Uuid;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use kernel::interface::credential::{AccessToken, CredentialStore};
    use kernel::interface::query::UserQuery;
    use kernel::interface::remote::RemoteConnection;
    use kernel::prelude::entity::{UserId, UserRole};
    use kernel::KernelError;

    use crate::api::{HttpRemote, HttpUserRepository, InMemoryCredentialStore};

    #[tokio::test]
    async fn profile_fetch_carries_the_credential() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("Authorization", "Bearer tk-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "name": "paul",
                "role": "owner",
            })))
            .mount(&server)
            .await;

        let credentials = Arc::new(InMemoryCredentialStore::new());
        credentials.store(AccessToken::new("tk-1"));
        let remote = HttpRemote::new(server.uri(), credentials);
        let mut session = remote.connect().await.unwrap();

        let me = HttpUserRepository.find_me(&mut session).await.unwrap();
        assert_eq!(me.id(), &UserId::new(id));
        assert_eq!(me.role(), &UserRole::Owner);
    }

    #[tokio::test]
    async fn rejected_credential_maps_to_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let remote = HttpRemote::new(server.uri(), Arc::new(InMemoryCredentialStore::new()));
        let mut session = remote.connect().await.unwrap();
        let error = HttpUserRepository.find_me(&mut session).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Authentication);
    }
}
