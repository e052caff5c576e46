use std::sync::Arc;

use error_stack::Report;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use kernel::interface::credential::CredentialStore;
use kernel::interface::page::PageToken;
use kernel::interface::remote::{ApiSession, RemoteConnection};
use kernel::KernelError;

use crate::error::{status_error, ConvertError};
use crate::env;

pub use self::{book::*, payment::*, rental::*, review::*, token::*, user::*};

mod book;
mod payment;
mod rental;
mod review;
mod token;
mod user;

static LIBRARY_API_URL: &str = "LIBRARY_API_URL";

/// Connection factory for the remote library service.
pub struct HttpRemote {
    base_url: String,
    client: Client,
    credentials: Arc<InMemoryCredentialStore>,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>, credentials: Arc<InMemoryCredentialStore>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
            credentials,
        }
    }

    pub fn from_env(
        credentials: Arc<InMemoryCredentialStore>,
    ) -> error_stack::Result<Self, KernelError> {
        let base_url = env(LIBRARY_API_URL).convert_error()?;
        Ok(Self::new(base_url, credentials))
    }
}

#[async_trait::async_trait]
impl RemoteConnection for HttpRemote {
    type Session = HttpSession;
    async fn connect(&self) -> error_stack::Result<HttpSession, KernelError> {
        Ok(HttpSession {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            credentials: Arc::clone(&self.credentials),
        })
    }
}

pub struct HttpSession {
    base_url: String,
    client: Client,
    credentials: Arc<InMemoryCredentialStore>,
}

impl ApiSession for HttpSession {}

impl HttpSession {
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Transport-level credential attachment. Absence is not an
    /// error here: unauthenticated calls are the remote's to reject.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.current() {
            Some(token) => request.bearer_auth(token.as_ref()),
            None => request,
        }
    }

    async fn check(response: Response) -> error_stack::Result<Response, KernelError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, "remote call rejected");
        Err(status_error(status, body))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> error_stack::Result<T, KernelError> {
        let response = self
            .authorize(self.client.get(self.endpoint(path)))
            .send()
            .await
            .convert_error()?;
        let response = Self::check(response).await?;
        response.json::<T>().await.convert_error()
    }

    /// Like `get`, with 404 mapped to `None` for point lookups.
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> error_stack::Result<Option<T>, KernelError> {
        let response = self
            .authorize(self.client.get(self.endpoint(path)))
            .send()
            .await
            .convert_error()?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check(response).await?;
        response.json::<T>().await.convert_error().map(Some)
    }

    pub(crate) async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> error_stack::Result<T, KernelError> {
        let response = self
            .authorize(self.client.post(self.endpoint(path)).json(body))
            .send()
            .await
            .convert_error()?;
        let response = Self::check(response).await?;
        response.json::<T>().await.convert_error()
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> error_stack::Result<T, KernelError> {
        let response = self
            .authorize(self.client.post(self.endpoint(path)))
            .send()
            .await
            .convert_error()?;
        let response = Self::check(response).await?;
        response.json::<T>().await.convert_error()
    }

    pub(crate) async fn put<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> error_stack::Result<T, KernelError> {
        let response = self
            .authorize(self.client.put(self.endpoint(path)).json(body))
            .send()
            .await
            .convert_error()?;
        let response = Self::check(response).await?;
        response.json::<T>().await.convert_error()
    }

    pub(crate) async fn delete(&self, path: &str) -> error_stack::Result<(), KernelError> {
        let response = self
            .authorize(self.client.delete(self.endpoint(path)))
            .send()
            .await
            .convert_error()?;
        Self::check(response).await?;
        Ok(())
    }

    /*
     * Continuation requests go to the opaque `next` reference and
     * are outside the transport's automatic attachment, so the
     * credential is re-read from the store and attached by hand. A
     * missing credential fails the fetch: a silently truncated
     * catalog would corrupt every derived view.
     */
    pub(crate) async fn follow<T: DeserializeOwned>(
        &self,
        token: &PageToken,
    ) -> error_stack::Result<T, KernelError> {
        let credential = self.credentials.current().ok_or_else(|| {
            Report::new(KernelError::Authentication)
                .attach_printable("credential missing while a continuation page remained")
        })?;
        let response = self
            .client
            .get(token.as_ref())
            .bearer_auth(credential.as_ref())
            .send()
            .await
            .convert_error()?;
        let response = Self::check(response).await?;
        response.json::<T>().await.convert_error()
    }
}
