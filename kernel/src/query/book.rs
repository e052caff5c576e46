use crate::entity::{Book, BookId};
use crate::page::{Page, PageToken};
use crate::remote::ApiSession;
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery<Session: ApiSession>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        session: &mut Session,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    /// One page of the catalog. `page` of `None` is the first call,
    /// which goes through the transport's own credential attachment;
    /// a continuation token takes the manually authorized path.
    async fn find_all(
        &self,
        session: &mut Session,
        page: Option<&PageToken>,
    ) -> error_stack::Result<Page<Book>, KernelError>;
    async fn find_mine(
        &self,
        session: &mut Session,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_available(
        &self,
        session: &mut Session,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
}

pub trait DependOnBookQuery<Session: ApiSession>: Sync + Send + 'static {
    type BookQuery: BookQuery<Session>;
    fn book_query(&self) -> &Self::BookQuery;
}
