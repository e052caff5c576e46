use crate::entity::{BookId, Review};
use crate::remote::ApiSession;
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReviewQuery<Session: ApiSession>: Sync + Send + 'static {
    async fn find_by_book(
        &self,
        session: &mut Session,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Review>, KernelError>;
    async fn find_mine(
        &self,
        session: &mut Session,
    ) -> error_stack::Result<Vec<Review>, KernelError>;
}

pub trait DependOnReviewQuery<Session: ApiSession>: Sync + Send + 'static {
    type ReviewQuery: ReviewQuery<Session>;
    fn review_query(&self) -> &Self::ReviewQuery;
}
