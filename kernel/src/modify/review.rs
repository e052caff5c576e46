use vodca::References;

use crate::entity::{BookId, Rating, Review, ReviewComment, ReviewId};
use crate::remote::ApiSession;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct ReviewDraft {
    book_id: BookId,
    rating: Rating,
    comment: Option<ReviewComment>,
}

impl ReviewDraft {
    pub fn new(book_id: BookId, rating: Rating, comment: Option<ReviewComment>) -> Self {
        Self {
            book_id,
            rating,
            comment,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Default, References)]
pub struct ReviewPatch {
    rating: Option<Rating>,
    comment: Option<ReviewComment>,
}

impl ReviewPatch {
    pub fn new(rating: Option<Rating>, comment: Option<ReviewComment>) -> Self {
        Self { rating, comment }
    }
}

#[async_trait::async_trait]
pub trait ReviewModifier<Session: ApiSession>: 'static + Sync + Send {
    async fn create(
        &self,
        session: &mut Session,
        draft: &ReviewDraft,
    ) -> error_stack::Result<Review, KernelError>;
    async fn update(
        &self,
        session: &mut Session,
        id: &ReviewId,
        patch: &ReviewPatch,
    ) -> error_stack::Result<Review, KernelError>;
    async fn delete(
        &self,
        session: &mut Session,
        id: &ReviewId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnReviewModifier<Session: ApiSession>: Sync + Send + 'static {
    type ReviewModifier: ReviewModifier<Session>;
    fn review_modifier(&self) -> &Self::ReviewModifier;
}
