use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kernel::interface::query::ReviewQuery;
use kernel::interface::update::{ReviewDraft, ReviewModifier, ReviewPatch};
use kernel::prelude::entity::{BookId, Rating, Review, ReviewComment, ReviewId, UserId};
use kernel::KernelError;

use crate::api::HttpSession;

#[derive(Debug, Deserialize)]
pub(in crate::api) struct ReviewRecord {
    id: Uuid,
    book: Uuid,
    user: Uuid,
    rating: i32,
    comment: Option<String>,
}

impl From<ReviewRecord> for Review {
    fn from(record: ReviewRecord) -> Self {
        Review::new(
            ReviewId::new(record.id),
            BookId::new(record.book),
            UserId::new(record.user),
            Rating::new(record.rating),
            record.comment.map(ReviewComment::new),
        )
    }
}

#[derive(Debug, Serialize)]
struct ReviewDraftBody<'a> {
    rating: &'a Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a ReviewComment>,
}

#[derive(Debug, Serialize)]
struct ReviewPatchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<&'a Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a ReviewComment>,
}

pub struct HttpReviewRepository;

#[async_trait::async_trait]
impl ReviewQuery<HttpSession> for HttpReviewRepository {
    async fn find_by_book(
        &self,
        session: &mut HttpSession,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let records = session
            .get::<Vec<ReviewRecord>>(&format!("/books/{}/reviews", book_id.as_ref()))
            .await?;
        Ok(records.into_iter().map(Review::from).collect())
    }

    async fn find_mine(
        &self,
        session: &mut HttpSession,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let records = session.get::<Vec<ReviewRecord>>("/reviews/mine").await?;
        Ok(records.into_iter().map(Review::from).collect())
    }
}

#[async_trait::async_trait]
impl ReviewModifier<HttpSession> for HttpReviewRepository {
    async fn create(
        &self,
        session: &mut HttpSession,
        draft: &ReviewDraft,
    ) -> error_stack::Result<Review, KernelError> {
        let body = ReviewDraftBody {
            rating: draft.rating(),
            comment: draft.comment().as_ref(),
        };
        let record = session
            .post::<_, ReviewRecord>(
                &format!("/books/{}/reviews", draft.book_id().as_ref()),
                &body,
            )
            .await?;
        Ok(record.into())
    }

    async fn update(
        &self,
        session: &mut HttpSession,
        id: &ReviewId,
        patch: &ReviewPatch,
    ) -> error_stack::Result<Review, KernelError> {
        let body = ReviewPatchBody {
            rating: patch.rating().as_ref(),
            comment: patch.comment().as_ref(),
        };
        let record = session
            .put::<_, ReviewRecord>(&format!("/reviews/{}", id.as_ref()), &body)
            .await?;
        Ok(record.into())
    }

    async fn delete(
        &self,
        session: &mut HttpSession,
        id: &ReviewId,
    ) -> error_stack::Result<(), KernelError> {
        session.delete(&format!("/reviews/{}", id.as_ref())).await
    }
}
