use kernel::interface::query::{DependOnReviewQuery, ReviewQuery};
use kernel::interface::remote::{ApiSession, DependOnRemoteConnection, RemoteConnection};
use kernel::interface::update::{DependOnReviewModifier, ReviewDraft, ReviewModifier, ReviewPatch};
use kernel::prelude::entity::{BookId, Rating, ReviewComment, ReviewId};
use kernel::KernelError;

use crate::transfer::{
    CreateReviewDto, DeleteReviewDto, GetBookReviewsDto, ReviewDto, UpdateReviewDto,
};

#[async_trait::async_trait]
pub trait GetReviewService<Session: ApiSession>:
    'static + Sync + Send + DependOnRemoteConnection<Session> + DependOnReviewQuery<Session>
{
    async fn get_book_reviews(
        &self,
        dto: GetBookReviewsDto,
    ) -> error_stack::Result<Vec<ReviewDto>, KernelError> {
        let id = BookId::new(dto.book_id);
        let mut session = self.remote_connection().connect().await?;
        let reviews = self.review_query().find_by_book(&mut session, &id).await?;
        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }

    async fn get_my_reviews(&self) -> error_stack::Result<Vec<ReviewDto>, KernelError> {
        let mut session = self.remote_connection().connect().await?;
        let reviews = self.review_query().find_mine(&mut session).await?;
        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }
}

impl<Session: ApiSession, T> GetReviewService<Session> for T where
    T: DependOnRemoteConnection<Session> + DependOnReviewQuery<Session>
{
}

#[async_trait::async_trait]
pub trait CreateReviewService<Session: ApiSession>:
    'static + Sync + Send + DependOnRemoteConnection<Session> + DependOnReviewModifier<Session>
{
    async fn create_review(
        &self,
        dto: CreateReviewDto,
    ) -> error_stack::Result<ReviewDto, KernelError> {
        let mut session = self.remote_connection().connect().await?;
        let draft = ReviewDraft::new(
            BookId::new(dto.book_id),
            Rating::new(dto.rating),
            dto.comment.map(ReviewComment::new),
        );
        let review = self.review_modifier().create(&mut session, &draft).await?;
        Ok(review.into())
    }
}

impl<Session: ApiSession, T> CreateReviewService<Session> for T where
    T: DependOnRemoteConnection<Session> + DependOnReviewModifier<Session>
{
}

#[async_trait::async_trait]
pub trait UpdateReviewService<Session: ApiSession>:
    'static + Sync + Send + DependOnRemoteConnection<Session> + DependOnReviewModifier<Session>
{
    async fn update_review(
        &self,
        dto: UpdateReviewDto,
    ) -> error_stack::Result<ReviewDto, KernelError> {
        let mut session = self.remote_connection().connect().await?;
        let id = ReviewId::new(dto.review_id);
        let patch = ReviewPatch::new(
            dto.rating.map(Rating::new),
            dto.comment.map(ReviewComment::new),
        );
        let review = self
            .review_modifier()
            .update(&mut session, &id, &patch)
            .await?;
        Ok(review.into())
    }
}

impl<Session: ApiSession, T> UpdateReviewService<Session> for T where
    T: DependOnRemoteConnection<Session> + DependOnReviewModifier<Session>
{
}

#[async_trait::async_trait]
pub trait DeleteReviewService<Session: ApiSession>:
    'static + Sync + Send + DependOnRemoteConnection<Session> + DependOnReviewModifier<Session>
{
    async fn delete_review(&self, dto: DeleteReviewDto) -> error_stack::Result<(), KernelError> {
        let mut session = self.remote_connection().connect().await?;
        let id = ReviewId::new(dto.review_id);
        self.review_modifier().delete(&mut session, &id).await
    }
}

impl<Session: ApiSession, T> DeleteReviewService<Session> for T where
    T: DependOnRemoteConnection<Session> + DependOnReviewModifier<Session>
{
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::prelude::entity::{BookStatus, UserId};

    use crate::service::mock::{MockApp, MockSession};
    use crate::service::{CreateReviewService, GetReviewService, UpdateReviewService};
    use crate::transfer::{CreateReviewDto, GetBookReviewsDto, UpdateReviewDto};

    #[tokio::test]
    async fn rating_is_clamped_on_the_way_in() {
        let app = MockApp::new();
        let owner = UserId::new(Uuid::new_v4());
        let book = app.seed_book(&owner, "Dune", BookStatus::Available);

        let review = CreateReviewService::<MockSession>::create_review(
            &app,
            CreateReviewDto {
                book_id: *book.id().as_ref(),
                rating: 11,
                comment: Some("spice overload".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(review.rating, 5);

        let updated = UpdateReviewService::<MockSession>::update_review(
            &app,
            UpdateReviewDto {
                review_id: review.id,
                rating: Some(-3),
                comment: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.rating, 1);

        let listed = GetReviewService::<MockSession>::get_book_reviews(
            &app,
            GetBookReviewsDto {
                book_id: *book.id().as_ref(),
            },
        )
        .await
        .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].comment.as_deref(), Some("spice overload"));
    }
}
