use uuid::Uuid;

use kernel::prelude::entity::{DestructReview, Review};

#[derive(Debug, Clone)]
pub struct ReviewDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub reviewer_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

impl From<Review> for ReviewDto {
    fn from(value: Review) -> Self {
        let DestructReview {
            id,
            book_id,
            reviewer_id,
            rating,
            comment,
        } = value.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            reviewer_id: reviewer_id.into(),
            rating: rating.into(),
            comment: comment.map(Into::into),
        }
    }
}

pub struct GetBookReviewsDto {
    pub book_id: Uuid,
}

pub struct CreateReviewDto {
    pub book_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

pub struct UpdateReviewDto {
    pub review_id: Uuid,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

pub struct DeleteReviewDto {
    pub review_id: Uuid,
}
