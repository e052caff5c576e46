mod comment;
mod id;
mod rating;

pub use self::{comment::*, id::*, rating::*};
use crate::entity::{BookId, UserId};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Review {
    id: ReviewId,
    book_id: BookId,
    reviewer_id: UserId,
    rating: Rating,
    comment: Option<ReviewComment>,
}

impl Review {
    pub fn new(
        id: ReviewId,
        book_id: BookId,
        reviewer_id: UserId,
        rating: Rating,
        comment: Option<ReviewComment>,
    ) -> Self {
        Self {
            id,
            book_id,
            reviewer_id,
            rating,
            comment,
        }
    }
}
