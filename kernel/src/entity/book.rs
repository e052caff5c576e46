mod author;
mod category;
mod id;
mod isbn;
mod status;
mod title;

pub use self::{author::*, category::*, id::*, isbn::*, status::*, title::*};
use crate::entity::UserId;
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    isbn: Option<Isbn>,
    category: Option<BookCategory>,
    owner_id: UserId,
    status: BookStatus,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        isbn: Option<Isbn>,
        category: Option<BookCategory>,
        owner_id: UserId,
        status: BookStatus,
    ) -> Self {
        Self {
            id,
            title,
            author,
            isbn,
            category,
            owner_id,
            status,
        }
    }
}
