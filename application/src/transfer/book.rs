use uuid::Uuid;

use kernel::prelude::entity::{Book, BookStatus, DestructBook};

#[derive(Debug, Clone)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub category: Option<String>,
    pub owner_id: Uuid,
    pub status: BookStatus,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            isbn,
            category,
            owner_id,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.map(Into::into),
            category: category.map(Into::into),
            owner_id: owner_id.into(),
            status,
        }
    }
}

pub struct GetBookDto {
    pub id: Uuid,
}

pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub category: Option<String>,
}

pub struct UpdateBookDto {
    pub id: Uuid,
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
    pub status: Option<BookStatus>,
}

pub struct DeleteBookDto {
    pub id: Uuid,
}
