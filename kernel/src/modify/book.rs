use vodca::References;

use crate::entity::{Book, BookAuthor, BookCategory, BookId, BookStatus, BookTitle, Isbn};
use crate::remote::ApiSession;
use crate::KernelError;

/// A book as submitted by its owner; id and status are assigned by
/// the remote service.
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct BookDraft {
    title: BookTitle,
    author: BookAuthor,
    isbn: Option<Isbn>,
    category: Option<BookCategory>,
}

impl BookDraft {
    pub fn new(
        title: BookTitle,
        author: BookAuthor,
        isbn: Option<Isbn>,
        category: Option<BookCategory>,
    ) -> Self {
        Self {
            title,
            author,
            isbn,
            category,
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Eq, PartialEq, Default, References)]
pub struct BookPatch {
    title: Option<BookTitle>,
    author: Option<BookAuthor>,
    isbn: Option<Isbn>,
    category: Option<BookCategory>,
    status: Option<BookStatus>,
}

impl BookPatch {
    pub fn new(
        title: Option<BookTitle>,
        author: Option<BookAuthor>,
        isbn: Option<Isbn>,
        category: Option<BookCategory>,
        status: Option<BookStatus>,
    ) -> Self {
        Self {
            title,
            author,
            isbn,
            category,
            status,
        }
    }
}

#[async_trait::async_trait]
pub trait BookModifier<Session: ApiSession>: 'static + Sync + Send {
    async fn create(
        &self,
        session: &mut Session,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError>;
    async fn update(
        &self,
        session: &mut Session,
        id: &BookId,
        patch: &BookPatch,
    ) -> error_stack::Result<Book, KernelError>;
    async fn delete(
        &self,
        session: &mut Session,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookModifier<Session: ApiSession>: Sync + Send + 'static {
    type BookModifier: BookModifier<Session>;
    fn book_modifier(&self) -> &Self::BookModifier;
}
