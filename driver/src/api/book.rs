use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kernel::interface::page::{Page, PageToken};
use kernel::interface::query::BookQuery;
use kernel::interface::update::{BookDraft, BookModifier, BookPatch};
use kernel::prelude::entity::{
    Book, BookAuthor, BookCategory, BookId, BookStatus, BookTitle, Isbn, UserId,
};
use kernel::KernelError;

use crate::api::HttpSession;

#[derive(Debug, Deserialize)]
pub(in crate::api) struct BookRecord {
    id: Uuid,
    title: String,
    author: String,
    isbn: Option<String>,
    category: Option<String>,
    owner: Uuid,
    status: BookStatus,
}

impl From<BookRecord> for Book {
    fn from(record: BookRecord) -> Self {
        Book::new(
            BookId::new(record.id),
            BookTitle::new(record.title),
            BookAuthor::new(record.author),
            record.isbn.map(Isbn::new),
            record.category.map(BookCategory::new),
            UserId::new(record.owner),
            record.status,
        )
    }
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct BookPageRecord {
    results: Vec<BookRecord>,
    next: Option<String>,
}

impl From<BookPageRecord> for Page<Book> {
    fn from(record: BookPageRecord) -> Self {
        Page::new(
            record.results.into_iter().map(Book::from).collect(),
            record.next.map(PageToken::new),
        )
    }
}

#[derive(Debug, Serialize)]
struct BookDraftBody<'a> {
    title: &'a BookTitle,
    author: &'a BookAuthor,
    #[serde(skip_serializing_if = "Option::is_none")]
    isbn: Option<&'a Isbn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a BookCategory>,
}

impl<'a> From<&'a BookDraft> for BookDraftBody<'a> {
    fn from(draft: &'a BookDraft) -> Self {
        Self {
            title: draft.title(),
            author: draft.author(),
            isbn: draft.isbn().as_ref(),
            category: draft.category().as_ref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BookPatchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a BookTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a BookAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    isbn: Option<&'a Isbn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a BookCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a BookStatus>,
}

impl<'a> From<&'a BookPatch> for BookPatchBody<'a> {
    fn from(patch: &'a BookPatch) -> Self {
        Self {
            title: patch.title().as_ref(),
            author: patch.author().as_ref(),
            isbn: patch.isbn().as_ref(),
            category: patch.category().as_ref(),
            status: patch.status().as_ref(),
        }
    }
}

pub struct HttpBookRepository;

#[async_trait::async_trait]
impl BookQuery<HttpSession> for HttpBookRepository {
    async fn find_by_id(
        &self,
        session: &mut HttpSession,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let record = session
            .get_optional::<BookRecord>(&format!("/books/{}", id.as_ref()))
            .await?;
        Ok(record.map(Book::from))
    }

    async fn find_all(
        &self,
        session: &mut HttpSession,
        page: Option<&PageToken>,
    ) -> error_stack::Result<Page<Book>, KernelError> {
        let record = match page {
            None => session.get::<BookPageRecord>("/books").await?,
            Some(token) => session.follow::<BookPageRecord>(token).await?,
        };
        Ok(record.into())
    }

    async fn find_mine(
        &self,
        session: &mut HttpSession,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let records = session.get::<Vec<BookRecord>>("/books/mine").await?;
        Ok(records.into_iter().map(Book::from).collect())
    }

    async fn find_available(
        &self,
        session: &mut HttpSession,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let records = session.get::<Vec<BookRecord>>("/books/available").await?;
        Ok(records.into_iter().map(Book::from).collect())
    }
}

#[async_trait::async_trait]
impl BookModifier<HttpSession> for HttpBookRepository {
    async fn create(
        &self,
        session: &mut HttpSession,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let record = session
            .post::<_, BookRecord>("/books", &BookDraftBody::from(draft))
            .await?;
        Ok(record.into())
    }

    async fn update(
        &self,
        session: &mut HttpSession,
        id: &BookId,
        patch: &BookPatch,
    ) -> error_stack::Result<Book, KernelError> {
        let record = session
            .put::<_, BookRecord>(&format!("/books/{}", id.as_ref()), &BookPatchBody::from(patch))
            .await?;
        Ok(record.into())
    }

    async fn delete(
        &self,
        session: &mut HttpSession,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        session.delete(&format!("/books/{}", id.as_ref())).await
    }
}
