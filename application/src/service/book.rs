use kernel::interface::lifecycle::Viewer;
use kernel::interface::page::DestructPage;
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::remote::{ApiSession, DependOnRemoteConnection, RemoteConnection};
use kernel::interface::update::{BookDraft, BookModifier, BookPatch, DependOnBookModifier};
use kernel::prelude::entity::{BookAuthor, BookCategory, BookId, BookTitle, Isbn};
use kernel::KernelError;

use crate::service::DependOnCollectionHandle;
use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

#[async_trait::async_trait]
pub trait LoadCollectionService<Session: ApiSession>:
    'static
    + Sync
    + Send
    + DependOnRemoteConnection<Session>
    + DependOnBookQuery<Session>
    + DependOnCollectionHandle
{
    /// Rebuilds every view for the given actor. `None` means logged
    /// out: the views are cleared and nothing is fetched.
    async fn load_collection(
        &self,
        viewer: Option<&Viewer>,
    ) -> error_stack::Result<(), KernelError> {
        if viewer.is_none() {
            self.collection_handle().with(|collection| collection.reset());
            return Ok(());
        }
        let mut session = self.remote_connection().connect().await?;

        // Every page or none. A partial catalog would silently
        // corrupt the derived views.
        let mut books = Vec::new();
        let mut page = self.book_query().find_all(&mut session, None).await?;
        loop {
            let DestructPage { items, next } = page.into_destruct();
            books.extend(items);
            match next {
                Some(token) => {
                    page = self
                        .book_query()
                        .find_all(&mut session, Some(&token))
                        .await?
                }
                None => break,
            }
        }

        let mine = match self.book_query().find_mine(&mut session).await {
            Ok(mine) => mine,
            Err(report) => {
                tracing::warn!("owned-books fetch failed, shelf left empty: {report:?}");
                Vec::new()
            }
        };

        self.collection_handle().with(|collection| {
            collection.replace_catalog(books);
            collection.replace_mine(mine);
        });
        Ok(())
    }
}

impl<Session: ApiSession, T> LoadCollectionService<Session> for T where
    T: DependOnRemoteConnection<Session> + DependOnBookQuery<Session> + DependOnCollectionHandle
{
}

#[async_trait::async_trait]
pub trait GetBookService<Session: ApiSession>:
    'static
    + Sync
    + Send
    + DependOnRemoteConnection<Session>
    + DependOnBookQuery<Session>
    + DependOnCollectionHandle
{
    /// Memory first, remote second.
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let id = BookId::new(dto.id);
        if let Some(book) = self
            .collection_handle()
            .with(|collection| collection.find(&id).cloned())
        {
            return Ok(Some(book.into()));
        }
        let mut session = self.remote_connection().connect().await?;
        let book = self.book_query().find_by_id(&mut session, &id).await?;
        Ok(book.map(BookDto::from))
    }
}

impl<Session: ApiSession, T> GetBookService<Session> for T where
    T: DependOnRemoteConnection<Session> + DependOnBookQuery<Session> + DependOnCollectionHandle
{
}

#[async_trait::async_trait]
pub trait CreateBookService<Session: ApiSession>:
    'static
    + Sync
    + Send
    + DependOnRemoteConnection<Session>
    + DependOnBookModifier<Session>
    + DependOnCollectionHandle
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut session = self.remote_connection().connect().await?;

        let draft = BookDraft::new(
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            dto.isbn.map(Isbn::new),
            dto.category.map(BookCategory::new),
        );
        let book = self.book_modifier().create(&mut session, &draft).await?;
        self.collection_handle()
            .with(|collection| collection.insert(book.clone()));
        Ok(book.into())
    }
}

impl<Session: ApiSession, T> CreateBookService<Session> for T where
    T: DependOnRemoteConnection<Session> + DependOnBookModifier<Session> + DependOnCollectionHandle
{
}

#[async_trait::async_trait]
pub trait UpdateBookService<Session: ApiSession>:
    'static
    + Sync
    + Send
    + DependOnRemoteConnection<Session>
    + DependOnBookModifier<Session>
    + DependOnCollectionHandle
{
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut session = self.remote_connection().connect().await?;

        let id = BookId::new(dto.id);
        let patch = BookPatch::new(
            dto.title.map(BookTitle::new),
            dto.author.map(BookAuthor::new),
            dto.isbn.map(Isbn::new),
            dto.category.map(BookCategory::new),
            dto.status,
        );
        let book = self
            .book_modifier()
            .update(&mut session, &id, &patch)
            .await?;
        self.collection_handle()
            .with(|collection| collection.apply_update(book.clone()));
        Ok(book.into())
    }
}

impl<Session: ApiSession, T> UpdateBookService<Session> for T where
    T: DependOnRemoteConnection<Session> + DependOnBookModifier<Session> + DependOnCollectionHandle
{
}

#[async_trait::async_trait]
pub trait DeleteBookService<Session: ApiSession>:
    'static
    + Sync
    + Send
    + DependOnRemoteConnection<Session>
    + DependOnBookModifier<Session>
    + DependOnCollectionHandle
{
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut session = self.remote_connection().connect().await?;

        let id = BookId::new(dto.id);
        self.book_modifier().delete(&mut session, &id).await?;
        self.collection_handle()
            .with(|collection| collection.remove(&id));
        Ok(())
    }
}

impl<Session: ApiSession, T> DeleteBookService<Session> for T where
    T: DependOnRemoteConnection<Session> + DependOnBookModifier<Session> + DependOnCollectionHandle
{
}
