use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use error_stack::Report;
use time::macros::date;
use uuid::Uuid;

use kernel::interface::credential::{AccessToken, CredentialStore};
use kernel::interface::page::{Page, PageToken};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnPaymentQuery, DependOnRentalQuery, DependOnReviewQuery,
    DependOnUserQuery, PaymentQuery, RentalQuery, ReviewQuery, UserQuery,
};
use kernel::interface::remote::{ApiSession, RemoteConnection};
use kernel::interface::update::{
    BookDraft, BookModifier, BookPatch, DependOnBookModifier, DependOnPaymentModifier,
    DependOnRentalModifier, DependOnReviewModifier, PaymentDraft, PaymentModifier, RentalDraft,
    RentalModifier, ReviewDraft, ReviewModifier, ReviewPatch,
};
use kernel::prelude::entity::{
    Book, BookAuthor, BookId, BookStatus, BookTitle, Payment, PaymentId, Rental, RentalId,
    RentalPeriod, RentalStatus, Review, ReviewId, User, UserId, UserName, UserRole,
};
use kernel::KernelError;

use crate::service::{CollectionHandle, DependOnCollectionHandle};

pub struct MockSession;

impl ApiSession for MockSession {}

/// In-memory stand-in for the remote library service. Holds its own
/// book/rental/payment/review stores and mirrors the remote's side
/// effects on them.
pub struct MockApp {
    books: Mutex<Vec<Book>>,
    rentals: Mutex<Vec<Rental>>,
    payments: Mutex<Vec<Payment>>,
    reviews: Mutex<Vec<Review>>,
    token: Mutex<Option<AccessToken>>,
    actor: Mutex<Option<UserId>>,
    page_size: AtomicUsize,
    fail_mine: AtomicBool,
    fail_continuations: AtomicBool,
    remote_reads: AtomicUsize,
    collection: CollectionHandle,
}

fn test_period() -> RentalPeriod {
    RentalPeriod::new(date!(2099 - 01 - 01), date!(2099 - 01 - 15)).unwrap()
}

impl MockApp {
    pub fn new() -> Self {
        Self {
            books: Mutex::new(Vec::new()),
            rentals: Mutex::new(Vec::new()),
            payments: Mutex::new(Vec::new()),
            reviews: Mutex::new(Vec::new()),
            token: Mutex::new(None),
            actor: Mutex::new(None),
            page_size: AtomicUsize::new(100),
            fail_mine: AtomicBool::new(false),
            fail_continuations: AtomicBool::new(false),
            remote_reads: AtomicUsize::new(0),
            collection: CollectionHandle::new(),
        }
    }

    pub fn seed_book(&self, owner: &UserId, title: &str, status: BookStatus) -> Book {
        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(title),
            BookAuthor::new("An Author"),
            None,
            None,
            owner.clone(),
            status,
        );
        self.books.lock().unwrap().push(book.clone());
        book
    }

    pub fn seed_rental(&self, book: &Book, renter: &UserId, status: RentalStatus) -> Rental {
        let rental = Rental::new(
            RentalId::new(Uuid::new_v4()),
            book.id().clone(),
            renter.clone(),
            book.owner_id().clone(),
            test_period(),
            status,
        );
        self.rentals.lock().unwrap().push(rental.clone());
        rental
    }

    pub fn set_actor(&self, actor: &UserId) {
        *self.actor.lock().unwrap() = Some(actor.clone());
    }

    pub fn set_page_size(&self, size: usize) {
        self.page_size.store(size, Ordering::SeqCst);
    }

    pub fn fail_mine_fetch(&self) {
        self.fail_mine.store(true, Ordering::SeqCst);
    }

    pub fn fail_continuations(&self) {
        self.fail_continuations.store(true, Ordering::SeqCst);
    }

    pub fn remote_reads(&self) -> usize {
        self.remote_reads.load(Ordering::SeqCst)
    }

    /// Fills the presentation views straight from the store, for
    /// tests that are not about the loading path itself.
    pub async fn load_for_tests(&self) {
        let books = self.books.lock().unwrap().clone();
        self.collection
            .with(|collection| collection.replace_catalog(books));
    }

    fn actor_or_random(&self) -> UserId {
        self.actor
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| UserId::new(Uuid::new_v4()))
    }

    fn set_remote_book_status(&self, id: &BookId, status: BookStatus) {
        let mut books = self.books.lock().unwrap();
        if let Some(slot) = books.iter_mut().find(|book| book.id() == id) {
            let mut updated = slot.clone();
            updated.substitute(|book| *book.status = status);
            *slot = updated;
        }
    }

    fn transition(
        &self,
        id: &RentalId,
        to: RentalStatus,
        book_status: Option<BookStatus>,
    ) -> error_stack::Result<Rental, KernelError> {
        let mut rentals = self.rentals.lock().unwrap();
        let slot = rentals
            .iter_mut()
            .find(|rental| rental.id() == id)
            .ok_or_else(|| Report::new(KernelError::Validation))?;
        let updated = Rental::new(
            slot.id().clone(),
            slot.book_id().clone(),
            slot.renter_id().clone(),
            slot.owner_id().clone(),
            slot.period().clone(),
            to,
        );
        *slot = updated.clone();
        let book_id = updated.book_id().clone();
        drop(rentals);
        if let Some(status) = book_status {
            self.set_remote_book_status(&book_id, status);
        }
        Ok(updated)
    }
}

impl Default for MockApp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RemoteConnection for MockApp {
    type Session = MockSession;
    async fn connect(&self) -> error_stack::Result<MockSession, KernelError> {
        Ok(MockSession)
    }
}

impl CredentialStore for MockApp {
    fn current(&self) -> Option<AccessToken> {
        self.token.lock().unwrap().clone()
    }

    fn store(&self, token: AccessToken) {
        *self.token.lock().unwrap() = Some(token);
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}

impl DependOnCollectionHandle for MockApp {
    fn collection_handle(&self) -> &CollectionHandle {
        &self.collection
    }
}

#[async_trait::async_trait]
impl BookQuery<MockSession> for MockApp {
    async fn find_by_id(
        &self,
        _session: &mut MockSession,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        self.remote_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|book| book.id() == id)
            .cloned())
    }

    async fn find_all(
        &self,
        _session: &mut MockSession,
        page: Option<&PageToken>,
    ) -> error_stack::Result<Page<Book>, KernelError> {
        if page.is_some() && self.fail_continuations.load(Ordering::SeqCst) {
            return Err(Report::new(KernelError::Authentication)
                .attach_printable("credential missing while a continuation page remained"));
        }
        let offset = page
            .map(|token| token.as_ref().parse::<usize>().unwrap())
            .unwrap_or(0);
        let size = self.page_size.load(Ordering::SeqCst);
        let books = self.books.lock().unwrap();
        let items: Vec<_> = books.iter().skip(offset).take(size).cloned().collect();
        let next = (offset + size < books.len())
            .then(|| PageToken::new((offset + size).to_string()));
        Ok(Page::new(items, next))
    }

    async fn find_mine(
        &self,
        _session: &mut MockSession,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        if self.fail_mine.load(Ordering::SeqCst) {
            return Err(Report::new(KernelError::Infrastructure));
        }
        let actor = self.actor.lock().unwrap().clone();
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .filter(|book| Some(book.owner_id()) == actor.as_ref())
            .cloned()
            .collect())
    }

    async fn find_available(
        &self,
        _session: &mut MockSession,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .filter(|book| book.status().is_available())
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl BookModifier<MockSession> for MockApp {
    async fn create(
        &self,
        _session: &mut MockSession,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            draft.title().clone(),
            draft.author().clone(),
            draft.isbn().clone(),
            draft.category().clone(),
            self.actor_or_random(),
            BookStatus::Available,
        );
        self.books.lock().unwrap().push(book.clone());
        Ok(book)
    }

    async fn update(
        &self,
        _session: &mut MockSession,
        id: &BookId,
        patch: &BookPatch,
    ) -> error_stack::Result<Book, KernelError> {
        let mut books = self.books.lock().unwrap();
        let slot = books
            .iter_mut()
            .find(|book| book.id() == id)
            .ok_or_else(|| Report::new(KernelError::Validation))?;
        let current = slot.clone().into_destruct();
        let updated = Book::new(
            current.id,
            patch.title().clone().unwrap_or(current.title),
            patch.author().clone().unwrap_or(current.author),
            patch.isbn().clone().or(current.isbn),
            patch.category().clone().or(current.category),
            current.owner_id,
            patch.status().clone().unwrap_or(current.status),
        );
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(
        &self,
        _session: &mut MockSession,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        self.books.lock().unwrap().retain(|book| book.id() != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl RentalQuery<MockSession> for MockApp {
    async fn find_by_id(
        &self,
        _session: &mut MockSession,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(self
            .rentals
            .lock()
            .unwrap()
            .iter()
            .find(|rental| rental.id() == id)
            .cloned())
    }

    async fn find_mine(
        &self,
        _session: &mut MockSession,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let actor = self.actor.lock().unwrap().clone();
        Ok(self
            .rentals
            .lock()
            .unwrap()
            .iter()
            .filter(|rental| Some(rental.renter_id()) == actor.as_ref())
            .cloned()
            .collect())
    }

    async fn find_for_my_books(
        &self,
        _session: &mut MockSession,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let actor = self.actor.lock().unwrap().clone();
        Ok(self
            .rentals
            .lock()
            .unwrap()
            .iter()
            .filter(|rental| Some(rental.owner_id()) == actor.as_ref())
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl RentalModifier<MockSession> for MockApp {
    async fn request(
        &self,
        _session: &mut MockSession,
        draft: &RentalDraft,
    ) -> error_stack::Result<Rental, KernelError> {
        let owner = self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|book| book.id() == draft.book_id())
            .map(|book| book.owner_id().clone())
            .ok_or_else(|| Report::new(KernelError::Validation))?;
        let rental = Rental::new(
            RentalId::new(Uuid::new_v4()),
            draft.book_id().clone(),
            self.actor_or_random(),
            owner,
            draft.period().clone(),
            RentalStatus::Pending,
        );
        self.rentals.lock().unwrap().push(rental.clone());
        Ok(rental)
    }

    async fn approve(
        &self,
        _session: &mut MockSession,
        id: &RentalId,
    ) -> error_stack::Result<Rental, KernelError> {
        // The real service refuses to hand out a book twice.
        let book_id = self
            .rentals
            .lock()
            .unwrap()
            .iter()
            .find(|rental| rental.id() == id)
            .map(|rental| rental.book_id().clone())
            .ok_or_else(|| Report::new(KernelError::Validation))?;
        let rentable = self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|book| book.id() == &book_id)
            .map(|book| book.status().is_available())
            .unwrap_or(false);
        if !rentable {
            return Err(Report::new(KernelError::StateConflict)
                .attach_printable("book is no longer available"));
        }
        self.transition(id, RentalStatus::Approved, Some(BookStatus::Rented))
    }

    async fn cancel(
        &self,
        _session: &mut MockSession,
        id: &RentalId,
    ) -> error_stack::Result<Rental, KernelError> {
        let was_approved = self
            .rentals
            .lock()
            .unwrap()
            .iter()
            .any(|rental| rental.id() == id && rental.status() == &RentalStatus::Approved);
        let book_status = was_approved.then_some(BookStatus::Available);
        self.transition(id, RentalStatus::Canceled, book_status)
    }

    async fn complete(
        &self,
        _session: &mut MockSession,
        id: &RentalId,
    ) -> error_stack::Result<Rental, KernelError> {
        self.transition(id, RentalStatus::Completed, Some(BookStatus::Available))
    }
}

#[async_trait::async_trait]
impl ReviewQuery<MockSession> for MockApp {
    async fn find_by_book(
        &self,
        _session: &mut MockSession,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|review| review.book_id() == book_id)
            .cloned()
            .collect())
    }

    async fn find_mine(
        &self,
        _session: &mut MockSession,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let actor = self.actor.lock().unwrap().clone();
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|review| Some(review.reviewer_id()) == actor.as_ref())
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl ReviewModifier<MockSession> for MockApp {
    async fn create(
        &self,
        _session: &mut MockSession,
        draft: &ReviewDraft,
    ) -> error_stack::Result<Review, KernelError> {
        let review = Review::new(
            ReviewId::new(Uuid::new_v4()),
            draft.book_id().clone(),
            self.actor_or_random(),
            draft.rating().clone(),
            draft.comment().clone(),
        );
        self.reviews.lock().unwrap().push(review.clone());
        Ok(review)
    }

    async fn update(
        &self,
        _session: &mut MockSession,
        id: &ReviewId,
        patch: &ReviewPatch,
    ) -> error_stack::Result<Review, KernelError> {
        let mut reviews = self.reviews.lock().unwrap();
        let slot = reviews
            .iter_mut()
            .find(|review| review.id() == id)
            .ok_or_else(|| Report::new(KernelError::Validation))?;
        let current = slot.clone().into_destruct();
        let updated = Review::new(
            current.id,
            current.book_id,
            current.reviewer_id,
            patch.rating().clone().unwrap_or(current.rating),
            patch.comment().clone().or(current.comment),
        );
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(
        &self,
        _session: &mut MockSession,
        id: &ReviewId,
    ) -> error_stack::Result<(), KernelError> {
        self.reviews
            .lock()
            .unwrap()
            .retain(|review| review.id() != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserQuery<MockSession> for MockApp {
    async fn find_me(
        &self,
        _session: &mut MockSession,
    ) -> error_stack::Result<User, KernelError> {
        Ok(User::new(
            self.actor_or_random(),
            UserName::new("tester"),
            UserRole::Renter,
        ))
    }
}

#[async_trait::async_trait]
impl PaymentQuery<MockSession> for MockApp {
    async fn find_by_rental(
        &self,
        _session: &mut MockSession,
        rental_id: &RentalId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .find(|payment| payment.rental_id() == rental_id)
            .cloned())
    }
}

#[async_trait::async_trait]
impl PaymentModifier<MockSession> for MockApp {
    async fn create(
        &self,
        _session: &mut MockSession,
        draft: &PaymentDraft,
    ) -> error_stack::Result<Payment, KernelError> {
        let payment = Payment::new(
            PaymentId::new(Uuid::new_v4()),
            draft.rental_id().clone(),
            draft.amount().clone(),
            *draft.status(),
        );
        self.payments.lock().unwrap().push(payment.clone());
        Ok(payment)
    }
}

impl DependOnBookQuery<MockSession> for MockApp {
    type BookQuery = MockApp;
    fn book_query(&self) -> &MockApp {
        self
    }
}

impl DependOnBookModifier<MockSession> for MockApp {
    type BookModifier = MockApp;
    fn book_modifier(&self) -> &MockApp {
        self
    }
}

impl DependOnRentalQuery<MockSession> for MockApp {
    type RentalQuery = MockApp;
    fn rental_query(&self) -> &MockApp {
        self
    }
}

impl DependOnRentalModifier<MockSession> for MockApp {
    type RentalModifier = MockApp;
    fn rental_modifier(&self) -> &MockApp {
        self
    }
}

impl DependOnReviewQuery<MockSession> for MockApp {
    type ReviewQuery = MockApp;
    fn review_query(&self) -> &MockApp {
        self
    }
}

impl DependOnReviewModifier<MockSession> for MockApp {
    type ReviewModifier = MockApp;
    fn review_modifier(&self) -> &MockApp {
        self
    }
}

impl DependOnUserQuery<MockSession> for MockApp {
    type UserQuery = MockApp;
    fn user_query(&self) -> &MockApp {
        self
    }
}

impl DependOnPaymentQuery<MockSession> for MockApp {
    type PaymentQuery = MockApp;
    fn payment_query(&self) -> &MockApp {
        self
    }
}

impl DependOnPaymentModifier<MockSession> for MockApp {
    type PaymentModifier = MockApp;
    fn payment_modifier(&self) -> &MockApp {
        self
    }
}
