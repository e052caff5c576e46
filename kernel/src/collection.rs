use vodca::References;

use crate::entity::{Book, BookId, BookStatus};

/*
 * The three views the presentation layer consumes. `available` is
 * always the Available subset of `catalog`, `mine` holds the books
 * owned by the current actor. All mutation goes through the methods
 * below, from a single writer, so the views never diverge.
 */
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct BookCollection {
    catalog: Vec<Book>,
    available: Vec<Book>,
    mine: Vec<Book>,
}

impl BookCollection {
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            available: Vec::new(),
            mine: Vec::new(),
        }
    }

    /// Cleared on logout or credential loss, never left stale.
    pub fn reset(&mut self) {
        self.catalog.clear();
        self.available.clear();
        self.mine.clear();
    }

    /// Replaces the full catalog and re-derives the available view.
    /// `mine` is replaced separately since it is fetched separately.
    pub fn replace_catalog(&mut self, books: Vec<Book>) {
        self.available = books
            .iter()
            .filter(|book| book.status().is_available())
            .cloned()
            .collect();
        self.catalog = books;
    }

    pub fn replace_mine(&mut self, books: Vec<Book>) {
        self.mine = books;
    }

    pub fn find(&self, id: &BookId) -> Option<&Book> {
        self.catalog.iter().find(|book| book.id() == id)
    }

    /// Appends a freshly created book owned by the current actor.
    /// Inserting the same id twice is a no-op.
    pub fn insert(&mut self, book: Book) {
        if self.find(book.id()).is_some() {
            return;
        }
        if book.status().is_available() {
            self.available.push(book.clone());
        }
        self.mine.push(book.clone());
        self.catalog.push(book);
    }

    /// Applies a server-confirmed record to every view it belongs to.
    pub fn apply_update(&mut self, book: Book) {
        match self.catalog.iter_mut().find(|b| b.id() == book.id()) {
            Some(slot) => *slot = book.clone(),
            None => self.catalog.push(book.clone()),
        }
        if let Some(slot) = self.mine.iter_mut().find(|b| b.id() == book.id()) {
            *slot = book.clone();
        }
        let present = self.available.iter().position(|b| b.id() == book.id());
        match (book.status().is_available(), present) {
            (true, Some(index)) => self.available[index] = book,
            (true, None) => self.available.push(book),
            (false, Some(index)) => {
                self.available.remove(index);
            }
            (false, None) => {}
        }
    }

    pub fn remove(&mut self, id: &BookId) {
        self.catalog.retain(|book| book.id() != id);
        self.available.retain(|book| book.id() != id);
        self.mine.retain(|book| book.id() != id);
    }

    /// Rental side effects land here after the remote confirms them.
    pub fn set_status(&mut self, id: &BookId, status: BookStatus) {
        if let Some(book) = self.find(id) {
            let mut updated = book.clone();
            updated.substitute(|book| *book.status = status);
            self.apply_update(updated);
        }
    }
}

impl Default for BookCollection {
    fn default() -> Self {
        Self::new()
    }
}
