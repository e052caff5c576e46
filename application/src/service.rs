use std::sync::Mutex;

use kernel::interface::collection::BookCollection;

mod book;
mod payment;
mod rental;
mod review;
mod session;

#[cfg(test)]
pub(in crate::service) mod mock;

pub use self::{book::*, payment::*, rental::*, review::*, session::*};

/// Single writer over the three presentation views. Services mutate
/// it only after the remote confirms the change.
#[derive(Debug, Default)]
pub struct CollectionHandle {
    inner: Mutex<BookCollection>,
}

impl CollectionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut BookCollection) -> R) -> R {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }

    pub fn snapshot(&self) -> BookCollection {
        self.with(|collection| collection.clone())
    }
}

pub trait DependOnCollectionHandle: 'static + Sync + Send {
    fn collection_handle(&self) -> &CollectionHandle;
}
