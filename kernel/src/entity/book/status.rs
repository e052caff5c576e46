use serde::{Deserialize, Serialize};

/*
 * Single source of truth for whether a book may be the subject of
 * a new rental request. Held at Rented while an approved rental
 * references the book.
 */
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Rented,
    Unavailable,
}

impl BookStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, BookStatus::Available)
    }
}
