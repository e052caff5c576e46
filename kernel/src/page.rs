use destructure::Destructure;
use vodca::{AsRefln, Fromln, References};

/// Opaque continuation reference to the next page of a listing.
#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct PageToken(String);

impl PageToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Page<T> {
    items: Vec<T>,
    next: Option<PageToken>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next: Option<PageToken>) -> Self {
        Self { items, next }
    }
}
