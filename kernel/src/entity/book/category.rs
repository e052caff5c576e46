use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookCategory(String);

impl BookCategory {
    pub fn new(category: impl Into<String>) -> Self {
        Self(category.into())
    }
}
