use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ReviewComment(String);

impl ReviewComment {
    pub fn new(comment: impl Into<String>) -> Self {
        Self(comment.into())
    }
}
