mod id;
mod name;
mod role;

pub use self::{id::*, name::*, role::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct User {
    id: UserId,
    name: UserName,
    role: UserRole,
}

impl User {
    pub fn new(id: UserId, name: UserName, role: UserRole) -> Self {
        Self { id, name, role }
    }
}
