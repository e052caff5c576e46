pub use crate::error::*;

mod collection;
mod credential;
mod entity;
mod error;
mod lifecycle;
mod modify;
mod page;
mod query;
mod remote;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod collection {
        pub use crate::collection::*;
    }
    pub mod credential {
        pub use crate::credential::*;
    }
    pub mod lifecycle {
        pub use crate::lifecycle::*;
    }
    pub mod page {
        pub use crate::page::*;
    }
    pub mod query {
        pub use crate::query::*;
    }
    pub mod remote {
        pub use crate::remote::*;
    }
    pub mod update {
        pub use crate::modify::*;
    }
}
