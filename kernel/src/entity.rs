mod book;
mod payment;
mod rental;
mod review;
mod user;

pub use self::{book::*, payment::*, rental::*, review::*, user::*};
