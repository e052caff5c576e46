mod book;
mod payment;
mod rental;
mod review;

pub use self::{book::*, payment::*, rental::*, review::*};
