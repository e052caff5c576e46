mod id;
mod period;
mod status;

pub use self::{id::*, period::*, status::*};
use crate::entity::{BookId, UserId};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Rental {
    id: RentalId,
    book_id: BookId,
    renter_id: UserId,
    owner_id: UserId,
    period: RentalPeriod,
    status: RentalStatus,
}

impl Rental {
    pub fn new(
        id: RentalId,
        book_id: BookId,
        renter_id: UserId,
        owner_id: UserId,
        period: RentalPeriod,
        status: RentalStatus,
    ) -> Self {
        Self {
            id,
            book_id,
            renter_id,
            owner_id,
            period,
            status,
        }
    }
}
