mod amount;
mod id;
mod status;

pub use self::{amount::*, id::*, status::*};
use crate::entity::RentalId;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Payment {
    id: PaymentId,
    rental_id: RentalId,
    amount: PaymentAmount,
    status: PaymentStatus,
}

impl Payment {
    pub fn new(
        id: PaymentId,
        rental_id: RentalId,
        amount: PaymentAmount,
        status: PaymentStatus,
    ) -> Self {
        Self {
            id,
            rental_id,
            amount,
            status,
        }
    }
}
