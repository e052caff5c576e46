use uuid::Uuid;

use kernel::interface::lifecycle::Viewer;
use kernel::prelude::entity::{DestructPayment, Payment, PaymentStatus};

#[derive(Debug, Clone)]
pub struct PaymentDto {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub amount: i64,
    pub status: PaymentStatus,
}

impl From<Payment> for PaymentDto {
    fn from(value: Payment) -> Self {
        let DestructPayment {
            id,
            rental_id,
            amount,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            rental_id: rental_id.into(),
            amount: amount.into(),
            status,
        }
    }
}

pub struct PayRentalDto {
    pub viewer: Viewer,
    pub rental_id: Uuid,
    pub amount: i64,
}

pub struct GetRentalPaymentDto {
    pub rental_id: Uuid,
}
