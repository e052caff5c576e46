use vodca::References;

use crate::entity::{Payment, PaymentAmount, PaymentStatus, RentalId};
use crate::remote::ApiSession;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct PaymentDraft {
    rental_id: RentalId,
    amount: PaymentAmount,
    status: PaymentStatus,
}

impl PaymentDraft {
    pub fn new(rental_id: RentalId, amount: PaymentAmount, status: PaymentStatus) -> Self {
        Self {
            rental_id,
            amount,
            status,
        }
    }
}

#[async_trait::async_trait]
pub trait PaymentModifier<Session: ApiSession>: 'static + Sync + Send {
    async fn create(
        &self,
        session: &mut Session,
        draft: &PaymentDraft,
    ) -> error_stack::Result<Payment, KernelError>;
}

pub trait DependOnPaymentModifier<Session: ApiSession>: Sync + Send + 'static {
    type PaymentModifier: PaymentModifier<Session>;
    fn payment_modifier(&self) -> &Self::PaymentModifier;
}
