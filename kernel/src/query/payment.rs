use crate::entity::{Payment, RentalId};
use crate::remote::ApiSession;
use crate::KernelError;

#[async_trait::async_trait]
pub trait PaymentQuery<Session: ApiSession>: Sync + Send + 'static {
    /// At most one payment is expected per rental.
    async fn find_by_rental(
        &self,
        session: &mut Session,
        rental_id: &RentalId,
    ) -> error_stack::Result<Option<Payment>, KernelError>;
}

pub trait DependOnPaymentQuery<Session: ApiSession>: Sync + Send + 'static {
    type PaymentQuery: PaymentQuery<Session>;
    fn payment_query(&self) -> &Self::PaymentQuery;
}
