use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kernel::interface::query::PaymentQuery;
use kernel::interface::update::{PaymentDraft, PaymentModifier};
use kernel::prelude::entity::{Payment, PaymentAmount, PaymentId, PaymentStatus, RentalId};
use kernel::KernelError;

use crate::api::HttpSession;

#[derive(Debug, Deserialize)]
pub(in crate::api) struct PaymentRecord {
    id: Uuid,
    rental: Uuid,
    amount: i64,
    status: PaymentStatus,
}

impl From<PaymentRecord> for Payment {
    fn from(record: PaymentRecord) -> Self {
        Payment::new(
            PaymentId::new(record.id),
            RentalId::new(record.rental),
            PaymentAmount::new(record.amount),
            record.status,
        )
    }
}

#[derive(Debug, Serialize)]
struct PaymentDraftBody<'a> {
    rental: &'a Uuid,
    amount: &'a PaymentAmount,
    status: &'a PaymentStatus,
}

pub struct HttpPaymentRepository;

#[async_trait::async_trait]
impl PaymentQuery<HttpSession> for HttpPaymentRepository {
    // The remote lists payments flat; the rental filter is applied
    // here.
    async fn find_by_rental(
        &self,
        session: &mut HttpSession,
        rental_id: &RentalId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        let records = session.get::<Vec<PaymentRecord>>("/payments").await?;
        Ok(records
            .into_iter()
            .find(|record| &record.rental == rental_id.as_ref())
            .map(Payment::from))
    }
}

#[async_trait::async_trait]
impl PaymentModifier<HttpSession> for HttpPaymentRepository {
    async fn create(
        &self,
        session: &mut HttpSession,
        draft: &PaymentDraft,
    ) -> error_stack::Result<Payment, KernelError> {
        let body = PaymentDraftBody {
            rental: draft.rental_id().as_ref(),
            amount: draft.amount(),
            status: draft.status(),
        };
        let record = session.post::<_, PaymentRecord>("/payments", &body).await?;
        Ok(record.into())
    }
}
