use vodca::References;

use crate::entity::{BookId, Rental, RentalId, RentalPeriod};
use crate::remote::ApiSession;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct RentalDraft {
    book_id: BookId,
    period: RentalPeriod,
}

impl RentalDraft {
    pub fn new(book_id: BookId, period: RentalPeriod) -> Self {
        Self { book_id, period }
    }
}

/*
 * Each call maps to one transition endpoint. The returned rental is
 * the remote's confirmed record; callers apply it, never a guess.
 */
#[async_trait::async_trait]
pub trait RentalModifier<Session: ApiSession>: 'static + Sync + Send {
    async fn request(
        &self,
        session: &mut Session,
        draft: &RentalDraft,
    ) -> error_stack::Result<Rental, KernelError>;
    async fn approve(
        &self,
        session: &mut Session,
        id: &RentalId,
    ) -> error_stack::Result<Rental, KernelError>;
    async fn cancel(
        &self,
        session: &mut Session,
        id: &RentalId,
    ) -> error_stack::Result<Rental, KernelError>;
    async fn complete(
        &self,
        session: &mut Session,
        id: &RentalId,
    ) -> error_stack::Result<Rental, KernelError>;
}

pub trait DependOnRentalModifier<Session: ApiSession>: Sync + Send + 'static {
    type RentalModifier: RentalModifier<Session>;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
