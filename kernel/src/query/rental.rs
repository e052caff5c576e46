use crate::entity::{Rental, RentalId};
use crate::remote::ApiSession;
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery<Session: ApiSession>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        session: &mut Session,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;
    /// Rentals where the caller is the renter.
    async fn find_mine(
        &self,
        session: &mut Session,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;
    /// Incoming requests against books the caller owns.
    async fn find_for_my_books(
        &self,
        session: &mut Session,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;
}

pub trait DependOnRentalQuery<Session: ApiSession>: Sync + Send + 'static {
    type RentalQuery: RentalQuery<Session>;
    fn rental_query(&self) -> &Self::RentalQuery;
}
