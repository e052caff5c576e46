use error_stack::Report;

use kernel::interface::lifecycle::{eligible_actions, next_status, RentalAction};
use kernel::interface::query::{
    DependOnPaymentQuery, DependOnRentalQuery, PaymentQuery, RentalQuery,
};
use kernel::interface::remote::{ApiSession, DependOnRemoteConnection, RemoteConnection};
use kernel::interface::update::{DependOnPaymentModifier, PaymentDraft, PaymentModifier};
use kernel::prelude::entity::{PaymentAmount, PaymentStatus, RentalId};
use kernel::KernelError;

use crate::transfer::{GetRentalPaymentDto, PayRentalDto, PaymentDto};

#[async_trait::async_trait]
pub trait PayRentalService<Session: ApiSession>:
    'static
    + Sync
    + Send
    + DependOnRemoteConnection<Session>
    + DependOnRentalQuery<Session>
    + DependOnPaymentQuery<Session>
    + DependOnPaymentModifier<Session>
{
    async fn pay_rental(&self, dto: PayRentalDto) -> error_stack::Result<PaymentDto, KernelError> {
        let id = RentalId::new(dto.rental_id);
        let mut session = self.remote_connection().connect().await?;

        let rental = self
            .rental_query()
            .find_by_id(&mut session, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Validation).attach_printable("rental does not exist")
            })?;
        if next_status(*rental.status(), RentalAction::Pay).is_none() {
            return Err(Report::new(KernelError::StateConflict)
                .attach_printable("only an approved rental can be settled"));
        }
        let already_paid = self
            .payment_query()
            .find_by_rental(&mut session, &id)
            .await?
            .is_some_and(|payment| payment.status().is_completed());
        if already_paid {
            return Err(Report::new(KernelError::StateConflict)
                .attach_printable("rental is already settled"));
        }
        if !eligible_actions(&rental, &dto.viewer, false).contains(&RentalAction::Pay) {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("only the renter settles a rental"));
        }

        let draft = PaymentDraft::new(
            id,
            PaymentAmount::new(dto.amount),
            PaymentStatus::Completed,
        );
        let payment = self.payment_modifier().create(&mut session, &draft).await?;
        Ok(payment.into())
    }
}

impl<Session: ApiSession, T> PayRentalService<Session> for T where
    T: DependOnRemoteConnection<Session>
        + DependOnRentalQuery<Session>
        + DependOnPaymentQuery<Session>
        + DependOnPaymentModifier<Session>
{
}

#[async_trait::async_trait]
pub trait GetPaymentService<Session: ApiSession>:
    'static + Sync + Send + DependOnRemoteConnection<Session> + DependOnPaymentQuery<Session>
{
    async fn get_rental_payment(
        &self,
        dto: GetRentalPaymentDto,
    ) -> error_stack::Result<Option<PaymentDto>, KernelError> {
        let id = RentalId::new(dto.rental_id);
        let mut session = self.remote_connection().connect().await?;
        let payment = self.payment_query().find_by_rental(&mut session, &id).await?;
        Ok(payment.map(PaymentDto::from))
    }
}

impl<Session: ApiSession, T> GetPaymentService<Session> for T where
    T: DependOnRemoteConnection<Session> + DependOnPaymentQuery<Session>
{
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::lifecycle::Viewer;
    use kernel::prelude::entity::{BookStatus, PaymentStatus, RentalStatus, UserId, UserRole};
    use kernel::KernelError;

    use crate::service::mock::{MockApp, MockSession};
    use crate::service::{GetPaymentService, PayRentalService};
    use crate::transfer::{GetRentalPaymentDto, PayRentalDto};

    #[tokio::test]
    async fn renter_settles_an_approved_rental_once() {
        let app = MockApp::new();
        let owner = UserId::new(Uuid::new_v4());
        let renter = UserId::new(Uuid::new_v4());
        let book = app.seed_book(&owner, "Dune", BookStatus::Rented);
        let rental = app.seed_rental(&book, &renter, RentalStatus::Approved);
        let viewer = Viewer::new(renter, UserRole::Renter);

        let payment = PayRentalService::<MockSession>::pay_rental(
            &app,
            PayRentalDto {
                viewer: viewer.clone(),
                rental_id: *rental.id().as_ref(),
                amount: 450,
            },
        )
        .await
        .unwrap();
        assert_eq!(payment.status, PaymentStatus::Completed);
        assert_eq!(payment.amount, 450);

        let again = PayRentalService::<MockSession>::pay_rental(
            &app,
            PayRentalDto {
                viewer,
                rental_id: *rental.id().as_ref(),
                amount: 450,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(again.current_context(), &KernelError::StateConflict);

        let stored = GetPaymentService::<MockSession>::get_rental_payment(
            &app,
            GetRentalPaymentDto {
                rental_id: *rental.id().as_ref(),
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(stored.rental_id, *rental.id().as_ref());
    }

    #[tokio::test]
    async fn owner_cannot_settle_for_the_renter() {
        let app = MockApp::new();
        let owner = UserId::new(Uuid::new_v4());
        let renter = UserId::new(Uuid::new_v4());
        let book = app.seed_book(&owner, "Dune", BookStatus::Rented);
        let rental = app.seed_rental(&book, &renter, RentalStatus::Approved);

        let error = PayRentalService::<MockSession>::pay_rental(
            &app,
            PayRentalDto {
                viewer: Viewer::new(owner, UserRole::Owner),
                rental_id: *rental.id().as_ref(),
                amount: 450,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Validation);
    }

    #[tokio::test]
    async fn pending_rental_cannot_be_settled() {
        let app = MockApp::new();
        let owner = UserId::new(Uuid::new_v4());
        let renter = UserId::new(Uuid::new_v4());
        let book = app.seed_book(&owner, "Dune", BookStatus::Available);
        let rental = app.seed_rental(&book, &renter, RentalStatus::Pending);

        let error = PayRentalService::<MockSession>::pay_rental(
            &app,
            PayRentalDto {
                viewer: Viewer::new(renter, UserRole::Renter),
                rental_id: *rental.id().as_ref(),
                amount: 450,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::StateConflict);
    }
}
