use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::lifecycle::{
    book_status_after, can_request, eligible_actions, next_status, RentalAction,
};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnPaymentQuery, DependOnRentalQuery, PaymentQuery,
    RentalQuery,
};
use kernel::interface::remote::{ApiSession, DependOnRemoteConnection, RemoteConnection};
use kernel::interface::update::{DependOnRentalModifier, RentalDraft, RentalModifier};
use kernel::prelude::entity::{BookId, RentalId, RentalPeriod};
use kernel::KernelError;

use crate::service::DependOnCollectionHandle;
use crate::transfer::{
    GetRentalDto, RentalDetailDto, RentalDto, RequestRentalDto, TransitionRentalDto,
};

#[async_trait::async_trait]
pub trait RequestRentalService<Session: ApiSession>:
    'static
    + Sync
    + Send
    + DependOnRemoteConnection<Session>
    + DependOnBookQuery<Session>
    + DependOnRentalModifier<Session>
    + DependOnCollectionHandle
{
    async fn request_rental(
        &self,
        dto: RequestRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let book_id = BookId::new(dto.book_id);
        let mut session = self.remote_connection().connect().await?;

        let book = match self
            .collection_handle()
            .with(|collection| collection.find(&book_id).cloned())
        {
            Some(book) => book,
            None => self
                .book_query()
                .find_by_id(&mut session, &book_id)
                .await?
                .ok_or_else(|| {
                    Report::new(KernelError::Validation).attach_printable("book does not exist")
                })?,
        };
        if !can_request(&book, &dto.viewer) {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("rental request refused for this actor and book"));
        }

        let period = RentalPeriod::new(dto.start, dto.end)?;
        period.reject_past_start(OffsetDateTime::now_utc().date())?;

        let draft = RentalDraft::new(book_id, period);
        let rental = self.rental_modifier().request(&mut session, &draft).await?;
        Ok(rental.into())
    }
}

impl<Session: ApiSession, T> RequestRentalService<Session> for T where
    T: DependOnRemoteConnection<Session>
        + DependOnBookQuery<Session>
        + DependOnRentalModifier<Session>
        + DependOnCollectionHandle
{
}

#[async_trait::async_trait]
pub trait TransitionRentalService<Session: ApiSession>:
    'static
    + Sync
    + Send
    + DependOnRemoteConnection<Session>
    + DependOnRentalQuery<Session>
    + DependOnRentalModifier<Session>
    + DependOnCollectionHandle
{
    /// Drives one edge of the rental state machine. The local book
    /// view changes only after the remote confirms the transition.
    async fn transition_rental(
        &self,
        dto: TransitionRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let id = RentalId::new(dto.rental_id);
        let mut session = self.remote_connection().connect().await?;

        let rental = self
            .rental_query()
            .find_by_id(&mut session, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Validation).attach_printable("rental does not exist")
            })?;
        let from = *rental.status();
        if next_status(from, dto.action).is_none() {
            return Err(Report::new(KernelError::StateConflict).attach_printable(format!(
                "{:?} is not a legal action while the rental is {from:?}",
                dto.action
            )));
        }
        if !eligible_actions(&rental, &dto.viewer, false).contains(&dto.action) {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("actor may not perform this action"));
        }

        let rental = match dto.action {
            RentalAction::Approve => self.rental_modifier().approve(&mut session, &id).await?,
            RentalAction::Cancel => self.rental_modifier().cancel(&mut session, &id).await?,
            RentalAction::Complete => self.rental_modifier().complete(&mut session, &id).await?,
            RentalAction::Pay => {
                return Err(Report::new(KernelError::Validation)
                    .attach_printable("payment is recorded through the payment flow"))
            }
        };

        if let Some(status) = book_status_after(from, dto.action) {
            self.collection_handle()
                .with(|collection| collection.set_status(rental.book_id(), status));
        }
        Ok(rental.into())
    }
}

impl<Session: ApiSession, T> TransitionRentalService<Session> for T where
    T: DependOnRemoteConnection<Session>
        + DependOnRentalQuery<Session>
        + DependOnRentalModifier<Session>
        + DependOnCollectionHandle
{
}

#[async_trait::async_trait]
pub trait GetRentalService<Session: ApiSession>:
    'static
    + Sync
    + Send
    + DependOnRemoteConnection<Session>
    + DependOnRentalQuery<Session>
    + DependOnPaymentQuery<Session>
{
    async fn get_rental(
        &self,
        dto: GetRentalDto,
    ) -> error_stack::Result<Option<RentalDetailDto>, KernelError> {
        let id = RentalId::new(dto.rental_id);
        let mut session = self.remote_connection().connect().await?;

        let Some(rental) = self.rental_query().find_by_id(&mut session, &id).await? else {
            return Ok(None);
        };
        let has_completed_payment = self
            .payment_query()
            .find_by_rental(&mut session, &id)
            .await?
            .is_some_and(|payment| payment.status().is_completed());
        let actions = eligible_actions(&rental, &dto.viewer, has_completed_payment);
        Ok(Some(RentalDetailDto {
            rental: rental.into(),
            actions,
        }))
    }

    async fn my_rentals(&self) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut session = self.remote_connection().connect().await?;
        let rentals = self.rental_query().find_mine(&mut session).await?;
        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }

    async fn incoming_requests(&self) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut session = self.remote_connection().connect().await?;
        let rentals = self.rental_query().find_for_my_books(&mut session).await?;
        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }
}

impl<Session: ApiSession, T> GetRentalService<Session> for T where
    T: DependOnRemoteConnection<Session>
        + DependOnRentalQuery<Session>
        + DependOnPaymentQuery<Session>
{
}

#[cfg(test)]
mod test {
    use time::macros::date;
    use uuid::Uuid;

    use kernel::interface::lifecycle::{RentalAction, Viewer};
    use kernel::prelude::entity::{BookStatus, RentalStatus, UserId, UserRole};
    use kernel::KernelError;

    use crate::service::mock::{MockApp, MockSession};
    use crate::service::{
        DependOnCollectionHandle, GetRentalService, RequestRentalService, TransitionRentalService,
    };
    use crate::transfer::{GetRentalDto, RequestRentalDto, TransitionRentalDto};

    #[tokio::test]
    async fn request_then_approve_then_complete() {
        let app = MockApp::new();
        let owner = UserId::new(Uuid::new_v4());
        let renter = UserId::new(Uuid::new_v4());
        let book = app.seed_book(&owner, "Dune", BookStatus::Available);
        app.load_for_tests().await;
        app.set_actor(&renter);

        let requested = RequestRentalService::<MockSession>::request_rental(
            &app,
            RequestRentalDto {
                viewer: Viewer::new(renter.clone(), UserRole::Renter),
                book_id: *book.id().as_ref(),
                start: date!(2099 - 01 - 01),
                end: date!(2099 - 01 - 15),
            },
        )
        .await
        .unwrap();
        assert_eq!(requested.status, RentalStatus::Pending);

        let approved = TransitionRentalService::<MockSession>::transition_rental(
            &app,
            TransitionRentalDto {
                viewer: Viewer::new(owner.clone(), UserRole::Owner),
                rental_id: requested.id,
                action: RentalAction::Approve,
            },
        )
        .await
        .unwrap();
        assert_eq!(approved.status, RentalStatus::Approved);
        let snapshot = app.collection_handle().snapshot();
        assert_eq!(
            snapshot.find(book.id()).unwrap().status(),
            &BookStatus::Rented
        );
        assert!(snapshot.available().is_empty());

        let completed = TransitionRentalService::<MockSession>::transition_rental(
            &app,
            TransitionRentalDto {
                viewer: Viewer::new(owner, UserRole::Owner),
                rental_id: requested.id,
                action: RentalAction::Complete,
            },
        )
        .await
        .unwrap();
        assert_eq!(completed.status, RentalStatus::Completed);
        let snapshot = app.collection_handle().snapshot();
        assert_eq!(
            snapshot.find(book.id()).unwrap().status(),
            &BookStatus::Available
        );
    }

    #[tokio::test]
    async fn second_approve_is_a_state_conflict_and_leaves_views_alone() {
        let app = MockApp::new();
        let owner = UserId::new(Uuid::new_v4());
        let renter = UserId::new(Uuid::new_v4());
        let book = app.seed_book(&owner, "Dune", BookStatus::Available);
        app.load_for_tests().await;
        let rental = app.seed_rental(&book, &renter, RentalStatus::Approved);

        let error = TransitionRentalService::<MockSession>::transition_rental(
            &app,
            TransitionRentalDto {
                viewer: Viewer::new(owner, UserRole::Owner),
                rental_id: *rental.id().as_ref(),
                action: RentalAction::Approve,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::StateConflict);
        let snapshot = app.collection_handle().snapshot();
        assert_eq!(
            snapshot.find(book.id()).unwrap().status(),
            &BookStatus::Available
        );
    }

    #[tokio::test]
    async fn overlapping_pendings_conflict_after_the_first_approval() {
        let app = MockApp::new();
        let owner = UserId::new(Uuid::new_v4());
        let book = app.seed_book(&owner, "Dune", BookStatus::Available);
        app.load_for_tests().await;
        let first = app.seed_rental(&book, &UserId::new(Uuid::new_v4()), RentalStatus::Pending);
        let second = app.seed_rental(&book, &UserId::new(Uuid::new_v4()), RentalStatus::Pending);
        let viewer = Viewer::new(owner, UserRole::Owner);

        TransitionRentalService::<MockSession>::transition_rental(
            &app,
            TransitionRentalDto {
                viewer: viewer.clone(),
                rental_id: *first.id().as_ref(),
                action: RentalAction::Approve,
            },
        )
        .await
        .unwrap();

        let error = TransitionRentalService::<MockSession>::transition_rental(
            &app,
            TransitionRentalDto {
                viewer,
                rental_id: *second.id().as_ref(),
                action: RentalAction::Approve,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::StateConflict);
        // The rejected transition must not leak into the views.
        let snapshot = app.collection_handle().snapshot();
        assert_eq!(
            snapshot.find(book.id()).unwrap().status(),
            &BookStatus::Rented
        );
    }

    #[tokio::test]
    async fn owner_cannot_rent_their_own_book() {
        let app = MockApp::new();
        let owner = UserId::new(Uuid::new_v4());
        let book = app.seed_book(&owner, "Dune", BookStatus::Available);
        app.load_for_tests().await;

        let error = RequestRentalService::<MockSession>::request_rental(
            &app,
            RequestRentalDto {
                viewer: Viewer::new(owner, UserRole::Renter),
                book_id: *book.id().as_ref(),
                start: date!(2099 - 01 - 01),
                end: date!(2099 - 01 - 15),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Validation);
    }

    #[tokio::test]
    async fn viewer_role_cannot_request() {
        let app = MockApp::new();
        let owner = UserId::new(Uuid::new_v4());
        let book = app.seed_book(&owner, "Dune", BookStatus::Available);
        app.load_for_tests().await;

        let error = RequestRentalService::<MockSession>::request_rental(
            &app,
            RequestRentalDto {
                viewer: Viewer::new(UserId::new(Uuid::new_v4()), UserRole::Viewer),
                book_id: *book.id().as_ref(),
                start: date!(2099 - 01 - 01),
                end: date!(2099 - 01 - 15),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Validation);
    }

    #[tokio::test]
    async fn renter_cannot_approve_but_can_cancel() {
        let app = MockApp::new();
        let owner = UserId::new(Uuid::new_v4());
        let renter = UserId::new(Uuid::new_v4());
        let book = app.seed_book(&owner, "Dune", BookStatus::Available);
        app.load_for_tests().await;
        let rental = app.seed_rental(&book, &renter, RentalStatus::Pending);
        let viewer = Viewer::new(renter, UserRole::Renter);

        let error = TransitionRentalService::<MockSession>::transition_rental(
            &app,
            TransitionRentalDto {
                viewer: viewer.clone(),
                rental_id: *rental.id().as_ref(),
                action: RentalAction::Approve,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Validation);

        let canceled = TransitionRentalService::<MockSession>::transition_rental(
            &app,
            TransitionRentalDto {
                viewer,
                rental_id: *rental.id().as_ref(),
                action: RentalAction::Cancel,
            },
        )
        .await
        .unwrap();
        assert_eq!(canceled.status, RentalStatus::Canceled);
        // A pending rental never touched the book, nothing to undo.
        let snapshot = app.collection_handle().snapshot();
        assert_eq!(
            snapshot.find(book.id()).unwrap().status(),
            &BookStatus::Available
        );
    }

    #[tokio::test]
    async fn detail_lists_viewer_specific_actions() {
        let app = MockApp::new();
        let owner = UserId::new(Uuid::new_v4());
        let renter = UserId::new(Uuid::new_v4());
        let book = app.seed_book(&owner, "Dune", BookStatus::Rented);
        let rental = app.seed_rental(&book, &renter, RentalStatus::Approved);

        let detail = GetRentalService::<MockSession>::get_rental(
            &app,
            GetRentalDto {
                viewer: Viewer::new(renter, UserRole::Renter),
                rental_id: *rental.id().as_ref(),
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert!(detail.actions.contains(&RentalAction::Pay));
        assert!(detail.actions.contains(&RentalAction::Cancel));
        assert!(!detail.actions.contains(&RentalAction::Approve));
    }
}
