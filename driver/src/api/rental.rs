use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;
use uuid::Uuid;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::{RentalDraft, RentalModifier};
use kernel::prelude::entity::{BookId, Rental, RentalId, RentalPeriod, RentalStatus, UserId};
use kernel::KernelError;

use crate::api::HttpSession;

pub(in crate::api) static WIRE_DATE: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

pub(in crate::api) fn parse_wire_date(raw: &str) -> error_stack::Result<Date, KernelError> {
    Date::parse(raw, WIRE_DATE)
        .map_err(Report::from)
        .change_context(KernelError::Infrastructure)
        .attach_printable_lazy(|| format!("unreadable date in remote payload: {raw}"))
}

fn format_wire_date(date: &Date) -> error_stack::Result<String, KernelError> {
    date.format(WIRE_DATE)
        .map_err(Report::from)
        .change_context(KernelError::Validation)
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct RentalRecord {
    id: Uuid,
    book: Uuid,
    renter: Uuid,
    owner: Uuid,
    start_date: String,
    end_date: String,
    status: RentalStatus,
}

impl TryFrom<RentalRecord> for Rental {
    type Error = Report<KernelError>;

    fn try_from(record: RentalRecord) -> Result<Self, Self::Error> {
        let start = parse_wire_date(&record.start_date)?;
        let end = parse_wire_date(&record.end_date)?;
        Ok(Rental::new(
            RentalId::new(record.id),
            BookId::new(record.book),
            UserId::new(record.renter),
            UserId::new(record.owner),
            RentalPeriod::new(start, end)?,
            record.status,
        ))
    }
}

#[derive(Debug, Serialize)]
struct RentalDraftBody<'a> {
    book: &'a Uuid,
    start_date: String,
    end_date: String,
}

pub struct HttpRentalRepository;

impl HttpRentalRepository {
    async fn transition(
        session: &mut HttpSession,
        id: &RentalId,
        action: &str,
    ) -> error_stack::Result<Rental, KernelError> {
        let record = session
            .post_empty::<RentalRecord>(&format!("/rentals/{}/{action}", id.as_ref()))
            .await?;
        record.try_into()
    }
}

#[async_trait::async_trait]
impl RentalQuery<HttpSession> for HttpRentalRepository {
    async fn find_by_id(
        &self,
        session: &mut HttpSession,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let record = session
            .get_optional::<RentalRecord>(&format!("/rentals/{}", id.as_ref()))
            .await?;
        record.map(Rental::try_from).transpose()
    }

    async fn find_mine(
        &self,
        session: &mut HttpSession,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let records = session.get::<Vec<RentalRecord>>("/rentals/mine").await?;
        records.into_iter().map(Rental::try_from).collect()
    }

    async fn find_for_my_books(
        &self,
        session: &mut HttpSession,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let records = session
            .get::<Vec<RentalRecord>>("/rentals/mine-books")
            .await?;
        records.into_iter().map(Rental::try_from).collect()
    }
}

#[async_trait::async_trait]
impl RentalModifier<HttpSession> for HttpRentalRepository {
    async fn request(
        &self,
        session: &mut HttpSession,
        draft: &RentalDraft,
    ) -> error_stack::Result<Rental, KernelError> {
        let body = RentalDraftBody {
            book: draft.book_id().as_ref(),
            start_date: format_wire_date(draft.period().start())?,
            end_date: format_wire_date(draft.period().end())?,
        };
        let record = session.post::<_, RentalRecord>("/rentals", &body).await?;
        record.try_into()
    }

    async fn approve(
        &self,
        session: &mut HttpSession,
        id: &RentalId,
    ) -> error_stack::Result<Rental, KernelError> {
        Self::transition(session, id, "approve").await
    }

    async fn cancel(
        &self,
        session: &mut HttpSession,
        id: &RentalId,
    ) -> error_stack::Result<Rental, KernelError> {
        Self::transition(session, id, "cancel").await
    }

    async fn complete(
        &self,
        session: &mut HttpSession,
        id: &RentalId,
    ) -> error_stack::Result<Rental, KernelError> {
        Self::transition(session, id, "complete").await
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use serde_json::json;
    use uuid::Uuid;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use kernel::interface::query::RentalQuery;
    use kernel::interface::remote::RemoteConnection;
    use kernel::interface::update::{RentalDraft, RentalModifier};
    use kernel::prelude::entity::{BookId, RentalId, RentalPeriod, RentalStatus};
    use kernel::KernelError;
    use time::macros::date;

    use crate::api::{HttpRemote, HttpRentalRepository, InMemoryCredentialStore};

    fn rental_json(id: Uuid, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "book": Uuid::new_v4(),
            "renter": Uuid::new_v4(),
            "owner": Uuid::new_v4(),
            "start_date": "2026-09-01",
            "end_date": "2026-09-10",
            "status": status,
        })
    }

    #[tokio::test]
    async fn request_sends_wire_dates_and_parses_confirmation() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/rentals"))
            .and(body_partial_json(json!({
                "start_date": "2026-09-01",
                "end_date": "2026-09-10",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(rental_json(id, "pending")))
            .mount(&server)
            .await;

        let remote = HttpRemote::new(server.uri(), Arc::new(InMemoryCredentialStore::new()));
        let mut session = remote.connect().await.unwrap();
        let draft = RentalDraft::new(
            BookId::new(Uuid::new_v4()),
            RentalPeriod::new(date!(2026 - 09 - 01), date!(2026 - 09 - 10)).unwrap(),
        );
        let rental = HttpRentalRepository
            .request(&mut session, &draft)
            .await
            .unwrap();
        assert_eq!(rental.id(), &RentalId::new(id));
        assert_eq!(rental.status(), &RentalStatus::Pending);
        assert_eq!(rental.period().start(), &date!(2026 - 09 - 01));
    }

    #[tokio::test]
    async fn conflicting_transition_maps_to_state_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_string("already approved"))
            .mount(&server)
            .await;

        let remote = HttpRemote::new(server.uri(), Arc::new(InMemoryCredentialStore::new()));
        let mut session = remote.connect().await.unwrap();
        let error = HttpRentalRepository
            .approve(&mut session, &RentalId::new(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::StateConflict);
    }

    #[tokio::test]
    async fn malformed_remote_date_is_infrastructure_failure() {
        let server = MockServer::start().await;
        let mut body = rental_json(Uuid::new_v4(), "pending");
        body["start_date"] = json!("01/09/2026");
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([body])))
            .mount(&server)
            .await;

        let remote = HttpRemote::new(server.uri(), Arc::new(InMemoryCredentialStore::new()));
        let mut session = remote.connect().await.unwrap();
        let error = HttpRentalRepository
            .find_mine(&mut session)
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Infrastructure);
    }
}
