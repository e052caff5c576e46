use std::collections::BTreeSet;

use vodca::References;

use crate::entity::{Book, BookStatus, Rental, RentalStatus, UserId, UserRole};

/// The acting identity, as resolved by the authentication layer.
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct Viewer {
    id: UserId,
    role: UserRole,
}

impl Viewer {
    pub fn new(id: UserId, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/*
 * Every rental-facing surface (request queue, rental list, detail,
 * admin console) dispatches through this table. Keeping it in one
 * place is the point: the original duplicated these rules per view.
 */
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum RentalAction {
    Approve,
    Cancel,
    Complete,
    Pay,
}

/// Legal edges of the rental state machine. `None` is a state
/// conflict. `Pay` leaves the status untouched.
pub fn next_status(from: RentalStatus, action: RentalAction) -> Option<RentalStatus> {
    match (from, action) {
        (RentalStatus::Pending, RentalAction::Approve) => Some(RentalStatus::Approved),
        (RentalStatus::Pending, RentalAction::Cancel) => Some(RentalStatus::Canceled),
        (RentalStatus::Approved, RentalAction::Cancel) => Some(RentalStatus::Canceled),
        (RentalStatus::Approved, RentalAction::Complete) => Some(RentalStatus::Completed),
        (RentalStatus::Approved, RentalAction::Pay) => Some(RentalStatus::Approved),
        _ => None,
    }
}

/// Book status implied by a confirmed transition, if any. A cancel
/// from Pending never touched the book, so there is nothing to undo.
pub fn book_status_after(from: RentalStatus, action: RentalAction) -> Option<BookStatus> {
    match (from, action) {
        (RentalStatus::Pending, RentalAction::Approve) => Some(BookStatus::Rented),
        (RentalStatus::Approved, RentalAction::Cancel) => Some(BookStatus::Available),
        (RentalStatus::Approved, RentalAction::Complete) => Some(BookStatus::Available),
        _ => None,
    }
}

/// A new request needs a renter-role actor (admins inherit), a book
/// the actor does not own, and an Available book.
pub fn can_request(book: &Book, viewer: &Viewer) -> bool {
    let role = matches!(viewer.role(), UserRole::Renter) || viewer.is_admin();
    role && book.owner_id() != viewer.id() && book.status().is_available()
}

/// The actions the viewer may currently invoke on the rental. Pure;
/// re-derived after every transition. Admins get the union of the
/// owner and renter sets.
pub fn eligible_actions(
    rental: &Rental,
    viewer: &Viewer,
    has_completed_payment: bool,
) -> BTreeSet<RentalAction> {
    let as_owner = rental.owner_id() == viewer.id() || viewer.is_admin();
    let as_renter = rental.renter_id() == viewer.id() || viewer.is_admin();

    let mut actions = BTreeSet::new();
    match rental.status() {
        RentalStatus::Pending => {
            if as_owner {
                actions.insert(RentalAction::Approve);
            }
            if as_owner || as_renter {
                actions.insert(RentalAction::Cancel);
            }
        }
        RentalStatus::Approved => {
            if as_owner || as_renter {
                actions.insert(RentalAction::Cancel);
            }
            if as_owner {
                actions.insert(RentalAction::Complete);
            }
            if as_renter && !has_completed_payment {
                actions.insert(RentalAction::Pay);
            }
        }
        RentalStatus::Completed | RentalStatus::Canceled => {}
    }
    actions
}

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;

    use time::macros::date;
    use uuid::Uuid;

    use crate::entity::{
        Book, BookAuthor, BookId, BookStatus, BookTitle, Rental, RentalId, RentalPeriod,
        RentalStatus, UserId, UserRole,
    };

    use super::{book_status_after, can_request, eligible_actions, next_status};
    use super::{RentalAction, Viewer};

    fn rental(status: RentalStatus, renter: &UserId, owner: &UserId) -> Rental {
        Rental::new(
            RentalId::new(Uuid::new_v4()),
            BookId::new(Uuid::new_v4()),
            renter.clone(),
            owner.clone(),
            RentalPeriod::new(date!(2025 - 06 - 01), date!(2025 - 06 - 10)).unwrap(),
            status,
        )
    }

    fn actions(items: &[RentalAction]) -> BTreeSet<RentalAction> {
        items.iter().copied().collect()
    }

    #[test]
    fn legal_edges_only() {
        use RentalAction::*;
        use RentalStatus::*;
        assert_eq!(next_status(Pending, Approve), Some(Approved));
        assert_eq!(next_status(Pending, Cancel), Some(Canceled));
        assert_eq!(next_status(Approved, Cancel), Some(Canceled));
        assert_eq!(next_status(Approved, Complete), Some(Completed));
        assert_eq!(next_status(Approved, Pay), Some(Approved));

        assert_eq!(next_status(Pending, Complete), None);
        assert_eq!(next_status(Pending, Pay), None);
        for action in [Approve, Cancel, Complete, Pay] {
            assert_eq!(next_status(Completed, action), None);
            assert_eq!(next_status(Canceled, action), None);
        }
        // Approved can never be re-entered.
        assert_eq!(next_status(Approved, Approve), None);
    }

    #[test]
    fn book_side_effects_follow_the_table() {
        use RentalAction::*;
        use RentalStatus::*;
        assert_eq!(book_status_after(Pending, Approve), Some(BookStatus::Rented));
        assert_eq!(
            book_status_after(Approved, Cancel),
            Some(BookStatus::Available)
        );
        assert_eq!(
            book_status_after(Approved, Complete),
            Some(BookStatus::Available)
        );
        assert_eq!(book_status_after(Pending, Cancel), None);
        assert_eq!(book_status_after(Approved, Pay), None);
    }

    #[test]
    fn pending_actions_by_role() {
        let renter = UserId::new(Uuid::new_v4());
        let owner = UserId::new(Uuid::new_v4());
        let rental = rental(RentalStatus::Pending, &renter, &owner);

        let owner_view = Viewer::new(owner, UserRole::Owner);
        let renter_view = Viewer::new(renter, UserRole::Renter);
        let stranger = Viewer::new(UserId::new(Uuid::new_v4()), UserRole::Renter);

        assert_eq!(
            eligible_actions(&rental, &owner_view, false),
            actions(&[RentalAction::Approve, RentalAction::Cancel])
        );
        assert_eq!(
            eligible_actions(&rental, &renter_view, false),
            actions(&[RentalAction::Cancel])
        );
        assert!(eligible_actions(&rental, &stranger, false).is_empty());
    }

    #[test]
    fn approved_actions_by_role() {
        let renter = UserId::new(Uuid::new_v4());
        let owner = UserId::new(Uuid::new_v4());
        let rental = rental(RentalStatus::Approved, &renter, &owner);

        let owner_view = Viewer::new(owner, UserRole::Owner);
        let renter_view = Viewer::new(renter, UserRole::Renter);

        assert_eq!(
            eligible_actions(&rental, &owner_view, false),
            actions(&[RentalAction::Cancel, RentalAction::Complete])
        );
        assert_eq!(
            eligible_actions(&rental, &renter_view, false),
            actions(&[RentalAction::Cancel, RentalAction::Pay])
        );
        // Paying twice is never offered.
        assert_eq!(
            eligible_actions(&rental, &renter_view, true),
            actions(&[RentalAction::Cancel])
        );
    }

    #[test]
    fn admin_gets_the_union() {
        let renter = UserId::new(Uuid::new_v4());
        let owner = UserId::new(Uuid::new_v4());
        let admin = Viewer::new(UserId::new(Uuid::new_v4()), UserRole::Admin);

        let pending = rental(RentalStatus::Pending, &renter, &owner);
        assert_eq!(
            eligible_actions(&pending, &admin, false),
            actions(&[RentalAction::Approve, RentalAction::Cancel])
        );

        let approved = rental(RentalStatus::Approved, &renter, &owner);
        assert_eq!(
            eligible_actions(&approved, &admin, false),
            actions(&[
                RentalAction::Cancel,
                RentalAction::Complete,
                RentalAction::Pay
            ])
        );
    }

    #[test]
    fn terminal_states_offer_nothing() {
        let renter = UserId::new(Uuid::new_v4());
        let owner = UserId::new(Uuid::new_v4());
        let admin = Viewer::new(UserId::new(Uuid::new_v4()), UserRole::Admin);
        for status in [RentalStatus::Completed, RentalStatus::Canceled] {
            let rental = rental(status, &renter, &owner);
            assert!(eligible_actions(&rental, &admin, false).is_empty());
        }
    }

    #[test]
    fn request_needs_renter_role_and_foreign_available_book() {
        let owner = UserId::new(Uuid::new_v4());
        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new("Dune"),
            BookAuthor::new("Frank Herbert"),
            None,
            None,
            owner.clone(),
            BookStatus::Available,
        );

        let renter = Viewer::new(UserId::new(Uuid::new_v4()), UserRole::Renter);
        let admin = Viewer::new(UserId::new(Uuid::new_v4()), UserRole::Admin);
        let viewer_role = Viewer::new(UserId::new(Uuid::new_v4()), UserRole::Viewer);
        let the_owner = Viewer::new(owner.clone(), UserRole::Renter);

        assert!(can_request(&book, &renter));
        assert!(can_request(&book, &admin));
        assert!(!can_request(&book, &viewer_role));
        assert!(!can_request(&book, &the_owner));

        let rented = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new("Dune"),
            BookAuthor::new("Frank Herbert"),
            None,
            None,
            owner,
            BookStatus::Rented,
        );
        assert!(!can_request(&rented, &renter));
    }
}
