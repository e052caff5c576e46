use time::Date;
use uuid::Uuid;

use kernel::interface::lifecycle::{RentalAction, Viewer};
use kernel::prelude::entity::{DestructRental, Rental, RentalStatus};

use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct RentalDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub renter_id: Uuid,
    pub owner_id: Uuid,
    pub start: Date,
    pub end: Date,
    pub status: RentalStatus,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            book_id,
            renter_id,
            owner_id,
            period,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            renter_id: renter_id.into(),
            owner_id: owner_id.into(),
            start: *period.start(),
            end: *period.end(),
            status,
        }
    }
}

/// A rental plus the actions the viewer may invoke on it right now.
#[derive(Debug, Clone)]
pub struct RentalDetailDto {
    pub rental: RentalDto,
    pub actions: BTreeSet<RentalAction>,
}

pub struct RequestRentalDto {
    pub viewer: Viewer,
    pub book_id: Uuid,
    pub start: Date,
    pub end: Date,
}

pub struct TransitionRentalDto {
    pub viewer: Viewer,
    pub rental_id: Uuid,
    pub action: RentalAction,
}

pub struct GetRentalDto {
    pub viewer: Viewer,
    pub rental_id: Uuid,
}
