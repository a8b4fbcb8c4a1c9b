// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Blood bag shelf-life and transfusion readiness rules.

use time::Date;

use crate::compatibility::can_receive;
use crate::dates::add_days;
use crate::error::DomainError;
use crate::types::{BagStatus, BloodGroup};

/// Whole-blood shelf life, in days from donation to expiry.
pub const SHELF_LIFE_DAYS: i64 = 42;

/// Window, in days, within which an available bag counts as "expiring soon".
pub const EXPIRING_SOON_DAYS: i64 = 7;

/// Computes the expiry date for a bag donated on `donation_date`.
///
/// The offset is fixed; expiry is never taken from user input.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the expiry date is not
/// representable.
pub fn compute_expiry(donation_date: Date) -> Result<Date, DomainError> {
    add_days(donation_date, SHELF_LIFE_DAYS, "computing bag expiry date")
}

/// Resolves the blood group of a new bag.
///
/// A donor-linked bag inherits the donor's group; a supplied group must
/// agree with it. A bank-direct bag must carry an explicit group.
///
/// # Errors
///
/// - `DomainError::BloodGroupMismatch` if both are given and differ
/// - `DomainError::MissingField` if neither is given
pub fn resolve_bag_blood_group(
    donor_group: Option<BloodGroup>,
    supplied: Option<BloodGroup>,
) -> Result<BloodGroup, DomainError> {
    match (donor_group, supplied) {
        (Some(donor), Some(supplied)) if donor != supplied => {
            Err(DomainError::BloodGroupMismatch { donor, supplied })
        }
        (Some(donor), _) => Ok(donor),
        (None, Some(supplied)) => Ok(supplied),
        (None, None) => Err(DomainError::MissingField {
            field: "blood_group",
        }),
    }
}

/// Whether a bag has expired as of `on`.
///
/// A bag is still usable on its expiry date.
#[must_use]
pub fn is_expired(expiry_date: Date, on: Date) -> bool {
    expiry_date < on
}

/// Whether an unexpired bag expires within `EXPIRING_SOON_DAYS` of `today`.
#[must_use]
pub fn is_expiring_soon(expiry_date: Date, today: Date) -> bool {
    if is_expired(expiry_date, today) {
        return false;
    }
    (expiry_date - today).whole_days() <= EXPIRING_SOON_DAYS
}

/// The subset of a bag's state needed to decide whether it may be transfused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagSnapshot {
    pub bag_id: i64,
    pub blood_group: BloodGroup,
    pub expiry_date: Date,
    pub status: BagStatus,
}

/// Checks that a bag may be transfused to a recipient on `on`.
///
/// # Errors
///
/// - `DomainError::BagNotAvailable` if the bag is already used
/// - `DomainError::BagExpired` if the bag expired before `on`
/// - `DomainError::IncompatibleBloodGroup` if the recipient cannot receive it
pub fn validate_transfusion(
    bag: &BagSnapshot,
    recipient_group: BloodGroup,
    on: Date,
) -> Result<(), DomainError> {
    if !bag.status.can_transition_to(BagStatus::Used) {
        return Err(DomainError::BagNotAvailable {
            bag_id: bag.bag_id,
            status: bag.status,
        });
    }

    if is_expired(bag.expiry_date, on) {
        return Err(DomainError::BagExpired {
            bag_id: bag.bag_id,
            expiry_date: bag.expiry_date,
        });
    }

    if !can_receive(recipient_group, bag.blood_group) {
        return Err(DomainError::IncompatibleBloodGroup {
            bag: bag.blood_group,
            recipient: recipient_group,
        });
    }

    Ok(())
}
