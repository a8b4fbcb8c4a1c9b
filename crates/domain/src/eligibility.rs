// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donor eligibility window.

use time::Date;

use crate::dates::add_days;
use crate::error::DomainError;

/// Minimum interval, in days, between two donations by the same donor.
pub const ELIGIBILITY_WINDOW_DAYS: i64 = 90;

/// The first date on which a donor may donate again.
///
/// Returns `None` for a donor with no donation history, who is eligible
/// immediately.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the date is not
/// representable.
pub fn next_eligible_date(last_donation_date: Option<Date>) -> Result<Option<Date>, DomainError> {
    last_donation_date
        .map(|last| {
            add_days(
                last,
                ELIGIBILITY_WINDOW_DAYS,
                "computing next eligible donation date",
            )
        })
        .transpose()
}

/// Whether a donor may donate on `today`.
///
/// A donor with no donation history is always eligible. Otherwise at least
/// `ELIGIBILITY_WINDOW_DAYS` must have passed since the last donation.
#[must_use]
pub fn is_eligible(last_donation_date: Option<Date>, today: Date) -> bool {
    match last_donation_date {
        None => true,
        Some(last) => (today - last).whole_days() >= ELIGIBILITY_WINDOW_DAYS,
    }
}

/// Picks the later of the recorded last donation date and a new donation.
///
/// Back-dated entries must not move a donor's last donation date backwards.
#[must_use]
pub fn advance_last_donation(current: Option<Date>, donation_date: Date) -> Date {
    match current {
        Some(existing) if existing > donation_date => existing,
        _ => donation_date,
    }
}
