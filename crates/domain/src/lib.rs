// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rules for the BloodLink blood bank system.
//!
//! Everything in this crate is pure: no I/O, no clock access. Callers pass
//! the reference date (`today`) explicitly.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod compatibility;
mod dates;
mod eligibility;
mod error;
mod inventory;
mod reports;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use compatibility::{can_receive, compatible_donor_groups};
pub use dates::{YearMonth, add_days, format_date, parse_date};
pub use eligibility::{
    ELIGIBILITY_WINDOW_DAYS, advance_last_donation, is_eligible, next_eligible_date,
};
pub use error::DomainError;
pub use inventory::{
    BagSnapshot, EXPIRING_SOON_DAYS, SHELF_LIFE_DAYS, compute_expiry, is_expired,
    is_expiring_soon, resolve_bag_blood_group, validate_transfusion,
};
pub use reports::{
    GroupStock, MonthlyDonations, SHORTAGE_THRESHOLD, eligible_donors, monthly_donation_counts,
    shortages, stock_by_group,
};
pub use types::{BagStatus, BloodGroup, DonorCode};
pub use validation::{DonorFields, optional_field, require_field, validate_donor_fields};
