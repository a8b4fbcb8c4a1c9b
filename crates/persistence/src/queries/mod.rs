// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `staff`: Staff account and session lookups
//! - `donors`: Donor registry queries
//! - `inventory`: Bag, bank and stock queries
//! - `transfusions`: Recipient and transfusion queries
//!
//! All query functions are generated in backend-specific monomorphic versions
//! (`_sqlite`, and `_mysql` with the `mysql` feature). The `Persistence`
//! adapter in `lib.rs` dispatches to the appropriate version.

pub mod donors;
pub mod inventory;
pub mod staff;
pub mod transfusions;

use bloodlink_domain::{BagStatus, BloodGroup, parse_date};
use time::Date;

use crate::error::PersistenceError;

/// Converts a stored blood group back to its domain type.
pub(crate) fn stored_blood_group(value: &str) -> Result<BloodGroup, PersistenceError> {
    value
        .parse()
        .map_err(|e| PersistenceError::InvalidStoredValue(format!("{e}")))
}

/// Converts a stored bag status back to its domain type.
pub(crate) fn stored_bag_status(value: &str) -> Result<BagStatus, PersistenceError> {
    value
        .parse()
        .map_err(|e| PersistenceError::InvalidStoredValue(format!("{e}")))
}

/// Converts a stored `YYYY-MM-DD` date back to a `Date`.
pub(crate) fn stored_date(value: &str) -> Result<Date, PersistenceError> {
    parse_date(value).map_err(|e| PersistenceError::InvalidStoredValue(format!("{e}")))
}

/// Converts an optional stored date.
pub(crate) fn stored_optional_date(value: Option<&str>) -> Result<Option<Date>, PersistenceError> {
    value.map(stored_date).transpose()
}
