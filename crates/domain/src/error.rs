// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{BagStatus, BloodGroup};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required form field was empty or missing.
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// The blood group is not one of the eight recognised groups.
    InvalidBloodGroup(String),
    /// The bag status is not `Available` or `Used`.
    InvalidBagStatus(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// An explicitly supplied blood group disagrees with the donor's record.
    BloodGroupMismatch {
        /// The blood group on the donor record.
        donor: BloodGroup,
        /// The blood group supplied with the bag.
        supplied: BloodGroup,
    },
    /// The bag cannot be transfused because it is not available.
    BagNotAvailable {
        /// The bag identifier.
        bag_id: i64,
        /// The bag's current status.
        status: BagStatus,
    },
    /// The bag expired before the transfusion date.
    BagExpired {
        /// The bag identifier.
        bag_id: i64,
        /// The bag's expiry date.
        expiry_date: time::Date,
    },
    /// The recipient cannot receive blood of the bag's group.
    IncompatibleBloodGroup {
        /// The blood group of the bag.
        bag: BloodGroup,
        /// The blood group of the recipient.
        recipient: BloodGroup,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Missing required field: {field}"),
            Self::InvalidBloodGroup(value) => write!(
                f,
                "Invalid blood group '{value}'. Must be one of A+, A-, B+, B-, AB+, AB-, O+, O-"
            ),
            Self::InvalidBagStatus(value) => write!(f, "Invalid bag status '{value}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::BloodGroupMismatch { donor, supplied } => write!(
                f,
                "Blood group {supplied} does not match the donor's recorded group {donor}"
            ),
            Self::BagNotAvailable { bag_id, status } => {
                write!(f, "Bag {bag_id} is not available (status: {status})")
            }
            Self::BagExpired {
                bag_id,
                expiry_date,
            } => write!(f, "Bag {bag_id} expired on {expiry_date}"),
            Self::IncompatibleBloodGroup { bag, recipient } => write!(
                f,
                "A {recipient} recipient cannot receive {bag} blood"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
