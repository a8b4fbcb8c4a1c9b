// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::date;

use crate::{BagStatus, BloodGroup, DomainError};

#[test]
fn test_missing_field_display() {
    let error: DomainError = DomainError::MissingField {
        field: "first_name",
    };
    assert_eq!(error.to_string(), "Missing required field: first_name");
}

#[test]
fn test_mismatch_display_names_both_groups() {
    let error: DomainError = DomainError::BloodGroupMismatch {
        donor: BloodGroup::APositive,
        supplied: BloodGroup::BPositive,
    };
    let message: String = error.to_string();
    assert!(message.contains("A+"));
    assert!(message.contains("B+"));
}

#[test]
fn test_bag_errors_display() {
    let used: DomainError = DomainError::BagNotAvailable {
        bag_id: 7,
        status: BagStatus::Used,
    };
    assert_eq!(used.to_string(), "Bag 7 is not available (status: Used)");

    let expired: DomainError = DomainError::BagExpired {
        bag_id: 8,
        expiry_date: date!(2025 - 02 - 12),
    };
    assert!(expired.to_string().contains("Bag 8 expired"));
}

#[test]
fn test_domain_error_is_std_error() {
    let error: Box<dyn std::error::Error> =
        Box::new(DomainError::InvalidBagStatus(String::from("Lost")));
    assert_eq!(error.to_string(), "Invalid bag status 'Lost'");
}
