// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for donor registration and lookup.

use bloodlink_domain::BloodGroup;
use time::macros::date;

use super::helpers::{TODAY, donor_request, new_persistence};
use crate::{AddInventoryRequest, ApiError, add_inventory, get_donor, list_donors, register_donor};

#[test]
fn test_register_donor_assigns_code() {
    let mut persistence = new_persistence();

    let response = register_donor(&mut persistence, &donor_request("555-0100", None)).unwrap();

    assert_eq!(response.donor_code, format!("BLD-{:06}", response.donor_id));
    assert!(response.message.contains(&response.donor_code));
}

#[test]
fn test_register_donor_trims_and_parses_fields() {
    let mut persistence = new_persistence();
    let mut request = donor_request("  555-0100 ", Some("  "));
    request.blood_group = String::from(" ab+ ");

    let response = register_donor(&mut persistence, &request).unwrap();
    let detail = get_donor(&mut persistence, response.donor_id, TODAY).unwrap();

    assert_eq!(detail.donor.contact_number, "555-0100");
    assert_eq!(detail.donor.blood_group, BloodGroup::AbPositive);
    assert_eq!(detail.donor.email, None);
}

#[test]
fn test_duplicate_contact_number_is_rejected_without_insert() {
    let mut persistence = new_persistence();
    register_donor(&mut persistence, &donor_request("555-0100", None)).unwrap();

    let result = register_donor(&mut persistence, &donor_request("555-0100", None));

    match result {
        Err(ApiError::Duplicate { field, message }) => {
            assert_eq!(field, "contact_number");
            assert!(message.contains("contact number"));
        }
        other => panic!("Expected Duplicate error, got {other:?}"),
    }
    assert_eq!(list_donors(&mut persistence).unwrap().donors.len(), 1);
}

#[test]
fn test_duplicate_email_is_rejected_without_insert() {
    let mut persistence = new_persistence();
    register_donor(
        &mut persistence,
        &donor_request("555-0100", Some("ada@example.org")),
    )
    .unwrap();

    let result = register_donor(
        &mut persistence,
        &donor_request("555-0101", Some("ada@example.org")),
    );

    assert!(matches!(result, Err(ApiError::Duplicate { ref field, .. }) if field == "email"));
    assert_eq!(list_donors(&mut persistence).unwrap().donors.len(), 1);
}

#[test]
fn test_missing_required_field_is_rejected() {
    let mut persistence = new_persistence();
    let mut request = donor_request("555-0100", None);
    request.last_name = String::from("   ");

    let result = register_donor(&mut persistence, &request);

    assert!(
        matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "last_name")
    );
}

#[test]
fn test_invalid_blood_group_is_rejected() {
    let mut persistence = new_persistence();
    let mut request = donor_request("555-0100", None);
    request.blood_group = String::from("C+");

    let result = register_donor(&mut persistence, &request);

    assert!(
        matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "blood_group")
    );
}

#[test]
fn test_invalid_date_of_birth_is_rejected() {
    let mut persistence = new_persistence();
    let mut request = donor_request("555-0100", None);
    request.date_of_birth = String::from("10/12/1990");

    let result = register_donor(&mut persistence, &request);

    assert!(
        matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "date_of_birth")
    );
}

#[test]
fn test_donors_are_listed_by_last_then_first_name() {
    let mut persistence = new_persistence();
    let mut zed = donor_request("555-0100", None);
    zed.last_name = String::from("Zed");
    let mut bob = donor_request("555-0101", None);
    bob.last_name = String::from("Abbot");
    bob.first_name = String::from("Bob");
    let mut amy = donor_request("555-0102", None);
    amy.last_name = String::from("Abbot");
    amy.first_name = String::from("Amy");

    for request in [&zed, &bob, &amy] {
        register_donor(&mut persistence, request).unwrap();
    }

    let names: Vec<String> = list_donors(&mut persistence)
        .unwrap()
        .donors
        .into_iter()
        .map(|d| format!("{} {}", d.first_name, d.last_name))
        .collect();
    assert_eq!(names, vec!["Amy Abbot", "Bob Abbot", "Ada Zed"]);
}

#[test]
fn test_donor_detail_includes_history_and_next_eligible_date() {
    let mut persistence = new_persistence();
    let donor = register_donor(&mut persistence, &donor_request("555-0100", None)).unwrap();

    let never_donated = get_donor(&mut persistence, donor.donor_id, TODAY).unwrap();
    assert_eq!(never_donated.next_eligible_date, None);
    assert!(never_donated.eligible_today);
    assert!(never_donated.donations.is_empty());

    for donation_date in ["2025-01-10", "2025-04-01"] {
        add_inventory(
            &mut persistence,
            &AddInventoryRequest {
                donor_id: Some(donor.donor_id),
                bank_id: None,
                blood_group: None,
                donation_date: donation_date.to_string(),
            },
        )
        .unwrap();
    }

    let detail = get_donor(&mut persistence, donor.donor_id, TODAY).unwrap();
    assert_eq!(detail.donor.last_donation_date, Some(date!(2025 - 04 - 01)));
    assert_eq!(detail.next_eligible_date, Some(date!(2025 - 06 - 30)));
    assert!(!detail.eligible_today);
    assert_eq!(detail.donations.len(), 2);
    assert_eq!(detail.donations[0].donation_date, date!(2025 - 04 - 01));
}

#[test]
fn test_unknown_donor_is_not_found() {
    let mut persistence = new_persistence();

    let result = get_donor(&mut persistence, 42, TODAY);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
