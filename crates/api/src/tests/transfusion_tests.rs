// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for recording transfusions.

use bloodlink_domain::{BagStatus, BloodGroup};

use super::helpers::{TODAY, add_bank_bag, create_test_staff, new_persistence};
use crate::{
    ApiError, NewRecipientRequest, RecordTransfusionRequest, get_bag, list_recipients,
    list_transfusions, record_transfusion, use_bag_form,
};

fn new_recipient(blood_group: &str) -> NewRecipientRequest {
    NewRecipientRequest {
        full_name: String::from("Pat Patient"),
        blood_group: blood_group.to_string(),
        hospital: String::from("General Hospital"),
        contact_number: Some(String::from(" ")),
    }
}

fn to_new_recipient(bag_id: i64, blood_group: &str) -> RecordTransfusionRequest {
    RecordTransfusionRequest {
        bag_id,
        recipient_id: None,
        new_recipient: Some(new_recipient(blood_group)),
        transfusion_date: None,
    }
}

#[test]
fn test_transfusion_marks_bag_used_and_creates_recipient() {
    let mut persistence = new_persistence();
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    let bag_id = add_bank_bag(&mut persistence, "O-", "2025-05-20");

    let response =
        record_transfusion(&mut persistence, &to_new_recipient(bag_id, "AB+"), &staff, TODAY)
            .unwrap();

    assert_eq!(
        get_bag(&mut persistence, bag_id, TODAY).unwrap().status,
        BagStatus::Used
    );
    let recipients = list_recipients(&mut persistence).unwrap().recipients;
    assert_eq!(recipients.len(), 1);
    assert_eq!(recipients[0].contact_number, None);

    let transfusions = list_transfusions(&mut persistence).unwrap().transfusions;
    assert_eq!(transfusions.len(), 1);
    assert_eq!(transfusions[0].transfusion_id, response.transfusion_id);
    assert_eq!(transfusions[0].transfusion_date, TODAY);
}

#[test]
fn test_transfusion_to_existing_recipient() {
    let mut persistence = new_persistence();
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    let first = add_bank_bag(&mut persistence, "A+", "2025-05-20");
    let second = add_bank_bag(&mut persistence, "O+", "2025-05-20");

    record_transfusion(&mut persistence, &to_new_recipient(first, "A+"), &staff, TODAY).unwrap();
    let recipient_id = list_recipients(&mut persistence).unwrap().recipients[0].recipient_id;

    record_transfusion(
        &mut persistence,
        &RecordTransfusionRequest {
            bag_id: second,
            recipient_id: Some(recipient_id),
            new_recipient: None,
            transfusion_date: Some(String::from("2025-05-31")),
        },
        &staff,
        TODAY,
    )
    .unwrap();

    assert_eq!(list_recipients(&mut persistence).unwrap().recipients.len(), 1);
    assert_eq!(
        list_transfusions(&mut persistence)
            .unwrap()
            .transfusions
            .len(),
        2
    );
}

#[test]
fn test_recipient_is_required() {
    let mut persistence = new_persistence();
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    let bag_id = add_bank_bag(&mut persistence, "O-", "2025-05-20");

    let result = record_transfusion(
        &mut persistence,
        &RecordTransfusionRequest {
            bag_id,
            recipient_id: None,
            new_recipient: None,
            transfusion_date: None,
        },
        &staff,
        TODAY,
    );

    assert!(
        matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "recipient")
    );
}

#[test]
fn test_unknown_recipient_is_not_found() {
    let mut persistence = new_persistence();
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    let bag_id = add_bank_bag(&mut persistence, "O-", "2025-05-20");

    let result = record_transfusion(
        &mut persistence,
        &RecordTransfusionRequest {
            bag_id,
            recipient_id: Some(77),
            new_recipient: None,
            transfusion_date: None,
        },
        &staff,
        TODAY,
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
    assert_eq!(
        get_bag(&mut persistence, bag_id, TODAY).unwrap().status,
        BagStatus::Available
    );
}

#[test]
fn test_bag_cannot_be_used_twice() {
    let mut persistence = new_persistence();
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    let bag_id = add_bank_bag(&mut persistence, "O-", "2025-05-20");

    record_transfusion(&mut persistence, &to_new_recipient(bag_id, "A+"), &staff, TODAY).unwrap();
    let result =
        record_transfusion(&mut persistence, &to_new_recipient(bag_id, "A+"), &staff, TODAY);

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
    assert_eq!(list_recipients(&mut persistence).unwrap().recipients.len(), 1);
    assert_eq!(
        list_transfusions(&mut persistence)
            .unwrap()
            .transfusions
            .len(),
        1
    );
}

#[test]
fn test_incompatible_recipient_is_rejected_atomically() {
    let mut persistence = new_persistence();
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    let bag_id = add_bank_bag(&mut persistence, "AB+", "2025-05-20");

    let result =
        record_transfusion(&mut persistence, &to_new_recipient(bag_id, "O-"), &staff, TODAY);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "blood_group_compatibility"
    ));
    assert!(list_recipients(&mut persistence).unwrap().recipients.is_empty());
    assert_eq!(
        get_bag(&mut persistence, bag_id, TODAY).unwrap().status,
        BagStatus::Available
    );
}

#[test]
fn test_expired_bag_is_rejected() {
    let mut persistence = new_persistence();
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    let bag_id = add_bank_bag(&mut persistence, "O-", "2025-01-01");

    let result =
        record_transfusion(&mut persistence, &to_new_recipient(bag_id, "O-"), &staff, TODAY);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "bag_not_expired"
    ));
}

#[test]
fn test_future_transfusion_date_is_rejected() {
    let mut persistence = new_persistence();
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    let bag_id = add_bank_bag(&mut persistence, "O-", "2025-05-20");

    let mut request = to_new_recipient(bag_id, "O-");
    request.transfusion_date = Some(String::from("2025-06-02"));

    let result = record_transfusion(&mut persistence, &request, &staff, TODAY);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "transfusion_date"
    ));
}

#[test]
fn test_use_bag_form_lists_only_compatible_recipients() {
    let mut persistence = new_persistence();
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    let first = add_bank_bag(&mut persistence, "O-", "2025-05-20");
    let second = add_bank_bag(&mut persistence, "O-", "2025-05-20");
    record_transfusion(&mut persistence, &to_new_recipient(first, "A-"), &staff, TODAY).unwrap();
    record_transfusion(&mut persistence, &to_new_recipient(second, "B+"), &staff, TODAY).unwrap();

    let bag_id = add_bank_bag(&mut persistence, "A-", "2025-05-25");
    let form = use_bag_form(&mut persistence, bag_id, TODAY).unwrap();

    assert_eq!(form.bag.blood_group, BloodGroup::ANegative);
    assert_eq!(form.compatible_recipients.len(), 1);
    assert_eq!(
        form.compatible_recipients[0].blood_group,
        BloodGroup::ANegative
    );
}

#[test]
fn test_use_bag_form_rejects_used_bag() {
    let mut persistence = new_persistence();
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    let bag_id = add_bank_bag(&mut persistence, "O-", "2025-05-20");
    record_transfusion(&mut persistence, &to_new_recipient(bag_id, "A+"), &staff, TODAY).unwrap();

    let result = use_bag_form(&mut persistence, bag_id, TODAY);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "bag_available"
    ));
}
