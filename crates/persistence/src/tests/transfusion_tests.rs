// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for transfusion recording.

use bloodlink_domain::{BagStatus, BloodGroup, DomainError};
use time::macros::date;

use super::{TODAY, bank_direct_bag, new_persistence, new_recipient, staff_account};
use crate::{Persistence, PersistenceError, RecipientChoice};

fn available_bag(persistence: &mut Persistence, blood_group: BloodGroup) -> i64 {
    persistence
        .add_bag(&bank_direct_bag(blood_group, date!(2025 - 05 - 20)))
        .unwrap()
}

#[test]
fn test_transfusion_with_new_recipient_marks_bag_used() {
    let mut persistence = new_persistence();
    let staff_id = persistence.create_staff(&staff_account("DESK-01")).unwrap();
    let bag_id = available_bag(&mut persistence, BloodGroup::ONegative);

    let transfusion_id = persistence
        .record_transfusion(
            bag_id,
            &RecipientChoice::New(new_recipient(BloodGroup::APositive)),
            TODAY,
            Some(staff_id),
        )
        .unwrap();

    let bag = persistence.get_bag(bag_id).unwrap().unwrap();
    assert_eq!(bag.status, BagStatus::Used);
    assert_eq!(persistence.count_transfusions_for_bag(bag_id).unwrap(), 1);

    let transfusions = persistence.list_transfusions().unwrap();
    assert_eq!(transfusions.len(), 1);
    assert_eq!(transfusions[0].transfusion_id, transfusion_id);
    assert_eq!(transfusions[0].recipient_name, "Pat Patient");
    assert_eq!(transfusions[0].recorded_by, Some(staff_id));
    assert_eq!(persistence.list_recipients().unwrap().len(), 1);
}

#[test]
fn test_transfusion_to_existing_recipient() {
    let mut persistence = new_persistence();
    let first_bag = available_bag(&mut persistence, BloodGroup::APositive);
    let second_bag = available_bag(&mut persistence, BloodGroup::ANegative);

    persistence
        .record_transfusion(
            first_bag,
            &RecipientChoice::New(new_recipient(BloodGroup::APositive)),
            TODAY,
            None,
        )
        .unwrap();
    let recipient_id = persistence.list_recipients().unwrap()[0].recipient_id;

    persistence
        .record_transfusion(
            second_bag,
            &RecipientChoice::Existing(recipient_id),
            TODAY,
            None,
        )
        .unwrap();

    assert_eq!(persistence.list_recipients().unwrap().len(), 1);
    assert_eq!(persistence.list_transfusions().unwrap().len(), 2);
}

#[test]
fn test_second_transfusion_of_same_bag_rejected() {
    let mut persistence = new_persistence();
    let bag_id = available_bag(&mut persistence, BloodGroup::ONegative);

    persistence
        .record_transfusion(
            bag_id,
            &RecipientChoice::New(new_recipient(BloodGroup::OPositive)),
            TODAY,
            None,
        )
        .unwrap();
    let result = persistence.record_transfusion(
        bag_id,
        &RecipientChoice::New(new_recipient(BloodGroup::OPositive)),
        TODAY,
        None,
    );

    assert_eq!(
        result,
        Err(PersistenceError::RuleViolation(
            DomainError::BagNotAvailable {
                bag_id,
                status: BagStatus::Used,
            }
        ))
    );
    assert_eq!(persistence.count_transfusions_for_bag(bag_id).unwrap(), 1);
    // The recipient created by the rejected attempt was rolled back.
    assert_eq!(persistence.list_recipients().unwrap().len(), 1);
}

#[test]
fn test_incompatible_transfusion_rolls_back() {
    let mut persistence = new_persistence();
    let bag_id = available_bag(&mut persistence, BloodGroup::BPositive);

    let result = persistence.record_transfusion(
        bag_id,
        &RecipientChoice::New(new_recipient(BloodGroup::APositive)),
        TODAY,
        None,
    );

    assert!(matches!(
        result,
        Err(PersistenceError::RuleViolation(
            DomainError::IncompatibleBloodGroup { .. }
        ))
    ));
    assert_eq!(
        persistence.get_bag(bag_id).unwrap().unwrap().status,
        BagStatus::Available
    );
    assert!(persistence.list_recipients().unwrap().is_empty());
    assert!(persistence.list_transfusions().unwrap().is_empty());
}

#[test]
fn test_expired_bag_rejected() {
    let mut persistence = new_persistence();
    let bag_id = persistence
        .add_bag(
            &bank_direct_bag(BloodGroup::ONegative, date!(2025 - 01 - 01)),
        )
        .unwrap();

    let result = persistence.record_transfusion(
        bag_id,
        &RecipientChoice::New(new_recipient(BloodGroup::ONegative)),
        date!(2025 - 02 - 13),
        None,
    );

    assert!(matches!(
        result,
        Err(PersistenceError::RuleViolation(DomainError::BagExpired { .. }))
    ));
}

#[test]
fn test_unknown_bag_and_recipient_rejected() {
    let mut persistence = new_persistence();

    assert_eq!(
        persistence.record_transfusion(
            404,
            &RecipientChoice::New(new_recipient(BloodGroup::ONegative)),
            TODAY,
            None,
        ),
        Err(PersistenceError::BagNotFound(404))
    );

    let bag_id = available_bag(&mut persistence, BloodGroup::ONegative);
    assert_eq!(
        persistence.record_transfusion(bag_id, &RecipientChoice::Existing(9), TODAY, None),
        Err(PersistenceError::RecipientNotFound(9))
    );
}

#[test]
fn test_deleting_staff_keeps_transfusion_history() {
    let mut persistence = new_persistence();
    let staff_id = persistence.create_staff(&staff_account("DESK-01")).unwrap();
    let bag_id = available_bag(&mut persistence, BloodGroup::ONegative);
    persistence
        .record_transfusion(
            bag_id,
            &RecipientChoice::New(new_recipient(BloodGroup::ONegative)),
            TODAY,
            Some(staff_id),
        )
        .unwrap();

    persistence.delete_staff(staff_id).unwrap();

    let transfusions = persistence.list_transfusions().unwrap();
    assert_eq!(transfusions.len(), 1);
    assert_eq!(transfusions[0].recorded_by, None);
}
