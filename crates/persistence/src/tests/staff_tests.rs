// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for staff account and session persistence.

use super::{admin_account, new_persistence, staff_account};
use crate::{Persistence, PersistenceError, StaffUpdate};

#[test]
fn test_create_and_lookup_admin_by_username() {
    let mut persistence = new_persistence();
    let staff_id = persistence.create_staff(&admin_account("admin")).unwrap();

    let admin = persistence.get_staff_by_username("admin").unwrap().unwrap();
    assert_eq!(admin.staff_id, staff_id);
    assert!(admin.is_admin);
    assert!(admin.must_change_password);
    assert!(Persistence::verify_password("password", &admin.password_hash).unwrap());
    assert!(!Persistence::verify_password("wrong", &admin.password_hash).unwrap());
}

#[test]
fn test_lookup_staff_by_secret_code() {
    let mut persistence = new_persistence();
    persistence.create_staff(&staff_account("DESK-01")).unwrap();

    let staff = persistence
        .get_staff_by_secret_code("DESK-01")
        .unwrap()
        .unwrap();
    assert!(!staff.is_admin);
    assert!(persistence.get_staff_by_secret_code("DESK-02").unwrap().is_none());
    assert!(persistence.get_staff_by_username("DESK-01").unwrap().is_none());
}

#[test]
fn test_duplicate_username_is_unique_violation() {
    let mut persistence = new_persistence();
    persistence.create_staff(&admin_account("admin")).unwrap();

    let result = persistence.create_staff(&admin_account("admin"));
    assert_eq!(
        result,
        Err(PersistenceError::UniqueViolation {
            field: String::from("username")
        })
    );
}

#[test]
fn test_duplicate_secret_code_is_unique_violation() {
    let mut persistence = new_persistence();
    persistence.create_staff(&staff_account("DESK-01")).unwrap();

    let result = persistence.create_staff(&staff_account("DESK-01"));
    assert_eq!(
        result,
        Err(PersistenceError::UniqueViolation {
            field: String::from("secret_code")
        })
    );
}

#[test]
fn test_update_staff_blank_password_keeps_hash() {
    let mut persistence = new_persistence();
    let staff_id = persistence.create_staff(&staff_account("DESK-01")).unwrap();
    let before = persistence.get_staff_by_id(staff_id).unwrap().unwrap();

    persistence
        .update_staff(
            staff_id,
            &StaffUpdate {
                username: None,
                secret_code: Some(String::from("DESK-09")),
                full_name: String::from("Renamed"),
                is_admin: false,
                must_change_password: true,
                new_password: None,
            },
        )
        .unwrap();

    let after = persistence.get_staff_by_id(staff_id).unwrap().unwrap();
    assert_eq!(after.password_hash, before.password_hash);
    assert_eq!(after.full_name, "Renamed");
    assert_eq!(after.secret_code.as_deref(), Some("DESK-09"));
    assert!(after.must_change_password);
}

#[test]
fn test_update_staff_with_password_replaces_hash() {
    let mut persistence = new_persistence();
    let staff_id = persistence.create_staff(&staff_account("DESK-01")).unwrap();

    persistence
        .update_staff(
            staff_id,
            &StaffUpdate {
                username: None,
                secret_code: Some(String::from("DESK-01")),
                full_name: String::from("Desk Staff"),
                is_admin: false,
                must_change_password: false,
                new_password: Some(String::from("N3w-Passw0rd")),
            },
        )
        .unwrap();

    let staff = persistence.get_staff_by_id(staff_id).unwrap().unwrap();
    assert!(Persistence::verify_password("N3w-Passw0rd", &staff.password_hash).unwrap());
}

#[test]
fn test_update_missing_staff_fails() {
    let mut persistence = new_persistence();
    let result = persistence.update_password(99, "whatever");
    assert_eq!(result, Err(PersistenceError::StaffNotFound(99)));
}

#[test]
fn test_update_password_clears_must_change_flag() {
    let mut persistence = new_persistence();
    let staff_id = persistence.create_staff(&admin_account("admin")).unwrap();

    persistence.update_password(staff_id, "Sturdy-Pass1").unwrap();

    let admin = persistence.get_staff_by_id(staff_id).unwrap().unwrap();
    assert!(!admin.must_change_password);
    assert!(Persistence::verify_password("Sturdy-Pass1", &admin.password_hash).unwrap());
}

#[test]
fn test_delete_staff_removes_sessions() {
    let mut persistence = new_persistence();
    let staff_id = persistence.create_staff(&staff_account("DESK-01")).unwrap();
    persistence
        .create_session("token-1", staff_id, "2099-01-01T00:00:00Z")
        .unwrap();

    persistence.delete_staff(staff_id).unwrap();

    assert!(persistence.get_staff_by_id(staff_id).unwrap().is_none());
    assert!(persistence.get_session_by_token("token-1").unwrap().is_none());
    assert_eq!(
        persistence.delete_staff(staff_id),
        Err(PersistenceError::StaffNotFound(staff_id))
    );
}

#[test]
fn test_count_admins() {
    let mut persistence = new_persistence();
    persistence.create_staff(&admin_account("admin")).unwrap();
    persistence.create_staff(&admin_account("second")).unwrap();
    persistence.create_staff(&staff_account("DESK-01")).unwrap();

    assert_eq!(persistence.count_admins().unwrap(), 2);
    assert_eq!(persistence.list_staff().unwrap().len(), 3);
}

#[test]
fn test_replace_staff_by_username() {
    let mut persistence = new_persistence();
    let old_id = persistence.create_staff(&admin_account("admin")).unwrap();
    persistence
        .create_session("token-old", old_id, "2099-01-01T00:00:00Z")
        .unwrap();

    let (removed, new_id) = persistence
        .replace_staff_by_username("admin", &admin_account("admin"))
        .unwrap();

    assert_eq!(removed, 1);
    assert_ne!(new_id, old_id);
    let admin = persistence.get_staff_by_username("admin").unwrap().unwrap();
    assert_eq!(admin.staff_id, new_id);
    assert!(persistence.get_session_by_token("token-old").unwrap().is_none());

    let (removed, _) = persistence
        .replace_staff_by_username("nobody", &admin_account("nobody"))
        .unwrap();
    assert_eq!(removed, 0);
}

#[test]
fn test_failed_replacement_keeps_existing_account() {
    let mut persistence = new_persistence();
    let old_id = persistence.create_staff(&admin_account("admin")).unwrap();
    persistence.create_staff(&staff_account("DESK-01")).unwrap();

    let mut clashing = admin_account("admin");
    clashing.secret_code = Some(String::from("DESK-01"));
    let result = persistence.replace_staff_by_username("admin", &clashing);

    assert!(matches!(result, Err(PersistenceError::UniqueViolation { .. })));
    let admin = persistence.get_staff_by_username("admin").unwrap().unwrap();
    assert_eq!(admin.staff_id, old_id);
}

#[test]
fn test_session_lifecycle() {
    let mut persistence = new_persistence();
    let staff_id = persistence.create_staff(&staff_account("DESK-01")).unwrap();

    let session_id = persistence
        .create_session("token-1", staff_id, "2099-01-01T00:00:00Z")
        .unwrap();
    let session = persistence.get_session_by_token("token-1").unwrap().unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.staff_id, staff_id);

    persistence.update_session_activity(session_id).unwrap();
    persistence.delete_session("token-1").unwrap();
    assert!(persistence.get_session_by_token("token-1").unwrap().is_none());
}

#[test]
fn test_delete_expired_sessions() {
    let mut persistence = new_persistence();
    let staff_id = persistence.create_staff(&staff_account("DESK-01")).unwrap();
    persistence
        .create_session("old", staff_id, "2020-01-01T00:00:00Z")
        .unwrap();
    persistence
        .create_session("fresh", staff_id, "2099-01-01T00:00:00Z")
        .unwrap();

    let removed = persistence
        .delete_expired_sessions("2025-06-01T00:00:00Z")
        .unwrap();

    assert_eq!(removed, 1);
    assert!(persistence.get_session_by_token("old").unwrap().is_none());
    assert!(persistence.get_session_by_token("fresh").unwrap().is_some());
}
