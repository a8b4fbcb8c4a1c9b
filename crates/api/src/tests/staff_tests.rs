// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for staff administration and setup operations.

use super::helpers::{
    FileDatabase, STRONG_PASSWORD, create_test_admin, create_test_staff, new_persistence,
    staff_request,
};
use crate::{
    AdminLoginRequest, ApiError, CreateStaffRequest, DEFAULT_ADMIN_USERNAME, DeleteStaffRequest,
    UpdateStaffRequest, add_bank, create_staff, delete_staff, get_staff, list_staff, login_admin,
    reset_admin, update_staff,
};

fn update_request(staff_id: i64, is_admin: bool) -> UpdateStaffRequest {
    UpdateStaffRequest {
        staff_id,
        username: Some(String::from("chief")),
        secret_code: Some(String::from("CODE-9")),
        full_name: String::from("Renamed"),
        is_admin,
        must_change_password: false,
        new_password: None,
        new_password_confirmation: None,
    }
}

#[test]
fn test_admin_creates_staff_with_forced_password_change() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");

    let response = create_staff(&mut persistence, &staff_request("NIGHT-01"), &admin).unwrap();

    let created = get_staff(&mut persistence, response.staff_id, &admin).unwrap();
    assert_eq!(created.secret_code.as_deref(), Some("NIGHT-01"));
    assert!(!created.is_admin);
    assert!(created.must_change_password);
}

#[test]
fn test_admin_account_requires_username() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");
    let request = CreateStaffRequest {
        is_admin: true,
        ..staff_request("NIGHT-01")
    };

    let result = create_staff(&mut persistence, &request, &admin);

    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "username"));
}

#[test]
fn test_staff_account_requires_secret_code() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");
    let request = CreateStaffRequest {
        secret_code: Some(String::from("  ")),
        ..staff_request("NIGHT-01")
    };

    let result = create_staff(&mut persistence, &request, &admin);

    assert!(
        matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "secret_code")
    );
}

#[test]
fn test_duplicate_secret_code_is_rejected() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");
    create_staff(&mut persistence, &staff_request("NIGHT-01"), &admin).unwrap();

    let result = create_staff(&mut persistence, &staff_request("NIGHT-01"), &admin);

    assert!(matches!(result, Err(ApiError::Duplicate { ref field, .. }) if field == "secret_code"));
}

#[test]
fn test_create_staff_enforces_password_policy() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");
    let request = CreateStaffRequest {
        password_confirmation: String::from("Different1!"),
        ..staff_request("NIGHT-01")
    };

    let result = create_staff(&mut persistence, &request, &admin);

    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
}

#[test]
fn test_update_without_password_keeps_hash() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");
    let (staff, before) = create_test_staff(&mut persistence, "DESK-01");

    update_staff(
        &mut persistence,
        &UpdateStaffRequest {
            staff_id: staff.staff_id,
            username: None,
            secret_code: Some(String::from("DESK-02")),
            full_name: String::from("Day Shift"),
            is_admin: false,
            must_change_password: true,
            new_password: Some(String::new()),
            new_password_confirmation: Some(String::new()),
        },
        &admin,
    )
    .unwrap();

    let after = persistence
        .get_staff_by_id(staff.staff_id)
        .unwrap()
        .unwrap();
    assert_eq!(after.password_hash, before.password_hash);
    assert_eq!(after.secret_code.as_deref(), Some("DESK-02"));
    assert_eq!(after.full_name, "Day Shift");
    assert!(after.must_change_password);
}

#[test]
fn test_update_with_password_changes_hash() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");
    let (staff, before) = create_test_staff(&mut persistence, "DESK-01");

    update_staff(
        &mut persistence,
        &UpdateStaffRequest {
            staff_id: staff.staff_id,
            username: None,
            secret_code: Some(String::from("DESK-01")),
            full_name: String::from("Desk Staff"),
            is_admin: false,
            must_change_password: false,
            new_password: Some(String::from("Fr3sh-Start")),
            new_password_confirmation: Some(String::from("Fr3sh-Start")),
        },
        &admin,
    )
    .unwrap();

    let after = persistence
        .get_staff_by_id(staff.staff_id)
        .unwrap()
        .unwrap();
    assert_ne!(after.password_hash, before.password_hash);
}

#[test]
fn test_last_admin_cannot_be_demoted() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");

    let result = update_staff(
        &mut persistence,
        &update_request(admin.staff_id, false),
        &admin,
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "last_admin"
    ));
}

#[test]
fn test_admin_can_be_demoted_when_another_admin_exists() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");
    let (deputy, _) = create_test_admin(&mut persistence, "deputy");

    let mut request = update_request(deputy.staff_id, false);
    request.username = Some(String::from("deputy"));
    update_staff(&mut persistence, &request, &admin).unwrap();

    assert_eq!(persistence.count_admins().unwrap(), 1);
}

#[test]
fn test_admin_cannot_delete_own_account() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");
    create_test_admin(&mut persistence, "deputy");

    let result = delete_staff(
        &mut persistence,
        DeleteStaffRequest {
            staff_id: admin.staff_id,
        },
        &admin,
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "no_self_deletion"
    ));
    assert_eq!(list_staff(&mut persistence, &admin).unwrap().staff.len(), 2);
}

#[test]
fn test_delete_staff_removes_account_and_sessions() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    persistence
        .create_session("desk-token", staff.staff_id, "2999-01-01T00:00:00Z")
        .unwrap();

    delete_staff(
        &mut persistence,
        DeleteStaffRequest {
            staff_id: staff.staff_id,
        },
        &admin,
    )
    .unwrap();

    assert!(persistence.get_staff_by_id(staff.staff_id).unwrap().is_none());
    assert!(
        persistence
            .get_session_by_token("desk-token")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_unknown_staff_is_not_found() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");

    let result = delete_staff(
        &mut persistence,
        DeleteStaffRequest { staff_id: 404 },
        &admin,
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_reset_admin_replaces_admin_account() {
    let mut persistence = new_persistence();
    create_test_admin(&mut persistence, DEFAULT_ADMIN_USERNAME);

    let first = reset_admin(&mut persistence, "password").unwrap();
    assert_eq!(first.removed, 1);

    let second = reset_admin(&mut persistence, "password").unwrap();
    assert_eq!(second.removed, 1);
    assert_ne!(first.staff_id, second.staff_id);

    let login = login_admin(
        &mut persistence,
        &AdminLoginRequest {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: String::from("password"),
        },
    )
    .unwrap();
    assert!(login.must_change_password);
    assert_eq!(login.full_name, "Admin User");
    assert_eq!(login.redirect_to, "/profile");
}

#[test]
fn test_failed_reset_keeps_existing_admin() {
    let database = FileDatabase::new("reset-admin");
    let mut persistence = database.open();
    let (_, admin) = create_test_admin(&mut persistence, DEFAULT_ADMIN_USERNAME);
    database.execute(
        "CREATE TRIGGER reject_staff_insert BEFORE INSERT ON staff \
         BEGIN SELECT RAISE(ABORT, 'staff is read-only'); END",
    );

    assert!(reset_admin(&mut persistence, "password").is_err());

    let login = login_admin(
        &mut persistence,
        &AdminLoginRequest {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: STRONG_PASSWORD.to_string(),
        },
    )
    .unwrap();
    assert_eq!(login.staff_id, admin.staff_id);
}

#[test]
fn test_reset_admin_rejects_empty_password() {
    let mut persistence = new_persistence();

    assert!(matches!(
        reset_admin(&mut persistence, ""),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_add_bank_rejects_duplicate_name() {
    let mut persistence = new_persistence();
    add_bank(&mut persistence, "City Bank", None).unwrap();

    let result = add_bank(&mut persistence, " City Bank ", Some("Uptown"));

    assert!(matches!(result, Err(ApiError::Duplicate { .. })));
    assert!(matches!(
        add_bank(&mut persistence, "  ", None),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_strong_password_constant_satisfies_policy() {
    assert!(
        crate::PasswordPolicy::default()
            .validate(STRONG_PASSWORD, STRONG_PASSWORD, "DESK-01", "Desk Staff")
            .is_ok()
    );
}
