// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests that admin-only operations reject non-admin staff.

use super::helpers::{
    TODAY, add_bank_bag, create_test_admin, create_test_staff, new_persistence, staff_request,
};
use crate::{
    ApiError, AuthenticatedStaff, AuthorizationService, DeleteStaffRequest, Role,
    UpdateInventoryRequest, create_staff, delete_inventory, delete_staff, get_bag, list_staff,
    update_inventory,
};

fn is_unauthorized<T>(result: &Result<T, ApiError>) -> bool {
    matches!(result, Err(ApiError::Unauthorized { .. }))
}

#[test]
fn test_role_follows_admin_flag() {
    assert_eq!(Role::from_is_admin(true), Role::Admin);
    assert_eq!(Role::from_is_admin(false), Role::Staff);
}

#[test]
fn test_authorization_service_distinguishes_roles() {
    let admin = AuthenticatedStaff {
        staff_id: 1,
        full_name: String::from("Admin"),
        role: Role::Admin,
        must_change_password: false,
    };
    let staff = AuthenticatedStaff {
        staff_id: 2,
        full_name: String::from("Desk"),
        role: Role::Staff,
        must_change_password: false,
    };

    assert!(AuthorizationService::authorize_manage_staff(&admin).is_ok());
    assert!(AuthorizationService::authorize_manage_staff(&staff).is_err());
    assert!(AuthorizationService::authorize_update_inventory(&staff).is_err());
    assert!(AuthorizationService::authorize_delete_inventory(&staff).is_err());
}

#[test]
fn test_staff_cannot_manage_accounts() {
    let mut persistence = new_persistence();
    let (admin, _) = create_test_admin(&mut persistence, "chief");
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");

    assert!(is_unauthorized(&list_staff(&mut persistence, &staff)));
    assert!(is_unauthorized(&create_staff(
        &mut persistence,
        &staff_request("DESK-02"),
        &staff
    )));
    assert!(is_unauthorized(&delete_staff(
        &mut persistence,
        DeleteStaffRequest {
            staff_id: admin.staff_id,
        },
        &staff
    )));

    assert_eq!(
        list_staff(&mut persistence, &admin).unwrap().staff.len(),
        2
    );
}

#[test]
fn test_staff_cannot_edit_or_delete_inventory() {
    let mut persistence = new_persistence();
    let (staff, _) = create_test_staff(&mut persistence, "DESK-01");
    let bag_id = add_bank_bag(&mut persistence, "A+", "2025-05-20");

    let update = UpdateInventoryRequest {
        bag_id,
        blood_group: String::from("B+"),
        bank_id: None,
        donation_date: String::from("2025-05-21"),
    };

    assert!(is_unauthorized(&update_inventory(
        &mut persistence,
        &update,
        &staff
    )));
    assert!(is_unauthorized(&delete_inventory(
        &mut persistence,
        bag_id,
        &staff
    )));

    let bag = get_bag(&mut persistence, bag_id, TODAY).unwrap();
    assert_eq!(bag.blood_group.as_str(), "A+");
}
