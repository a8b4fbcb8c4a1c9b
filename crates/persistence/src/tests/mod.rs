// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod staff_tests;
mod transfusion_tests;

use bloodlink_domain::BloodGroup;
use time::Date;
use time::macros::date;

use crate::{NewBag, NewDonor, NewRecipient, NewStaff, Persistence};

/// The reference "today" used across persistence tests.
pub const TODAY: Date = date!(2025 - 06 - 01);

pub fn new_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn donor_fields(contact_number: &str, email: Option<&str>) -> NewDonor {
    NewDonor {
        first_name: String::from("Ada"),
        last_name: String::from("Lovelace"),
        blood_group: BloodGroup::ONegative,
        contact_number: contact_number.to_string(),
        email: email.map(String::from),
        address: None,
        date_of_birth: date!(1990 - 12 - 10),
    }
}

pub fn bank_direct_bag(blood_group: BloodGroup, donation_date: Date) -> NewBag {
    NewBag {
        donor_id: None,
        bank_id: None,
        blood_group: Some(blood_group),
        donation_date,
    }
}

pub fn new_recipient(blood_group: BloodGroup) -> NewRecipient {
    NewRecipient {
        full_name: String::from("Pat Patient"),
        blood_group,
        hospital: String::from("General Hospital"),
        contact_number: None,
    }
}

pub fn admin_account(username: &str) -> NewStaff {
    NewStaff {
        username: Some(username.to_string()),
        secret_code: None,
        full_name: String::from("Admin User"),
        password: String::from("password"),
        is_admin: true,
        must_change_password: true,
    }
}

pub fn staff_account(secret_code: &str) -> NewStaff {
    NewStaff {
        username: None,
        secret_code: Some(secret_code.to_string()),
        full_name: String::from("Desk Staff"),
        password: String::from("password"),
        is_admin: false,
        must_change_password: false,
    }
}
