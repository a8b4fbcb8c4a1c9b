// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use bloodlink_persistence::{NewStaff, Persistence, StaffData};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use time::Date;
use time::macros::date;

use crate::{
    AddInventoryRequest, AuthenticatedStaff, CreateStaffRequest, RegisterDonorRequest,
    add_inventory,
};

/// The reference "today" used across API tests.
pub const TODAY: Date = date!(2025 - 06 - 01);

/// A password that satisfies the password policy.
pub const STRONG_PASSWORD: &str = "Bl00d!Bank";

pub fn new_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

static FILE_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A `SQLite` file in the temp directory, removed on drop.
///
/// A second connection can alter the schema behind an open `Persistence`
/// to simulate a broken store.
pub struct FileDatabase {
    path: PathBuf,
}

impl FileDatabase {
    pub fn new(label: &str) -> Self {
        let id = FILE_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "bloodlink-api-{label}-{}-{id}.db",
            std::process::id()
        ));
        Self { path }
    }

    pub fn open(&self) -> Persistence {
        Persistence::new_with_file(&self.path).expect("file database")
    }

    pub fn drop_table(&self, table: &str) {
        self.execute(&format!("DROP TABLE {table}"));
    }

    /// Runs raw SQL on a second connection to the same file.
    pub fn execute(&self, sql: &str) {
        let mut conn = SqliteConnection::establish(self.path.to_str().unwrap()).unwrap();
        diesel::sql_query(sql).execute(&mut conn).unwrap();
    }
}

impl Drop for FileDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

/// Creates an admin account directly and returns it with its actor.
pub fn create_test_admin(
    persistence: &mut Persistence,
    username: &str,
) -> (AuthenticatedStaff, StaffData) {
    let staff_id = persistence
        .create_staff(&NewStaff {
            username: Some(username.to_string()),
            secret_code: None,
            full_name: format!("Admin {username}"),
            password: STRONG_PASSWORD.to_string(),
            is_admin: true,
            must_change_password: false,
        })
        .unwrap();
    let staff = persistence.get_staff_by_id(staff_id).unwrap().unwrap();
    (AuthenticatedStaff::from_staff(&staff), staff)
}

/// Creates a non-admin account directly and returns it with its actor.
pub fn create_test_staff(
    persistence: &mut Persistence,
    secret_code: &str,
) -> (AuthenticatedStaff, StaffData) {
    let staff_id = persistence
        .create_staff(&NewStaff {
            username: None,
            secret_code: Some(secret_code.to_string()),
            full_name: String::from("Desk Staff"),
            password: STRONG_PASSWORD.to_string(),
            is_admin: false,
            must_change_password: false,
        })
        .unwrap();
    let staff = persistence.get_staff_by_id(staff_id).unwrap().unwrap();
    (AuthenticatedStaff::from_staff(&staff), staff)
}

pub fn donor_request(contact_number: &str, email: Option<&str>) -> RegisterDonorRequest {
    RegisterDonorRequest {
        first_name: String::from("Ada"),
        last_name: String::from("Lovelace"),
        blood_group: String::from("O-"),
        contact_number: contact_number.to_string(),
        email: email.map(String::from),
        address: None,
        date_of_birth: String::from("1990-12-10"),
    }
}

pub fn staff_request(secret_code: &str) -> CreateStaffRequest {
    CreateStaffRequest {
        username: None,
        secret_code: Some(secret_code.to_string()),
        full_name: String::from("Night Shift"),
        password: STRONG_PASSWORD.to_string(),
        password_confirmation: STRONG_PASSWORD.to_string(),
        is_admin: false,
        must_change_password: true,
    }
}

/// Logs a bank-direct bag and returns its ID.
pub fn add_bank_bag(persistence: &mut Persistence, blood_group: &str, donation_date: &str) -> i64 {
    add_inventory(
        persistence,
        &AddInventoryRequest {
            donor_id: None,
            bank_id: None,
            blood_group: Some(blood_group.to_string()),
            donation_date: donation_date.to_string(),
        },
    )
    .unwrap()
    .bag_id
}
