// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff account and session queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use tracing::debug;

use crate::data_models::{SessionData, StaffData};
use crate::diesel_schema::{sessions, staff};
use crate::error::PersistenceError;

/// Diesel Queryable struct for staff rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = staff)]
pub(crate) struct StaffRow {
    staff_id: i64,
    username: Option<String>,
    secret_code: Option<String>,
    full_name: String,
    password_hash: String,
    is_admin: i32,
    must_change_password: i32,
    created_at: String,
    last_login_at: Option<String>,
}

impl From<StaffRow> for StaffData {
    fn from(row: StaffRow) -> Self {
        Self {
            staff_id: row.staff_id,
            username: row.username,
            secret_code: row.secret_code,
            full_name: row.full_name,
            password_hash: row.password_hash,
            is_admin: row.is_admin != 0,
            must_change_password: row.must_change_password != 0,
            created_at: row.created_at,
            last_login_at: row.last_login_at,
        }
    }
}

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    staff_id: i64,
    created_at: String,
    last_activity_at: String,
    expires_at: String,
}

backend_fn! {
/// Retrieves a staff account by username.
///
/// Returns `Ok(None)` if no account has that username.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_staff_by_username(
    conn: &mut _,
    username: &str,
) -> Result<Option<StaffData>, PersistenceError> {
    debug!("Looking up staff by username: {}", username);

    let row: Option<StaffRow> = staff::table
        .filter(staff::username.eq(username))
        .select(StaffRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(StaffData::from))
}
}

backend_fn! {
/// Retrieves a staff account by secret code.
///
/// Returns `Ok(None)` if no account has that code.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_staff_by_secret_code(
    conn: &mut _,
    secret_code: &str,
) -> Result<Option<StaffData>, PersistenceError> {
    debug!("Looking up staff by secret code");

    let row: Option<StaffRow> = staff::table
        .filter(staff::secret_code.eq(secret_code))
        .select(StaffRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(StaffData::from))
}
}

backend_fn! {
/// Retrieves a staff account by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account is not found.
pub fn get_staff_by_id(conn: &mut _, staff_id: i64) -> Result<Option<StaffData>, PersistenceError> {
    debug!("Looking up staff by ID: {}", staff_id);

    let row: Option<StaffRow> = staff::table
        .filter(staff::staff_id.eq(staff_id))
        .select(StaffRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(StaffData::from))
}
}

backend_fn! {
/// Lists all staff accounts, admins first, then by full name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_staff(conn: &mut _) -> Result<Vec<StaffData>, PersistenceError> {
    debug!("Listing all staff accounts");

    let rows: Vec<StaffRow> = staff::table
        .select(StaffRow::as_select())
        .order_by((staff::is_admin.desc(), staff::full_name.asc()))
        .load(conn)?;

    Ok(rows.into_iter().map(StaffData::from).collect())
}
}

backend_fn! {
/// Counts admin accounts.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_admins(conn: &mut _) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    let count: i64 = staff::table
        .filter(staff::is_admin.eq(1))
        .select(count(staff::staff_id))
        .first(conn)?;

    debug!("Admin accounts: {}", count);
    Ok(count)
}
}

backend_fn! {
/// Retrieves a session by token.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut _,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let row: Option<SessionRow> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|row| SessionData {
        session_id: row.session_id,
        session_token: row.session_token,
        staff_id: row.staff_id,
        created_at: row.created_at,
        last_activity_at: row.last_activity_at,
        expires_at: row.expires_at,
    }))
}
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash).map_err(|e| {
        PersistenceError::PasswordHashFailed(format!("Failed to verify password: {e}"))
    })
}
