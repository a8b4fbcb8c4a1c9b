// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff account and session mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewStaff, StaffUpdate};
use crate::diesel_schema::{sessions, staff};
use crate::error::PersistenceError;

/// Hashes a plain-text password with bcrypt.
fn hash_password(password: &str) -> Result<String, PersistenceError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::PasswordHashFailed(format!("Failed to hash password: {e}")))
}

backend_fn! {
/// Creates a new staff account.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the username or secret
/// code is already taken, or an error if hashing or the insert fails.
pub fn create_staff(conn: &mut _, new_staff: &NewStaff) -> Result<i64, PersistenceError> {
    info!(
        full_name = %new_staff.full_name,
        is_admin = new_staff.is_admin,
        "Creating staff account"
    );

    let password_hash: String = hash_password(&new_staff.password)?;

    diesel::insert_into(staff::table)
        .values((
            staff::username.eq(new_staff.username.as_deref()),
            staff::secret_code.eq(new_staff.secret_code.as_deref()),
            staff::full_name.eq(&new_staff.full_name),
            staff::password_hash.eq(&password_hash),
            staff::is_admin.eq(i32::from(new_staff.is_admin)),
            staff::must_change_password.eq(i32::from(new_staff.must_change_password)),
        ))
        .execute(conn)?;

    let staff_id: i64 = conn.get_last_insert_rowid()?;

    info!(staff_id, "Staff account created");
    Ok(staff_id)
}
}

backend_fn! {
/// Updates a staff account.
///
/// The password hash is replaced only when `update.new_password` is set.
///
/// # Errors
///
/// Returns `PersistenceError::StaffNotFound` if the account does not exist,
/// `PersistenceError::UniqueViolation` on a duplicate login identifier, or
/// an error if the update fails.
pub fn update_staff(
    conn: &mut _,
    staff_id: i64,
    update: &StaffUpdate,
) -> Result<(), PersistenceError> {
    info!(staff_id, "Updating staff account");

    let new_hash: Option<String> = update
        .new_password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let rows_affected: usize = diesel::update(staff::table)
            .filter(staff::staff_id.eq(staff_id))
            .set((
                staff::username.eq(update.username.as_deref()),
                staff::secret_code.eq(update.secret_code.as_deref()),
                staff::full_name.eq(&update.full_name),
                staff::is_admin.eq(i32::from(update.is_admin)),
                staff::must_change_password.eq(i32::from(update.must_change_password)),
            ))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::StaffNotFound(staff_id));
        }

        if let Some(hash) = &new_hash {
            diesel::update(staff::table)
                .filter(staff::staff_id.eq(staff_id))
                .set(staff::password_hash.eq(hash))
                .execute(conn)?;
        }

        Ok(())
    })
}
}

backend_fn! {
/// Stores a new password and clears the forced-change flag.
///
/// # Errors
///
/// Returns `PersistenceError::StaffNotFound` if the account does not exist,
/// or an error if hashing or the update fails.
pub fn update_password(
    conn: &mut _,
    staff_id: i64,
    new_password: &str,
) -> Result<(), PersistenceError> {
    info!("Updating password for staff ID: {}", staff_id);

    let password_hash: String = hash_password(new_password)?;

    let rows_affected: usize = diesel::update(staff::table)
        .filter(staff::staff_id.eq(staff_id))
        .set((
            staff::password_hash.eq(&password_hash),
            staff::must_change_password.eq(0),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::StaffNotFound(staff_id));
    }

    Ok(())
}
}

backend_fn! {
/// Records a successful login.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(conn: &mut _, staff_id: i64) -> Result<(), PersistenceError> {
    debug!("Updating last_login_at for staff ID: {}", staff_id);

    diesel::update(staff::table)
        .filter(staff::staff_id.eq(staff_id))
        .set(staff::last_login_at.eq(diesel::dsl::sql::<
            diesel::sql_types::Nullable<diesel::sql_types::Text>,
        >("CURRENT_TIMESTAMP")))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Deletes a staff account and all of its sessions.
///
/// Transfusions the account recorded keep their rows with `recorded_by`
/// cleared.
///
/// # Errors
///
/// Returns `PersistenceError::StaffNotFound` if the account does not exist,
/// or an error if the delete fails.
pub fn delete_staff(conn: &mut _, staff_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting staff ID: {}", staff_id);

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(sessions::table)
            .filter(sessions::staff_id.eq(staff_id))
            .execute(conn)?;

        let rows_affected: usize = diesel::delete(staff::table)
            .filter(staff::staff_id.eq(staff_id))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::StaffNotFound(staff_id));
        }

        Ok(())
    })
}
}

backend_fn! {
/// Deletes every account with `username` and inserts `new_staff` in one
/// transaction.
///
/// Returns the number of accounts removed and the new staff ID. Sessions of
/// the removed accounts cascade with them. On any failure the existing
/// accounts are left untouched.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the new login identifier
/// belongs to another account, or an error if hashing or a write fails.
pub fn replace_staff_by_username(
    conn: &mut _,
    username: &str,
    new_staff: &NewStaff,
) -> Result<(usize, i64), PersistenceError> {
    let password_hash: String = hash_password(&new_staff.password)?;

    let (removed, staff_id) = conn.transaction::<_, PersistenceError, _>(|conn| {
        let removed: usize = diesel::delete(staff::table)
            .filter(staff::username.eq(username))
            .execute(conn)?;

        diesel::insert_into(staff::table)
            .values((
                staff::username.eq(new_staff.username.as_deref()),
                staff::secret_code.eq(new_staff.secret_code.as_deref()),
                staff::full_name.eq(&new_staff.full_name),
                staff::password_hash.eq(&password_hash),
                staff::is_admin.eq(i32::from(new_staff.is_admin)),
                staff::must_change_password.eq(i32::from(new_staff.must_change_password)),
            ))
            .execute(conn)?;

        let staff_id: i64 = conn.get_last_insert_rowid()?;
        Ok((removed, staff_id))
    })?;

    info!(username, removed, staff_id, "Replaced staff account");
    Ok((removed, staff_id))
}
}

backend_fn! {
/// Creates a new session for a staff account.
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut _,
    session_token: &str,
    staff_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(
        "Creating session for staff ID: {} with expiration: {}",
        staff_id, expires_at
    );

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::staff_id.eq(staff_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = conn.get_last_insert_rowid()?;

    debug!(session_id, staff_id, "Session created");
    Ok(session_id)
}
}

backend_fn! {
/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(conn: &mut _, session_id: i64) -> Result<(), PersistenceError> {
    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(
            sessions::last_activity_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        )
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Deletes a session by token.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut _, session_token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Deletes all sessions that expired before `now`.
///
/// `now` must use the same RFC 3339 format as stored expiry timestamps.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut _, now: &str) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(now))
        .execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}
}

backend_fn! {
/// Deletes all sessions for a staff account.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_sessions_for_staff(conn: &mut _, staff_id: i64) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::staff_id.eq(staff_id))
        .execute(conn)?;

    info!(
        "Deleted {} sessions for staff ID: {}",
        rows_affected, staff_id
    );
    Ok(rows_affected)
}
}
