// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use bloodlink_persistence::{Persistence, PersistenceError, SessionData, StaffData};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// Path every account lands on while a password change is pending.
pub const PROFILE_PATH: &str = "/profile";

/// Staff roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Administrators manage staff accounts and may edit or delete inventory.
    Admin,
    /// Donor staff register donors, log inventory, record transfusions and
    /// view reports.
    Staff,
}

impl Role {
    #[must_use]
    pub const fn from_is_admin(is_admin: bool) -> Self {
        if is_admin { Self::Admin } else { Self::Staff }
    }
}

/// An authenticated staff member with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedStaff {
    /// The staff account identifier.
    pub staff_id: i64,
    /// The full name shown in the page header.
    pub full_name: String,
    /// The role assigned to this account.
    pub role: Role,
    /// Whether the account must change its password before doing anything else.
    pub must_change_password: bool,
}

impl AuthenticatedStaff {
    #[must_use]
    pub fn from_staff(staff: &StaffData) -> Self {
        Self {
            staff_id: staff.staff_id,
            full_name: staff.full_name.clone(),
            role: Role::from_is_admin(staff.is_admin),
            must_change_password: staff.must_change_password,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Where this account is sent after logging in.
    ///
    /// A pending password change wins over the role-based landing page.
    #[must_use]
    pub fn landing_path(&self) -> &'static str {
        if self.must_change_password {
            PROFILE_PATH
        } else if self.is_admin() {
            "/admin/users"
        } else {
            "/"
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedStaff, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Staff => {
                warn!(
                    staff_id = actor.staff_id,
                    action, "Rejected non-admin request"
                );
                Err(AuthError::Unauthorized {
                    action: action.to_string(),
                    required_role: String::from("Admin"),
                })
            }
        }
    }

    /// Checks if an actor may list, create, edit or delete staff accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_staff(actor: &AuthenticatedStaff) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_staff")
    }

    /// Checks if an actor may edit an inventory bag.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_update_inventory(actor: &AuthenticatedStaff) -> Result<(), AuthError> {
        Self::require_admin(actor, "update_inventory")
    }

    /// Checks if an actor may delete an inventory bag.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_delete_inventory(actor: &AuthenticatedStaff) -> Result<(), AuthError> {
        Self::require_admin(actor, "delete_inventory")
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Session lifetime (30 days).
    const SESSION_LIFETIME: Duration = Duration::days(30);

    /// Authenticates an administrator by username and password.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_staff`, `staff_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the account is unknown, is not an admin, or the
    /// password does not match.
    pub fn login_admin(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedStaff, StaffData), AuthError> {
        let staff: Option<StaffData> = persistence
            .get_staff_by_username(username.trim())
            .map_err(Self::map_persistence_error)?;

        let staff: StaffData = match staff {
            Some(staff) if staff.is_admin => staff,
            _ => {
                warn!(username, "Admin login rejected: unknown account");
                return Err(Self::invalid_credentials());
            }
        };

        Self::complete_login(persistence, staff, password)
    }

    /// Authenticates non-admin staff by secret code and password.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_staff`, `staff_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the secret code is unknown, belongs to an admin,
    /// or the password does not match.
    pub fn login_staff(
        persistence: &mut Persistence,
        secret_code: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedStaff, StaffData), AuthError> {
        let staff: Option<StaffData> = persistence
            .get_staff_by_secret_code(secret_code.trim())
            .map_err(Self::map_persistence_error)?;

        let staff: StaffData = match staff {
            Some(staff) if !staff.is_admin => staff,
            _ => {
                warn!("Staff login rejected: unknown secret code");
                return Err(Self::invalid_credentials());
            }
        };

        Self::complete_login(persistence, staff, password)
    }

    fn complete_login(
        persistence: &mut Persistence,
        staff: StaffData,
        password: &str,
    ) -> Result<(String, AuthenticatedStaff, StaffData), AuthError> {
        let password_valid: bool = Persistence::verify_password(password, &staff.password_hash)
            .map_err(Self::map_persistence_error)?;

        if !password_valid {
            warn!(staff_id = staff.staff_id, "Login rejected: wrong password");
            return Err(Self::invalid_credentials());
        }

        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime = OffsetDateTime::now_utc() + Self::SESSION_LIFETIME;
        let expires_at_str: String = expires_at
            .format(&Rfc3339)
            .map_err(|e| AuthError::Internal {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, staff.staff_id, &expires_at_str)
            .map_err(|e| AuthError::Internal {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(staff.staff_id)
            .map_err(|e| AuthError::Internal {
                reason: format!("Failed to update last login: {e}"),
            })?;

        info!(staff_id = staff.staff_id, "Staff logged in");

        let authenticated: AuthenticatedStaff = AuthenticatedStaff::from_staff(&staff);
        Ok((session_token, authenticated, staff))
    }

    /// Validates a session token and returns the authenticated staff member.
    ///
    /// Refreshes the session's last activity timestamp. An expired session
    /// is deleted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the session is unknown or
    /// expired, or the account no longer exists, and `AuthError::Internal`
    /// if the store cannot be read.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedStaff, StaffData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Rfc3339)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            debug!(session_id = session.session_id, "Session expired");
            persistence
                .delete_session(session_token)
                .map_err(Self::map_persistence_error)?;
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let staff: StaffData = persistence
            .get_staff_by_id(session.staff_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Staff account not found"),
            })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok((AuthenticatedStaff::from_staff(&staff), staff))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::Internal {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Deletes sessions whose expiry has passed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn purge_expired_sessions(persistence: &mut Persistence) -> Result<usize, AuthError> {
        let now: String = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| AuthError::Internal {
                reason: format!("Failed to format current time: {e}"),
            })?;

        persistence
            .delete_expired_sessions(&now)
            .map_err(Self::map_persistence_error)
    }

    /// Generates an unguessable session token.
    fn generate_session_token() -> String {
        format!(
            "{:016x}{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid credentials"),
        }
    }

    /// Maps storage failures to `AuthError::Internal`.
    ///
    /// Lookups that find nothing return `Ok(None)` and never reach here.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::Internal {
            reason: format!("Database error: {err}"),
        }
    }
}
