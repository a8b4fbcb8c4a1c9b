// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction and the authentication gate.
//!
//! The browser holds only the session token, inside an encrypted cookie.
//! These extractors validate it against the session store and enforce the
//! forced-password-change gate and admin-only access.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use bloodlink_api::{ApiError, AuthError, AuthenticatedStaff, AuthenticationService, PROFILE_PATH};
use bloodlink_persistence::StaffData;
use time::Duration;
use tracing::{debug, warn};

use crate::{
    AppState,
    error::HttpError,
    flash::{Flash, redirect_with_flash},
};

/// Cookie holding the session token.
pub const SESSION_COOKIE: &str = "bloodlink_session";

/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/login";

/// Builds the session cookie for a freshly issued token.
#[must_use]
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(30))
        .build()
}

/// Builds the removal cookie for the session.
#[must_use]
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Reads the session token from the jar.
#[must_use]
pub fn session_token(jar: &PrivateCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Extractor for any logged-in account, without the password gate.
///
/// Only the profile page uses this directly; it is where the gate sends
/// accounts that must change their password.
pub struct CurrentStaff(pub AuthenticatedStaff, pub StaffData);

/// Extractor for logged-in accounts that have cleared the password gate.
///
/// # Errors
///
/// Redirects to `/login` without a valid session, and to `/profile` while
/// a password change is pending.
pub struct SessionStaff(pub AuthenticatedStaff);

/// Extractor for administrators.
///
/// # Errors
///
/// As [`SessionStaff`], and redirects non-admins to the dashboard with a
/// danger flash.
pub struct AdminStaff(pub AuthenticatedStaff);

impl FromRequestParts<AppState> for CurrentStaff {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar: PrivateCookieJar =
            PrivateCookieJar::from_headers(&parts.headers, state.key.clone());

        let Some(token) = session_token(&jar) else {
            debug!(path = %parts.uri.path(), "No session cookie");
            return Err(SessionRejection::LoginRequired(jar));
        };

        let mut persistence = state.persistence.lock().await;
        let validated = AuthenticationService::validate_session(&mut persistence, &token);
        drop(persistence);

        let (actor, staff) = match validated {
            Ok(validated) => validated,
            Err(err @ AuthError::Internal { .. }) => {
                return Err(SessionRejection::Unavailable(HttpError::from(
                    ApiError::from(err),
                )));
            }
            Err(e) => {
                warn!(error = %e, "Session validation failed");
                return Err(SessionRejection::LoginRequired(
                    jar.remove(clear_session_cookie()),
                ));
            }
        };

        debug!(staff_id = actor.staff_id, role = ?actor.role, "Session validated");
        Ok(Self(actor, staff))
    }
}

impl FromRequestParts<AppState> for SessionStaff {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentStaff(actor, _staff) = CurrentStaff::from_request_parts(parts, state).await?;

        if actor.must_change_password {
            debug!(staff_id = actor.staff_id, "Password change pending");
            return Err(SessionRejection::PasswordChangeRequired);
        }

        Ok(Self(actor))
    }
}

impl FromRequestParts<AppState> for AdminStaff {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionStaff(actor) = SessionStaff::from_request_parts(parts, state).await?;

        if !actor.is_admin() {
            warn!(
                staff_id = actor.staff_id,
                path = %parts.uri.path(),
                "Non-admin denied access to admin route"
            );
            let jar: PrivateCookieJar =
                PrivateCookieJar::from_headers(&parts.headers, state.key.clone());
            return Err(SessionRejection::AdminRequired(jar));
        }

        Ok(Self(actor))
    }
}

/// Session extraction failures, each rendered as a redirect.
pub enum SessionRejection {
    /// No valid session; go to the login page.
    LoginRequired(PrivateCookieJar),
    /// The account must change its password first.
    PasswordChangeRequired,
    /// The route is for administrators only.
    AdminRequired(PrivateCookieJar),
    /// The session store could not be read; the cookie is kept.
    Unavailable(HttpError),
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        match self {
            Self::LoginRequired(jar) => redirect_with_flash(
                jar,
                LOGIN_PATH,
                &Flash::info("Please log in to access this page."),
            ),
            Self::PasswordChangeRequired => Redirect::to(PROFILE_PATH).into_response(),
            Self::AdminRequired(jar) => redirect_with_flash(
                jar,
                "/",
                &Flash::danger("Access denied: administrators only."),
            ),
            Self::Unavailable(err) => err.into_response(),
        }
    }
}
