// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login, logout and the profile page.

use axum::{
    Form,
    extract::State,
    response::Response,
};
use axum_extra::extract::PrivateCookieJar;
use bloodlink_api::{
    AdminLoginRequest, ApiError, ChangePasswordRequest, LoginResponse, PROFILE_PATH,
    StaffLoginRequest,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::{Page, render};
use crate::{
    AppState,
    error::form_failure,
    flash::{Flash, redirect_with_flash},
    pages,
    session::{CurrentStaff, LOGIN_PATH, clear_session_cookie, session_cookie, session_token},
};

const ADMIN_LOGIN_PATH: &str = "/admin/login";

/// Staff login form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StaffLoginForm {
    pub secret_code: String,
    pub password: String,
}

/// Admin login form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdminLoginForm {
    pub username: String,
    pub password: String,
}

/// Change-password form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// Stores the session cookie and sends the account to its landing page.
fn complete_login(jar: PrivateCookieJar, login: LoginResponse) -> Response {
    let flash: Flash = if login.must_change_password {
        Flash::info("Please choose a new password before continuing.")
    } else {
        Flash::success(format!("Welcome, {}!", login.full_name))
    };
    let jar: PrivateCookieJar = jar.add(session_cookie(login.session_token));
    redirect_with_flash(jar, &login.redirect_to, &flash)
}

fn login_failure(jar: PrivateCookieJar, back_to: &str, message: &str, err: ApiError) -> Response {
    if matches!(err, ApiError::AuthenticationFailed { .. }) {
        return redirect_with_flash(jar, back_to, &Flash::danger(message));
    }
    form_failure(jar, back_to, err)
}

/// Handler for GET /login.
pub async fn handle_login_page(jar: PrivateCookieJar) -> Page {
    render(jar, pages::login_page)
}

/// Handler for POST /login.
///
/// Authenticates non-admin staff by secret code.
pub async fn handle_login(
    State(app_state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<StaffLoginForm>,
) -> Response {
    let request: StaffLoginRequest = StaffLoginRequest {
        secret_code: form.secret_code,
        password: form.password,
    };

    let mut persistence = app_state.persistence.lock().await;
    let result = bloodlink_api::login_staff(&mut persistence, &request);
    drop(persistence);

    match result {
        Ok(login) => complete_login(jar, login),
        Err(err) => login_failure(jar, LOGIN_PATH, "Invalid secret code or password.", err),
    }
}

/// Handler for GET /admin/login.
pub async fn handle_admin_login_page(jar: PrivateCookieJar) -> Page {
    render(jar, pages::admin_login_page)
}

/// Handler for POST /admin/login.
///
/// Authenticates administrators by username.
pub async fn handle_admin_login(
    State(app_state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<AdminLoginForm>,
) -> Response {
    let request: AdminLoginRequest = AdminLoginRequest {
        username: form.username,
        password: form.password,
    };

    let mut persistence = app_state.persistence.lock().await;
    let result = bloodlink_api::login_admin(&mut persistence, &request);
    drop(persistence);

    match result {
        Ok(login) => complete_login(jar, login),
        Err(err) => login_failure(jar, ADMIN_LOGIN_PATH, "Invalid username or password.", err),
    }
}

/// Handler for GET /logout.
///
/// Deletes the server-side session, if any, and clears the cookie.
pub async fn handle_logout(State(app_state): State<AppState>, jar: PrivateCookieJar) -> Response {
    if let Some(token) = session_token(&jar) {
        let mut persistence = app_state.persistence.lock().await;
        if let Err(e) = bloodlink_api::logout(&mut persistence, &token) {
            warn!(error = %e, "Failed to delete session on logout");
        }
        drop(persistence);
        info!("Logged out");
    }

    let jar: PrivateCookieJar = jar.remove(clear_session_cookie());
    redirect_with_flash(jar, LOGIN_PATH, &Flash::info("You have been logged out."))
}

/// Handler for GET /profile.
pub async fn handle_profile_page(
    CurrentStaff(actor, staff): CurrentStaff,
    jar: PrivateCookieJar,
) -> Page {
    render(jar, |flash| pages::profile_page(&actor, &staff, flash))
}

/// Handler for POST /profile.
///
/// Changes the caller's own password.
pub async fn handle_change_password(
    State(app_state): State<AppState>,
    CurrentStaff(_actor, staff): CurrentStaff,
    jar: PrivateCookieJar,
    Form(form): Form<ChangePasswordForm>,
) -> Response {
    let request: ChangePasswordRequest = ChangePasswordRequest {
        current_password: form.current_password,
        new_password: form.new_password,
        new_password_confirmation: form.new_password_confirmation,
    };

    let mut persistence = app_state.persistence.lock().await;
    let result = bloodlink_api::change_password(&mut persistence, &request, &staff);
    drop(persistence);

    match result {
        Ok(changed) => {
            redirect_with_flash(jar, &changed.redirect_to, &Flash::success(changed.message))
        }
        Err(err) => form_failure(jar, PROFILE_PATH, err),
    }
}
