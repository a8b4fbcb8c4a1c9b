// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff administration routes (admin only).

use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use axum_extra::extract::PrivateCookieJar;
use bloodlink_api::{CreateStaffRequest, DeleteStaffRequest, UpdateStaffRequest};
use serde::Deserialize;

use super::{Page, non_blank, render};
use crate::{
    AppState,
    error::{HttpError, form_failure},
    flash::{Flash, redirect_with_flash},
    pages,
    session::AdminStaff,
};

const USERS_PATH: &str = "/admin/users";

/// Form to create a staff account.
///
/// Checkboxes are present only when ticked.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateStaffForm {
    pub full_name: String,
    pub username: String,
    pub secret_code: String,
    pub password: String,
    pub password_confirmation: String,
    pub is_admin: Option<String>,
    pub must_change_password: Option<String>,
}

/// Form to edit a staff account.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditStaffForm {
    pub full_name: String,
    pub username: String,
    pub secret_code: String,
    pub is_admin: Option<String>,
    pub must_change_password: Option<String>,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// Handler for GET /admin/users.
pub async fn handle_list_staff(
    State(app_state): State<AppState>,
    AdminStaff(actor): AdminStaff,
    jar: PrivateCookieJar,
) -> Result<Page, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let staff = bloodlink_api::list_staff(&mut persistence, &actor)?;
    drop(persistence);

    Ok(render(jar, |flash| pages::users_page(&actor, flash, &staff)))
}

/// Handler for POST /admin/users/add.
pub async fn handle_create_staff(
    State(app_state): State<AppState>,
    AdminStaff(actor): AdminStaff,
    jar: PrivateCookieJar,
    Form(form): Form<CreateStaffForm>,
) -> Response {
    let request: CreateStaffRequest = CreateStaffRequest {
        username: non_blank(&form.username),
        secret_code: non_blank(&form.secret_code),
        full_name: form.full_name,
        password: form.password,
        password_confirmation: form.password_confirmation,
        is_admin: form.is_admin.is_some(),
        must_change_password: form.must_change_password.is_some(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let result = bloodlink_api::create_staff(&mut persistence, &request, &actor);
    drop(persistence);

    match result {
        Ok(created) => redirect_with_flash(jar, USERS_PATH, &Flash::success(created.message)),
        Err(err) => form_failure(jar, USERS_PATH, err),
    }
}

/// Handler for GET /admin/users/edit/{id}.
pub async fn handle_edit_staff_page(
    State(app_state): State<AppState>,
    AdminStaff(actor): AdminStaff,
    jar: PrivateCookieJar,
    Path(staff_id): Path<i64>,
) -> Result<Page, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let staff = bloodlink_api::get_staff(&mut persistence, staff_id, &actor)?;
    drop(persistence);

    Ok(render(jar, |flash| {
        pages::edit_user_page(&actor, flash, &staff)
    }))
}

/// Handler for POST /admin/users/edit/{id}.
///
/// A blank new password keeps the current one.
pub async fn handle_update_staff(
    State(app_state): State<AppState>,
    AdminStaff(actor): AdminStaff,
    jar: PrivateCookieJar,
    Path(staff_id): Path<i64>,
    Form(form): Form<EditStaffForm>,
) -> Response {
    let request: UpdateStaffRequest = UpdateStaffRequest {
        staff_id,
        username: non_blank(&form.username),
        secret_code: non_blank(&form.secret_code),
        full_name: form.full_name,
        is_admin: form.is_admin.is_some(),
        must_change_password: form.must_change_password.is_some(),
        new_password: Some(form.new_password),
        new_password_confirmation: Some(form.new_password_confirmation),
    };

    let mut persistence = app_state.persistence.lock().await;
    let result = bloodlink_api::update_staff(&mut persistence, &request, &actor);
    drop(persistence);

    match result {
        Ok(updated) => redirect_with_flash(jar, USERS_PATH, &Flash::success(updated.message)),
        Err(err) => form_failure(jar, &format!("/admin/users/edit/{staff_id}"), err),
    }
}

/// Handler for POST /admin/users/delete/{id}.
///
/// The acting admin's own account and the last admin cannot be deleted.
pub async fn handle_delete_staff(
    State(app_state): State<AppState>,
    AdminStaff(actor): AdminStaff,
    jar: PrivateCookieJar,
    Path(staff_id): Path<i64>,
) -> Response {
    let mut persistence = app_state.persistence.lock().await;
    let result =
        bloodlink_api::delete_staff(&mut persistence, DeleteStaffRequest { staff_id }, &actor);
    drop(persistence);

    match result {
        Ok(deleted) => redirect_with_flash(jar, USERS_PATH, &Flash::success(deleted.message)),
        Err(err) => form_failure(jar, USERS_PATH, err),
    }
}
