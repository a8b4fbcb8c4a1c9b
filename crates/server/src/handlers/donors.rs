// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donor registry routes.

use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use bloodlink_api::RegisterDonorRequest;
use serde::Deserialize;
use tracing::info;

use super::{Page, non_blank, render, today};
use crate::{
    AppState,
    error::{HttpError, form_failure},
    flash::Flash,
    pages,
    session::SessionStaff,
};

/// Donor registration form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DonorForm {
    pub first_name: String,
    pub last_name: String,
    pub blood_group: String,
    pub contact_number: String,
    pub email: String,
    pub address: String,
    pub date_of_birth: String,
}

/// Handler for GET /donors.
pub async fn handle_list_donors(
    State(app_state): State<AppState>,
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
) -> Result<Page, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let donors = bloodlink_api::list_donors(&mut persistence)?;
    drop(persistence);

    Ok(render(jar, |flash| pages::donors_page(&actor, flash, &donors)))
}

/// Handler for GET /donor/{id}.
pub async fn handle_get_donor(
    State(app_state): State<AppState>,
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
    Path(donor_id): Path<i64>,
) -> Result<Page, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail = bloodlink_api::get_donor(&mut persistence, donor_id, today())?;
    drop(persistence);

    Ok(render(jar, |flash| {
        pages::donor_detail_page(&actor, flash, &detail)
    }))
}

/// Handler for GET /add_donor.
pub async fn handle_add_donor_page(
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
) -> Page {
    render(jar, |flash| pages::add_donor_page(&actor, flash))
}

/// Handler for POST /add_donor.
///
/// Registers the donor and shows the assigned donor code.
pub async fn handle_add_donor(
    State(app_state): State<AppState>,
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
    Form(form): Form<DonorForm>,
) -> Response {
    let request: RegisterDonorRequest = RegisterDonorRequest {
        first_name: form.first_name,
        last_name: form.last_name,
        blood_group: form.blood_group,
        contact_number: form.contact_number,
        email: non_blank(&form.email),
        address: non_blank(&form.address),
        date_of_birth: form.date_of_birth,
    };

    let mut persistence = app_state.persistence.lock().await;
    let result = bloodlink_api::register_donor(&mut persistence, &request);
    drop(persistence);

    match result {
        Ok(registered) => {
            info!(
                donor_id = registered.donor_id,
                donor_code = %registered.donor_code,
                staff_id = actor.staff_id,
                "Donor registered"
            );
            let flash: Flash = Flash::success(registered.message.clone());
            let body: String = pages::donor_success_page(&actor, Some(&flash), &registered);
            (jar, Html(body)).into_response()
        }
        Err(err) => form_failure(jar, "/add_donor", err),
    }
}
