// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transfusion routes.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use bloodlink_api::{NewRecipientRequest, RecordTransfusionRequest};
use serde::Deserialize;

use super::{Page, non_blank, parse_optional_id, render, today};
use crate::{
    AppState,
    error::{HttpError, form_failure},
    flash::{Flash, redirect_with_flash},
    pages,
    session::SessionStaff,
};

/// Form to record a transfusion.
///
/// Any filled-in `new_*` field means a new recipient, which takes
/// precedence over `recipient_id`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UseBagForm {
    pub recipient_id: String,
    pub new_full_name: String,
    pub new_blood_group: String,
    pub new_hospital: String,
    pub new_contact_number: String,
    pub transfusion_date: String,
}

impl UseBagForm {
    fn new_recipient(&self) -> Option<NewRecipientRequest> {
        let entered: bool = [&self.new_full_name, &self.new_blood_group, &self.new_hospital]
            .iter()
            .any(|value| !value.trim().is_empty());
        entered.then(|| NewRecipientRequest {
            full_name: self.new_full_name.clone(),
            blood_group: self.new_blood_group.clone(),
            hospital: self.new_hospital.clone(),
            contact_number: non_blank(&self.new_contact_number),
        })
    }
}

/// Handler for GET /inventory/use/{bag_id}.
///
/// Shows the bag with the recipients that can receive it.
pub async fn handle_use_bag_page(
    State(app_state): State<AppState>,
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
    Path(bag_id): Path<i64>,
) -> Response {
    let mut persistence = app_state.persistence.lock().await;
    let result = bloodlink_api::use_bag_form(&mut persistence, bag_id, today());
    drop(persistence);

    match result {
        Ok(form) => render(jar, |flash| {
            pages::use_bag_page(&actor, flash, &form, today())
        })
        .into_response(),
        Err(err) => form_failure(jar, "/inventory", err),
    }
}

/// Handler for POST /inventory/use/{bag_id}.
///
/// Records the transfusion and marks the bag used.
pub async fn handle_use_bag(
    State(app_state): State<AppState>,
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
    Path(bag_id): Path<i64>,
    Form(form): Form<UseBagForm>,
) -> Response {
    let back_to: String = format!("/inventory/use/{bag_id}");
    let recipient_id: Option<i64> = match parse_optional_id("recipient_id", &form.recipient_id) {
        Ok(recipient_id) => recipient_id,
        Err(err) => return form_failure(jar, &back_to, err),
    };

    let request: RecordTransfusionRequest = RecordTransfusionRequest {
        bag_id,
        recipient_id,
        new_recipient: form.new_recipient(),
        transfusion_date: non_blank(&form.transfusion_date),
    };

    let mut persistence = app_state.persistence.lock().await;
    let result = bloodlink_api::record_transfusion(&mut persistence, &request, &actor, today());
    drop(persistence);

    match result {
        Ok(recorded) => {
            redirect_with_flash(jar, "/transfusions", &Flash::success(recorded.message))
        }
        Err(err) => form_failure(jar, &back_to, err),
    }
}

/// Handler for GET /recipients.
pub async fn handle_list_recipients(
    State(app_state): State<AppState>,
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
) -> Result<Page, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let recipients = bloodlink_api::list_recipients(&mut persistence)?;
    drop(persistence);

    Ok(render(jar, |flash| {
        pages::recipients_page(&actor, flash, &recipients)
    }))
}

/// Handler for GET /transfusions.
pub async fn handle_list_transfusions(
    State(app_state): State<AppState>,
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
) -> Result<Page, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let transfusions = bloodlink_api::list_transfusions(&mut persistence)?;
    drop(persistence);

    Ok(render(jar, |flash| {
        pages::transfusions_page(&actor, flash, &transfusions)
    }))
}
