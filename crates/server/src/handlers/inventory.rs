// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory ledger routes.

use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use bloodlink_api::{
    AddInventoryRequest, ApiError, InventoryFilter, ListInventoryResponse, UpdateInventoryRequest,
};
use serde::Deserialize;

use super::{Page, non_blank, parse_optional_id, render, today};
use crate::{
    AppState,
    error::{HttpError, form_failure},
    flash::{Flash, redirect_with_flash},
    pages,
    session::{AdminStaff, SessionStaff},
};

const INVENTORY_PATH: &str = "/inventory";
const ADD_INVENTORY_PATH: &str = "/inventory/add";

/// Form to log a bag.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddBagForm {
    pub donor_id: String,
    pub bank_id: String,
    pub blood_group: String,
    pub donation_date: String,
}

/// Form to edit a bag.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditBagForm {
    pub blood_group: String,
    pub bank_id: String,
    pub donation_date: String,
}

/// Inventory filter query.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InventoryQuery {
    pub blood_group: Option<String>,
    pub bank_id: Option<String>,
}

/// Handler for GET /inventory.
///
/// Lists bags by ascending expiry, optionally filtered.
pub async fn handle_list_inventory(
    State(app_state): State<AppState>,
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
    Query(query): Query<InventoryQuery>,
) -> Response {
    let raw_bank_id: &str = query.bank_id.as_deref().unwrap_or_default();
    let bank_id: Option<i64> = match parse_optional_id("bank_id", raw_bank_id) {
        Ok(bank_id) => bank_id,
        Err(err) => return form_failure(jar, INVENTORY_PATH, err),
    };
    let filter: InventoryFilter = InventoryFilter {
        blood_group: query.blood_group,
        bank_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<ListInventoryResponse, ApiError> =
        bloodlink_api::list_inventory(&mut persistence, &filter, today());
    drop(persistence);

    match result {
        Ok(inventory) => {
            render(jar, |flash| pages::inventory_page(&actor, flash, &inventory)).into_response()
        }
        Err(err) => form_failure(jar, INVENTORY_PATH, err),
    }
}

/// Handler for GET /inventory/add and /add_inventory.
pub async fn handle_add_inventory_page(
    State(app_state): State<AppState>,
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
) -> Result<Page, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let donors = bloodlink_api::list_donors(&mut persistence)?;
    let banks = bloodlink_api::list_banks(&mut persistence)?;
    drop(persistence);

    Ok(render(jar, |flash| {
        pages::add_inventory_page(&actor, flash, &donors.donors, &banks, today())
    }))
}

/// Handler for POST /inventory/add and /add_inventory.
///
/// Logs a donor-linked or bank-direct bag.
pub async fn handle_add_inventory(
    State(app_state): State<AppState>,
    SessionStaff(_actor): SessionStaff,
    jar: PrivateCookieJar,
    Form(form): Form<AddBagForm>,
) -> Response {
    let (donor_id, bank_id) = match (
        parse_optional_id("donor_id", &form.donor_id),
        parse_optional_id("bank_id", &form.bank_id),
    ) {
        (Ok(donor_id), Ok(bank_id)) => (donor_id, bank_id),
        (Err(err), _) | (_, Err(err)) => return form_failure(jar, ADD_INVENTORY_PATH, err),
    };

    let request: AddInventoryRequest = AddInventoryRequest {
        donor_id,
        bank_id,
        blood_group: non_blank(&form.blood_group),
        donation_date: form.donation_date,
    };

    let mut persistence = app_state.persistence.lock().await;
    let result = bloodlink_api::add_inventory(&mut persistence, &request);
    drop(persistence);

    match result {
        Ok(added) => redirect_with_flash(jar, INVENTORY_PATH, &Flash::success(added.message)),
        Err(err) => form_failure(jar, ADD_INVENTORY_PATH, err),
    }
}

/// Handler for GET /inventory/edit/{bag_id}.
pub async fn handle_edit_bag_page(
    State(app_state): State<AppState>,
    AdminStaff(actor): AdminStaff,
    jar: PrivateCookieJar,
    Path(bag_id): Path<i64>,
) -> Result<Page, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bag = bloodlink_api::get_bag(&mut persistence, bag_id, today())?;
    let banks = bloodlink_api::list_banks(&mut persistence)?;
    drop(persistence);

    Ok(render(jar, |flash| {
        pages::edit_bag_page(&actor, flash, &bag, &banks)
    }))
}

/// Handler for POST /inventory/edit/{bag_id}.
///
/// Overwrites blood group, bank and donation date; expiry is recomputed.
pub async fn handle_edit_bag(
    State(app_state): State<AppState>,
    AdminStaff(actor): AdminStaff,
    jar: PrivateCookieJar,
    Path(bag_id): Path<i64>,
    Form(form): Form<EditBagForm>,
) -> Response {
    let back_to: String = format!("/inventory/edit/{bag_id}");
    let bank_id: Option<i64> = match parse_optional_id("bank_id", &form.bank_id) {
        Ok(bank_id) => bank_id,
        Err(err) => return form_failure(jar, &back_to, err),
    };

    let request: UpdateInventoryRequest = UpdateInventoryRequest {
        bag_id,
        blood_group: form.blood_group,
        bank_id,
        donation_date: form.donation_date,
    };

    let mut persistence = app_state.persistence.lock().await;
    let result = bloodlink_api::update_inventory(&mut persistence, &request, &actor);
    drop(persistence);

    match result {
        Ok(updated) => redirect_with_flash(jar, INVENTORY_PATH, &Flash::success(updated.message)),
        Err(err) => form_failure(jar, &back_to, err),
    }
}

/// Handler for POST /inventory/delete/{bag_id}.
pub async fn handle_delete_bag(
    State(app_state): State<AppState>,
    AdminStaff(actor): AdminStaff,
    jar: PrivateCookieJar,
    Path(bag_id): Path<i64>,
) -> Response {
    let mut persistence = app_state.persistence.lock().await;
    let result = bloodlink_api::delete_inventory(&mut persistence, bag_id, &actor);
    drop(persistence);

    match result {
        Ok(deleted) => redirect_with_flash(jar, INVENTORY_PATH, &Flash::success(deleted.message)),
        Err(err) => form_failure(jar, INVENTORY_PATH, err),
    }
}
