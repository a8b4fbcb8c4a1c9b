// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the BloodLink blood bank system.
//!
//! Server-rendered HTML over axum. Sessions live in the database; the
//! browser holds only an encrypted cookie carrying the session token.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod pages;
pub mod session;
pub mod state;
pub mod templates;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{get, post},
};

pub use config::{Config, ConfigError, DatabaseArgs};
pub use state::{AppState, cookie_key};

use handlers::{auth, donors, health, inventory, reports, staff, transfusions};

/// Builds the application router with all endpoints.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/login",
            get(auth::handle_login_page).post(auth::handle_login),
        )
        .route(
            "/admin/login",
            get(auth::handle_admin_login_page).post(auth::handle_admin_login),
        )
        .route("/logout", get(auth::handle_logout))
        .route(
            "/profile",
            get(auth::handle_profile_page).post(auth::handle_change_password),
        )
        .route("/admin/users", get(staff::handle_list_staff))
        .route("/admin/users/add", post(staff::handle_create_staff))
        .route(
            "/admin/users/edit/{id}",
            get(staff::handle_edit_staff_page).post(staff::handle_update_staff),
        )
        .route("/admin/users/delete/{id}", post(staff::handle_delete_staff))
        .route("/", get(reports::handle_dashboard))
        .route("/reports", get(reports::handle_reports))
        .route("/donors", get(donors::handle_list_donors))
        .route("/donor/{id}", get(donors::handle_get_donor))
        .route(
            "/add_donor",
            get(donors::handle_add_donor_page).post(donors::handle_add_donor),
        )
        .route(
            "/inventory/add",
            get(inventory::handle_add_inventory_page).post(inventory::handle_add_inventory),
        )
        .route(
            "/add_inventory",
            get(inventory::handle_add_inventory_page).post(inventory::handle_add_inventory),
        )
        .route("/inventory", get(inventory::handle_list_inventory))
        .route(
            "/inventory/edit/{bag_id}",
            get(inventory::handle_edit_bag_page).post(inventory::handle_edit_bag),
        )
        .route(
            "/inventory/delete/{bag_id}",
            post(inventory::handle_delete_bag),
        )
        .route(
            "/inventory/use/{bag_id}",
            get(transfusions::handle_use_bag_page).post(transfusions::handle_use_bag),
        )
        .route("/recipients", get(transfusions::handle_list_recipients))
        .route("/transfusions", get(transfusions::handle_list_transfusions))
        .route("/health", get(health::handle_health))
        .with_state(app_state)
}
