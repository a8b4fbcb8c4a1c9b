// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the BloodLink blood bank system.
//!
//! Handlers here validate raw form input, enforce authorization, call the
//! persistence layer, and translate every failure into an `ApiError`. They
//! are synchronous and know nothing about HTTP.

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

mod auth;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedStaff, AuthenticationService, AuthorizationService, PROFILE_PATH, Role,
};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    DEFAULT_ADMIN_FULL_NAME, DEFAULT_ADMIN_USERNAME, add_bank, add_inventory, change_password,
    create_staff, dashboard, delete_inventory, delete_staff, get_bag, get_donor, get_staff,
    list_banks, list_donors, list_inventory, list_recipients, list_staff, list_transfusions,
    login_admin, login_staff, logout, record_transfusion, register_donor, reports, reset_admin,
    update_inventory, update_staff, use_bag_form,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AddBankResponse, AddInventoryRequest, AddInventoryResponse, AdminLoginRequest, BagInfo,
    BankInfo, ChangePasswordRequest, ChangePasswordResponse, CreateStaffRequest,
    CreateStaffResponse, DashboardResponse, DeleteInventoryResponse, DeleteStaffRequest,
    DeleteStaffResponse, DonorDetailResponse, DonorInfo, GroupStockInfo, InventoryFilter,
    ListDonorsResponse, ListInventoryResponse, ListRecipientsResponse, ListStaffResponse,
    ListTransfusionsResponse, LoginResponse, MonthlyDonationInfo, NewRecipientRequest,
    RecipientInfo, RecordTransfusionRequest, RecordTransfusionResponse, RegisterDonorRequest,
    RegisterDonorResponse, ReportsResponse, ResetAdminResponse, StaffInfo, StaffLoginRequest,
    TransfusionInfo, UpdateInventoryRequest, UpdateInventoryResponse, UpdateStaffRequest,
    UpdateStaffResponse, UseBagFormResponse,
};
