// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw form values; parsing and validation happen in the
//! handlers so every failure surfaces as an `ApiError`.

use bloodlink_domain::{BagStatus, BloodGroup};
use serde::{Deserialize, Serialize};
use time::Date;

// ============================================================================
// Authentication
// ============================================================================

/// Admin login by username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Staff login by secret code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffLoginRequest {
    pub secret_code: String,
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The session token to store in the client cookie.
    pub session_token: String,
    pub staff_id: i64,
    pub full_name: String,
    pub is_admin: bool,
    pub must_change_password: bool,
    /// Where the client should be sent next.
    pub redirect_to: String,
}

/// API request for a staff member to change their own password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// API response for a successful password change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordResponse {
    pub message: String,
    /// Where the client should be sent next.
    pub redirect_to: String,
}

// ============================================================================
// Donors
// ============================================================================

/// API request to register a donor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterDonorRequest {
    pub first_name: String,
    pub last_name: String,
    pub blood_group: String,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Date of birth (ISO 8601).
    pub date_of_birth: String,
}

/// API response for a successful donor registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterDonorResponse {
    pub donor_id: i64,
    /// The human-facing donor code, e.g. `BLD-000001`.
    pub donor_code: String,
    pub message: String,
}

/// Donor summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorInfo {
    pub donor_id: i64,
    pub donor_code: String,
    pub first_name: String,
    pub last_name: String,
    pub blood_group: BloodGroup,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Date,
    pub last_donation_date: Option<Date>,
}

/// API response listing donors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDonorsResponse {
    /// Ordered by last name, then first name.
    pub donors: Vec<DonorInfo>,
}

/// API response for a single donor with their donation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorDetailResponse {
    pub donor: DonorInfo,
    /// First date the donor may donate again; `None` when they never donated.
    pub next_eligible_date: Option<Date>,
    /// Whether the donor may donate today.
    pub eligible_today: bool,
    /// Bags from this donor, newest donation first.
    pub donations: Vec<BagInfo>,
}

// ============================================================================
// Inventory
// ============================================================================

/// API request to log a bag.
///
/// A donor-linked bag takes its blood group from the donor; a bank-direct
/// bag (no donor) must carry a blood group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddInventoryRequest {
    pub donor_id: Option<i64>,
    pub bank_id: Option<i64>,
    pub blood_group: Option<String>,
    /// Donation date (ISO 8601).
    pub donation_date: String,
}

/// API response for a logged bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddInventoryResponse {
    pub bag_id: i64,
    pub blood_group: BloodGroup,
    pub expiry_date: Date,
    pub message: String,
}

/// Optional inventory filters, as raw query values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    pub blood_group: Option<String>,
    pub bank_id: Option<i64>,
}

/// A bag as shown in inventory views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagInfo {
    pub bag_id: i64,
    pub blood_group: BloodGroup,
    pub bank_id: Option<i64>,
    pub bank_name: Option<String>,
    pub donor_id: Option<i64>,
    pub donor_code: Option<String>,
    pub donation_date: Date,
    pub expiry_date: Date,
    pub status: BagStatus,
    /// Past its expiry date as of the request.
    pub expired: bool,
    /// Unexpired but within the expiring-soon window.
    pub expiring_soon: bool,
}

/// A blood bank option for inventory forms and filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankInfo {
    pub bank_id: i64,
    pub name: String,
    pub location: Option<String>,
}

/// API response listing inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInventoryResponse {
    /// Ordered by ascending expiry date.
    pub bags: Vec<BagInfo>,
    /// All banks, for the filter form.
    pub banks: Vec<BankInfo>,
    /// The blood group filter that was applied.
    pub blood_group: Option<BloodGroup>,
    /// The bank filter that was applied.
    pub bank_id: Option<i64>,
}

/// API request to edit a bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInventoryRequest {
    pub bag_id: i64,
    pub blood_group: String,
    pub bank_id: Option<i64>,
    /// Donation date (ISO 8601).
    pub donation_date: String,
}

/// API response for an edited bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInventoryResponse {
    pub bag_id: i64,
    pub expiry_date: Date,
    pub message: String,
}

/// API response for a deleted bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteInventoryResponse {
    pub message: String,
}

// ============================================================================
// Transfusions
// ============================================================================

/// Fields for a recipient created together with a transfusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipientRequest {
    pub full_name: String,
    pub blood_group: String,
    pub hospital: String,
    pub contact_number: Option<String>,
}

/// API request to record a transfusion.
///
/// New recipient fields take precedence over an existing recipient ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTransfusionRequest {
    pub bag_id: i64,
    pub recipient_id: Option<i64>,
    pub new_recipient: Option<NewRecipientRequest>,
    /// Transfusion date (ISO 8601); defaults to today when absent.
    pub transfusion_date: Option<String>,
}

/// API response for a recorded transfusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTransfusionResponse {
    pub transfusion_id: i64,
    pub message: String,
}

/// A transfusion recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientInfo {
    pub recipient_id: i64,
    pub full_name: String,
    pub blood_group: BloodGroup,
    pub hospital: String,
    pub contact_number: Option<String>,
}

/// API response listing recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecipientsResponse {
    pub recipients: Vec<RecipientInfo>,
}

/// Everything the use-bag form needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseBagFormResponse {
    pub bag: BagInfo,
    /// Existing recipients whose blood group can receive this bag.
    pub compatible_recipients: Vec<RecipientInfo>,
}

/// A recorded transfusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransfusionInfo {
    pub transfusion_id: i64,
    pub bag_id: i64,
    pub blood_group: BloodGroup,
    pub recipient_id: i64,
    pub recipient_name: String,
    pub hospital: String,
    pub transfusion_date: Date,
}

/// API response listing transfusions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTransfusionsResponse {
    /// Newest first.
    pub transfusions: Vec<TransfusionInfo>,
}

// ============================================================================
// Reports
// ============================================================================

/// Available bag count for one blood group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStockInfo {
    pub blood_group: BloodGroup,
    pub available: usize,
    pub is_short: bool,
}

/// Donations recorded in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyDonationInfo {
    /// `YYYY-MM`.
    pub month: String,
    pub donations: usize,
}

/// API response for the reporting view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportsResponse {
    /// The reference date for expiry and eligibility.
    pub as_of: Date,
    /// Unexpired available bags per group, all eight groups in display order.
    pub stock: Vec<GroupStockInfo>,
    pub shortages: Vec<GroupStockInfo>,
    pub expiring_soon: Vec<BagInfo>,
    pub expired: Vec<BagInfo>,
    /// Ascending by month.
    pub monthly_donations: Vec<MonthlyDonationInfo>,
    pub eligible_donors: Vec<DonorInfo>,
}

/// API response for the staff dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub donor_count: usize,
    pub available_bags: usize,
    pub expiring_soon: usize,
    pub shortages: Vec<GroupStockInfo>,
    /// The five most recent transfusions.
    pub recent_transfusions: Vec<TransfusionInfo>,
}

// ============================================================================
// Staff Administration
// ============================================================================

/// A staff account as shown to administrators. Never carries the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInfo {
    pub staff_id: i64,
    pub username: Option<String>,
    pub secret_code: Option<String>,
    pub full_name: String,
    pub is_admin: bool,
    pub must_change_password: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// API response listing staff accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStaffResponse {
    pub staff: Vec<StaffInfo>,
}

/// API request to create a staff account.
///
/// Admin accounts require a username; other accounts require a secret code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStaffRequest {
    pub username: Option<String>,
    pub secret_code: Option<String>,
    pub full_name: String,
    pub password: String,
    pub password_confirmation: String,
    pub is_admin: bool,
    pub must_change_password: bool,
}

/// API response for a created staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStaffResponse {
    pub staff_id: i64,
    pub message: String,
}

/// API request to edit a staff account.
///
/// A blank `new_password` keeps the current password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStaffRequest {
    pub staff_id: i64,
    pub username: Option<String>,
    pub secret_code: Option<String>,
    pub full_name: String,
    pub is_admin: bool,
    pub must_change_password: bool,
    pub new_password: Option<String>,
    pub new_password_confirmation: Option<String>,
}

/// API response for an edited staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStaffResponse {
    pub staff_id: i64,
    pub message: String,
}

/// API request to delete a staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteStaffRequest {
    pub staff_id: i64,
}

/// API response for a deleted staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteStaffResponse {
    pub message: String,
}

// ============================================================================
// Setup
// ============================================================================

/// Result of resetting the built-in admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetAdminResponse {
    pub staff_id: i64,
    /// Number of previous `admin` accounts removed.
    pub removed: usize,
    pub message: String,
}

/// Result of creating a blood bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBankResponse {
    pub bank_id: i64,
    pub message: String,
}
