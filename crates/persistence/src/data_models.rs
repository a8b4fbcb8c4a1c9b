// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bloodlink_domain::{BagStatus, BloodGroup, DonorCode};
use serde::{Deserialize, Serialize};
use time::Date;

/// A staff account as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffData {
    pub staff_id: i64,
    pub username: Option<String>,
    pub secret_code: Option<String>,
    pub full_name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub must_change_password: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A server-side session row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub staff_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A registered donor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorData {
    pub donor_id: i64,
    pub donor_code: DonorCode,
    pub first_name: String,
    pub last_name: String,
    pub blood_group: BloodGroup,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Date,
    pub last_donation_date: Option<Date>,
    pub created_at: String,
}

/// A blood bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankData {
    pub bank_id: i64,
    pub name: String,
    pub location: Option<String>,
}

/// An inventory bag, with the bank name and donor code resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagData {
    pub bag_id: i64,
    pub blood_group: BloodGroup,
    pub bank_id: Option<i64>,
    pub bank_name: Option<String>,
    pub donor_id: Option<i64>,
    pub donor_code: Option<String>,
    pub donation_date: Date,
    pub expiry_date: Date,
    pub status: BagStatus,
}

/// A transfusion recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientData {
    pub recipient_id: i64,
    pub full_name: String,
    pub blood_group: BloodGroup,
    pub hospital: String,
    pub contact_number: Option<String>,
    pub created_at: String,
}

/// A recorded transfusion joined with the bag and recipient it links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransfusionData {
    pub transfusion_id: i64,
    pub bag_id: i64,
    pub blood_group: BloodGroup,
    pub recipient_id: i64,
    pub recipient_name: String,
    pub hospital: String,
    pub transfusion_date: Date,
    pub recorded_by: Option<i64>,
}

/// Fields for a new donor. Required fields must already be validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonor {
    pub first_name: String,
    pub last_name: String,
    pub blood_group: BloodGroup,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Date,
}

/// Fields for a new inventory bag.
///
/// `blood_group` may be omitted for a donor-linked bag; it is then taken
/// from the donor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBag {
    pub donor_id: Option<i64>,
    pub bank_id: Option<i64>,
    pub blood_group: Option<BloodGroup>,
    pub donation_date: Date,
}

/// Editable fields of an existing bag. Status is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagUpdate {
    pub blood_group: BloodGroup,
    pub bank_id: Option<i64>,
    pub donation_date: Date,
}

/// Fields for a recipient created alongside a transfusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipient {
    pub full_name: String,
    pub blood_group: BloodGroup,
    pub hospital: String,
    pub contact_number: Option<String>,
}

/// Who receives the bag in a transfusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientChoice {
    Existing(i64),
    New(NewRecipient),
}

/// Fields for a new staff account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStaff {
    pub username: Option<String>,
    pub secret_code: Option<String>,
    pub full_name: String,
    pub password: String,
    pub is_admin: bool,
    pub must_change_password: bool,
}

/// Editable fields of a staff account.
///
/// A `None` password leaves the stored hash unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffUpdate {
    pub username: Option<String>,
    pub secret_code: Option<String>,
    pub full_name: String,
    pub is_admin: bool,
    pub must_change_password: bool,
    pub new_password: Option<String>,
}
