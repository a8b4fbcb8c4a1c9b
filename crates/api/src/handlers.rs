// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler takes the persistence layer explicitly. Handlers that
//! depend on the calendar take `today` as a parameter so they never read
//! the clock themselves.

use bloodlink_domain::{
    BagStatus, BloodGroup, DomainError, DonorFields, GroupStock, MonthlyDonations, can_receive,
    compute_expiry, eligible_donors, is_eligible, is_expired, is_expiring_soon,
    monthly_donation_counts, next_eligible_date, optional_field, parse_date, require_field,
    shortages, stock_by_group, validate_donor_fields,
};
use bloodlink_persistence::{
    BagData, BagUpdate, BankData, DonorData, NewBag, NewDonor, NewRecipient, NewStaff,
    Persistence, RecipientChoice, RecipientData, StaffData, StaffUpdate, TransfusionData,
};
use time::Date;
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedStaff, AuthenticationService, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
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

/// Username of the built-in administrator managed by the setup tool.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Full name given to the built-in administrator.
pub const DEFAULT_ADMIN_FULL_NAME: &str = "Admin User";

/// Number of transfusions shown on the dashboard.
const RECENT_TRANSFUSIONS: usize = 5;

// ============================================================================
// Parsing helpers
// ============================================================================

fn parse_blood_group(field: &'static str, value: &str) -> Result<BloodGroup, ApiError> {
    let value: &str = require_field(field, value).map_err(translate_domain_error)?;
    value
        .parse::<BloodGroup>()
        .map_err(|e| ApiError::InvalidInput {
            field: field.to_string(),
            message: e.to_string(),
        })
}

fn parse_optional_blood_group(value: Option<&str>) -> Result<Option<BloodGroup>, ApiError> {
    optional_field(value)
        .map(|v| parse_blood_group("blood_group", &v))
        .transpose()
}

fn parse_required_date(field: &'static str, value: &str) -> Result<Date, ApiError> {
    let value: &str = require_field(field, value).map_err(translate_domain_error)?;
    parse_date(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

// ============================================================================
// Conversions
// ============================================================================

fn donor_info(donor: DonorData) -> DonorInfo {
    DonorInfo {
        donor_id: donor.donor_id,
        donor_code: donor.donor_code.value().to_string(),
        first_name: donor.first_name,
        last_name: donor.last_name,
        blood_group: donor.blood_group,
        contact_number: donor.contact_number,
        email: donor.email,
        address: donor.address,
        date_of_birth: donor.date_of_birth,
        last_donation_date: donor.last_donation_date,
    }
}

fn bag_info(bag: BagData, today: Date) -> BagInfo {
    let available: bool = bag.status == BagStatus::Available;
    BagInfo {
        bag_id: bag.bag_id,
        blood_group: bag.blood_group,
        bank_id: bag.bank_id,
        bank_name: bag.bank_name,
        donor_id: bag.donor_id,
        donor_code: bag.donor_code,
        donation_date: bag.donation_date,
        expiry_date: bag.expiry_date,
        status: bag.status,
        expired: available && is_expired(bag.expiry_date, today),
        expiring_soon: available && is_expiring_soon(bag.expiry_date, today),
    }
}

fn bank_info(bank: BankData) -> BankInfo {
    BankInfo {
        bank_id: bank.bank_id,
        name: bank.name,
        location: bank.location,
    }
}

fn recipient_info(recipient: RecipientData) -> RecipientInfo {
    RecipientInfo {
        recipient_id: recipient.recipient_id,
        full_name: recipient.full_name,
        blood_group: recipient.blood_group,
        hospital: recipient.hospital,
        contact_number: recipient.contact_number,
    }
}

fn transfusion_info(transfusion: TransfusionData) -> TransfusionInfo {
    TransfusionInfo {
        transfusion_id: transfusion.transfusion_id,
        bag_id: transfusion.bag_id,
        blood_group: transfusion.blood_group,
        recipient_id: transfusion.recipient_id,
        recipient_name: transfusion.recipient_name,
        hospital: transfusion.hospital,
        transfusion_date: transfusion.transfusion_date,
    }
}

fn group_stock_info(stock: GroupStock) -> GroupStockInfo {
    GroupStockInfo {
        blood_group: stock.blood_group,
        available: stock.available,
        is_short: stock.is_short(),
    }
}

fn staff_info(staff: StaffData) -> StaffInfo {
    StaffInfo {
        staff_id: staff.staff_id,
        username: staff.username,
        secret_code: staff.secret_code,
        full_name: staff.full_name,
        is_admin: staff.is_admin,
        must_change_password: staff.must_change_password,
        created_at: staff.created_at,
        last_login_at: staff.last_login_at,
    }
}

// ============================================================================
// Authentication
// ============================================================================

fn login_response(session_token: String, actor: &AuthenticatedStaff) -> LoginResponse {
    LoginResponse {
        session_token,
        staff_id: actor.staff_id,
        full_name: actor.full_name.clone(),
        is_admin: actor.is_admin(),
        must_change_password: actor.must_change_password,
        redirect_to: actor.landing_path().to_string(),
    }
}

/// Logs an administrator in by username and password.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` for unknown accounts, non-admin
/// accounts, or a wrong password. No session is created in that case.
/// Storage failures return `ApiError::Internal`.
pub fn login_admin(
    persistence: &mut Persistence,
    request: &AdminLoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, actor, _staff) =
        AuthenticationService::login_admin(persistence, &request.username, &request.password)?;
    Ok(login_response(session_token, &actor))
}

/// Logs a staff member in by secret code and password.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` for unknown secret codes, admin
/// accounts, or a wrong password. No session is created in that case.
/// Storage failures return `ApiError::Internal`.
pub fn login_staff(
    persistence: &mut Persistence,
    request: &StaffLoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, actor, _staff) =
        AuthenticationService::login_staff(persistence, &request.secret_code, &request.password)?;
    Ok(login_response(session_token, &actor))
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Changes the caller's own password and clears the forced-change flag.
///
/// The current session stays valid.
///
/// # Errors
///
/// Returns an error if:
/// - The current password is incorrect
/// - The new password violates the password policy
/// - Database operations fail
pub fn change_password(
    persistence: &mut Persistence,
    request: &ChangePasswordRequest,
    staff: &StaffData,
) -> Result<ChangePasswordResponse, ApiError> {
    let password_valid: bool =
        Persistence::verify_password(&request.current_password, &staff.password_hash).map_err(
            |e| ApiError::Internal {
                message: format!("Password verification failed: {e}"),
            },
        )?;

    if !password_valid {
        warn!(staff_id = staff.staff_id, "Password change rejected");
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("Current password is incorrect"),
        });
    }

    let login_identifier: &str = staff
        .username
        .as_deref()
        .or(staff.secret_code.as_deref())
        .unwrap_or_default();

    PasswordPolicy::default().validate(
        &request.new_password,
        &request.new_password_confirmation,
        login_identifier,
        &staff.full_name,
    )?;

    persistence
        .update_password(staff.staff_id, &request.new_password)
        .map_err(translate_persistence_error)?;

    info!(staff_id = staff.staff_id, "Password changed");

    let redirect_to: &str = if staff.is_admin { "/admin/users" } else { "/" };
    Ok(ChangePasswordResponse {
        message: String::from("Password updated successfully."),
        redirect_to: redirect_to.to_string(),
    })
}

// ============================================================================
// Donor Registry
// ============================================================================

/// Registers a donor and assigns the donor code.
///
/// # Errors
///
/// Returns an error if:
/// - A required field is missing or the blood group or date of birth cannot be parsed
/// - The contact number or email is already registered (no row is inserted)
/// - Database operations fail
pub fn register_donor(
    persistence: &mut Persistence,
    request: &RegisterDonorRequest,
) -> Result<RegisterDonorResponse, ApiError> {
    let fields: DonorFields = validate_donor_fields(
        &request.first_name,
        &request.last_name,
        &request.contact_number,
        request.email.as_deref(),
        request.address.as_deref(),
    )
    .map_err(translate_domain_error)?;
    let blood_group: BloodGroup = parse_blood_group("blood_group", &request.blood_group)?;
    let date_of_birth: Date = parse_required_date("date_of_birth", &request.date_of_birth)?;

    let new_donor: NewDonor = NewDonor {
        first_name: fields.first_name,
        last_name: fields.last_name,
        blood_group,
        contact_number: fields.contact_number,
        email: fields.email,
        address: fields.address,
        date_of_birth,
    };

    let (donor_id, donor_code) = persistence
        .register_donor(&new_donor)
        .map_err(translate_persistence_error)?;

    Ok(RegisterDonorResponse {
        donor_id,
        donor_code: donor_code.value().to_string(),
        message: format!("Donor added successfully! Assigned Donor ID: {donor_code}"),
    })
}

/// Lists donors ordered by last name, then first name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_donors(persistence: &mut Persistence) -> Result<ListDonorsResponse, ApiError> {
    let donors: Vec<DonorInfo> = persistence
        .list_donors()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(donor_info)
        .collect();

    Ok(ListDonorsResponse { donors })
}

/// Returns a donor with their donation history and next eligible date.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown donor, or an error if
/// the database query fails.
pub fn get_donor(
    persistence: &mut Persistence,
    donor_id: i64,
    today: Date,
) -> Result<DonorDetailResponse, ApiError> {
    let donor: DonorData = persistence
        .get_donor(donor_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Donor"),
            message: format!("Donor with ID {donor_id} does not exist"),
        })?;

    let donations: Vec<BagInfo> = persistence
        .list_bags_for_donor(donor_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|bag| bag_info(bag, today))
        .collect();

    let next_eligible: Option<Date> =
        next_eligible_date(donor.last_donation_date).map_err(translate_domain_error)?;
    let eligible_today: bool = is_eligible(donor.last_donation_date, today);

    Ok(DonorDetailResponse {
        donor: donor_info(donor),
        next_eligible_date: next_eligible,
        eligible_today,
        donations,
    })
}

// ============================================================================
// Inventory Ledger
// ============================================================================

/// Logs a bag, either donor-linked or bank-direct.
///
/// # Errors
///
/// Returns an error if:
/// - The donation date is missing or malformed
/// - A bank-direct bag has no blood group, or a donor-linked bag's group disagrees with the donor
/// - The donor or bank does not exist
/// - Database operations fail
pub fn add_inventory(
    persistence: &mut Persistence,
    request: &AddInventoryRequest,
) -> Result<AddInventoryResponse, ApiError> {
    let blood_group: Option<BloodGroup> =
        parse_optional_blood_group(request.blood_group.as_deref())?;
    let donation_date: Date = parse_required_date("donation_date", &request.donation_date)?;

    let new_bag: NewBag = NewBag {
        donor_id: request.donor_id,
        bank_id: request.bank_id,
        blood_group,
        donation_date,
    };

    let bag_id: i64 = persistence
        .add_bag(&new_bag)
        .map_err(translate_persistence_error)?;

    let bag: BagData = persistence
        .get_bag(bag_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Bag {bag_id} not found after creation"),
        })?;

    Ok(AddInventoryResponse {
        bag_id,
        blood_group: bag.blood_group,
        expiry_date: bag.expiry_date,
        message: format!(
            "Bag {bag_id} ({}) added to inventory. Expires on {}.",
            bag.blood_group, bag.expiry_date
        ),
    })
}

/// Lists inventory ordered by ascending expiry, optionally filtered.
///
/// A blank blood group filter means no filter.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown blood group, or an error
/// if the database query fails.
pub fn list_inventory(
    persistence: &mut Persistence,
    filter: &InventoryFilter,
    today: Date,
) -> Result<ListInventoryResponse, ApiError> {
    let blood_group: Option<BloodGroup> =
        parse_optional_blood_group(filter.blood_group.as_deref())?;

    debug!(?blood_group, bank_id = ?filter.bank_id, "Listing inventory");

    let bags: Vec<BagInfo> = persistence
        .list_inventory(blood_group, filter.bank_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|bag| bag_info(bag, today))
        .collect();

    let banks: Vec<BankInfo> = list_banks(persistence)?;

    Ok(ListInventoryResponse {
        bags,
        banks,
        blood_group,
        bank_id: filter.bank_id,
    })
}

/// Lists blood banks for inventory forms.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_banks(persistence: &mut Persistence) -> Result<Vec<BankInfo>, ApiError> {
    Ok(persistence
        .list_banks()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(bank_info)
        .collect())
}

/// Returns a single bag.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown bag, or an error if
/// the database query fails.
pub fn get_bag(
    persistence: &mut Persistence,
    bag_id: i64,
    today: Date,
) -> Result<BagInfo, ApiError> {
    persistence
        .get_bag(bag_id)
        .map_err(translate_persistence_error)?
        .map(|bag| bag_info(bag, today))
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Bag"),
            message: format!("Bag with ID {bag_id} does not exist"),
        })
}

/// Overwrites a bag's blood group, bank and donation date.
///
/// Only Admin actors may edit bags. Expiry is recomputed; status is never
/// writable.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - A field is missing or malformed
/// - The bag or bank does not exist
/// - Database operations fail
pub fn update_inventory(
    persistence: &mut Persistence,
    request: &UpdateInventoryRequest,
    actor: &AuthenticatedStaff,
) -> Result<UpdateInventoryResponse, ApiError> {
    AuthorizationService::authorize_update_inventory(actor)?;

    let blood_group: BloodGroup = parse_blood_group("blood_group", &request.blood_group)?;
    let donation_date: Date = parse_required_date("donation_date", &request.donation_date)?;

    let update: BagUpdate = BagUpdate {
        blood_group,
        bank_id: request.bank_id,
        donation_date,
    };

    persistence
        .update_bag(request.bag_id, &update)
        .map_err(translate_persistence_error)?;

    let expiry_date: Date = compute_expiry(donation_date).map_err(translate_domain_error)?;

    info!(
        bag_id = request.bag_id,
        staff_id = actor.staff_id,
        "Inventory bag edited"
    );

    Ok(UpdateInventoryResponse {
        bag_id: request.bag_id,
        expiry_date,
        message: format!("Bag {} updated successfully.", request.bag_id),
    })
}

/// Deletes a bag that has not been transfused.
///
/// Only Admin actors may delete bags.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The bag does not exist
/// - The bag has been used in a transfusion
/// - Database operations fail
pub fn delete_inventory(
    persistence: &mut Persistence,
    bag_id: i64,
    actor: &AuthenticatedStaff,
) -> Result<DeleteInventoryResponse, ApiError> {
    AuthorizationService::authorize_delete_inventory(actor)?;

    persistence
        .delete_bag(bag_id)
        .map_err(translate_persistence_error)?;

    info!(bag_id, staff_id = actor.staff_id, "Inventory bag deleted");

    Ok(DeleteInventoryResponse {
        message: format!("Bag {bag_id} deleted."),
    })
}

// ============================================================================
// Transfusion Recorder
// ============================================================================

/// Returns a bag together with the existing recipients who can receive it.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown bag, a rule
/// violation for a bag that is already used, or an error if the database
/// query fails.
pub fn use_bag_form(
    persistence: &mut Persistence,
    bag_id: i64,
    today: Date,
) -> Result<UseBagFormResponse, ApiError> {
    let bag: BagInfo = get_bag(persistence, bag_id, today)?;
    if bag.status != BagStatus::Available {
        return Err(translate_domain_error(DomainError::BagNotAvailable {
            bag_id,
            status: bag.status,
        }));
    }

    let compatible_recipients: Vec<RecipientInfo> = persistence
        .list_recipients()
        .map_err(translate_persistence_error)?
        .into_iter()
        .filter(|recipient| can_receive(recipient.blood_group, bag.blood_group))
        .map(recipient_info)
        .collect();

    Ok(UseBagFormResponse {
        bag,
        compatible_recipients,
    })
}

fn new_recipient(request: &NewRecipientRequest) -> Result<NewRecipient, ApiError> {
    let full_name: &str =
        require_field("full_name", &request.full_name).map_err(translate_domain_error)?;
    let blood_group: BloodGroup = parse_blood_group("blood_group", &request.blood_group)?;
    let hospital: &str =
        require_field("hospital", &request.hospital).map_err(translate_domain_error)?;

    Ok(NewRecipient {
        full_name: full_name.to_string(),
        blood_group,
        hospital: hospital.to_string(),
        contact_number: optional_field(request.contact_number.as_deref()),
    })
}

/// Records a transfusion of one bag to an existing or new recipient.
///
/// Marking the bag used, creating the recipient and inserting the
/// transfusion row happen atomically.
///
/// # Errors
///
/// Returns an error if:
/// - Neither an existing recipient nor new recipient fields are given
/// - The transfusion date is malformed or in the future
/// - The bag or recipient does not exist
/// - The bag is already used, expired, or incompatible with the recipient
/// - Database operations fail
pub fn record_transfusion(
    persistence: &mut Persistence,
    request: &RecordTransfusionRequest,
    actor: &AuthenticatedStaff,
    today: Date,
) -> Result<RecordTransfusionResponse, ApiError> {
    let recipient: RecipientChoice = match (&request.new_recipient, request.recipient_id) {
        (Some(fields), _) => RecipientChoice::New(new_recipient(fields)?),
        (None, Some(recipient_id)) => RecipientChoice::Existing(recipient_id),
        (None, None) => {
            return Err(ApiError::InvalidInput {
                field: String::from("recipient"),
                message: String::from(
                    "Select an existing recipient or enter the new recipient's details",
                ),
            });
        }
    };

    let transfusion_date: Date = match optional_field(request.transfusion_date.as_deref()) {
        Some(value) => parse_required_date("transfusion_date", &value)?,
        None => today,
    };

    if transfusion_date > today {
        return Err(ApiError::InvalidInput {
            field: String::from("transfusion_date"),
            message: format!("Transfusion date {transfusion_date} is in the future"),
        });
    }

    let transfusion_id: i64 = persistence
        .record_transfusion(
            request.bag_id,
            &recipient,
            transfusion_date,
            Some(actor.staff_id),
        )
        .map_err(translate_persistence_error)?;

    Ok(RecordTransfusionResponse {
        transfusion_id,
        message: format!(
            "Transfusion recorded. Bag {} marked as used.",
            request.bag_id
        ),
    })
}

/// Lists recipients.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_recipients(persistence: &mut Persistence) -> Result<ListRecipientsResponse, ApiError> {
    let recipients: Vec<RecipientInfo> = persistence
        .list_recipients()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(recipient_info)
        .collect();

    Ok(ListRecipientsResponse { recipients })
}

/// Lists transfusions, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_transfusions(
    persistence: &mut Persistence,
) -> Result<ListTransfusionsResponse, ApiError> {
    let transfusions: Vec<TransfusionInfo> = persistence
        .list_transfusions()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(transfusion_info)
        .collect();

    Ok(ListTransfusionsResponse { transfusions })
}

// ============================================================================
// Reporting View
// ============================================================================

/// Available bags split into (unexpired, expired) as of `today`.
fn available_bags(
    persistence: &mut Persistence,
    today: Date,
) -> Result<(Vec<BagData>, Vec<BagData>), ApiError> {
    Ok(persistence
        .list_available_bags()
        .map_err(translate_persistence_error)?
        .into_iter()
        .partition(|bag| !is_expired(bag.expiry_date, today)))
}

/// Builds the reporting view.
///
/// Stock counts only unexpired available bags; expired available bags are
/// reported separately.
///
/// # Errors
///
/// Returns an error if a database query fails.
pub fn reports(persistence: &mut Persistence, today: Date) -> Result<ReportsResponse, ApiError> {
    let (usable, expired) = available_bags(persistence, today)?;

    let usable_groups: Vec<BloodGroup> = usable.iter().map(|bag| bag.blood_group).collect();
    let stock: Vec<GroupStock> = stock_by_group(&usable_groups);
    let short: Vec<GroupStock> = shortages(&stock);

    let expiring_soon: Vec<BagInfo> = usable
        .into_iter()
        .filter(|bag| is_expiring_soon(bag.expiry_date, today))
        .map(|bag| bag_info(bag, today))
        .collect();

    let donation_dates: Vec<Date> = persistence
        .list_donation_dates()
        .map_err(translate_persistence_error)?;
    let monthly: Vec<MonthlyDonations> = monthly_donation_counts(&donation_dates);

    let donors: Vec<(DonorInfo, Option<Date>)> = persistence
        .list_donors()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|donor| {
            let last: Option<Date> = donor.last_donation_date;
            (donor_info(donor), last)
        })
        .collect();

    Ok(ReportsResponse {
        as_of: today,
        stock: stock.into_iter().map(group_stock_info).collect(),
        shortages: short.into_iter().map(group_stock_info).collect(),
        expiring_soon,
        expired: expired
            .into_iter()
            .map(|bag| bag_info(bag, today))
            .collect(),
        monthly_donations: monthly
            .into_iter()
            .map(|m| MonthlyDonationInfo {
                month: m.month.to_string(),
                donations: m.donations,
            })
            .collect(),
        eligible_donors: eligible_donors(&donors, today),
    })
}

/// Builds the staff dashboard summary.
///
/// # Errors
///
/// Returns an error if a database query fails.
pub fn dashboard(
    persistence: &mut Persistence,
    today: Date,
) -> Result<DashboardResponse, ApiError> {
    let (usable, _expired) = available_bags(persistence, today)?;

    let usable_groups: Vec<BloodGroup> = usable.iter().map(|bag| bag.blood_group).collect();
    let stock: Vec<GroupStock> = stock_by_group(&usable_groups);

    let donor_count: usize = persistence
        .list_donors()
        .map_err(translate_persistence_error)?
        .len();

    let recent_transfusions: Vec<TransfusionInfo> = persistence
        .list_transfusions()
        .map_err(translate_persistence_error)?
        .into_iter()
        .take(RECENT_TRANSFUSIONS)
        .map(transfusion_info)
        .collect();

    Ok(DashboardResponse {
        donor_count,
        available_bags: usable.len(),
        expiring_soon: usable
            .iter()
            .filter(|bag| is_expiring_soon(bag.expiry_date, today))
            .count(),
        shortages: shortages(&stock).into_iter().map(group_stock_info).collect(),
        recent_transfusions,
    })
}

// ============================================================================
// Staff Administration
// ============================================================================

/// Resolves the login identifier pair for an account.
///
/// Admins need a username and non-admin staff a secret code. The other
/// identifier is kept when supplied.
fn login_identifiers(
    is_admin: bool,
    username: Option<&str>,
    secret_code: Option<&str>,
) -> Result<(Option<String>, Option<String>), ApiError> {
    let username: Option<String> = optional_field(username);
    let secret_code: Option<String> = optional_field(secret_code);

    if is_admin && username.is_none() {
        return Err(ApiError::InvalidInput {
            field: String::from("username"),
            message: String::from("Admin accounts require a username"),
        });
    }
    if !is_admin && secret_code.is_none() {
        return Err(ApiError::InvalidInput {
            field: String::from("secret_code"),
            message: String::from("Staff accounts require a secret code"),
        });
    }

    Ok((username, secret_code))
}

fn primary_identifier<'a>(
    is_admin: bool,
    username: Option<&'a str>,
    secret_code: Option<&'a str>,
) -> &'a str {
    let identifier: Option<&str> = if is_admin { username } else { secret_code };
    identifier.unwrap_or_default()
}

fn find_staff(persistence: &mut Persistence, staff_id: i64) -> Result<StaffData, ApiError> {
    persistence
        .get_staff_by_id(staff_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Staff account"),
            message: format!("Staff account with ID {staff_id} does not exist"),
        })
}

fn ensure_other_admin_remains(persistence: &mut Persistence) -> Result<(), ApiError> {
    let admin_count: i64 = persistence
        .count_admins()
        .map_err(translate_persistence_error)?;

    if admin_count <= 1 {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("last_admin"),
            message: String::from("Operation would leave the system without an admin"),
        });
    }
    Ok(())
}

/// Lists all staff accounts.
///
/// Only Admin actors may list staff.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the query fails.
pub fn list_staff(
    persistence: &mut Persistence,
    actor: &AuthenticatedStaff,
) -> Result<ListStaffResponse, ApiError> {
    AuthorizationService::authorize_manage_staff(actor)?;

    let staff: Vec<StaffInfo> = persistence
        .list_staff()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(staff_info)
        .collect();

    Ok(ListStaffResponse { staff })
}

/// Returns one staff account for the edit form.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the account does not
/// exist, or the query fails.
pub fn get_staff(
    persistence: &mut Persistence,
    staff_id: i64,
    actor: &AuthenticatedStaff,
) -> Result<StaffInfo, ApiError> {
    AuthorizationService::authorize_manage_staff(actor)?;
    find_staff(persistence, staff_id).map(staff_info)
}

/// Creates a staff account.
///
/// Only Admin actors may create accounts.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The full name or required login identifier is missing
/// - The password violates the password policy
/// - The username or secret code is already taken
/// - Database operations fail
pub fn create_staff(
    persistence: &mut Persistence,
    request: &CreateStaffRequest,
    actor: &AuthenticatedStaff,
) -> Result<CreateStaffResponse, ApiError> {
    AuthorizationService::authorize_manage_staff(actor)?;

    let full_name: &str =
        require_field("full_name", &request.full_name).map_err(translate_domain_error)?;
    let (username, secret_code) = login_identifiers(
        request.is_admin,
        request.username.as_deref(),
        request.secret_code.as_deref(),
    )?;

    PasswordPolicy::default().validate(
        &request.password,
        &request.password_confirmation,
        primary_identifier(
            request.is_admin,
            username.as_deref(),
            secret_code.as_deref(),
        ),
        full_name,
    )?;

    let new_staff: NewStaff = NewStaff {
        username,
        secret_code,
        full_name: full_name.to_string(),
        password: request.password.clone(),
        is_admin: request.is_admin,
        must_change_password: request.must_change_password,
    };

    let staff_id: i64 = persistence
        .create_staff(&new_staff)
        .map_err(translate_persistence_error)?;

    info!(staff_id, created_by = actor.staff_id, "Staff account created");

    Ok(CreateStaffResponse {
        staff_id,
        message: format!("Account for {full_name} created."),
    })
}

/// Edits a staff account, optionally setting a new password.
///
/// Only Admin actors may edit accounts. Demoting the last admin is rejected.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The account does not exist
/// - The full name or required login identifier is missing
/// - A new password violates the password policy
/// - The change would leave no admin account
/// - The username or secret code is already taken
/// - Database operations fail
pub fn update_staff(
    persistence: &mut Persistence,
    request: &UpdateStaffRequest,
    actor: &AuthenticatedStaff,
) -> Result<UpdateStaffResponse, ApiError> {
    AuthorizationService::authorize_manage_staff(actor)?;

    let target: StaffData = find_staff(persistence, request.staff_id)?;

    let full_name: &str =
        require_field("full_name", &request.full_name).map_err(translate_domain_error)?;
    let (username, secret_code) = login_identifiers(
        request.is_admin,
        request.username.as_deref(),
        request.secret_code.as_deref(),
    )?;

    if target.is_admin && !request.is_admin {
        ensure_other_admin_remains(persistence)?;
    }

    let new_password: Option<String> = optional_field(request.new_password.as_deref());
    if let Some(password) = &new_password {
        PasswordPolicy::default().validate(
            password,
            request.new_password_confirmation.as_deref().unwrap_or_default(),
            primary_identifier(
                request.is_admin,
                username.as_deref(),
                secret_code.as_deref(),
            ),
            full_name,
        )?;
    }

    let update: StaffUpdate = StaffUpdate {
        username,
        secret_code,
        full_name: full_name.to_string(),
        is_admin: request.is_admin,
        must_change_password: request.must_change_password,
        new_password,
    };

    persistence
        .update_staff(request.staff_id, &update)
        .map_err(translate_persistence_error)?;

    info!(
        staff_id = request.staff_id,
        updated_by = actor.staff_id,
        "Staff account updated"
    );

    Ok(UpdateStaffResponse {
        staff_id: request.staff_id,
        message: format!("Account for {full_name} updated."),
    })
}

/// Deletes a staff account and its sessions.
///
/// Only Admin actors may delete accounts. An admin cannot delete their own
/// account, and the last admin account cannot be deleted.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The target is the actor's own account
/// - The account does not exist
/// - The target is the last admin
/// - Database operations fail
pub fn delete_staff(
    persistence: &mut Persistence,
    request: DeleteStaffRequest,
    actor: &AuthenticatedStaff,
) -> Result<DeleteStaffResponse, ApiError> {
    AuthorizationService::authorize_manage_staff(actor)?;

    if request.staff_id == actor.staff_id {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("no_self_deletion"),
            message: String::from("You cannot delete your own account"),
        });
    }

    let target: StaffData = find_staff(persistence, request.staff_id)?;

    if target.is_admin {
        ensure_other_admin_remains(persistence)?;
    }

    persistence
        .delete_staff(request.staff_id)
        .map_err(translate_persistence_error)?;

    info!(
        staff_id = request.staff_id,
        deleted_by = actor.staff_id,
        "Staff account deleted"
    );

    Ok(DeleteStaffResponse {
        message: format!("Account for {} deleted.", target.full_name),
    })
}

// ============================================================================
// Setup
// ============================================================================

/// Replaces the built-in `admin` account with a fresh one.
///
/// The new account must change its password on first login. The password
/// policy is not applied here so operators can bootstrap with a simple
/// temporary password. The old account is removed and the new one created
/// in one transaction, so a failure leaves the existing admin in place.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an empty password, or an error if
/// database operations fail.
pub fn reset_admin(
    persistence: &mut Persistence,
    password: &str,
) -> Result<ResetAdminResponse, ApiError> {
    if password.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("password"),
            message: String::from("The admin password must not be empty"),
        });
    }

    let new_admin: NewStaff = NewStaff {
        username: Some(DEFAULT_ADMIN_USERNAME.to_string()),
        secret_code: None,
        full_name: DEFAULT_ADMIN_FULL_NAME.to_string(),
        password: password.to_string(),
        is_admin: true,
        must_change_password: true,
    };

    let (removed, staff_id) = persistence
        .replace_staff_by_username(DEFAULT_ADMIN_USERNAME, &new_admin)
        .map_err(translate_persistence_error)?;

    info!(staff_id, removed, "Admin account reset");

    Ok(ResetAdminResponse {
        staff_id,
        removed,
        message: format!(
            "The '{DEFAULT_ADMIN_USERNAME}' account has been reset. A password change is required on first login."
        ),
    })
}

/// Creates a blood bank.
///
/// # Errors
///
/// Returns an error if the name is missing or already taken, or if the
/// insert fails.
pub fn add_bank(
    persistence: &mut Persistence,
    name: &str,
    location: Option<&str>,
) -> Result<AddBankResponse, ApiError> {
    let name: &str = require_field("name", name).map_err(translate_domain_error)?;
    let location: Option<String> = optional_field(location);

    let bank_id: i64 = persistence
        .create_bank(name, location.as_deref())
        .map_err(translate_persistence_error)?;

    Ok(AddBankResponse {
        bank_id,
        message: format!("Blood bank '{name}' created with ID {bank_id}."),
    })
}
