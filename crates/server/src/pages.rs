// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page renderers, one per view.

use std::fmt::Write as _;

use bloodlink_api::{
    AuthenticatedStaff, BagInfo, BankInfo, DashboardResponse, DonorDetailResponse, DonorInfo,
    GroupStockInfo, ListDonorsResponse, ListInventoryResponse, ListRecipientsResponse,
    ListStaffResponse, ListTransfusionsResponse, RegisterDonorResponse, ReportsResponse,
    StaffInfo, TransfusionInfo, UseBagFormResponse,
};
use bloodlink_domain::BagStatus;
use bloodlink_persistence::StaffData;
use time::Date;

use crate::{
    flash::Flash,
    templates::{
        blood_group_select, checkbox, empty_state, escape, escape_opt, input, layout, table,
    },
};

// ============================================================================
// Authentication
// ============================================================================

/// Staff login by secret code.
#[must_use]
pub fn login_page(flash: Option<&Flash>) -> String {
    let content: String = format!(
        r#"<form method="post" action="/login" class="col-md-4">
{secret_code}
{password}
<button class="btn btn-danger" type="submit">Log in</button>
</form>
<p class="mt-3"><a href="/admin/login">Administrator login</a></p>"#,
        secret_code = input("Secret code", "secret_code", "text", "", true),
        password = input("Password", "password", "password", "", true),
    );
    layout("Staff Login", None, flash, &content)
}

/// Admin login by username.
#[must_use]
pub fn admin_login_page(flash: Option<&Flash>) -> String {
    let content: String = format!(
        r#"<form method="post" action="/admin/login" class="col-md-4">
{username}
{password}
<button class="btn btn-danger" type="submit">Log in</button>
</form>
<p class="mt-3"><a href="/login">Staff login</a></p>"#,
        username = input("Username", "username", "text", "", true),
        password = input("Password", "password", "password", "", true),
    );
    layout("Administrator Login", None, flash, &content)
}

/// Account details and the change-password form.
#[must_use]
pub fn profile_page(
    viewer: &AuthenticatedStaff,
    staff: &StaffData,
    flash: Option<&Flash>,
) -> String {
    let notice: &str = if staff.must_change_password {
        r#"<div class="alert alert-warning">You must choose a new password before continuing.</div>"#
    } else {
        ""
    };
    let login: String = staff.username.as_deref().map_or_else(
        || format!("Secret code: {}", escape_opt(staff.secret_code.as_deref())),
        |username| format!("Username: {}", escape(username)),
    );

    let content: String = format!(
        r#"{notice}
<p><strong>{name}</strong><br>{login}<br>Role: {role}</p>
<h2 class="h5">Change password</h2>
<form method="post" action="/profile" class="col-md-5">
{current}
{new}
{confirm}
<p class="form-text">At least 8 characters using three of: lowercase, uppercase, digits, symbols.</p>
<button class="btn btn-danger" type="submit">Update password</button>
</form>"#,
        name = escape(&staff.full_name),
        role = if staff.is_admin { "Administrator" } else { "Staff" },
        current = input("Current password", "current_password", "password", "", true),
        new = input("New password", "new_password", "password", "", true),
        confirm = input(
            "Confirm new password",
            "new_password_confirmation",
            "password",
            "",
            true
        ),
    );
    layout("Profile", Some(viewer), flash, &content)
}

// ============================================================================
// Dashboard and reports
// ============================================================================

fn stock_table(stock: &[GroupStockInfo]) -> String {
    let mut rows: String = String::new();
    for entry in stock {
        let badge: &str = if entry.is_short {
            r#" <span class="badge bg-warning text-dark">Low</span>"#
        } else {
            ""
        };
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}{badge}</td></tr>",
            entry.blood_group, entry.available
        );
    }
    table(&["Blood group", "Available"], &rows)
}

fn transfusion_rows(transfusions: &[TransfusionInfo]) -> String {
    let mut rows: String = String::new();
    for t in transfusions {
        let _ = write!(
            rows,
            "<tr><td>{date}</td><td>#{bag}</td><td>{group}</td><td>{name}</td><td>{hospital}</td></tr>",
            date = t.transfusion_date,
            bag = t.bag_id,
            group = t.blood_group,
            name = escape(&t.recipient_name),
            hospital = escape(&t.hospital),
        );
    }
    rows
}

fn transfusion_table(transfusions: &[TransfusionInfo]) -> String {
    if transfusions.is_empty() {
        return empty_state("No transfusions recorded yet.");
    }
    table(
        &["Date", "Bag", "Blood group", "Recipient", "Hospital"],
        &transfusion_rows(transfusions),
    )
}

fn shortage_list(shortages: &[GroupStockInfo]) -> String {
    if shortages.is_empty() {
        return empty_state("All blood groups are adequately stocked.");
    }
    let mut items: String = String::new();
    for s in shortages {
        let _ = write!(
            items,
            r#"<li class="list-group-item">{}: {} available</li>"#,
            s.blood_group, s.available
        );
    }
    format!(r#"<ul class="list-group mb-3">{items}</ul>"#)
}

/// Staff landing page.
#[must_use]
pub fn dashboard_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    summary: &DashboardResponse,
) -> String {
    let content: String = format!(
        r#"<div class="row mb-4">
<div class="col"><div class="card"><div class="card-body"><h2 class="h6">Donors</h2><p class="display-6">{donors}</p></div></div></div>
<div class="col"><div class="card"><div class="card-body"><h2 class="h6">Available bags</h2><p class="display-6">{available}</p></div></div></div>
<div class="col"><div class="card"><div class="card-body"><h2 class="h6">Expiring soon</h2><p class="display-6">{expiring}</p></div></div></div>
</div>
<p><a class="btn btn-danger" href="/add_donor">Register donor</a> <a class="btn btn-outline-danger" href="/inventory/add">Log a bag</a></p>
<h2 class="h5">Shortages</h2>
{shortages}
<h2 class="h5">Recent transfusions</h2>
{recent}"#,
        donors = summary.donor_count,
        available = summary.available_bags,
        expiring = summary.expiring_soon,
        shortages = shortage_list(&summary.shortages),
        recent = transfusion_table(&summary.recent_transfusions),
    );
    layout("Dashboard", Some(viewer), flash, &content)
}

/// Stock, expiry, monthly donation and eligibility reports.
#[must_use]
pub fn reports_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    report: &ReportsResponse,
) -> String {
    let mut months: String = String::new();
    for m in &report.monthly_donations {
        let _ = write!(months, "<tr><td>{}</td><td>{}</td></tr>", escape(&m.month), m.donations);
    }
    let months: String = if report.monthly_donations.is_empty() {
        empty_state("No donations recorded yet.")
    } else {
        table(&["Month", "Donations"], &months)
    };

    let content: String = format!(
        r#"<p class="text-muted">As of {as_of}</p>
<h2 class="h5">Available stock</h2>
{stock}
<h2 class="h5">Shortages</h2>
{shortages}
<h2 class="h5">Expiring within 7 days</h2>
{expiring}
<h2 class="h5">Expired, still on the shelf</h2>
{expired}
<h2 class="h5">Donations by month</h2>
{months}
<h2 class="h5">Eligible donors</h2>
{eligible}"#,
        as_of = report.as_of,
        stock = stock_table(&report.stock),
        shortages = shortage_list(&report.shortages),
        expiring = bag_table(&report.expiring_soon, None, "No bags expire within the week."),
        expired = bag_table(&report.expired, None, "No expired bags."),
        eligible = donor_table(&report.eligible_donors, "No donors are currently eligible."),
    );
    layout("Reports", Some(viewer), flash, &content)
}

// ============================================================================
// Donors
// ============================================================================

fn donor_table(donors: &[DonorInfo], empty: &str) -> String {
    if donors.is_empty() {
        return empty_state(empty);
    }
    let mut rows: String = String::new();
    for d in donors {
        let last: String = d
            .last_donation_date
            .map_or_else(|| String::from("Never"), |date| date.to_string());
        let _ = write!(
            rows,
            r#"<tr><td><a href="/donor/{id}">{code}</a></td><td>{last_name}, {first_name}</td><td>{group}</td><td>{contact}</td><td>{last}</td></tr>"#,
            id = d.donor_id,
            code = escape(&d.donor_code),
            last_name = escape(&d.last_name),
            first_name = escape(&d.first_name),
            group = d.blood_group,
            contact = escape(&d.contact_number),
        );
    }
    table(
        &["Donor ID", "Name", "Blood group", "Contact", "Last donation"],
        &rows,
    )
}

/// All registered donors.
#[must_use]
pub fn donors_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    donors: &ListDonorsResponse,
) -> String {
    let content: String = format!(
        r#"<p><a class="btn btn-danger" href="/add_donor">Register donor</a></p>{}"#,
        donor_table(&donors.donors, "No donors registered yet.")
    );
    layout("Donors", Some(viewer), flash, &content)
}

/// One donor with their donation history.
#[must_use]
pub fn donor_detail_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    detail: &DonorDetailResponse,
) -> String {
    let d: &DonorInfo = &detail.donor;
    let eligibility: String = match (detail.eligible_today, detail.next_eligible_date) {
        (true, _) => String::from(r#"<span class="badge bg-success">Eligible to donate</span>"#),
        (false, Some(next)) => format!(
            r#"<span class="badge bg-secondary">Next eligible {next}</span>"#
        ),
        (false, None) => String::new(),
    };
    let last: String = d
        .last_donation_date
        .map_or_else(|| String::from("Never"), |date| date.to_string());

    let content: String = format!(
        r#"<dl class="row">
<dt class="col-sm-3">Donor ID</dt><dd class="col-sm-9">{code}</dd>
<dt class="col-sm-3">Name</dt><dd class="col-sm-9">{first} {last_name}</dd>
<dt class="col-sm-3">Blood group</dt><dd class="col-sm-9">{group}</dd>
<dt class="col-sm-3">Contact</dt><dd class="col-sm-9">{contact}</dd>
<dt class="col-sm-3">Email</dt><dd class="col-sm-9">{email}</dd>
<dt class="col-sm-3">Address</dt><dd class="col-sm-9">{address}</dd>
<dt class="col-sm-3">Date of birth</dt><dd class="col-sm-9">{dob}</dd>
<dt class="col-sm-3">Last donation</dt><dd class="col-sm-9">{last} {eligibility}</dd>
</dl>
<h2 class="h5">Donations</h2>
{donations}"#,
        code = escape(&d.donor_code),
        first = escape(&d.first_name),
        last_name = escape(&d.last_name),
        group = d.blood_group,
        contact = escape(&d.contact_number),
        email = escape_opt(d.email.as_deref()),
        address = escape_opt(d.address.as_deref()),
        dob = d.date_of_birth,
        donations = bag_table(&detail.donations, None, "No donations recorded."),
    );
    layout(&format!("Donor {}", d.donor_code), Some(viewer), flash, &content)
}

/// Donor registration form.
#[must_use]
pub fn add_donor_page(viewer: &AuthenticatedStaff, flash: Option<&Flash>) -> String {
    let content: String = format!(
        r#"<form method="post" action="/add_donor" class="col-md-6">
{first}
{last}
<div class="mb-3"><label class="form-label" for="blood_group">Blood group</label>{group}</div>
{contact}
{email}
{address}
{dob}
<button class="btn btn-danger" type="submit">Register donor</button>
</form>"#,
        first = input("First name", "first_name", "text", "", true),
        last = input("Last name", "last_name", "text", "", true),
        group = blood_group_select("blood_group", None, None),
        contact = input("Contact number", "contact_number", "tel", "", true),
        email = input("Email", "email", "email", "", false),
        address = input("Address", "address", "text", "", false),
        dob = input("Date of birth", "date_of_birth", "date", "", true),
    );
    layout("Register Donor", Some(viewer), flash, &content)
}

/// Confirmation shown after a donor is registered.
#[must_use]
pub fn donor_success_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    registered: &RegisterDonorResponse,
) -> String {
    let content: String = format!(
        r#"<p>The donor's ID is <strong class="fs-4">{code}</strong>. Give it to the donor for future visits.</p>
<p><a class="btn btn-danger" href="/donor/{id}">View donor</a> <a class="btn btn-outline-danger" href="/add_donor">Register another</a></p>"#,
        code = escape(&registered.donor_code),
        id = registered.donor_id,
    );
    layout("Donor Registered", Some(viewer), flash, &content)
}

// ============================================================================
// Inventory
// ============================================================================

fn status_badge(bag: &BagInfo) -> &'static str {
    match bag.status {
        BagStatus::Used => r#"<span class="badge bg-secondary">Used</span>"#,
        BagStatus::Available if bag.expired => r#"<span class="badge bg-dark">Expired</span>"#,
        BagStatus::Available if bag.expiring_soon => {
            r#"<span class="badge bg-warning text-dark">Expiring soon</span>"#
        }
        BagStatus::Available => r#"<span class="badge bg-success">Available</span>"#,
    }
}

fn bag_actions(bag: &BagInfo, viewer: &AuthenticatedStaff) -> String {
    let mut actions: String = String::new();
    if bag.status == BagStatus::Available && !bag.expired {
        let _ = write!(
            actions,
            r#"<a class="btn btn-sm btn-outline-danger" href="/inventory/use/{}">Use</a> "#,
            bag.bag_id
        );
    }
    if viewer.is_admin() {
        let _ = write!(
            actions,
            r#"<a class="btn btn-sm btn-outline-secondary" href="/inventory/edit/{id}">Edit</a> "#,
            id = bag.bag_id
        );
        if bag.status == BagStatus::Available {
            let _ = write!(
                actions,
                r#"<form method="post" action="/inventory/delete/{id}" class="d-inline"><button class="btn btn-sm btn-outline-dark" type="submit">Delete</button></form>"#,
                id = bag.bag_id
            );
        }
    }
    actions
}

/// Bag table; `viewer` adds an actions column.
fn bag_table(bags: &[BagInfo], viewer: Option<&AuthenticatedStaff>, empty: &str) -> String {
    if bags.is_empty() {
        return empty_state(empty);
    }
    let mut rows: String = String::new();
    for bag in bags {
        let donor: String = match (bag.donor_id, bag.donor_code.as_deref()) {
            (Some(id), Some(code)) => format!(r#"<a href="/donor/{id}">{}</a>"#, escape(code)),
            _ => String::from("Bank direct"),
        };
        let actions: String = viewer
            .map(|v| format!("<td>{}</td>", bag_actions(bag, v)))
            .unwrap_or_default();
        let _ = write!(
            rows,
            "<tr><td>#{id}</td><td>{group}</td><td>{donor}</td><td>{bank}</td><td>{donated}</td><td>{expires}</td><td>{status}</td>{actions}</tr>",
            id = bag.bag_id,
            group = bag.blood_group,
            bank = escape_opt(bag.bank_name.as_deref()),
            donated = bag.donation_date,
            expires = bag.expiry_date,
            status = status_badge(bag),
        );
    }

    let mut headings: Vec<&str> = vec![
        "Bag", "Blood group", "Donor", "Bank", "Donated", "Expires", "Status",
    ];
    if viewer.is_some() {
        headings.push("Actions");
    }
    table(&headings, &rows)
}

fn bank_select(banks: &[BankInfo], selected: Option<i64>, blank: &str) -> String {
    let mut options: String = format!(r#"<option value="">{}</option>"#, escape(blank));
    for bank in banks {
        let attr: &str = if selected == Some(bank.bank_id) {
            " selected"
        } else {
            ""
        };
        let location: String = bank
            .location
            .as_deref()
            .map(|l| format!(" ({})", escape(l)))
            .unwrap_or_default();
        let _ = write!(
            options,
            r#"<option value="{id}"{attr}>{name}{location}</option>"#,
            id = bank.bank_id,
            name = escape(&bank.name),
        );
    }
    format!(r#"<select class="form-select" name="bank_id" id="bank_id">{options}</select>"#)
}

/// Inventory listing with filters.
#[must_use]
pub fn inventory_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    inventory: &ListInventoryResponse,
) -> String {
    let content: String = format!(
        r#"<form method="get" action="/inventory" class="row g-2 mb-3">
<div class="col-auto">{group}</div>
<div class="col-auto">{bank}</div>
<div class="col-auto"><button class="btn btn-outline-danger" type="submit">Filter</button></div>
<div class="col-auto"><a class="btn btn-danger" href="/inventory/add">Log a bag</a></div>
</form>
{bags}"#,
        group = blood_group_select("blood_group", inventory.blood_group, Some("All blood groups")),
        bank = bank_select(&inventory.banks, inventory.bank_id, "All banks"),
        bags = bag_table(&inventory.bags, Some(viewer), "No bags match."),
    );
    layout("Inventory", Some(viewer), flash, &content)
}

/// Form to log a donated bag.
#[must_use]
pub fn add_inventory_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    donors: &[DonorInfo],
    banks: &[BankInfo],
    today: Date,
) -> String {
    let mut donor_options: String =
        String::from(r#"<option value="">None (bank direct)</option>"#);
    for d in donors {
        let _ = write!(
            donor_options,
            r#"<option value="{id}">{code}: {last}, {first} ({group})</option>"#,
            id = d.donor_id,
            code = escape(&d.donor_code),
            last = escape(&d.last_name),
            first = escape(&d.first_name),
            group = d.blood_group,
        );
    }

    let content: String = format!(
        r#"<form method="post" action="/inventory/add" class="col-md-6">
<div class="mb-3"><label class="form-label" for="donor_id">Donor</label><select class="form-select" name="donor_id" id="donor_id">{donor_options}</select></div>
<div class="mb-3"><label class="form-label" for="blood_group">Blood group</label>{group}<div class="form-text">Taken from the donor when one is selected.</div></div>
<div class="mb-3"><label class="form-label" for="bank_id">Blood bank</label>{bank}</div>
{date}
<p class="form-text">Expiry is set to 42 days after the donation date.</p>
<button class="btn btn-danger" type="submit">Log bag</button>
</form>"#,
        group = blood_group_select("blood_group", None, Some("From donor")),
        bank = bank_select(banks, None, "None"),
        date = input("Donation date", "donation_date", "date", &today.to_string(), true),
    );
    layout("Log a Bag", Some(viewer), flash, &content)
}

/// Admin form to correct a bag.
#[must_use]
pub fn edit_bag_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    bag: &BagInfo,
    banks: &[BankInfo],
) -> String {
    let content: String = format!(
        r#"<p>Status: {status}. Expiry is recomputed from the donation date.</p>
<form method="post" action="/inventory/edit/{id}" class="col-md-6">
<div class="mb-3"><label class="form-label" for="blood_group">Blood group</label>{group}</div>
<div class="mb-3"><label class="form-label" for="bank_id">Blood bank</label>{bank}</div>
{date}
<button class="btn btn-danger" type="submit">Save</button>
<a class="btn btn-link" href="/inventory">Cancel</a>
</form>"#,
        status = status_badge(bag),
        id = bag.bag_id,
        group = blood_group_select("blood_group", Some(bag.blood_group), None),
        bank = bank_select(banks, bag.bank_id, "None"),
        date = input(
            "Donation date",
            "donation_date",
            "date",
            &bag.donation_date.to_string(),
            true
        ),
    );
    layout(&format!("Edit Bag #{}", bag.bag_id), Some(viewer), flash, &content)
}

// ============================================================================
// Transfusions
// ============================================================================

/// Form to record a transfusion from a bag.
#[must_use]
pub fn use_bag_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    form: &UseBagFormResponse,
    today: Date,
) -> String {
    let bag: &BagInfo = &form.bag;
    let mut recipient_options: String =
        String::from(r#"<option value="">Select a recipient</option>"#);
    for r in &form.compatible_recipients {
        let _ = write!(
            recipient_options,
            r#"<option value="{id}">{name} ({group}, {hospital})</option>"#,
            id = r.recipient_id,
            name = escape(&r.full_name),
            group = r.blood_group,
            hospital = escape(&r.hospital),
        );
    }

    let content: String = format!(
        r#"<p>Bag #{id}: {group}, expires {expires}.</p>
<form method="post" action="/inventory/use/{id}" class="col-md-6">
<h2 class="h5">Existing recipient</h2>
<div class="mb-3"><select class="form-select" name="recipient_id" id="recipient_id">{recipient_options}</select></div>
<h2 class="h5">Or a new recipient</h2>
{name}
<div class="mb-3"><label class="form-label" for="new_blood_group">Blood group</label>{new_group}</div>
{hospital}
{contact}
{date}
<button class="btn btn-danger" type="submit">Record transfusion</button>
</form>"#,
        id = bag.bag_id,
        group = bag.blood_group,
        expires = bag.expiry_date,
        name = input("Full name", "new_full_name", "text", "", false),
        new_group = blood_group_select("new_blood_group", None, Some("")),
        hospital = input("Hospital", "new_hospital", "text", "", false),
        contact = input("Contact number", "new_contact_number", "tel", "", false),
        date = input("Transfusion date", "transfusion_date", "date", &today.to_string(), true),
    );
    layout(&format!("Use Bag #{}", bag.bag_id), Some(viewer), flash, &content)
}

/// All recipients.
#[must_use]
pub fn recipients_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    recipients: &ListRecipientsResponse,
) -> String {
    let content: String = if recipients.recipients.is_empty() {
        empty_state("No recipients yet. They are added when a transfusion is recorded.")
    } else {
        let mut rows: String = String::new();
        for r in &recipients.recipients {
            let _ = write!(
                rows,
                "<tr><td>{name}</td><td>{group}</td><td>{hospital}</td><td>{contact}</td></tr>",
                name = escape(&r.full_name),
                group = r.blood_group,
                hospital = escape(&r.hospital),
                contact = escape_opt(r.contact_number.as_deref()),
            );
        }
        table(&["Name", "Blood group", "Hospital", "Contact"], &rows)
    };
    layout("Recipients", Some(viewer), flash, &content)
}

/// All transfusions, newest first.
#[must_use]
pub fn transfusions_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    transfusions: &ListTransfusionsResponse,
) -> String {
    layout(
        "Transfusions",
        Some(viewer),
        flash,
        &transfusion_table(&transfusions.transfusions),
    )
}

// ============================================================================
// Staff administration
// ============================================================================

/// Staff accounts with the create form.
#[must_use]
pub fn users_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    staff: &ListStaffResponse,
) -> String {
    let mut rows: String = String::new();
    for s in &staff.staff {
        let role: &str = if s.is_admin { "Admin" } else { "Staff" };
        let pending: &str = if s.must_change_password {
            r#" <span class="badge bg-warning text-dark">Password change pending</span>"#
        } else {
            ""
        };
        let delete: String = if s.staff_id == viewer.staff_id {
            String::new()
        } else {
            format!(
                r#"<form method="post" action="/admin/users/delete/{}" class="d-inline"><button class="btn btn-sm btn-outline-dark" type="submit">Delete</button></form>"#,
                s.staff_id
            )
        };
        let _ = write!(
            rows,
            r#"<tr><td>{name}{pending}</td><td>{username}</td><td>{code}</td><td>{role}</td><td>{last_login}</td><td><a class="btn btn-sm btn-outline-secondary" href="/admin/users/edit/{id}">Edit</a> {delete}</td></tr>"#,
            name = escape(&s.full_name),
            username = escape_opt(s.username.as_deref()),
            code = escape_opt(s.secret_code.as_deref()),
            last_login = escape_opt(s.last_login_at.as_deref()),
            id = s.staff_id,
        );
    }

    let content: String = format!(
        r#"{table}
<h2 class="h5 mt-4">Add account</h2>
<form method="post" action="/admin/users/add" class="col-md-6">
{full_name}
{username}
{code}
{password}
{confirm}
{is_admin}
{must_change}
<p class="form-text">Administrators sign in with a username; staff sign in with a secret code.</p>
<button class="btn btn-danger" type="submit">Create account</button>
</form>"#,
        table = table(
            &["Name", "Username", "Secret code", "Role", "Last login", ""],
            &rows
        ),
        full_name = input("Full name", "full_name", "text", "", true),
        username = input("Username", "username", "text", "", false),
        code = input("Secret code", "secret_code", "text", "", false),
        password = input("Password", "password", "password", "", true),
        confirm = input(
            "Confirm password",
            "password_confirmation",
            "password",
            "",
            true
        ),
        is_admin = checkbox("Administrator", "is_admin", false),
        must_change = checkbox(
            "Require password change on first login",
            "must_change_password",
            true
        ),
    );
    layout("Staff Accounts", Some(viewer), flash, &content)
}

/// Form to edit a staff account.
#[must_use]
pub fn edit_user_page(
    viewer: &AuthenticatedStaff,
    flash: Option<&Flash>,
    staff: &StaffInfo,
) -> String {
    let content: String = format!(
        r#"<form method="post" action="/admin/users/edit/{id}" class="col-md-6">
{full_name}
{username}
{code}
{is_admin}
{must_change}
<h2 class="h6">Reset password</h2>
<p class="form-text">Leave blank to keep the current password.</p>
{password}
{confirm}
<button class="btn btn-danger" type="submit">Save</button>
<a class="btn btn-link" href="/admin/users">Cancel</a>
</form>"#,
        id = staff.staff_id,
        full_name = input("Full name", "full_name", "text", &staff.full_name, true),
        username = input(
            "Username",
            "username",
            "text",
            staff.username.as_deref().unwrap_or_default(),
            false
        ),
        code = input(
            "Secret code",
            "secret_code",
            "text",
            staff.secret_code.as_deref().unwrap_or_default(),
            false
        ),
        is_admin = checkbox("Administrator", "is_admin", staff.is_admin),
        must_change = checkbox(
            "Require password change on next login",
            "must_change_password",
            staff.must_change_password
        ),
        password = input("New password", "new_password", "password", "", false),
        confirm = input(
            "Confirm new password",
            "new_password_confirmation",
            "password",
            "",
            false
        ),
    );
    layout(
        &format!("Edit {}", staff.full_name),
        Some(viewer),
        flash,
        &content,
    )
}
