// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory, blood bank and stock queries.
//!
//! Bag listings left-join the bank and donor tables so that views can show
//! the bank name and donor code without a second round-trip.

use bloodlink_domain::{BagStatus, BloodGroup};
use diesel::prelude::*;
use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use time::Date;
use tracing::debug;

use crate::data_models::{BagData, BankData};
use crate::diesel_schema::{blood_banks, donors, inventory};
use crate::error::PersistenceError;
use crate::queries::{stored_bag_status, stored_blood_group, stored_date};

/// Diesel Queryable struct for inventory rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = inventory)]
pub(crate) struct BagRow {
    pub(crate) bag_id: i64,
    pub(crate) blood_group: String,
    pub(crate) bank_id: Option<i64>,
    pub(crate) donor_id: Option<i64>,
    pub(crate) donation_date: String,
    pub(crate) expiry_date: String,
    pub(crate) status: String,
}

/// Diesel Queryable struct for blood bank rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = blood_banks)]
struct BankRow {
    bank_id: i64,
    name: String,
    location: Option<String>,
}

/// A bag row with the joined bank name and donor code.
type BagJoinRow = (BagRow, Option<String>, Option<String>);

fn bag_from_join((row, bank_name, donor_code): BagJoinRow) -> Result<BagData, PersistenceError> {
    Ok(BagData {
        bag_id: row.bag_id,
        blood_group: stored_blood_group(&row.blood_group)?,
        bank_id: row.bank_id,
        bank_name,
        donor_id: row.donor_id,
        donor_code,
        donation_date: stored_date(&row.donation_date)?,
        expiry_date: stored_date(&row.expiry_date)?,
        status: stored_bag_status(&row.status)?,
    })
}

backend_fn! {
/// Lists bags ordered by ascending expiry date.
///
/// Both filters are optional and combine with AND.
///
/// # Errors
///
/// Returns an error if the query fails or a row holds an invalid value.
pub fn list_inventory(
    conn: &mut _,
    blood_group: Option<BloodGroup>,
    bank_id: Option<i64>,
) -> Result<Vec<BagData>, PersistenceError> {
    debug!(?blood_group, ?bank_id, "Listing inventory");

    let mut query = inventory::table
        .left_join(blood_banks::table)
        .left_join(donors::table)
        .select((
            BagRow::as_select(),
            blood_banks::name.nullable(),
            donors::donor_code.nullable(),
        ))
        .order_by((inventory::expiry_date.asc(), inventory::bag_id.asc()))
        .into_boxed();

    if let Some(group) = blood_group {
        query = query.filter(inventory::blood_group.eq(group.as_str()));
    }
    if let Some(bank) = bank_id {
        query = query.filter(inventory::bank_id.eq(bank));
    }

    let rows: Vec<BagJoinRow> = query.load(conn)?;
    rows.into_iter().map(bag_from_join).collect()
}
}

backend_fn! {
/// Retrieves a single bag.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the bag does not exist.
pub fn get_bag(conn: &mut _, bag_id: i64) -> Result<Option<BagData>, PersistenceError> {
    debug!("Looking up bag ID: {}", bag_id);

    let row: Option<BagJoinRow> = inventory::table
        .left_join(blood_banks::table)
        .left_join(donors::table)
        .filter(inventory::bag_id.eq(bag_id))
        .select((
            BagRow::as_select(),
            blood_banks::name.nullable(),
            donors::donor_code.nullable(),
        ))
        .first(conn)
        .optional()?;

    row.map(bag_from_join).transpose()
}
}

backend_fn! {
/// Lists a donor's bags, most recent donation first.
///
/// # Errors
///
/// Returns an error if the query fails or a row holds an invalid value.
pub fn list_bags_for_donor(conn: &mut _, donor_id: i64) -> Result<Vec<BagData>, PersistenceError> {
    debug!("Listing donation history for donor ID: {}", donor_id);

    let rows: Vec<BagJoinRow> = inventory::table
        .left_join(blood_banks::table)
        .left_join(donors::table)
        .filter(inventory::donor_id.eq(donor_id))
        .select((
            BagRow::as_select(),
            blood_banks::name.nullable(),
            donors::donor_code.nullable(),
        ))
        .order_by((inventory::donation_date.desc(), inventory::bag_id.desc()))
        .load(conn)?;

    rows.into_iter().map(bag_from_join).collect()
}
}

backend_fn! {
/// Lists all bags still marked `Available`, ordered by expiry.
///
/// Expired bags are included; callers split them out by date.
///
/// # Errors
///
/// Returns an error if the query fails or a row holds an invalid value.
pub fn list_available_bags(conn: &mut _) -> Result<Vec<BagData>, PersistenceError> {
    let rows: Vec<BagJoinRow> = inventory::table
        .left_join(blood_banks::table)
        .left_join(donors::table)
        .filter(inventory::status.eq(BagStatus::Available.as_str()))
        .select((
            BagRow::as_select(),
            blood_banks::name.nullable(),
            donors::donor_code.nullable(),
        ))
        .order_by((inventory::expiry_date.asc(), inventory::bag_id.asc()))
        .load(conn)?;

    rows.into_iter().map(bag_from_join).collect()
}
}

backend_fn! {
/// Returns the donation date of every bag ever logged.
///
/// # Errors
///
/// Returns an error if the query fails or a row holds an invalid date.
pub fn list_donation_dates(conn: &mut _) -> Result<Vec<Date>, PersistenceError> {
    let dates: Vec<String> = inventory::table
        .select(inventory::donation_date)
        .order_by(inventory::donation_date.asc())
        .load(conn)?;

    dates.iter().map(|d| stored_date(d)).collect()
}
}

backend_fn! {
/// Lists all blood banks by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_banks(conn: &mut _) -> Result<Vec<BankData>, PersistenceError> {
    let rows: Vec<BankRow> = blood_banks::table
        .select(BankRow::as_select())
        .order_by(blood_banks::name.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| BankData {
            bank_id: row.bank_id,
            name: row.name,
            location: row.location,
        })
        .collect())
}
}

backend_fn! {
/// Checks whether a blood bank exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn bank_exists(conn: &mut _, bank_id: i64) -> Result<bool, PersistenceError> {
    use diesel::dsl::{exists, select};

    Ok(select(exists(blood_banks::table.filter(blood_banks::bank_id.eq(bank_id))))
        .get_result(conn)?)
}
}
