// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donor registry queries.

use bloodlink_domain::DonorCode;
use diesel::prelude::*;
use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use tracing::debug;

use crate::data_models::DonorData;
use crate::diesel_schema::donors;
use crate::error::PersistenceError;
use crate::queries::{stored_blood_group, stored_date, stored_optional_date};

/// Diesel Queryable struct for donor rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = donors)]
pub(crate) struct DonorRow {
    donor_id: i64,
    first_name: String,
    last_name: String,
    blood_group: String,
    contact_number: String,
    email: Option<String>,
    address: Option<String>,
    date_of_birth: String,
    last_donation_date: Option<String>,
    created_at: String,
}

impl TryFrom<DonorRow> for DonorData {
    type Error = PersistenceError;

    fn try_from(row: DonorRow) -> Result<Self, Self::Error> {
        Ok(Self {
            donor_id: row.donor_id,
            donor_code: DonorCode::from_donor_id(row.donor_id),
            first_name: row.first_name,
            last_name: row.last_name,
            blood_group: stored_blood_group(&row.blood_group)?,
            contact_number: row.contact_number,
            email: row.email,
            address: row.address,
            date_of_birth: stored_date(&row.date_of_birth)?,
            last_donation_date: stored_optional_date(row.last_donation_date.as_deref())?,
            created_at: row.created_at,
        })
    }
}

backend_fn! {
/// Lists all donors ordered by last name, then first name.
///
/// # Errors
///
/// Returns an error if the query fails or a row holds an invalid value.
pub fn list_donors(conn: &mut _) -> Result<Vec<DonorData>, PersistenceError> {
    debug!("Listing donors");

    let rows: Vec<DonorRow> = donors::table
        .select(DonorRow::as_select())
        .order_by((donors::last_name.asc(), donors::first_name.asc()))
        .load(conn)?;

    rows.into_iter().map(DonorData::try_from).collect()
}
}

backend_fn! {
/// Retrieves a donor by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the donor does not exist.
pub fn get_donor(conn: &mut _, donor_id: i64) -> Result<Option<DonorData>, PersistenceError> {
    debug!("Looking up donor ID: {}", donor_id);

    let row: Option<DonorRow> = donors::table
        .filter(donors::donor_id.eq(donor_id))
        .select(DonorRow::as_select())
        .first(conn)
        .optional()?;

    row.map(DonorData::try_from).transpose()
}
}
