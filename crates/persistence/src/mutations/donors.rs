// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bloodlink_domain::{DonorCode, format_date};
use diesel::prelude::*;
use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::NewDonor;
use crate::diesel_schema::donors;
use crate::error::PersistenceError;

backend_fn! {
/// Registers a donor and assigns the donor code.
///
/// The insert and the code assignment share one transaction, so a
/// uniqueness failure leaves no row behind.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` naming `contact_number` or
/// `email` when either is already registered, or an error if the insert
/// fails.
pub fn register_donor(
    conn: &mut _,
    donor: &NewDonor,
) -> Result<(i64, DonorCode), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(donors::table)
            .values((
                donors::first_name.eq(&donor.first_name),
                donors::last_name.eq(&donor.last_name),
                donors::blood_group.eq(donor.blood_group.as_str()),
                donors::contact_number.eq(&donor.contact_number),
                donors::email.eq(donor.email.as_deref()),
                donors::address.eq(donor.address.as_deref()),
                donors::date_of_birth.eq(format_date(donor.date_of_birth)),
            ))
            .execute(conn)?;

        let donor_id: i64 = conn.get_last_insert_rowid()?;
        let donor_code: DonorCode = DonorCode::from_donor_id(donor_id);

        diesel::update(donors::table)
            .filter(donors::donor_id.eq(donor_id))
            .set(donors::donor_code.eq(donor_code.value()))
            .execute(conn)?;

        info!(donor_id, donor_code = %donor_code, "Donor registered");
        Ok((donor_id, donor_code))
    })
}
}
