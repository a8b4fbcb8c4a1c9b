// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory bag and blood bank mutations.

use bloodlink_domain::{
    BagStatus, BloodGroup, advance_last_donation, compute_expiry, format_date,
    resolve_bag_blood_group,
};
use diesel::prelude::*;
use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use time::Date;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{BagUpdate, NewBag};
use crate::diesel_schema::{blood_banks, donors, inventory};
use crate::error::PersistenceError;
use crate::queries::{stored_bag_status, stored_blood_group, stored_optional_date};

backend_fn! {
/// Logs a new bag.
///
/// For a donor-linked bag the blood group comes from the donor and the
/// donor's last donation date is advanced. Expiry is always computed from
/// the donation date. Every write happens in one transaction.
///
/// # Errors
///
/// - `PersistenceError::DonorNotFound` / `BankNotFound` for unknown references
/// - `PersistenceError::RuleViolation` for a missing blood group or a group
///   that disagrees with the donor's
pub fn add_bag(conn: &mut _, bag: &NewBag) -> Result<i64, PersistenceError> {
    let expiry_date: Date = compute_expiry(bag.donation_date)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let donor: Option<(String, Option<String>)> = match bag.donor_id {
            Some(donor_id) => Some(
                donors::table
                    .filter(donors::donor_id.eq(donor_id))
                    .select((donors::blood_group, donors::last_donation_date))
                    .first(conn)
                    .optional()?
                    .ok_or(PersistenceError::DonorNotFound(donor_id))?,
            ),
            None => None,
        };

        let donor_group: Option<BloodGroup> = donor
            .as_ref()
            .map(|(group, _)| stored_blood_group(group))
            .transpose()?;
        let blood_group: BloodGroup = resolve_bag_blood_group(donor_group, bag.blood_group)?;

        if let Some(bank_id) = bag.bank_id {
            let exists: bool = diesel::select(diesel::dsl::exists(
                blood_banks::table.filter(blood_banks::bank_id.eq(bank_id)),
            ))
            .get_result(conn)?;
            if !exists {
                return Err(PersistenceError::BankNotFound(bank_id));
            }
        }

        diesel::insert_into(inventory::table)
            .values((
                inventory::blood_group.eq(blood_group.as_str()),
                inventory::bank_id.eq(bag.bank_id),
                inventory::donor_id.eq(bag.donor_id),
                inventory::donation_date.eq(format_date(bag.donation_date)),
                inventory::expiry_date.eq(format_date(expiry_date)),
                inventory::status.eq(BagStatus::Available.as_str()),
            ))
            .execute(conn)?;

        let bag_id: i64 = conn.get_last_insert_rowid()?;

        if let (Some(donor_id), Some((_, last_donation))) = (bag.donor_id, &donor) {
            let current: Option<Date> = stored_optional_date(last_donation.as_deref())?;
            let advanced: Date = advance_last_donation(current, bag.donation_date);
            diesel::update(donors::table)
                .filter(donors::donor_id.eq(donor_id))
                .set(donors::last_donation_date.eq(format_date(advanced)))
                .execute(conn)?;
        }

        info!(bag_id, blood_group = %blood_group, "Bag added to inventory");
        Ok(bag_id)
    })
}
}

backend_fn! {
/// Overwrites a bag's blood group, bank and donation date.
///
/// Expiry is recomputed. Status is never touched. A donor-linked bag must
/// keep its donor's blood group.
///
/// # Errors
///
/// - `PersistenceError::BagNotFound` / `BankNotFound` for unknown references
/// - `PersistenceError::RuleViolation` for a group that disagrees with the
///   linked donor's
pub fn update_bag(conn: &mut _, bag_id: i64, update: &BagUpdate) -> Result<(), PersistenceError> {
    let expiry_date: Date = compute_expiry(update.donation_date)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let donor_id: Option<i64> = inventory::table
            .filter(inventory::bag_id.eq(bag_id))
            .select(inventory::donor_id)
            .first(conn)
            .optional()?
            .ok_or(PersistenceError::BagNotFound(bag_id))?;

        if let Some(donor_id) = donor_id {
            let donor_group: String = donors::table
                .filter(donors::donor_id.eq(donor_id))
                .select(donors::blood_group)
                .first(conn)?;
            resolve_bag_blood_group(
                Some(stored_blood_group(&donor_group)?),
                Some(update.blood_group),
            )?;
        }

        if let Some(bank_id) = update.bank_id {
            let exists: bool = diesel::select(diesel::dsl::exists(
                blood_banks::table.filter(blood_banks::bank_id.eq(bank_id)),
            ))
            .get_result(conn)?;
            if !exists {
                return Err(PersistenceError::BankNotFound(bank_id));
            }
        }

        diesel::update(inventory::table)
            .filter(inventory::bag_id.eq(bag_id))
            .set((
                inventory::blood_group.eq(update.blood_group.as_str()),
                inventory::bank_id.eq(update.bank_id),
                inventory::donation_date.eq(format_date(update.donation_date)),
                inventory::expiry_date.eq(format_date(expiry_date)),
            ))
            .execute(conn)?;

        info!(bag_id, "Bag updated");
        Ok(())
    })
}
}

backend_fn! {
/// Deletes a bag that has not been transfused.
///
/// # Errors
///
/// Returns `PersistenceError::BagNotFound` if the bag does not exist,
/// `PersistenceError::BagReferenced` if it has been used, or an error if
/// the delete fails.
pub fn delete_bag(conn: &mut _, bag_id: i64) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let status: String = inventory::table
            .filter(inventory::bag_id.eq(bag_id))
            .select(inventory::status)
            .first(conn)
            .optional()?
            .ok_or(PersistenceError::BagNotFound(bag_id))?;

        if stored_bag_status(&status)? == BagStatus::Used {
            return Err(PersistenceError::BagReferenced { bag_id });
        }

        diesel::delete(inventory::table)
            .filter(inventory::bag_id.eq(bag_id))
            .execute(conn)?;

        info!(bag_id, "Bag deleted");
        Ok(())
    })
}
}

backend_fn! {
/// Creates a blood bank.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the name is taken, or an
/// error if the insert fails.
pub fn create_bank(
    conn: &mut _,
    name: &str,
    location: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(blood_banks::table)
        .values((
            blood_banks::name.eq(name),
            blood_banks::location.eq(location),
        ))
        .execute(conn)?;

    let bank_id: i64 = conn.get_last_insert_rowid()?;

    info!(bank_id, name, "Blood bank created");
    Ok(bank_id)
}
}
