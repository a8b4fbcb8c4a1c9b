// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bloodlink_domain::{
    BagSnapshot, BagStatus, BloodGroup, DomainError, format_date, validate_transfusion,
};
use diesel::prelude::*;
use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use time::Date;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::RecipientChoice;
use crate::diesel_schema::{inventory, recipients, transfusions};
use crate::error::PersistenceError;
use crate::queries::{stored_bag_status, stored_blood_group, stored_date};

backend_fn! {
/// Records a transfusion of one bag to a recipient.
///
/// Creates the recipient first when new recipient fields are given. The
/// bag must be available, unexpired on `transfusion_date`, and compatible
/// with the recipient's blood group. Marking the bag used, creating the
/// recipient and inserting the transfusion row are one transaction.
///
/// Returns the new transfusion ID.
///
/// # Errors
///
/// - `PersistenceError::BagNotFound` / `RecipientNotFound` for unknown references
/// - `PersistenceError::RuleViolation` when the bag is used, expired, or
///   incompatible
pub fn record_transfusion(
    conn: &mut _,
    bag_id: i64,
    recipient: &RecipientChoice,
    transfusion_date: Date,
    recorded_by: Option<i64>,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let (group, expiry, status): (String, String, String) = inventory::table
            .filter(inventory::bag_id.eq(bag_id))
            .select((
                inventory::blood_group,
                inventory::expiry_date,
                inventory::status,
            ))
            .first(conn)
            .optional()?
            .ok_or(PersistenceError::BagNotFound(bag_id))?;

        let bag = BagSnapshot {
            bag_id,
            blood_group: stored_blood_group(&group)?,
            expiry_date: stored_date(&expiry)?,
            status: stored_bag_status(&status)?,
        };

        let (recipient_id, recipient_group): (i64, BloodGroup) = match recipient {
            RecipientChoice::Existing(recipient_id) => {
                let stored_group: String = recipients::table
                    .filter(recipients::recipient_id.eq(*recipient_id))
                    .select(recipients::blood_group)
                    .first(conn)
                    .optional()?
                    .ok_or(PersistenceError::RecipientNotFound(*recipient_id))?;
                (*recipient_id, stored_blood_group(&stored_group)?)
            }
            RecipientChoice::New(new_recipient) => {
                diesel::insert_into(recipients::table)
                    .values((
                        recipients::full_name.eq(&new_recipient.full_name),
                        recipients::blood_group.eq(new_recipient.blood_group.as_str()),
                        recipients::hospital.eq(&new_recipient.hospital),
                        recipients::contact_number.eq(new_recipient.contact_number.as_deref()),
                    ))
                    .execute(conn)?;
                let recipient_id: i64 = conn.get_last_insert_rowid()?;
                info!(recipient_id, "Recipient created");
                (recipient_id, new_recipient.blood_group)
            }
        };

        validate_transfusion(&bag, recipient_group, transfusion_date)?;

        let rows_affected: usize = diesel::update(inventory::table)
            .filter(inventory::bag_id.eq(bag_id))
            .filter(inventory::status.eq(BagStatus::Available.as_str()))
            .set(inventory::status.eq(BagStatus::Used.as_str()))
            .execute(conn)?;

        if rows_affected != 1 {
            return Err(PersistenceError::RuleViolation(DomainError::BagNotAvailable {
                bag_id,
                status: BagStatus::Used,
            }));
        }

        diesel::insert_into(transfusions::table)
            .values((
                transfusions::bag_id.eq(bag_id),
                transfusions::recipient_id.eq(recipient_id),
                transfusions::transfusion_date.eq(format_date(transfusion_date)),
                transfusions::recorded_by.eq(recorded_by),
            ))
            .execute(conn)?;

        let transfusion_id: i64 = conn.get_last_insert_rowid()?;

        info!(transfusion_id, bag_id, recipient_id, "Transfusion recorded");
        Ok(transfusion_id)
    })
}
}
