// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recipient and transfusion queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use tracing::debug;

use crate::data_models::{RecipientData, TransfusionData};
use crate::diesel_schema::{inventory, recipients, transfusions};
use crate::error::PersistenceError;
use crate::queries::{stored_blood_group, stored_date};

/// Diesel Queryable struct for recipient rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = recipients)]
pub(crate) struct RecipientRow {
    recipient_id: i64,
    full_name: String,
    blood_group: String,
    hospital: String,
    contact_number: Option<String>,
    created_at: String,
}

impl TryFrom<RecipientRow> for RecipientData {
    type Error = PersistenceError;

    fn try_from(row: RecipientRow) -> Result<Self, Self::Error> {
        Ok(Self {
            recipient_id: row.recipient_id,
            full_name: row.full_name,
            blood_group: stored_blood_group(&row.blood_group)?,
            hospital: row.hospital,
            contact_number: row.contact_number,
            created_at: row.created_at,
        })
    }
}

backend_fn! {
/// Lists all recipients by name.
///
/// # Errors
///
/// Returns an error if the query fails or a row holds an invalid value.
pub fn list_recipients(conn: &mut _) -> Result<Vec<RecipientData>, PersistenceError> {
    debug!("Listing recipients");

    let rows: Vec<RecipientRow> = recipients::table
        .select(RecipientRow::as_select())
        .order_by((recipients::full_name.asc(), recipients::recipient_id.asc()))
        .load(conn)?;

    rows.into_iter().map(RecipientData::try_from).collect()
}
}

backend_fn! {
/// Retrieves a recipient by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the recipient does not exist.
pub fn get_recipient(
    conn: &mut _,
    recipient_id: i64,
) -> Result<Option<RecipientData>, PersistenceError> {
    let row: Option<RecipientRow> = recipients::table
        .filter(recipients::recipient_id.eq(recipient_id))
        .select(RecipientRow::as_select())
        .first(conn)
        .optional()?;

    row.map(RecipientData::try_from).transpose()
}
}

/// Transfusion columns joined with the bag's group and the recipient's
/// name and hospital.
type TransfusionJoinRow = (i64, i64, String, i64, String, String, String, Option<i64>);

backend_fn! {
/// Lists transfusions, most recent first.
///
/// # Errors
///
/// Returns an error if the query fails or a row holds an invalid value.
pub fn list_transfusions(conn: &mut _) -> Result<Vec<TransfusionData>, PersistenceError> {
    debug!("Listing transfusions");

    let rows: Vec<TransfusionJoinRow> = transfusions::table
        .inner_join(inventory::table)
        .inner_join(recipients::table)
        .select((
            transfusions::transfusion_id,
            transfusions::bag_id,
            inventory::blood_group,
            transfusions::recipient_id,
            recipients::full_name,
            recipients::hospital,
            transfusions::transfusion_date,
            transfusions::recorded_by,
        ))
        .order_by((
            transfusions::transfusion_date.desc(),
            transfusions::transfusion_id.desc(),
        ))
        .load(conn)?;

    rows.into_iter()
        .map(
            |(
                transfusion_id,
                bag_id,
                blood_group,
                recipient_id,
                recipient_name,
                hospital,
                transfusion_date,
                recorded_by,
            )| {
                Ok(TransfusionData {
                    transfusion_id,
                    bag_id,
                    blood_group: stored_blood_group(&blood_group)?,
                    recipient_id,
                    recipient_name,
                    hospital,
                    transfusion_date: stored_date(&transfusion_date)?,
                    recorded_by,
                })
            },
        )
        .collect()
}
}

backend_fn! {
/// Counts transfusion rows referencing a bag.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_transfusions_for_bag(conn: &mut _, bag_id: i64) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    Ok(transfusions::table
        .filter(transfusions::bag_id.eq(bag_id))
        .select(count(transfusions::transfusion_id))
        .first(conn)?)
}
}
