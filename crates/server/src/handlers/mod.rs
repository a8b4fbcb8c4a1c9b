// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP route handlers.
//!
//! Handlers lock the store, call the API layer, and render a page or
//! redirect with a flash message.

pub mod auth;
pub mod donors;
pub mod health;
pub mod inventory;
pub mod reports;
pub mod staff;
pub mod transfusions;

use axum::response::Html;
use axum_extra::extract::PrivateCookieJar;
use bloodlink_api::ApiError;
use std::sync::OnceLock;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::flash::{Flash, take_flash};

/// A rendered page plus the jar with the consumed flash removed.
pub type Page = (PrivateCookieJar, Html<String>);

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Records the host's UTC offset for [`today`].
///
/// The offset can only be read while the process is single-threaded, so
/// call this before the async runtime starts. Falls back to UTC when the
/// offset cannot be determined.
#[must_use]
pub fn init_local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

/// The calendar date of `now` at `offset`.
#[must_use]
pub const fn date_at(now: OffsetDateTime, offset: UtcOffset) -> Date {
    now.to_offset(offset).date()
}

/// The current calendar date at the recorded local offset, or UTC when
/// [`init_local_offset`] has not run.
#[must_use]
pub fn today() -> Date {
    let offset: UtcOffset = LOCAL_OFFSET.get().copied().unwrap_or(UtcOffset::UTC);
    date_at(OffsetDateTime::now_utc(), offset)
}

/// Renders a page with the pending flash message.
#[must_use]
pub fn render(jar: PrivateCookieJar, page: impl FnOnce(Option<&Flash>) -> String) -> Page {
    let (jar, flash) = take_flash(jar);
    let body: String = page(flash.as_ref());
    (jar, Html(body))
}

/// Trims a form value, treating blank as absent.
#[must_use]
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses an optional numeric id from a form value.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` when the value is not a number.
pub fn parse_optional_id(field: &str, value: &str) -> Result<Option<i64>, ApiError> {
    non_blank(value)
        .map(|v| {
            v.parse::<i64>().map_err(|_| ApiError::InvalidInput {
                field: field.to_string(),
                message: format!("Invalid {field}: {v}"),
            })
        })
        .transpose()
}
