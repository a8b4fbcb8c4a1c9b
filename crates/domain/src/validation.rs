// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Returns the trimmed value of a required field.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is empty or whitespace.
pub fn require_field<'a>(field: &'static str, value: &'a str) -> Result<&'a str, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField { field });
    }
    Ok(trimmed)
}

/// Normalises an optional field: blank input becomes `None`.
#[must_use]
pub fn optional_field(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Validated donor registration fields.
///
/// Only presence is checked; contact number and email are not
/// format-validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorFields {
    pub first_name: String,
    pub last_name: String,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Validates that a donor's required text fields are present.
///
/// # Errors
///
/// Returns `DomainError::MissingField` naming the first empty required field.
pub fn validate_donor_fields(
    first_name: &str,
    last_name: &str,
    contact_number: &str,
    email: Option<&str>,
    address: Option<&str>,
) -> Result<DonorFields, DomainError> {
    Ok(DonorFields {
        first_name: require_field("first_name", first_name)?.to_string(),
        last_name: require_field("last_name", last_name)?.to_string(),
        contact_number: require_field("contact_number", contact_number)?.to_string(),
        email: optional_field(email),
        address: optional_field(address),
    })
}
