// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, optional_field, require_field, validate_donor_fields};

#[test]
fn test_require_field_trims() {
    assert_eq!(require_field("first_name", "  Ada ").unwrap(), "Ada");
}

#[test]
fn test_require_field_rejects_blank() {
    assert_eq!(
        require_field("first_name", "   "),
        Err(DomainError::MissingField {
            field: "first_name"
        })
    );
}

#[test]
fn test_optional_field_blank_is_none() {
    assert_eq!(optional_field(Some("  ")), None);
    assert_eq!(optional_field(None), None);
    assert_eq!(
        optional_field(Some(" a@b.c ")),
        Some(String::from("a@b.c"))
    );
}

#[test]
fn test_validate_donor_fields_success() {
    let fields = validate_donor_fields("Ada", "Lovelace", "555-0100", Some(""), Some("London"))
        .unwrap();
    assert_eq!(fields.first_name, "Ada");
    assert_eq!(fields.email, None);
    assert_eq!(fields.address.as_deref(), Some("London"));
}

#[test]
fn test_validate_donor_fields_reports_first_missing() {
    assert_eq!(
        validate_donor_fields("Ada", "", "", None, None),
        Err(DomainError::MissingField { field: "last_name" })
    );
    assert_eq!(
        validate_donor_fields("Ada", "Lovelace", " ", None, None),
        Err(DomainError::MissingField {
            field: "contact_number"
        })
    );
}
