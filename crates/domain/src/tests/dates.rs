// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::date;

use crate::{DomainError, YearMonth, add_days, format_date, parse_date};

#[test]
fn test_parse_and_format_iso_date() {
    let parsed = parse_date("2025-01-01").unwrap();
    assert_eq!(parsed, date!(2025 - 01 - 01));
    assert_eq!(format_date(parsed), "2025-01-01");
}

#[test]
fn test_parse_date_trims_input() {
    assert_eq!(parse_date(" 2024-02-29 ").unwrap(), date!(2024 - 02 - 29));
}

#[test]
fn test_parse_date_rejects_invalid() {
    assert!(matches!(
        parse_date("2025-02-30"),
        Err(DomainError::DateParseError { .. })
    ));
    assert!(matches!(
        parse_date("01/02/2025"),
        Err(DomainError::DateParseError { .. })
    ));
}

#[test]
fn test_add_days_crosses_month_boundary() {
    assert_eq!(
        add_days(date!(2025 - 01 - 31), 1, "test").unwrap(),
        date!(2025 - 02 - 01)
    );
}

#[test]
fn test_add_days_overflow() {
    assert!(matches!(
        add_days(date!(9999 - 12 - 31), 1, "test"),
        Err(DomainError::DateArithmeticOverflow { .. })
    ));
}

#[test]
fn test_year_month_ordering_and_display() {
    let december: YearMonth = YearMonth::of(date!(2024 - 12 - 15));
    let january: YearMonth = YearMonth::of(date!(2025 - 01 - 02));
    assert!(december < january);
    assert_eq!(december.to_string(), "2024-12");
    assert_eq!(january.year(), 2025);
    assert_eq!(january.month(), 1);
}
