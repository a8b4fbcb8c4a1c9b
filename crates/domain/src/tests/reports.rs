// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::date;

use crate::{
    BloodGroup, GroupStock, MonthlyDonations, YearMonth, eligible_donors,
    monthly_donation_counts, shortages, stock_by_group,
};

#[test]
fn test_stock_includes_every_group() {
    let stock: Vec<GroupStock> = stock_by_group(&[BloodGroup::APositive, BloodGroup::APositive]);
    assert_eq!(stock.len(), 8);
    assert_eq!(stock[0].blood_group, BloodGroup::APositive);
    assert_eq!(stock[0].available, 2);
    assert!(stock[1..].iter().all(|s| s.available == 0));
}

#[test]
fn test_shortage_threshold_is_strictly_below_five() {
    let mut groups: Vec<BloodGroup> = vec![BloodGroup::OPositive; 5];
    groups.extend(vec![BloodGroup::ONegative; 4]);
    let stock: Vec<GroupStock> = stock_by_group(&groups);
    let short: Vec<GroupStock> = shortages(&stock);

    assert!(!short.iter().any(|s| s.blood_group == BloodGroup::OPositive));
    assert!(short.iter().any(|s| s.blood_group == BloodGroup::ONegative));
    assert_eq!(short.len(), 7);
}

#[test]
fn test_monthly_counts_sorted_ascending() {
    let counts: Vec<MonthlyDonations> = monthly_donation_counts(&[
        date!(2025 - 02 - 10),
        date!(2024 - 12 - 31),
        date!(2025 - 02 - 01),
    ]);
    assert_eq!(
        counts,
        vec![
            MonthlyDonations {
                month: YearMonth::of(date!(2024 - 12 - 01)),
                donations: 1,
            },
            MonthlyDonations {
                month: YearMonth::of(date!(2025 - 02 - 01)),
                donations: 2,
            },
        ]
    );
}

#[test]
fn test_monthly_counts_empty() {
    assert!(monthly_donation_counts(&[]).is_empty());
}

#[test]
fn test_eligible_donors_filter() {
    let today = date!(2025 - 06 - 01);
    let donors = vec![
        ("never", None),
        ("recent", Some(date!(2025 - 05 - 01))),
        ("long ago", Some(date!(2025 - 01 - 01))),
    ];
    assert_eq!(eligible_donors(&donors, today), vec!["never", "long ago"]);
}
