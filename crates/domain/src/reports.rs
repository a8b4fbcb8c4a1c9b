// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only aggregations behind the reporting view.
//!
//! These functions are pure: callers load rows from persistence and pass
//! them in along with the reference date.

use std::collections::BTreeMap;

use time::Date;

use crate::dates::YearMonth;
use crate::eligibility::is_eligible;
use crate::types::BloodGroup;

/// Available-bag count below which a blood group is reported as short.
pub const SHORTAGE_THRESHOLD: usize = 5;

/// Available stock for one blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupStock {
    pub blood_group: BloodGroup,
    pub available: usize,
}

impl GroupStock {
    /// Whether this group is below the shortage threshold.
    #[must_use]
    pub const fn is_short(&self) -> bool {
        self.available < SHORTAGE_THRESHOLD
    }
}

/// Number of donations recorded in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyDonations {
    pub month: YearMonth,
    pub donations: usize,
}

/// Counts available bags per blood group.
///
/// Every group appears in the result, in `BloodGroup::ALL` order, with a
/// zero count when no bags are available.
#[must_use]
pub fn stock_by_group(available_bag_groups: &[BloodGroup]) -> Vec<GroupStock> {
    BloodGroup::ALL
        .into_iter()
        .map(|group| GroupStock {
            blood_group: group,
            available: available_bag_groups.iter().filter(|g| **g == group).count(),
        })
        .collect()
}

/// Groups whose available stock is below `SHORTAGE_THRESHOLD`.
#[must_use]
pub fn shortages(stock: &[GroupStock]) -> Vec<GroupStock> {
    stock.iter().copied().filter(GroupStock::is_short).collect()
}

/// Counts donations per year-month, ascending by month.
#[must_use]
pub fn monthly_donation_counts(donation_dates: &[Date]) -> Vec<MonthlyDonations> {
    let mut buckets: BTreeMap<YearMonth, usize> = BTreeMap::new();
    for date in donation_dates {
        *buckets.entry(YearMonth::of(*date)).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(month, donations)| MonthlyDonations { month, donations })
        .collect()
}

/// Filters `(donor, last_donation_date)` pairs down to donors eligible on
/// `today`, preserving input order.
#[must_use]
pub fn eligible_donors<T: Clone>(donors: &[(T, Option<Date>)], today: Date) -> Vec<T> {
    donors
        .iter()
        .filter(|(_, last)| is_eligible(*last, today))
        .map(|(donor, _)| donor.clone())
        .collect()
}
