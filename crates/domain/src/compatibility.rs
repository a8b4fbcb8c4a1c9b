// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::BloodGroup;

/// Red-cell compatibility between a recipient and a donated bag.
///
/// The recipient must carry every ABO antigen present in the bag, and an
/// Rh-negative recipient may only receive Rh-negative blood.
#[must_use]
pub const fn can_receive(recipient: BloodGroup, bag: BloodGroup) -> bool {
    let (recipient_a, recipient_b) = recipient.antigens();
    let (bag_a, bag_b) = bag.antigens();

    let abo_ok: bool = (!bag_a || recipient_a) && (!bag_b || recipient_b);
    let rh_ok: bool = recipient.is_rh_positive() || !bag.is_rh_positive();

    abo_ok && rh_ok
}

/// Lists the bag groups a recipient may receive, in display order.
#[must_use]
pub fn compatible_donor_groups(recipient: BloodGroup) -> Vec<BloodGroup> {
    BloodGroup::ALL
        .into_iter()
        .filter(|bag| can_receive(recipient, *bag))
        .collect()
}
