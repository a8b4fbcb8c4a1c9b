// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `staff`: Staff account and session mutations
//! - `donors`: Donor registration
//! - `inventory`: Bag and blood bank mutations
//! - `transfusions`: Transfusion recording
//!
//! Multi-step writes run inside a single database transaction. Domain rules
//! that depend on stored state (donor blood group, bag status) are checked
//! inside that transaction so the check and the write see the same rows.

pub mod donors;
pub mod inventory;
pub mod staff;
pub mod transfusions;
