// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Delegates forward one validated operation to a backend and turn the
//! backend's `status` field into a local outcome.

pub mod account;
pub mod list;

pub use account::AccountDelegate;
pub use list::{ListDelegate, StoredList};
