// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Asset display metadata and amount formatting.
//!
//! Used only for presentation. Raw amounts in balance entries, deltas and
//! transfer edges never depend on anything in this module.

mod cache;
mod format;

pub use cache::{is_native_asset, AssetMetadataCache};
pub use format::{format_amount, format_asset, truncate_address};
