// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Domain types shared across aptscan.
//!
//! - Transaction input model (write-set changes, events, resources)
//! - Balance entries and net deltas
//! - Transfer graph edges and orphans
//! - Asset display metadata

pub mod asset;
pub mod balance;
pub mod graph;
pub mod transaction;

// Note: Public types are re-exported from lib.rs, not here
