// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Event classification into withdraw/deposit records

use crate::config::constants::type_tags;
use crate::types::balance::EntryKind;
use crate::types::transaction::Event;
use crate::value::{inner_or_string, PayloadExt};

/// Direction of a fungible store balance change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    Withdraw,
    Deposit,
}

impl FlowDirection {
    /// Direction for an event type tag; `None` for anything that is not a store flow
    pub fn from_type_tag(type_tag: &str) -> Option<Self> {
        match type_tag {
            type_tags::WITHDRAW_EVENT => Some(FlowDirection::Withdraw),
            type_tags::DEPOSIT_EVENT => Some(FlowDirection::Deposit),
            _ => None,
        }
    }

    /// Balance entry kind produced by this direction
    pub const fn entry_kind(self) -> EntryKind {
        match self {
            FlowDirection::Withdraw => EntryKind::Withdraw,
            FlowDirection::Deposit => EntryKind::Deposit,
        }
    }
}

/// A withdraw or deposit event, with its position in the transaction's event list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEvent {
    /// Index in the original event list
    pub index: usize,
    pub direction: FlowDirection,
    /// Store address; empty if the payload lacked one
    pub store: String,
    /// Raw amount; empty if the payload lacked one
    pub amount: String,
}

/// Classify events in emission order, skipping everything that is not a store flow
///
/// A recognized event with a malformed payload is kept with empty fields.
pub fn classify_events(events: &[Event]) -> Vec<ClassifiedEvent> {
    events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| {
            let direction = FlowDirection::from_type_tag(&event.type_tag)?;
            Some(ClassifiedEvent {
                index,
                direction,
                store: event
                    .data
                    .at_path(&["store"])
                    .map(inner_or_string)
                    .unwrap_or_default(),
                amount: event.field("amount"),
            })
        })
        .collect()
}
