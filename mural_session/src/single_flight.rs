// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Proof that a decode was started, tied to one logical slot.
///
/// Tickets are compared by generation: starting a newer decode on the same
/// slot makes every older ticket stale, which is the only cancellation
/// semantic the session offers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodeTicket {
    generation: u64,
}

/// Generation counter for one decode slot.
#[derive(Debug, Default)]
pub(crate) struct SingleFlight {
    generation: u64,
}

impl SingleFlight {
    /// Starts a new flight, superseding any outstanding ticket.
    pub(crate) fn begin(&mut self) -> DecodeTicket {
        self.generation = self.generation.wrapping_add(1);
        DecodeTicket {
            generation: self.generation,
        }
    }

    /// Whether `ticket` is still the latest flight on this slot.
    pub(crate) fn is_current(&self, ticket: DecodeTicket) -> bool {
        ticket.generation == self.generation
    }
}
