//! Packet dropper: applies an externally supplied keep/drop decision to
//! every flit of a packet without disturbing framing.

use sluice_core::Flit;

use crate::channel::FifoChannel;
use crate::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropperState {
    /// No packet in flight; the next flit needs a fresh decision.
    Idle,
    /// Mid-packet; the latched decision covers the rest of the packet.
    Stream { drop: bool },
}

/// Forwards or discards whole packets, one keep decision per packet.
///
/// The decision is consumed exactly once, when the packet's first flit
/// arrives, and applies to every flit through the next `last`. A step with
/// any required resource missing (decision, input flit, output capacity)
/// does nothing observable and is simply retried. Output capacity is
/// required even for flits that will be discarded, so the stage's timing
/// does not depend on the decision value.
pub struct PacketDropper {
    decisions: FifoChannel<bool>,
    input: FifoChannel<Flit>,
    output: FifoChannel<Flit>,
    state: DropperState,
}

impl PacketDropper {
    /// `decisions` carries one boolean "keep" value per packet.
    pub fn new(
        decisions: FifoChannel<bool>,
        input: FifoChannel<Flit>,
        output: FifoChannel<Flit>,
    ) -> Self {
        Self {
            decisions,
            input,
            output,
            state: DropperState::Idle,
        }
    }

    /// Whether the dropper is between packets.
    pub fn is_idle(&self) -> bool {
        self.state == DropperState::Idle
    }
}

impl Stage for PacketDropper {
    fn step(&mut self) -> bool {
        match self.state {
            DropperState::Idle => {
                if self.decisions.is_empty() || self.input.is_empty() || self.output.is_full() {
                    return false;
                }
                let Some(keep) = self.decisions.try_read() else {
                    return false;
                };
                let Some(flit) = self.input.try_read() else {
                    return false;
                };
                let drop = !keep;
                tracing::debug!(drop, single_flit = flit.is_last(), "packet decision latched");
                if !drop {
                    let _ = self.output.try_write(flit);
                }
                self.state = if flit.is_last() {
                    DropperState::Idle
                } else {
                    DropperState::Stream { drop }
                };
                true
            }
            DropperState::Stream { drop } => {
                if self.input.is_empty() || self.output.is_full() {
                    return false;
                }
                let Some(flit) = self.input.try_read() else {
                    return false;
                };
                if !drop {
                    let _ = self.output.try_write(flit);
                }
                if flit.is_last() {
                    tracing::debug!(drop, "packet boundary, decision released");
                    self.state = DropperState::Idle;
                }
                true
            }
        }
    }
}
