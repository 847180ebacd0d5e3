//! Elastic register: a one-slot relay decoupling producer and consumer
//! timing by exactly one item.

use crate::channel::FifoChannel;
use crate::Stage;

/// One-slot buffered relay between an input and an output channel.
///
/// Adds at most one step of latency per item and never holds more than one
/// item. When `check_full` is disabled the register writes without
/// consulting the output's full signal; use that only when the downstream
/// channel is always ready, where the check would be a needless stall. Even
/// then a rejected write keeps the item in the slot, so nothing is lost.
pub struct ElasticRegister<T> {
    input: FifoChannel<T>,
    output: FifoChannel<T>,
    slot: Option<T>,
    check_full: bool,
}

impl<T> ElasticRegister<T> {
    pub fn new(input: FifoChannel<T>, output: FifoChannel<T>, check_full: bool) -> Self {
        Self {
            input,
            output,
            slot: None,
            check_full,
        }
    }

    /// Whether the internal slot currently holds an item.
    pub fn is_occupied(&self) -> bool {
        self.slot.is_some()
    }
}

impl<T> Stage for ElasticRegister<T> {
    fn step(&mut self) -> bool {
        let mut moved = false;

        // Drain before fill, so a held item can hand off and the slot refill
        // in the same step.
        if let Some(item) = self.slot.take() {
            if !self.check_full || !self.output.is_full() {
                match self.output.try_write(item) {
                    Ok(()) => {
                        tracing::trace!("slot drained");
                        moved = true;
                    }
                    Err(item) => self.slot = Some(item),
                }
            } else {
                self.slot = Some(item);
            }
        }

        if self.slot.is_none() {
            if let Some(item) = self.input.try_read() {
                tracing::trace!("slot filled");
                self.slot = Some(item);
                moved = true;
            }
        }

        moved
    }
}
