//! Sluice integration test harness.
//!
//! These tests wire whole pipelines out of the public crates and drive them
//! with the cooperative stepper, the way an embedding scheduler would.
//! Everything runs in-process; there is no external transport here.
//!
//! Helpers shared by the area modules live in this file.

mod backpressure;
mod mux;

use sluice_core::{Flit, PacketMeta, ALL_BYTES_VALID, FLIT_DATA_BYTES};
use sluice_stages::FifoChannel;

// ── Harness ───────────────────────────────────────────────────────────────────

/// Build a packet of `len` flits from one source. Payload bytes are tagged
/// with `seed + position` so ordering mistakes show up in assertions.
pub fn packet(source: u16, len: usize, seed: u8) -> Vec<Flit> {
    assert!(len > 0, "a packet has at least one flit");
    (0..len)
        .map(|i| {
            let mut payload = [0u8; FLIT_DATA_BYTES];
            payload[0] = seed + i as u8;
            let last = i == len - 1;
            let valid = if last { 0x0000_FFFF } else { ALL_BYTES_VALID };
            Flit::new(payload, valid, last, PacketMeta { source, queue: 1 })
        })
        .collect()
}

/// Queue every item, panicking if the channel cannot take them all.
/// Tests size their channels to fit what they feed.
pub fn feed<T>(channel: &FifoChannel<T>, items: impl IntoIterator<Item = T>) {
    for item in items {
        if channel.try_write(item).is_err() {
            panic!("channel full while feeding test input");
        }
    }
}

/// Pop until empty.
pub fn drain<T>(channel: &FifoChannel<T>) -> Vec<T> {
    std::iter::from_fn(|| channel.try_read()).collect()
}
