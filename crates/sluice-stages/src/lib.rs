//! sluice-stages — the stateful datapath stages and the channels that
//! connect them.
//!
//! None of the stages block or spawn threads. Each exposes one `step`,
//! meant to be invoked once per discrete time unit by an external driver
//! that also owns the channel wiring. A step is a bounded check-and-act:
//! when any required resource is missing (empty input, full output, absent
//! decision or metadata) it does nothing observable and relies on being
//! invoked again.

pub mod channel;
pub mod dropper;
pub mod elastic;
pub mod extract;
pub mod inject;

pub use channel::FifoChannel;
pub use dropper::PacketDropper;
pub use elastic::ElasticRegister;
pub use extract::MetadataExtractor;
pub use inject::MetadataInjector;

/// One datapath stage, advanced one discrete time unit at a time.
pub trait Stage {
    /// Advance one step. Returns true if the step made observable progress
    /// (consumed or emitted at least one item); drivers use this to detect
    /// quiescence.
    fn step(&mut self) -> bool;
}

/// Step every stage, round-robin, until a full sweep makes no progress.
/// Returns the number of sweeps taken, counting the final idle one.
///
/// This is the single-threaded cooperative driver; with channels being
/// thread-safe, callers may instead step stages from separate threads.
pub fn run_to_quiescence(stages: &mut [&mut dyn Stage]) -> usize {
    let mut sweeps = 0;
    loop {
        let mut progressed = false;
        for stage in stages.iter_mut() {
            if stage.step() {
                progressed = true;
            }
        }
        sweeps += 1;
        if !progressed {
            return sweeps;
        }
    }
}
