//! sluice-core — wire format, tagged union, and configuration.
//! The stage crate and all pipeline wiring depend on this one.

pub mod config;
pub mod union;
pub mod wire;

pub use config::SluiceConfig;
pub use union::{TaggedUnion, UnionWireError};
pub use wire::{Flit, FlitData, PacketMeta, ALL_BYTES_VALID, FLIT_DATA_BYTES};
