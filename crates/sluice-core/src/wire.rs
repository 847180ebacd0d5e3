//! Sluice wire format: the on-channel types every datapath stage exchanges.
//!
//! These types ARE the flit format. Every field, every size, every flag bit
//! is part of the contract between stages. A change here changes what every
//! channel in a wired pipeline carries.
//!
//! All types are #[repr(C, packed)] for deterministic layout and use
//! zerocopy derives for safe, allocation-free serialization. There is no
//! unsafe code in this module.

use static_assertions::assert_eq_size;
use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// Payload bytes carried by one flit. A deployment parameter fixed at build
/// time; channel items and stage types are all sized from it.
pub const FLIT_DATA_BYTES: usize = 64;

/// Validity mask meaning "every payload byte is meaningful".
pub const ALL_BYTES_VALID: u64 = u64::MAX;

// ── Side-band metadata ───────────────────────────────────────────────────────

/// Packet-level identifying fields.
///
/// Carried on every flit of a packet, but semantically constant across the
/// packet: all flits between one packet start and the next `last` flit must
/// agree on these values. Exactly one logical instance exists per packet.
///
/// Wire size: 4 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsBytes, FromBytes, FromZeroes)]
#[repr(C, packed)]
pub struct PacketMeta {
    /// Ingress source identifier.
    pub source: u16,
    /// Destination queue identifier.
    pub queue: u16,
}

// ── Payload-data record ──────────────────────────────────────────────────────

/// A flit stripped of its side-band metadata: what remains after
/// [`Flit::split`] takes the packet-level fields away.
///
/// Wire size: 73 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsBytes, FromBytes, FromZeroes)]
#[repr(C, packed)]
pub struct FlitData {
    /// Fixed-size payload block.
    pub payload: [u8; FLIT_DATA_BYTES],
    /// One bit per payload byte. Only meaningful on the final flit of a
    /// packet; earlier flits carry a full block.
    pub valid: u64,
    /// Non-zero terminates the current packet.
    pub last: u8,
}

impl FlitData {
    /// Whether this record terminates its packet.
    pub fn is_last(&self) -> bool {
        self.last != 0
    }
}

// ── Flit ─────────────────────────────────────────────────────────────────────

/// The atomic unit of a packet transfer.
///
/// A packet is a maximal run of flits ending at the first flit with `last`
/// set. `last` is set on exactly one flit per packet, the final one.
///
/// Wire size: 77 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsBytes, FromBytes, FromZeroes)]
#[repr(C, packed)]
pub struct Flit {
    /// Fixed-size payload block.
    pub payload: [u8; FLIT_DATA_BYTES],
    /// One bit per payload byte, relevant only when `last` is set.
    pub valid: u64,
    /// Non-zero terminates the current packet.
    pub last: u8,
    /// Side-band metadata, constant across the packet.
    pub meta: PacketMeta,
}

impl Flit {
    pub fn new(payload: [u8; FLIT_DATA_BYTES], valid: u64, last: bool, meta: PacketMeta) -> Self {
        Self {
            payload,
            valid,
            last: last as u8,
            meta,
        }
    }

    /// Whether this flit terminates its packet.
    pub fn is_last(&self) -> bool {
        self.last != 0
    }

    /// Decompose into the packet-level metadata record and the payload-data
    /// record. Stateless; [`Flit::join`] is the exact inverse.
    pub fn split(self) -> (PacketMeta, FlitData) {
        (
            self.meta,
            FlitData {
                payload: self.payload,
                valid: self.valid,
                last: self.last,
            },
        )
    }

    /// Recompose a flit from a metadata record and a payload-data record.
    /// For any flit `f`, `Flit::join(f.split().0, f.split().1) == f`.
    pub fn join(meta: PacketMeta, data: FlitData) -> Self {
        Self {
            payload: data.payload,
            valid: data.valid,
            last: data.last,
            meta,
        }
    }
}

// Compile-time size guards. If one of these fails, the wire format has
// silently changed.
assert_eq_size!(PacketMeta, [u8; 4]);
assert_eq_size!(FlitData, [u8; 73]);
assert_eq_size!(Flit, [u8; 77]);
