//! Byte-packed tagged union for moving heterogeneous records over one channel.
//!
//! A datapath sometimes has to carry two record kinds through a single
//! channel (metadata and payload data are the usual pair). The union's wire
//! form is a fixed width regardless of the active variant:
//!
//!   value bytes, zero-padded to max(size_of::<L>(), size_of::<R>())
//!   discriminant byte, trailing
//!
//! so every channel item is the same size and the receiver can decode without
//! out-of-band framing.

use std::mem::size_of;

use zerocopy::{AsBytes, FromBytes};

const TAG_LEFT: u8 = 0;
const TAG_RIGHT: u8 = 1;

const fn max_size(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// Error decoding a union from its wire form. The only way a malformed
/// buffer is observable; correctly produced wire forms never hit it.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnionWireError {
    #[error("buffer is {got} bytes, wire form is {expected}")]
    Length { expected: usize, got: usize },
    #[error("unknown discriminant {0:#04x}")]
    Discriminant(u8),
}

/// Holds exactly one of a Left or Right value.
///
/// Equality compares the discriminant first, then the active value: two
/// unions are equal only if they hold the same variant and those values
/// compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedUnion<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> TaggedUnion<L, R> {
    pub fn left(value: L) -> Self {
        Self::Left(value)
    }

    pub fn right(value: R) -> Self {
        Self::Right(value)
    }

    /// True iff the active variant is Left.
    pub fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Checked accessor: the Left value, if Left is active.
    pub fn as_left(&self) -> Option<&L> {
        match self {
            Self::Left(v) => Some(v),
            Self::Right(_) => None,
        }
    }

    /// Checked accessor: the Right value, if Right is active.
    pub fn as_right(&self) -> Option<&R> {
        match self {
            Self::Left(_) => None,
            Self::Right(v) => Some(v),
        }
    }
}

impl<L, R> TaggedUnion<L, R>
where
    L: AsBytes + FromBytes,
    R: AsBytes + FromBytes,
{
    /// Width of the wire form in bytes: the zero-padded value field plus the
    /// trailing discriminant byte.
    pub const WIRE_BYTES: usize = 1 + max_size(size_of::<L>(), size_of::<R>());

    /// Reinterpret the stored bytes as `T`.
    ///
    /// Callers must request the type of the currently-active variant; debug
    /// builds assert the requested width matches, release builds return an
    /// unspecified (zero-extended) reinterpretation on misuse. Use
    /// [`TaggedUnion::as_left`] / [`TaggedUnion::as_right`] when the active
    /// variant is not statically known.
    pub fn get<T: FromBytes>(&self) -> T {
        debug_assert_eq!(
            size_of::<T>(),
            match self {
                Self::Left(_) => size_of::<L>(),
                Self::Right(_) => size_of::<R>(),
            },
            "requested width does not match the active variant"
        );
        let payload = max_size(size_of::<L>(), size_of::<R>());
        let mut buf = vec![0u8; max_size(payload, size_of::<T>())];
        match self {
            Self::Left(v) => buf[..size_of::<L>()].copy_from_slice(v.as_bytes()),
            Self::Right(v) => buf[..size_of::<R>()].copy_from_slice(v.as_bytes()),
        }
        T::read_from_prefix(&buf).expect("buffer sized to the requested width")
    }

    /// Encode to the fixed-width wire form.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::WIRE_BYTES];
        match self {
            Self::Left(v) => {
                buf[..size_of::<L>()].copy_from_slice(v.as_bytes());
                buf[Self::WIRE_BYTES - 1] = TAG_LEFT;
            }
            Self::Right(v) => {
                buf[..size_of::<R>()].copy_from_slice(v.as_bytes());
                buf[Self::WIRE_BYTES - 1] = TAG_RIGHT;
            }
        }
        buf
    }

    /// Decode from the fixed-width wire form. Round-trips any value produced
    /// by [`TaggedUnion::to_wire`].
    pub fn from_wire(buf: &[u8]) -> Result<Self, UnionWireError> {
        if buf.len() != Self::WIRE_BYTES {
            return Err(UnionWireError::Length {
                expected: Self::WIRE_BYTES,
                got: buf.len(),
            });
        }
        let (value, tag) = buf.split_at(Self::WIRE_BYTES - 1);
        match tag[0] {
            TAG_LEFT => Ok(Self::Left(
                L::read_from_prefix(value).expect("value field narrower than declared width"),
            )),
            TAG_RIGHT => Ok(Self::Right(
                R::read_from_prefix(value).expect("value field narrower than declared width"),
            )),
            other => Err(UnionWireError::Discriminant(other)),
        }
    }
}
