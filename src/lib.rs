//! Input preparation and witness verification for SHA-256 circuits.
//!
//! A SHA-256 circuit consumes its message as boolean wires: the raw bytes,
//! length-padded per the hash standard, split into fixed-width segments up to
//! a static maximum the circuit was compiled for. This crate performs that
//! transform ([`CircuitInputBuilder`]), the inverse bit-to-byte decoding of
//! circuit outputs, and the comparison of a witness's digest window against
//! an expected digest ([`verify_digest`]). The circuit execution engine
//! itself stays behind the [`WitnessOracle`] trait.

mod bits;
mod builder;
mod chunk;
mod oracle;
mod padding;

pub use bits::BitSequence;
pub use builder::{decode_digest, CircuitInputBuilder, CircuitInputSet, DigestWindow};
pub use chunk::{fit_to_budget, split, true_block_count, Segment};
pub use oracle::{verify_digest, witness_digest, NativeOracle, WitnessOracle};
pub use padding::pad_message;

use thiserror::Error;

/// Bits in one SHA-256 compression block.
pub const BLOCK_BITS: usize = 512;
/// Bits in the trailing big-endian message-length field of the padding.
pub const LENGTH_BITS: usize = 64;
/// Bits in a SHA-256 digest.
pub const DIGEST_BITS: usize = 256;

/// Failures of the input transform or the witness boundary.
///
/// Every variant is a deterministic precondition violation; retrying with the
/// same input and configuration cannot succeed, so callers get them once and
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// A bit range cannot be regrouped into whole bytes, or falls outside
    /// the sequence it was requested from.
    #[error("bit range [{start}..{end}) of a {len}-bit sequence cannot be decoded into bytes")]
    MalformedBitLength {
        start: usize,
        end: usize,
        len: usize,
    },

    /// Bit length not divisible by the requested segment width. Indicates a
    /// padder/chunker configuration mismatch, not bad user input.
    #[error("bit length {len} is not divisible by segment width {width}")]
    MisalignedInput { len: usize, width: usize },

    /// The padded message needs more segments than the circuit was compiled
    /// for. Fatal: the message must be rejected or re-run against a
    /// larger-capacity circuit.
    #[error("padded message needs {required} segments but the circuit accepts at most {max}")]
    CircuitCapacityExceeded { required: usize, max: usize },

    /// Message bit length overflows the 64-bit length field of the padding
    /// rule.
    #[error("message of {bits} bits overflows the 64-bit length field")]
    MessageTooLarge { bits: u128 },

    /// A witness value inside the digest window is not 0 or 1.
    #[error("witness value {value} at index {index} is not a bit")]
    NonBinaryWitness { index: usize, value: u64 },

    /// The witness oracle itself failed.
    #[error("witness oracle failed: {0}")]
    Oracle(String),
}
