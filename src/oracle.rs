use itertools::Itertools;
use log::debug;
use sha2::{Digest, Sha256};

use crate::bits::BitSequence;
use crate::builder::{CircuitInputSet, DigestWindow};
use crate::HarnessError;

/// The external engine that executes a circuit against named inputs and
/// returns its internal signal values.
///
/// Implementations wrap a circuit compiler/runtime; they may be long-running
/// and are invoked as a blocking call, one fully-built input set per call.
/// The harness consumes only the digest window of the returned witness.
pub trait WitnessOracle {
    /// Executes the circuit and returns the flat, ordered witness values.
    fn calculate_witness(&self, inputs: &CircuitInputSet) -> Result<Vec<u64>, HarnessError>;
}

/// Runs the oracle and decodes the digest window of its witness into bytes.
///
/// The window values must all be bits; anything else means the window is
/// misconfigured for this circuit and is rejected with
/// [`HarnessError::NonBinaryWitness`].
pub fn witness_digest<O: WitnessOracle + ?Sized>(
    oracle: &O,
    inputs: &CircuitInputSet,
    window: &DigestWindow,
) -> Result<Vec<u8>, HarnessError> {
    let witness = oracle.calculate_witness(inputs)?;
    let out_of_range = |end| HarnessError::MalformedBitLength {
        start: window.offset,
        end,
        len: witness.len(),
    };
    let end = window
        .offset
        .checked_add(window.len)
        .ok_or_else(|| out_of_range(usize::MAX))?;
    let values = witness
        .get(window.offset..end)
        .ok_or_else(|| out_of_range(end))?;
    let bits = values
        .iter()
        .enumerate()
        .map(|(idx, &value)| match value {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(HarnessError::NonBinaryWitness {
                index: window.offset + idx,
                value,
            }),
        })
        .collect::<Result<Vec<bool>, _>>()?;
    BitSequence::from_bits(bits).to_bytes()
}

/// Drives the oracle for a built input set and compares the witness digest
/// against an expected one.
pub fn verify_digest<O: WitnessOracle + ?Sized>(
    oracle: &O,
    inputs: &CircuitInputSet,
    window: &DigestWindow,
    expected: &[u8],
) -> Result<bool, HarnessError> {
    let digest = witness_digest(oracle, inputs, window)?;
    debug!(
        "witness digest {} (expected {})",
        hex::encode(&digest),
        hex::encode(expected)
    );
    Ok(digest == expected)
}

/// Host-side stand-in for a real circuit engine.
///
/// Recovers the message from the input set (the first `message_len * 8` bits
/// of the concatenated segments), recomputes the digest natively, and lays
/// the witness out in the common wire order: a constant `1` signal followed
/// by the 256 digest bits. Decoded by the default [`DigestWindow`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeOracle;

impl WitnessOracle for NativeOracle {
    fn calculate_witness(&self, inputs: &CircuitInputSet) -> Result<Vec<u64>, HarnessError> {
        let message_bits = inputs.message_len * 8;
        let bits = inputs
            .segments
            .iter()
            .flat_map(|segment| segment.bits().iter().copied())
            .take(message_bits)
            .collect_vec();
        if bits.len() < message_bits {
            return Err(HarnessError::Oracle(format!(
                "segments carry {} bits but the declared message needs {}",
                bits.len(),
                message_bits
            )));
        }
        let message = BitSequence::from_bits(bits).to_bytes()?;
        let digest = Sha256::digest(&message);

        let mut witness = vec![1u64];
        witness.extend(
            BitSequence::from_bytes(digest.as_slice())
                .bits()
                .iter()
                .map(|&bit| bit as u64),
        );
        Ok(witness)
    }
}
