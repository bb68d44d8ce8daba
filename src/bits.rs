use itertools::Itertools;

use crate::HarnessError;

/// An ordered sequence of single-bit values with an explicit length.
///
/// This is the serialized form of a byte buffer on its way to (or from) a
/// circuit's boolean wires. Bits follow the SHA-256 wire convention: each
/// byte contributes its eight bits most-significant first, in buffer order.
/// Keeping bit sequences in their own type stops bit counts and byte counts
/// from being confused for one another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence(Vec<bool>);

impl BitSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Encodes a byte buffer MSB-first. Total function: every buffer encodes
    /// to exactly `8 * bytes.len()` bits.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let bits = bytes
            .iter()
            .flat_map(|byte| (0..8).map(move |idx| (byte >> (7 - idx)) & 1 == 1))
            .collect_vec();
        Self(bits)
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    /// Regroups the bits into bytes, MSB-first per group of eight.
    ///
    /// The length must be a multiple of 8; intermediate transform stages are
    /// allowed to be unaligned, but anything decoded back to bytes is not.
    pub fn to_bytes(&self) -> Result<Vec<u8>, HarnessError> {
        if self.0.len() % 8 != 0 {
            return Err(HarnessError::MalformedBitLength {
                start: 0,
                end: self.0.len(),
                len: self.0.len(),
            });
        }
        let bytes = self
            .0
            .chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
            .collect_vec();
        Ok(bytes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    pub fn extend(&mut self, bits: impl IntoIterator<Item = bool>) {
        self.0.extend(bits);
    }
}
