use std::convert::TryFrom;

use crate::bits::BitSequence;
use crate::{HarnessError, BLOCK_BITS, LENGTH_BITS};

/// Applies the SHA-256 message-padding rule to a bit sequence.
///
/// Appends a single `1` bit, then the minimum number of `0` bits so the
/// length is congruent to 448 (mod 512), then the original bit length as a
/// 64-bit big-endian value, one bit per element. The result is always a
/// positive multiple of 512 bits; an empty input pads to exactly one block.
///
/// Fails with [`HarnessError::MessageTooLarge`] when the bit length does not
/// fit the 64-bit length field, the same limit the hash standard imposes.
pub fn pad_message(bits: &BitSequence) -> Result<BitSequence, HarnessError> {
    let bit_len = bits.len();
    let len_value = u64::try_from(bit_len).map_err(|_| HarnessError::MessageTooLarge {
        bits: bit_len as u128,
    })?;

    let length_offset = BLOCK_BITS - LENGTH_BITS;
    let residue = (bit_len + 1) % BLOCK_BITS;
    let zero_fill = if residue <= length_offset {
        length_offset - residue
    } else {
        BLOCK_BITS + length_offset - residue
    };

    let mut padded = bits.clone();
    padded.push(true);
    padded.extend(std::iter::repeat(false).take(zero_fill));
    padded.extend((0..LENGTH_BITS).rev().map(|idx| (len_value >> idx) & 1 == 1));

    debug_assert_eq!(padded.len() % BLOCK_BITS, 0);
    Ok(padded)
}
