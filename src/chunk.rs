use itertools::Itertools;
use log::debug;

use crate::bits::BitSequence;
use crate::HarnessError;

/// A fixed-width bit vector forming one unit of circuit input.
///
/// Segments are positionally ordered; their order reconstructs the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment(BitSequence);

impl Segment {
    /// An all-zero segment, used to fill the circuit's block budget past the
    /// end of the real message data.
    pub fn zeroed(width: usize) -> Self {
        Self(BitSequence::from_bits(vec![false; width]))
    }

    pub fn width(&self) -> usize {
        self.0.len()
    }

    pub fn bits(&self) -> &[bool] {
        self.0.bits()
    }

    pub fn is_zeroed(&self) -> bool {
        self.bits().iter().all(|&bit| !bit)
    }

    /// Byte rendering of the segment, for logging and assertions. Only
    /// byte-aligned widths decode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, HarnessError> {
        self.0.to_bytes()
    }
}

/// Splits a padded bit sequence into `segment_width`-bit segments.
///
/// The length must divide evenly, which the padder guarantees whenever
/// `segment_width` divides 512. Anything else is a configuration mismatch
/// surfaced as [`HarnessError::MisalignedInput`].
pub fn split(bits: &BitSequence, segment_width: usize) -> Result<Vec<Segment>, HarnessError> {
    if segment_width == 0 || bits.len() % segment_width != 0 {
        return Err(HarnessError::MisalignedInput {
            len: bits.len(),
            width: segment_width,
        });
    }
    let segments = bits
        .bits()
        .chunks(segment_width)
        .map(|chunk| Segment(BitSequence::from_bits(chunk.to_vec())))
        .collect_vec();
    Ok(segments)
}

/// Fits a segment list to the circuit's static budget.
///
/// A shortfall is topped up with all-zero segments; the count of real
/// segments must be tracked separately (see [`true_block_count`]) since the
/// fill is indistinguishable from data by inspection alone. Needing more
/// segments than the budget is fatal, never a silent truncation.
pub fn fit_to_budget(
    mut segments: Vec<Segment>,
    max_segments: usize,
    segment_width: usize,
) -> Result<Vec<Segment>, HarnessError> {
    if segments.len() > max_segments {
        return Err(HarnessError::CircuitCapacityExceeded {
            required: segments.len(),
            max: max_segments,
        });
    }
    if segments.len() < max_segments {
        let fill = max_segments - segments.len();
        debug!("zero-filling {} of {} segments", fill, max_segments);
        segments.extend(std::iter::repeat_with(|| Segment::zeroed(segment_width)).take(fill));
    }
    Ok(segments)
}

/// Number of segments the padded message actually fills, before any
/// zero-fill.
///
/// The count is in segments of `segment_width` bits. When the width is a
/// sub-multiple of 512, whole compression blocks are recovered by dividing
/// by `512 / segment_width` ([`CircuitInputSet::compression_block_count`]
/// does this).
///
/// [`CircuitInputSet::compression_block_count`]: crate::CircuitInputSet::compression_block_count
pub fn true_block_count(padded_bit_len: usize, segment_width: usize) -> usize {
    debug_assert!(segment_width > 0);
    debug_assert_eq!(padded_bit_len % segment_width, 0);
    padded_bit_len / segment_width
}
