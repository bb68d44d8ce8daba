use log::debug;

use crate::bits::BitSequence;
use crate::chunk::{self, Segment};
use crate::padding;
use crate::{HarnessError, BLOCK_BITS, DIGEST_BITS};

/// Everything a SHA-256 circuit consumes for one invocation.
///
/// The segment list always has exactly the budgeted length; real message
/// data and zero-fill are told apart by `true_block_count` alone, never by
/// inspecting segment contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitInputSet {
    /// Fixed-width bit segments, in message order, zero-filled up to the
    /// circuit's budget.
    pub segments: Vec<Segment>,
    /// How many leading segments hold real message data.
    pub true_block_count: usize,
    /// Original, unpadded message length in bytes.
    pub message_len: usize,
}

impl CircuitInputSet {
    pub fn segment_width(&self) -> usize {
        self.segments.first().map_or(0, Segment::width)
    }

    /// Whole 512-bit compression blocks the real message data fills.
    ///
    /// Equal to `true_block_count` when segments are full blocks; for
    /// sub-block widths the segment count is divided back down to block
    /// granularity.
    pub fn compression_block_count(&self) -> usize {
        let width = self.segment_width();
        if width == 0 || width > BLOCK_BITS {
            return self.true_block_count;
        }
        self.true_block_count / (BLOCK_BITS / width)
    }
}

/// Builds the named circuit inputs for a raw message, against a fixed
/// circuit shape.
///
/// This is the single canonical path from bytes to circuit wires: encode to
/// bits, length-pad, split into segments, fit to the block budget. Every
/// failure of a composed step propagates unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitInputBuilder {
    max_segments: usize,
    segment_width: usize,
}

impl CircuitInputBuilder {
    /// A builder for a circuit accepting up to `max_segments` full 512-bit
    /// blocks.
    pub fn new(max_segments: usize) -> Self {
        Self {
            max_segments,
            segment_width: BLOCK_BITS,
        }
    }

    /// Overrides the segment width, for circuits that consume partial
    /// blocks per invocation. Must divide 512 for padded messages to chunk
    /// evenly.
    pub fn with_segment_width(mut self, segment_width: usize) -> Self {
        self.segment_width = segment_width;
        self
    }

    pub fn max_segments(&self) -> usize {
        self.max_segments
    }

    pub fn segment_width(&self) -> usize {
        self.segment_width
    }

    pub fn build(&self, message: &[u8]) -> Result<CircuitInputSet, HarnessError> {
        let bits = BitSequence::from_bytes(message);
        let padded = padding::pad_message(&bits)?;
        let true_block_count = chunk::true_block_count(padded.len(), self.segment_width);
        let segments = chunk::split(&padded, self.segment_width)?;
        let segments = chunk::fit_to_budget(segments, self.max_segments, self.segment_width)?;
        debug!(
            "built {} segments of {} bits ({} real) for a {}-byte message",
            segments.len(),
            self.segment_width,
            true_block_count,
            message.len(),
        );
        Ok(CircuitInputSet {
            segments,
            true_block_count,
            message_len: message.len(),
        })
    }
}

/// Where a circuit's digest bits live inside its flat witness.
///
/// This is a property of one circuit's internal wire layout, not of the hash
/// function, so it is configuration rather than a constant. The default
/// models the common layout where index 0 carries the constant-one signal
/// and the 256 digest bits follow at `[1, 257)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestWindow {
    pub offset: usize,
    pub len: usize,
}

impl DigestWindow {
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            len: DIGEST_BITS,
        }
    }
}

impl Default for DigestWindow {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Extracts the digest window from a sequence of output bits and decodes it
/// into bytes.
///
/// Fails with [`HarnessError::MalformedBitLength`] when the window falls
/// outside the sequence or is not byte-aligned.
pub fn decode_digest(bits: &BitSequence, window: &DigestWindow) -> Result<Vec<u8>, HarnessError> {
    let out_of_range = |end| HarnessError::MalformedBitLength {
        start: window.offset,
        end,
        len: bits.len(),
    };
    let end = window
        .offset
        .checked_add(window.len)
        .ok_or_else(|| out_of_range(usize::MAX))?;
    let slice = bits
        .bits()
        .get(window.offset..end)
        .ok_or_else(|| out_of_range(end))?;
    BitSequence::from_bits(slice.to_vec()).to_bytes()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reference_message_builds_one_block() {
        let message = b"Jack,Sparrow,1960-04-16";
        let inputs = CircuitInputBuilder::new(1).build(message).unwrap();
        assert_eq!(inputs.segments.len(), 1);
        assert_eq!(inputs.segments[0].width(), BLOCK_BITS);
        assert_eq!(inputs.true_block_count, 1);
        assert_eq!(inputs.message_len, 23);
        assert_eq!(inputs.compression_block_count(), 1);

        // The lone segment is the padded message: bytes, 0x80 marker, zero
        // fill, 64-bit big-endian bit length.
        let block = inputs.segments[0].to_bytes().unwrap();
        assert_eq!(&block[..23], message);
        assert_eq!(block[23], 0x80);
        assert!(block[24..56].iter().all(|&byte| byte == 0));
        assert_eq!(&block[56..], &184u64.to_be_bytes());
    }

    #[test]
    fn empty_message_still_yields_a_segment() {
        let inputs = CircuitInputBuilder::new(1).build(b"").unwrap();
        assert_eq!(inputs.segments.len(), 1);
        assert_eq!(inputs.true_block_count, 1);
        assert_eq!(inputs.message_len, 0);
    }

    #[test]
    fn shortfall_is_zero_filled_and_discriminated() {
        let inputs = CircuitInputBuilder::new(3)
            .build(b"Jack,Sparrow,1960-04-16")
            .unwrap();
        assert_eq!(inputs.segments.len(), 3);
        assert_eq!(inputs.true_block_count, 1);
        assert!(!inputs.segments[0].is_zeroed());
        assert!(inputs.segments[1].is_zeroed());
        assert!(inputs.segments[2].is_zeroed());
    }

    #[test]
    fn capacity_boundary() {
        // 56 bytes pad to exactly two blocks.
        let message = [0x11u8; 56];
        let inputs = CircuitInputBuilder::new(2).build(&message).unwrap();
        assert_eq!(inputs.true_block_count, 2);
        assert_eq!(inputs.segments.len(), 2);

        assert_eq!(
            CircuitInputBuilder::new(1).build(&message),
            Err(HarnessError::CircuitCapacityExceeded {
                required: 2,
                max: 1
            })
        );
    }

    #[test]
    fn sub_block_width() {
        let inputs = CircuitInputBuilder::new(2)
            .with_segment_width(256)
            .build(b"abc")
            .unwrap();
        assert_eq!(inputs.segments.len(), 2);
        assert_eq!(inputs.true_block_count, 2);
        assert_eq!(inputs.compression_block_count(), 1);
    }

    #[test]
    fn decode_digest_window() {
        let digest_bytes: Vec<u8> = (0u8..32).collect();
        let mut bits = BitSequence::from_bits(vec![true]);
        bits.extend(BitSequence::from_bytes(&digest_bytes).bits().iter().copied());

        let decoded = decode_digest(&bits, &DigestWindow::default()).unwrap();
        assert_eq!(decoded, digest_bytes);
    }

    #[test]
    fn decode_digest_rejects_out_of_range_window() {
        let bits = BitSequence::from_bits(vec![false; 100]);
        assert_eq!(
            decode_digest(&bits, &DigestWindow::default()),
            Err(HarnessError::MalformedBitLength {
                start: 1,
                end: 257,
                len: 100
            })
        );
    }

    #[test]
    fn decode_digest_rejects_unaligned_window() {
        let bits = BitSequence::from_bits(vec![false; 300]);
        let window = DigestWindow { offset: 0, len: 13 };
        assert_eq!(
            decode_digest(&bits, &window),
            Err(HarnessError::MalformedBitLength {
                start: 0,
                end: 13,
                len: 13
            })
        );
    }
}
