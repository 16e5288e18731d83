//! SECDED Error Correction Codec
//!
//! Implements an extended Hamming code (Single-Error-Correct,
//! Double-Error-Detect) over a configurable payload width. For `m` data
//! bits the codec uses `r` positional parity bits (the smallest `r` with
//! `2^r >= m + r + 1`) plus one overall parity bit, giving a minimum
//! Hamming distance of 4 between valid codewords. SECDED codes of this
//! shape protect memory words in ECC DRAM and register files in
//! radiation-tolerant hardware.
//!
//! ## Properties
//!
//! - Corrects any single-bit error (including errors in the parity bits)
//! - Detects, without correcting, any double-bit error
//! - Default (8,4) layout: 4 data bits, 3 Hamming parity bits, 1 overall
//!   parity bit
//! - Bit offsets are 0-indexed from the LSB of the codeword
//!
//! ## Example
//!
//! ```rust
//! use secded_link::secded::SecdedCodec;
//! use secded_link::types::{ErrorClass, FaultKind};
//!
//! let codec = SecdedCodec::new(4).unwrap();
//! let cw = codec.encode(0xA);
//!
//! // Clean decode recovers the payload exactly
//! assert_eq!(codec.decode(cw), (0xA, ErrorClass::Clean));
//!
//! // A single flipped bit is corrected
//! let (word, class) = codec.decode_with_fault(cw, FaultKind::SingleBit);
//! assert_eq!((word, class), (0xA, ErrorClass::CorrectedSingleBit));
//!
//! // Two flipped bits are detected but not correctable
//! let (_, class) = codec.decode_with_fault(cw, FaultKind::DoubleBit);
//! assert_eq!(class, ErrorClass::DetectedUncorrectable);
//! ```

use crate::types::{Codeword, ErrorClass, FaultKind, LinkError, LinkResult, Word};

/// Maximum supported payload width in bits.
pub const MAX_DATA_BITS: u8 = 32;

/// SECDED encoder/decoder for one payload width.
///
/// The codeword uses the classic positional Hamming layout: 1-indexed
/// position `p` lives at bit offset `p - 1`, power-of-two positions hold
/// parity, the remaining positions hold data bits (LSB first), and the
/// overall parity bit sits above them at the top offset.
#[derive(Debug, Clone)]
pub struct SecdedCodec {
    /// Payload width in bits (`m`).
    data_bits: u8,
    /// Number of positional Hamming parity bits (`r`).
    parity_bits: u8,
    /// Hamming code length `n = m + r` (excludes the overall parity bit).
    code_len: u8,
}

impl SecdedCodec {
    /// Create a codec for the given payload width.
    ///
    /// Widths outside `1..=32` are rejected with
    /// [`LinkError::InvalidWordWidth`].
    pub fn new(data_bits: u8) -> LinkResult<Self> {
        if data_bits == 0 || data_bits > MAX_DATA_BITS {
            return Err(LinkError::InvalidWordWidth { bits: data_bits });
        }

        // Smallest r with 2^r >= m + r + 1
        let mut parity_bits = 0u8;
        while (1u64 << parity_bits) < data_bits as u64 + parity_bits as u64 + 1 {
            parity_bits += 1;
        }

        Ok(Self {
            data_bits,
            parity_bits,
            code_len: data_bits + parity_bits,
        })
    }

    /// Payload width in bits.
    pub fn data_bits(&self) -> u8 {
        self.data_bits
    }

    /// Number of redundancy bits (Hamming parity plus the overall parity bit).
    pub fn parity_bits(&self) -> u8 {
        self.parity_bits + 1
    }

    /// Total codeword width in bits.
    pub fn codeword_bits(&self) -> u8 {
        self.code_len + 1
    }

    /// Encode a payload word into a codeword.
    ///
    /// Total and deterministic; the word is masked to the configured
    /// payload width first, so any `Word` value is encodable.
    pub fn encode(&self, word: Word) -> Codeword {
        let data = word as u64 & mask(self.data_bits);
        let n = self.code_len as usize;

        // Scatter data bits across the non-power-of-two positions
        let mut cw: u64 = 0;
        let mut di = 0;
        for pos in 1..=n {
            if !pos.is_power_of_two() {
                cw |= ((data >> di) & 1) << (pos - 1);
                di += 1;
            }
        }

        // Each parity position 2^j covers the positions with bit j set
        for j in 0..self.parity_bits {
            let p = 1usize << j;
            let mut parity = 0u64;
            for pos in (p + 1)..=n {
                if pos & p != 0 {
                    parity ^= (cw >> (pos - 1)) & 1;
                }
            }
            cw |= parity << (p - 1);
        }

        // Overall parity makes the full codeword even-weight
        cw |= ((cw.count_ones() as u64) & 1) << n;
        cw
    }

    /// Decode a codeword, correcting a single-bit error if present.
    ///
    /// Returns the payload and its [`ErrorClass`]. On
    /// [`ErrorClass::DetectedUncorrectable`] the returned payload is the
    /// raw stored bits and carries no meaning.
    pub fn decode(&self, codeword: Codeword) -> (Word, ErrorClass) {
        let n = self.code_len as usize;
        let cw = codeword & mask(self.code_len + 1);
        let inner = cw & mask(self.code_len);

        let syndrome = self.syndrome(inner);
        let parity_even = cw.count_ones() % 2 == 0;

        match (syndrome, parity_even) {
            (0, true) => (self.extract(inner), ErrorClass::Clean),
            // Only the overall parity bit flipped; payload intact
            (0, false) => (self.extract(inner), ErrorClass::CorrectedSingleBit),
            (s, false) => {
                if s as usize <= n {
                    let corrected = inner ^ (1u64 << (s - 1));
                    (self.extract(corrected), ErrorClass::CorrectedSingleBit)
                } else {
                    // Syndrome points outside the codeword: >= 3 errors
                    (self.extract(inner), ErrorClass::DetectedUncorrectable)
                }
            }
            (_, true) => (self.extract(inner), ErrorClass::DetectedUncorrectable),
        }
    }

    /// Apply an injected fault to a codeword.
    ///
    /// The flipped offsets are fixed: bit 0 for [`FaultKind::SingleBit`],
    /// bits 0 and 2 for [`FaultKind::DoubleBit`]. Both offsets exist for
    /// every supported payload width.
    pub fn inject(&self, codeword: Codeword, fault: FaultKind) -> Codeword {
        match fault {
            FaultKind::None => codeword,
            FaultKind::SingleBit => codeword ^ 0b001,
            FaultKind::DoubleBit => codeword ^ 0b101,
        }
    }

    /// Decode with a caller-injected fault applied first.
    ///
    /// Equivalent to `decode(inject(codeword, fault))`; this is the entry
    /// point the link controller uses on its read path.
    pub fn decode_with_fault(&self, codeword: Codeword, fault: FaultKind) -> (Word, ErrorClass) {
        self.decode(self.inject(codeword, fault))
    }

    /// Compute the Hamming syndrome over the inner (non-extended) codeword.
    ///
    /// A valid codeword has the XOR of its set-bit positions equal to
    /// zero, so the syndrome of a single-bit error is that bit's
    /// 1-indexed position.
    fn syndrome(&self, inner: u64) -> u32 {
        let mut s = 0u32;
        for pos in 1..=self.code_len as usize {
            if (inner >> (pos - 1)) & 1 == 1 {
                s ^= pos as u32;
            }
        }
        s
    }

    /// Gather the data bits back out of the non-power-of-two positions.
    fn extract(&self, inner: u64) -> Word {
        let mut data = 0u64;
        let mut di = 0;
        for pos in 1..=self.code_len as usize {
            if !pos.is_power_of_two() {
                data |= ((inner >> (pos - 1)) & 1) << di;
                di += 1;
            }
        }
        data as Word
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Low-bit mask of the given width (width <= 63).
fn mask(bits: u8) -> u64 {
    (1u64 << bits) - 1
}
