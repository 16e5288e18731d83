//! ARQ Link Controller — per-tick acknowledgement state machine
//!
//! The clocked front of the core: each call to [`LinkController::tick`]
//! fully processes one cycle's write/read/fault request against the
//! codeword buffer and the SECDED codec, and drives the ack/nack outputs
//! for that cycle. Uncorrectable corruption triggers the
//! Automatic-Repeat-Request path: the controller nacks, holds the read
//! cursor in place, and replays the same word on the next read request
//! until it is delivered clean.
//!
//! Correctable single-bit errors are invisible to the ARQ layer: the
//! codec already repaired them, so the word is acked and consumed like a
//! clean one. Only a classification the codec cannot trust escalates to
//! retransmission.
//!
//! ## Example
//!
//! ```rust
//! use secded_link::link::{LinkConfig, LinkController, TickRequest};
//! use secded_link::types::FaultKind;
//!
//! let mut link = LinkController::new(LinkConfig::default()).unwrap();
//!
//! link.tick(&TickRequest::write(0xA));
//!
//! // A double-bit fault is detected and nacked; the word is held
//! let resp = link.tick(&TickRequest::read(FaultKind::DoubleBit));
//! assert!(resp.nack && !resp.ack);
//!
//! // The clean retry delivers the same word
//! let resp = link.tick(&TickRequest::read(FaultKind::None));
//! assert!(resp.ack);
//! assert_eq!(resp.data_out, 0xA);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::fifo::CodewordFifo;
use crate::secded::SecdedCodec;
use crate::types::{Codeword, ErrorClass, FaultKind, LinkResult, Word};

/// Link configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Payload word width in bits (1..=32).
    pub word_bits: u8,
    /// Buffer capacity in codewords (at least 1).
    pub depth: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            word_bits: 4,
            depth: 16,
        }
    }
}

/// One cycle's request into the link.
///
/// `data_in` is ignored unless `write_enable` is set; `fault` is ignored
/// unless `read_enable` is set. Both enables may be set in the same tick
/// and are processed independently, write first.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickRequest {
    /// Encode and enqueue `data_in` this cycle.
    pub write_enable: bool,
    /// Attempt to deliver the word at the head of the buffer this cycle.
    pub read_enable: bool,
    /// Payload to enqueue when `write_enable` is set.
    pub data_in: Word,
    /// Injected channel fault applied on the read path.
    pub fault: FaultKind,
}

impl TickRequest {
    /// A cycle with neither write nor read requested.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A write-only cycle.
    pub fn write(word: Word) -> Self {
        Self {
            write_enable: true,
            data_in: word,
            ..Self::default()
        }
    }

    /// A read-only cycle with the given injected fault.
    pub fn read(fault: FaultKind) -> Self {
        Self {
            read_enable: true,
            fault,
            ..Self::default()
        }
    }

    /// A cycle requesting both a write and a read.
    pub fn write_read(word: Word, fault: FaultKind) -> Self {
        Self {
            write_enable: true,
            read_enable: true,
            data_in: word,
            fault,
        }
    }
}

/// One cycle's outputs.
///
/// Exactly one of `ack`/`nack` is set on a classified read; both stay
/// deasserted on idle cycles and empty-buffer reads. `data_out` is
/// meaningful only while `ack` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickResponse {
    /// Word delivered (clean or corrected).
    pub ack: bool,
    /// Uncorrectable corruption detected; the word will be replayed.
    pub nack: bool,
    /// Delivered payload when `ack` is set; zero otherwise.
    pub data_out: Word,
}

/// Link statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Words accepted into the buffer.
    pub words_enqueued: u64,
    /// Writes rejected because the buffer was full.
    pub writes_rejected: u64,
    /// Words delivered with ack (clean or corrected).
    pub words_delivered: u64,
    /// Deliveries that required a single-bit correction.
    pub single_bit_corrections: u64,
    /// Reads nacked with an uncorrectable classification.
    pub retransmit_requests: u64,
    /// Reads issued against an empty buffer.
    pub empty_reads: u64,
}

/// Synchronous SECDED-protected link endpoint.
///
/// Owns the codec, the codeword buffer, and the retransmission state.
/// Strictly single-threaded: one `tick` completes before the next may be
/// issued, and no call ever blocks; full and empty conditions are
/// same-cycle results.
#[derive(Debug, Clone)]
pub struct LinkController {
    config: LinkConfig,
    codec: SecdedCodec,
    fifo: CodewordFifo,
    /// True exactly while the head word awaits a successful retry.
    pending_retransmit: bool,
    /// Codeword peeked by the most recent nacked read.
    held: Option<Codeword>,
    stats: LinkStats,
}

impl LinkController {
    /// Create a link with an empty buffer and idle state.
    ///
    /// Validates the configuration: word width outside `1..=32` or a
    /// zero depth is a construction-time error.
    pub fn new(config: LinkConfig) -> LinkResult<Self> {
        let codec = SecdedCodec::new(config.word_bits)?;
        let fifo = CodewordFifo::new(config.depth)?;
        Ok(Self {
            config,
            codec,
            fifo,
            pending_retransmit: false,
            held: None,
            stats: LinkStats::default(),
        })
    }

    /// Process one cycle.
    ///
    /// The write path (if requested) runs first, then the read path; they
    /// never block each other. The returned response is this cycle's
    /// complete output.
    pub fn tick(&mut self, req: &TickRequest) -> TickResponse {
        let mut resp = TickResponse::default();

        if req.write_enable {
            let codeword = self.codec.encode(req.data_in);
            match self.fifo.write(codeword) {
                Ok(()) => {
                    self.stats.words_enqueued += 1;
                    trace!(word = req.data_in, occupancy = self.fifo.len(), "word enqueued");
                }
                Err(_) => {
                    // No ack/nack exists on the write path; backpressure is
                    // the caller's to observe via occupancy
                    self.stats.writes_rejected += 1;
                    debug!(word = req.data_in, "write rejected, buffer full");
                }
            }
        }

        if req.read_enable {
            match self.fifo.peek() {
                Err(_) => {
                    // Nothing to classify; outputs hold idle
                    self.stats.empty_reads += 1;
                }
                Ok(codeword) => {
                    let (word, class) = self.codec.decode_with_fault(codeword, req.fault);
                    match class {
                        ErrorClass::Clean | ErrorClass::CorrectedSingleBit => {
                            if class == ErrorClass::CorrectedSingleBit {
                                self.stats.single_bit_corrections += 1;
                            }
                            resp.ack = true;
                            resp.data_out = word;
                            // The peek above succeeded, so the pop cannot fail
                            let _ = self.fifo.commit_pop();
                            let retried = self.pending_retransmit;
                            self.pending_retransmit = false;
                            self.held = None;
                            self.stats.words_delivered += 1;
                            trace!(word, retried, "word delivered");
                        }
                        ErrorClass::DetectedUncorrectable => {
                            resp.nack = true;
                            self.pending_retransmit = true;
                            self.held = Some(codeword);
                            self.stats.retransmit_requests += 1;
                            debug!(codeword, "uncorrectable corruption, holding for retransmit");
                        }
                    }
                }
            }
        }

        resp
    }

    /// Return to the initial empty state.
    ///
    /// Synchronous and idempotent; callable between any two ticks
    /// regardless of prior history.
    pub fn reset(&mut self) {
        self.fifo.reset();
        self.pending_retransmit = false;
        self.held = None;
        self.stats = LinkStats::default();
    }

    /// The configuration this link was built with.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Whether the head word is awaiting a successful retry.
    pub fn pending_retransmit(&self) -> bool {
        self.pending_retransmit
    }

    /// The codeword peeked by the most recent nacked read, if any.
    pub fn held_codeword(&self) -> Option<Codeword> {
        self.held
    }

    /// Number of words currently buffered.
    pub fn occupancy(&self) -> usize {
        self.fifo.len()
    }

    /// Statistics accumulated since construction or the last reset.
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }
}
