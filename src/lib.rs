//! # SECDED ARQ Link Core
//!
//! A deterministic, cycle-stepped software model of a FIFO-buffered link
//! endpoint. Every stored word is protected by a Single-Error-Correct /
//! Double-Error-Detect (SECDED) extended Hamming code, and uncorrectable
//! corruption is recovered through an Automatic-Repeat-Request (ARQ)
//! acknowledgement handshake: the controller nacks, holds the read cursor
//! in place, and replays the same word until it is delivered clean.
//!
//! ## Data Flow
//!
//! ```text
//! write path: data_in → SECDED encode → FIFO slot
//! read path:  FIFO head (peek) → injected fault → SECDED decode
//!             ├─ Clean / CorrectedSingleBit → ack, pop, advance
//!             └─ DetectedUncorrectable      → nack, hold, replay
//! ```
//!
//! The model is strictly synchronous: the caller drives one
//! [`LinkController::tick`] per cycle with a [`TickRequest`] and reads the
//! cycle's complete outputs from the returned [`TickResponse`]. Nothing
//! blocks, nothing runs in the background, and error injection is an
//! explicit caller-supplied input rather than a physical fault model.
//!
//! ## Example
//!
//! ```rust
//! use secded_link::{FaultKind, LinkConfig, LinkController, TickRequest};
//!
//! let mut link = LinkController::new(LinkConfig::default()).unwrap();
//!
//! // Enqueue two words
//! link.tick(&TickRequest::write(0x3));
//! link.tick(&TickRequest::write(0xA));
//!
//! // A single-bit channel fault is corrected transparently
//! let resp = link.tick(&TickRequest::read(FaultKind::SingleBit));
//! assert!(resp.ack);
//! assert_eq!(resp.data_out, 0x3);
//!
//! // A double-bit fault is nacked; the clean retry replays the word
//! let resp = link.tick(&TickRequest::read(FaultKind::DoubleBit));
//! assert!(resp.nack);
//! let resp = link.tick(&TickRequest::read(FaultKind::None));
//! assert_eq!(resp.data_out, 0xA);
//! ```

pub mod fifo;
pub mod link;
pub mod logging;
pub mod secded;
pub mod types;

pub use fifo::CodewordFifo;
pub use link::{LinkConfig, LinkController, LinkStats, TickRequest, TickResponse};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use secded::SecdedCodec;
pub use types::{Codeword, ErrorClass, FaultKind, LinkError, LinkResult, Word};
