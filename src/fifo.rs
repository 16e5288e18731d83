//! Codeword FIFO Buffer
//!
//! A fixed-capacity ring of encoded codewords with independent write and
//! read cursors. The buffer supports peek-without-remove semantics: the
//! read cursor advances only when a delivery is committed, which is what
//! lets the link controller replay the same word after a negative
//! acknowledgement without any re-encoding.
//!
//! ## Example
//!
//! ```rust
//! use secded_link::fifo::CodewordFifo;
//!
//! let mut fifo = CodewordFifo::new(4).unwrap();
//! fifo.write(0xA5).unwrap();
//!
//! // Peeking does not consume the slot
//! assert_eq!(fifo.peek().unwrap(), 0xA5);
//! assert_eq!(fifo.peek().unwrap(), 0xA5);
//! assert_eq!(fifo.len(), 1);
//!
//! // Committing the pop does
//! fifo.commit_pop().unwrap();
//! assert!(fifo.is_empty());
//! ```

use crate::types::{Codeword, LinkError, LinkResult};

/// Fixed-capacity FIFO of codewords with modulo cursors.
///
/// Invariant: `0 <= len <= capacity`, and delivery order matches write
/// order. Slots are preallocated; a rejected write leaves every slot and
/// cursor untouched.
#[derive(Debug, Clone)]
pub struct CodewordFifo {
    slots: Vec<Codeword>,
    write_idx: usize,
    read_idx: usize,
    count: usize,
}

impl CodewordFifo {
    /// Create an empty FIFO with the given capacity.
    ///
    /// A capacity of zero is rejected with [`LinkError::InvalidDepth`].
    pub fn new(capacity: usize) -> LinkResult<Self> {
        if capacity == 0 {
            return Err(LinkError::InvalidDepth { depth: capacity });
        }
        Ok(Self {
            slots: vec![0; capacity],
            write_idx: 0,
            read_idx: 0,
            count: 0,
        })
    }

    /// Append a codeword at the write cursor.
    ///
    /// Fails with [`LinkError::BufferFull`] when every slot is occupied;
    /// the rejected codeword is simply not enqueued.
    pub fn write(&mut self, codeword: Codeword) -> LinkResult<()> {
        if self.count == self.slots.len() {
            return Err(LinkError::BufferFull);
        }
        self.slots[self.write_idx] = codeword;
        self.write_idx = (self.write_idx + 1) % self.slots.len();
        self.count += 1;
        Ok(())
    }

    /// Return the codeword at the read cursor without consuming it.
    ///
    /// Fails with [`LinkError::BufferEmpty`] when no word is stored.
    pub fn peek(&self) -> LinkResult<Codeword> {
        if self.count == 0 {
            return Err(LinkError::BufferEmpty);
        }
        Ok(self.slots[self.read_idx])
    }

    /// Commit the delivery of the word last returned by [`peek`].
    ///
    /// Advances the read cursor and frees the slot. Must only follow a
    /// peek that is being accepted as delivered; a nacked read never
    /// commits.
    ///
    /// [`peek`]: CodewordFifo::peek
    pub fn commit_pop(&mut self) -> LinkResult<()> {
        if self.count == 0 {
            return Err(LinkError::BufferEmpty);
        }
        self.read_idx = (self.read_idx + 1) % self.slots.len();
        self.count -= 1;
        Ok(())
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no slots are occupied.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Total slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Clear all contents and return both cursors to slot 0.
    pub fn reset(&mut self) {
        self.slots.fill(0);
        self.write_idx = 0;
        self.read_idx = 0;
        self.count = 0;
    }
}
