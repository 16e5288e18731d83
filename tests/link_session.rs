//! End-to-end link session, mirroring the stimulus the hardware test
//! bench drives: a burst of writes followed by reads with injected
//! channel faults, asserting on the ack/nack outputs each cycle.

use secded_link::{
    ErrorClass, FaultKind, LinkConfig, LinkController, SecdedCodec, TickRequest,
};

fn link_with_depth(depth: usize) -> LinkController {
    LinkController::new(LinkConfig {
        word_bits: 4,
        depth,
    })
    .expect("valid config")
}

#[test]
fn observed_stimulus_session() {
    let mut link = link_with_depth(4);

    // Fill the buffer: 0x0, 0xA, 0x3, 0x2
    for w in [0x0u32, 0xA, 0x3, 0x2] {
        link.tick(&TickRequest::write(w));
    }
    assert_eq!(link.occupancy(), 4);

    // Clean read delivers 0x0
    let resp = link.tick(&TickRequest::read(FaultKind::None));
    assert!(resp.ack && !resp.nack);
    assert_eq!(resp.data_out, 0x0);

    // Single-bit fault is corrected; 0xA still acked
    let resp = link.tick(&TickRequest::read(FaultKind::SingleBit));
    assert!(resp.ack && !resp.nack);
    assert_eq!(resp.data_out, 0xA);
    assert_eq!(link.stats().single_bit_corrections, 1);

    // The double-bit fault hits the next word, 0x3: nacked and held
    let resp = link.tick(&TickRequest::read(FaultKind::DoubleBit));
    assert!(!resp.ack && resp.nack);
    assert!(link.pending_retransmit());

    // The clean retry replays the same word, not the next one
    let resp = link.tick(&TickRequest::read(FaultKind::None));
    assert!(resp.ack && !resp.nack);
    assert_eq!(resp.data_out, 0x3);
    assert!(!link.pending_retransmit());

    // Drain the remainder
    let resp = link.tick(&TickRequest::read(FaultKind::None));
    assert!(resp.ack);
    assert_eq!(resp.data_out, 0x2);

    // Buffer exhausted: outputs hold idle
    let resp = link.tick(&TickRequest::read(FaultKind::None));
    assert!(!resp.ack && !resp.nack);
    assert_eq!(link.occupancy(), 0);
}

#[test]
fn nack_retry_under_double_fault_on_second_word() {
    // Variant of the observed session where the uncorrectable fault lands
    // on 0xA itself: the failed attempt and its retry must bracket the
    // same payload.
    let mut link = link_with_depth(4);
    for w in [0x0u32, 0xA, 0x3, 0x2] {
        link.tick(&TickRequest::write(w));
    }

    assert_eq!(link.tick(&TickRequest::read(FaultKind::None)).data_out, 0x0);

    // Double-bit fault on 0xA: nack, then the retry delivers 0xA itself
    let resp = link.tick(&TickRequest::read(FaultKind::DoubleBit));
    assert!(resp.nack);
    let resp = link.tick(&TickRequest::read(FaultKind::None));
    assert!(resp.ack);
    assert_eq!(resp.data_out, 0xA);

    assert_eq!(link.tick(&TickRequest::read(FaultKind::None)).data_out, 0x3);
    assert_eq!(link.tick(&TickRequest::read(FaultKind::None)).data_out, 0x2);
}

#[test]
fn sustained_traffic_with_periodic_faults() {
    // Stream more words than the buffer holds, with every third read
    // first hit by an uncorrectable fault. Delivery order must match
    // write order exactly, with each nack followed by a matching retry.
    let mut link = link_with_depth(4);
    let words: Vec<u32> = (0..12).map(|i| (i * 5 + 3) % 16).collect();

    let mut delivered = Vec::new();
    let mut to_write = words.iter().copied();
    let mut nacks = 0u64;

    while delivered.len() < words.len() {
        if let Some(w) = if link.occupancy() < 4 { to_write.next() } else { None } {
            link.tick(&TickRequest::write(w));
        }

        let fault = if delivered.len() % 3 == 2 && !link.pending_retransmit() {
            FaultKind::DoubleBit
        } else {
            FaultKind::None
        };
        let resp = link.tick(&TickRequest::read(fault));
        if resp.ack {
            delivered.push(resp.data_out);
        } else if resp.nack {
            nacks += 1;
        }
    }

    assert_eq!(delivered, words);
    assert_eq!(link.stats().retransmit_requests, nacks);
    assert!(nacks > 0, "stimulus should have exercised the nack path");
}

#[test]
fn reset_mid_retransmission() {
    let mut link = link_with_depth(4);
    link.tick(&TickRequest::write(0x9));
    link.tick(&TickRequest::read(FaultKind::DoubleBit));
    assert!(link.pending_retransmit());

    link.reset();

    // The held word is gone with the rest of the buffer
    let resp = link.tick(&TickRequest::read(FaultKind::None));
    assert!(!resp.ack && !resp.nack);

    // And the link is fully functional again
    link.tick(&TickRequest::write(0x4));
    let resp = link.tick(&TickRequest::read(FaultKind::None));
    assert!(resp.ack);
    assert_eq!(resp.data_out, 0x4);
}

#[test]
fn codec_agrees_with_link_outputs() {
    // The word the link acks must be exactly what a standalone codec
    // round-trip produces for the same payload.
    let codec = SecdedCodec::new(4).expect("valid width");
    let mut link = link_with_depth(4);

    for w in 0u32..16 {
        let (decoded, class) = codec.decode(codec.encode(w));
        assert_eq!((decoded, class), (w, ErrorClass::Clean));

        link.tick(&TickRequest::write(w));
        let resp = link.tick(&TickRequest::read(FaultKind::None));
        assert!(resp.ack);
        assert_eq!(resp.data_out, decoded);
    }
}
