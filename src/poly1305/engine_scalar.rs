//! Portable scalar engine: Phase B of spec.md §4.3 applied to the whole
//! message, one 16-byte block at a time, with no 8-lane bulk path.
//!
//! Used on hosts without AVX-512F, and as the cross-check oracle for the
//! bulk-path equivalence property (P3): both engines must produce identical
//! tags for the same key and message.

use zeroize::Zeroize;

use super::consts::{BLOCK_LEN, TAG_LEN};
use super::field::{self, Element};

/// Portable, non-vectorized Poly1305 engine.
#[derive(Zeroize)]
#[zeroize(drop)]
pub(crate) struct ScalarEngine {
    r: Element,
    acc: Element,
    s: [u8; 16],
    buf: [u8; BLOCK_LEN],
    buf_len: usize,
}

impl ScalarEngine {
    pub(crate) fn new(r_bytes: &[u8; 16], s: &[u8; 16]) -> ScalarEngine {
        ScalarEngine {
            r: Element::from_clamped_r(r_bytes),
            acc: Element::ZERO,
            s: *s,
            buf: [0u8; BLOCK_LEN],
            buf_len: 0,
        }
    }

    fn absorb_block(&mut self, block: &[u8; 16]) {
        let m = Element::from_block(block);
        self.acc = field::mul(&field::add(&self.acc, &m), &self.r);
    }

    pub(crate) fn update(&mut self, mut input: &[u8]) {
        if input.is_empty() {
            return;
        }

        if self.buf_len > 0 {
            let need = BLOCK_LEN - self.buf_len;
            let take = need.min(input.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&input[..take]);
            self.buf_len += take;
            input = &input[take..];

            if self.buf_len == BLOCK_LEN {
                let block = self.buf;
                self.absorb_block(&block);
                self.buf_len = 0;
            } else {
                return;
            }
        }

        while input.len() >= BLOCK_LEN {
            let block: [u8; 16] = input[..BLOCK_LEN].try_into().unwrap();
            self.absorb_block(&block);
            input = &input[BLOCK_LEN..];
        }

        if !input.is_empty() {
            self.buf[..input.len()].copy_from_slice(input);
            self.buf_len = input.len();
        }
    }

    pub(crate) fn finish(mut self) -> [u8; TAG_LEN] {
        if self.buf_len > 0 {
            let m = Element::from_partial_block(&self.buf[..self.buf_len]);
            self.acc = field::mul(&field::add(&self.acc, &m), &self.r);
        }
        field::finish_scalar(self.acc.0, &self.s)
    }
}
