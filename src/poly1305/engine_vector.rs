//! 8-lane AVX-512 engine: the bulk path of spec.md §4.3.
//!
//! Message bytes are buffered until a full 128-byte superblock is available;
//! superblocks are absorbed via the parallel-lane Horner recurrence of
//! [`vector::FieldVec::fma`], broadcasting `r^8` across all eight lanes. Any
//! leftover full blocks and the final partial block are folded in through
//! the scalar field module, after the bulk accumulator (if any) has been
//! combined back down to a single element (spec.md §4.3 Phase B/C, §4.5).
#![allow(unsafe_op_in_unsafe_fn)]

use zeroize::Zeroize;

use super::consts::{BLOCK_LEN, SUPERBLOCK_LEN, TAG_LEN};
use super::field::{self, Element};
use super::vector::{FieldVec, Precomp};

/// 8-lane vectorized Poly1305 engine.
///
/// `FieldVec`/`Precomp` hold `__m512i` registers with no `zeroize` coverage
/// of their own (see [`FieldVec::zeroize_in_place`]); `Drop` scrubs them
/// explicitly alongside the `Zeroize`-derived scalar fields.
pub(crate) struct VectorEngine {
    r: Element,
    precomp: Precomp,
    /// Scalar carry-in / running accumulator for bytes outside the bulk path:
    /// the pre-bulk prefix (never reached, since the first 128 bytes always
    /// go through the vector path once available) and the post-bulk suffix.
    scalar_acc: Element,
    bulk_acc: Option<FieldVec>,
    s: [u8; 16],
    buf: [u8; SUPERBLOCK_LEN],
    buf_len: usize,
}

impl VectorEngine {
    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn new(r_bytes: &[u8; 16], s: &[u8; 16]) -> VectorEngine {
        let r = Element::from_clamped_r(r_bytes);
        VectorEngine {
            precomp: Precomp::build(&r),
            r,
            scalar_acc: Element::ZERO,
            bulk_acc: None,
            s: *s,
            buf: [0u8; SUPERBLOCK_LEN],
            buf_len: 0,
        }
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn absorb_superblock(&mut self, block: &[u8; SUPERBLOCK_LEN]) {
        let e = FieldVec::load_superblock(block);
        self.bulk_acc = Some(match self.bulk_acc.take() {
            None => FieldVec::seed(&self.scalar_acc, &e),
            Some(acc) => FieldVec::fma(&acc, &self.precomp.r8_bcast, &self.precomp.r8_bcast5, &e),
        });
        // The carry-in has now been folded into the bulk lanes; zero it so
        // a later scalar suffix doesn't double-count it.
        self.scalar_acc = Element::ZERO;
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn absorb_scalar_block(&mut self, block: &[u8; BLOCK_LEN]) {
        let m = Element::from_block(block);
        self.scalar_acc = field::mul(&field::add(&self.scalar_acc, &m), &self.r);
    }

    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn update(&mut self, mut input: &[u8]) {
        if input.is_empty() {
            return;
        }

        if self.buf_len > 0 {
            let need = SUPERBLOCK_LEN - self.buf_len;
            let take = need.min(input.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&input[..take]);
            self.buf_len += take;
            input = &input[take..];

            if self.buf_len == SUPERBLOCK_LEN {
                let block = self.buf;
                self.absorb_superblock(&block);
                self.buf_len = 0;
            } else {
                return;
            }
        }

        while input.len() >= SUPERBLOCK_LEN {
            let block: [u8; SUPERBLOCK_LEN] = input[..SUPERBLOCK_LEN].try_into().unwrap();
            self.absorb_superblock(&block);
            input = &input[SUPERBLOCK_LEN..];
        }

        if !input.is_empty() {
            self.buf[..input.len()].copy_from_slice(input);
            self.buf_len = input.len();
        }
    }

    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn finish(mut self) -> [u8; TAG_LEN] {
        if let Some(acc) = self.bulk_acc.take() {
            self.scalar_acc = FieldVec::fmul_r8_normalize(&acc, &self.precomp.r8_table, &self.precomp.r8_table5);
        }

        let mut rest = &self.buf[..self.buf_len];
        while rest.len() >= BLOCK_LEN {
            let block: [u8; BLOCK_LEN] = rest[..BLOCK_LEN].try_into().unwrap();
            self.absorb_scalar_block(&block);
            rest = &rest[BLOCK_LEN..];
        }
        if !rest.is_empty() {
            let m = Element::from_partial_block(rest);
            self.scalar_acc = field::mul(&field::add(&self.scalar_acc, &m), &self.r);
        }

        field::finish_scalar(self.scalar_acc.0, &self.s)
    }
}

impl Drop for VectorEngine {
    fn drop(&mut self) {
        self.r.zeroize();
        self.scalar_acc.zeroize();
        self.s.zeroize();
        self.buf.zeroize();
        unsafe {
            self.precomp.zeroize_in_place();
            if let Some(acc) = self.bulk_acc.as_mut() {
                acc.zeroize_in_place();
            }
        }
    }
}
