//! 8-lane vectorized field arithmetic for `F_p`, `p = 2^130 - 5`.
//!
//! A [`FieldVec`] holds eight independent field elements side by side, one
//! per lane of a 512-bit register: `FieldVec([__m512i; 5])`, limb `i` of
//! lane `k` living in 64-bit lane `k` of `__m512i` number `i`. Every op is
//! lane-wise SIMD; nothing here ever mixes lanes except [`fmul_r8_normalize`],
//! which is the one step that turns eight lanes back into a single element.
//!
//! Message-block lanes are laid out in natural order (lane 0 = block 0, …,
//! lane 7 = block 7); the `r`-power tables built in [`Precomp`] are laid out
//! in reverse (lane 0 = `r^8`, …, lane 7 = `r^1`) so that a single lane-wise
//! multiply computes `(m_0*r^8, m_1*r^7, …, m_7*r)` (spec.md §4.2).
//!
//! Building the interleaved tables is done by collecting eight independently
//! computed scalar limbs into an array and loading that, rather than by the
//! shuffle/interleave ladder a hand-vectorized reference would use — bit-exact
//! output and constant-time behavior are the contract, not the specific
//! instruction sequence that builds a lane vector (spec.md §9).
#![allow(unsafe_op_in_unsafe_fn)]

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::consts::MASK26;
use super::field::Element;

/// Eight field elements, one per SIMD lane.
#[derive(Clone, Copy)]
pub(crate) struct FieldVec(pub [__m512i; 5]);

impl FieldVec {
    /// Broadcasts a single scalar element into all eight lanes.
    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn broadcast(e: &Element) -> FieldVec {
        FieldVec([
            _mm512_set1_epi64(e.0[0] as i64),
            _mm512_set1_epi64(e.0[1] as i64),
            _mm512_set1_epi64(e.0[2] as i64),
            _mm512_set1_epi64(e.0[3] as i64),
            _mm512_set1_epi64(e.0[4] as i64),
        ])
    }

    /// Places `e` in lane 0 and zero in every other lane.
    #[target_feature(enable = "avx512f")]
    unsafe fn from_lane0(e: &Element) -> FieldVec {
        FieldVec([
            _mm512_set_epi64(0, 0, 0, 0, 0, 0, 0, e.0[0] as i64),
            _mm512_set_epi64(0, 0, 0, 0, 0, 0, 0, e.0[1] as i64),
            _mm512_set_epi64(0, 0, 0, 0, 0, 0, 0, e.0[2] as i64),
            _mm512_set_epi64(0, 0, 0, 0, 0, 0, 0, e.0[3] as i64),
            _mm512_set_epi64(0, 0, 0, 0, 0, 0, 0, e.0[4] as i64),
        ])
    }

    /// Builds a vector from eight ascending-order scalar limbs per index
    /// (lane 0 <- limbs[i][0], ..., lane 7 <- limbs[i][7]).
    #[target_feature(enable = "avx512f")]
    unsafe fn from_lanes_ascending(limbs: &[[u64; 8]; 5]) -> FieldVec {
        let mut out = [_mm512_setzero_si512(); 5];
        for i in 0..5 {
            let l = &limbs[i];
            out[i] = _mm512_set_epi64(
                l[7] as i64,
                l[6] as i64,
                l[5] as i64,
                l[4] as i64,
                l[3] as i64,
                l[2] as i64,
                l[1] as i64,
                l[0] as i64,
            );
        }
        FieldVec(out)
    }

    /// Decodes 128 bytes (eight message blocks) into eight lanes, each with
    /// the implicit `2^128` bit set, lane `k` <- block `k` (spec.md §4.3
    /// Phase A step 1/2).
    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn load_superblock(block: &[u8; 128]) -> FieldVec {
        let mut limbs = [[0u64; 8]; 5];
        for lane in 0..8 {
            let msg: [u8; 16] = block[lane * 16..lane * 16 + 16].try_into().unwrap();
            let e = Element::from_block(&msg);
            for i in 0..5 {
                limbs[i][lane] = e.0[i];
            }
        }
        FieldVec::from_lanes_ascending(&limbs)
    }

    /// Lane-wise, limb-wise add without carry.
    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn add(a: &FieldVec, b: &FieldVec) -> FieldVec {
        FieldVec([
            _mm512_add_epi64(a.0[0], b.0[0]),
            _mm512_add_epi64(a.0[1], b.0[1]),
            _mm512_add_epi64(a.0[2], b.0[2]),
            _mm512_add_epi64(a.0[3], b.0[3]),
            _mm512_add_epi64(a.0[4], b.0[4]),
        ])
    }

    /// Multiplies every limb of every lane by 5 (`x*5 = (x<<2)+x`), used to
    /// build the `R5`/`RN5`/`R8_5` tables.
    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn smul5(a: &FieldVec) -> FieldVec {
        let mul5 = |x: __m512i| _mm512_add_epi64(_mm512_slli_epi64(x, 2), x);
        FieldVec([
            mul5(a.0[0]),
            mul5(a.0[1]),
            mul5(a.0[2]),
            mul5(a.0[3]),
            mul5(a.0[4]),
        ])
    }

    /// Runs the seven-step carry sequence of spec.md §4.1 lane-wise.
    #[target_feature(enable = "avx512f")]
    unsafe fn carry(t: &mut [__m512i; 5]) {
        let mask = _mm512_set1_epi64(MASK26 as i64);

        macro_rules! step {
            ($i:expr, $j:expr) => {{
                let c = _mm512_srli_epi64(t[$i], 26);
                t[$i] = _mm512_and_si512(t[$i], mask);
                t[$j] = _mm512_add_epi64(t[$j], c);
            }};
        }

        step!(0, 1);
        step!(3, 4);
        step!(1, 2);

        let c = _mm512_srli_epi64(t[4], 26);
        t[4] = _mm512_and_si512(t[4], mask);
        let c5 = _mm512_add_epi64(_mm512_slli_epi64(c, 2), c);
        t[0] = _mm512_add_epi64(t[0], c5);

        step!(2, 3);
        step!(0, 1);
        step!(3, 4);
    }

    /// The 25-term schoolbook product `a * r`, folding cross-terms whose
    /// index sum reaches or exceeds 5 via the precomputed `5*r` table
    /// (`r5`), wide (uncarried) in every limb.
    #[target_feature(enable = "avx512f")]
    unsafe fn mul_wide(a: &FieldVec, r: &FieldVec, r5: &FieldVec) -> [__m512i; 5] {
        let (a0, a1, a2, a3, a4) = (a.0[0], a.0[1], a.0[2], a.0[3], a.0[4]);
        let (r0, r1, r2, r3, r4) = (r.0[0], r.0[1], r.0[2], r.0[3], r.0[4]);
        let (r1_5, r2_5, r3_5, r4_5) = (r5.0[1], r5.0[2], r5.0[3], r5.0[4]);

        let mul = _mm512_mul_epu32;
        let add = _mm512_add_epi64;

        [
            add(
                add(add(mul(a0, r0), mul(a1, r4_5)), add(mul(a2, r3_5), mul(a3, r2_5))),
                mul(a4, r1_5),
            ),
            add(
                add(add(mul(a0, r1), mul(a1, r0)), add(mul(a2, r4_5), mul(a3, r3_5))),
                mul(a4, r2_5),
            ),
            add(
                add(add(mul(a0, r2), mul(a1, r1)), add(mul(a2, r0), mul(a3, r4_5))),
                mul(a4, r3_5),
            ),
            add(
                add(add(mul(a0, r3), mul(a1, r2)), add(mul(a2, r1), mul(a3, r0))),
                mul(a4, r4_5),
            ),
            add(
                add(add(mul(a0, r4), mul(a1, r3)), add(mul(a2, r2), mul(a3, r1))),
                mul(a4, r0),
            ),
        ]
    }

    /// `acc_new = carry(acc * r + e)`: the Horner step used by Phase A's
    /// bulk loop (spec.md §4.3 step "Iterate").
    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn fma(acc: &FieldVec, r: &FieldVec, r5: &FieldVec, e: &FieldVec) -> FieldVec {
        let mut t = FieldVec::mul_wide(acc, r, r5);
        for i in 0..5 {
            t[i] = _mm512_add_epi64(t[i], e.0[i]);
        }
        FieldVec::carry(&mut t);
        FieldVec(t)
    }

    /// Seeds the bulk accumulator with the carried-in scalar value (lane 0)
    /// plus the first superblock's eight blocks (spec.md §4.3 step "Seed").
    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn seed(carry_in: &Element, e: &FieldVec) -> FieldVec {
        let base = FieldVec::from_lane0(carry_in);
        FieldVec::add(&base, e)
    }

    /// `fmul_r8_normalize`: evaluates `sum_k acc[k] * r^(8-k)` and folds the
    /// eight lanes back into a single reduced scalar element (spec.md §4.3
    /// step "Normalize / horizontalize").
    ///
    /// The lane-to-lane fold is associative, ordinary integer addition of
    /// already-carried (`<= 2^26-1`) limbs, so summing the eight stored
    /// values in any order reaches the same total; this does it with a
    /// plain store-and-sum rather than the interleave-high butterfly a
    /// hand-vectorized reference would use (spec.md §9: the instruction
    /// ladder is not the contract, bit-exact output is).
    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn fmul_r8_normalize(acc: &FieldVec, r8: &FieldVec, r8_5: &FieldVec) -> Element {
        let mut t = FieldVec::mul_wide(acc, r8, r8_5);
        FieldVec::carry(&mut t);

        let mut out = [0u64; 5];
        for i in 0..5 {
            let mut lanes = [0u64; 8];
            _mm512_storeu_si512(lanes.as_mut_ptr().cast(), t[i]);
            out[i] = lanes.iter().sum();
        }
        let mut elem = Element(out);
        super::field::carry_propagate(&mut elem.0);
        elem
    }

    /// Zeroizes the vector's backing registers. Relies on a compiler fence
    /// rather than a volatile write, since `__m512i` has no volatile-store
    /// intrinsic in `core::arch`; this is why [`FieldVec`] does not derive
    /// `zeroize::Zeroize` like the rest of the engine state.
    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn zeroize_in_place(&mut self) {
        let z = _mm512_setzero_si512();
        for v in self.0.iter_mut() {
            *v = z;
        }
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}

/// Precomputed powers of the clamped evaluator `r`, laid out as the two
/// logical tables of spec.md §3: `r^8` broadcast to all eight lanes (the
/// per-superblock Horner multiplier) and the interleaved `r^8..r^1` table
/// used once, at the very end, to fold eight parallel lanes into one
/// result (spec.md §4.2, §4.3 step "Normalize / horizontalize").
pub(crate) struct Precomp {
    /// `r^8` broadcast into every lane, used by the bulk loop's Horner step.
    pub(crate) r8_bcast: FieldVec,
    pub(crate) r8_bcast5: FieldVec,
    /// Lane `k` holds `r^(8-k)`, used only by the final combine step.
    pub(crate) r8_table: FieldVec,
    pub(crate) r8_table5: FieldVec,
}

impl Precomp {
    /// Builds every precomputed table from the clamped scalar `r`,
    /// computing `r^2..r^8` one scalar multiply at a time (spec.md §4.2).
    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn build(r: &Element) -> Precomp {
        use super::field::mul;

        let mut powers = [Element::ZERO; 8]; // powers[i] == r^(i+1)
        powers[0] = *r;
        for i in 1..8 {
            powers[i] = mul(&powers[i - 1], r);
        }

        let r8_bcast = FieldVec::broadcast(&powers[7]);
        let r8_bcast5 = FieldVec::smul5(&r8_bcast);

        let mut limbs = [[0u64; 8]; 5];
        for lane in 0..8 {
            let p = &powers[7 - lane]; // lane k <- r^(8-k)
            for i in 0..5 {
                limbs[i][lane] = p.0[i];
            }
        }
        let r8_table = FieldVec::from_lanes_ascending(&limbs);
        let r8_table5 = FieldVec::smul5(&r8_table);

        Precomp {
            r8_bcast,
            r8_bcast5,
            r8_table,
            r8_table5,
        }
    }

    #[target_feature(enable = "avx512f")]
    pub(crate) unsafe fn zeroize_in_place(&mut self) {
        self.r8_bcast.zeroize_in_place();
        self.r8_bcast5.zeroize_in_place();
        self.r8_table.zeroize_in_place();
        self.r8_table5.zeroize_in_place();
    }
}
