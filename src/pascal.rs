use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use crate::bits::ReverseBitsStream;
use crate::gauss::GaussState;
use crate::seeds;
use crate::{PASCAL_ADDEND, PASCAL_INVERSE_MULTIPLIER, PASCAL_MULTIPLIER};

// 1.0 / (1 << 32)
const DOUBLE_UNIT_32: f64 = 1.0 / (1u64 << 32) as f64;

/// Reversible Turbo Pascal 7 / Delphi `Random`.
///
/// One 32-bit LCG word (`RandSeed`). Bounded values are the
/// multiply-high of a single draw with no rejection; the slight
/// non-uniformity for bounds that do not divide 2^32 is the
/// platform's own and is kept.
///
/// Turbo Pascal 7 shipped a floating point difference between the
/// software-emulated and coprocessor builds: with `{$N+}` the seed is
/// read as a *signed* word, which offsets `Random` by exactly `0.5`
/// (values at or above one half drop by a half, the rest gain one).
/// Delphi kept the `{$N-}` behavior, the default here;
/// [`with_coprocessor`] reproduces the `{$N+}` artifact. The offset is
/// historical and is never corrected.
///
/// [`with_coprocessor`]: TurboPascalRandom::with_coprocessor
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq)]
pub struct TurboPascalRandom {
    /// The LCG word (`RandSeed`).
    seed: u32,
    gauss: GaussState,
    coprocessor: bool,
}

// As recommended, this Debug implementation does not expose internal state.
impl core::fmt::Debug for TurboPascalRandom {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "TurboPascalRandom {{}}")
    }
}

impl TurboPascalRandom {
    /// Creates a Delphi-compatible generator (`{$N-}` semantics).
    pub fn from_32(seed: i32) -> Self {
        TurboPascalRandom {
            seed: seed as u32,
            gauss: GaussState::default(),
            coprocessor: false,
        }
    }

    /// Creates a generator from a 64-bit seed, folded through the
    /// prime-65521 polynomial.
    pub fn from_64(seed: i64) -> Self {
        Self::from_32(seeds::fold_to_i32(seed))
    }

    /// Creates a generator from a word-array seed, folded through the
    /// same polynomial.
    pub fn from_array(seed: &[i32]) -> Self {
        Self::from_32(seeds::fold_slice_to_i32(seed))
    }

    /// Enables the Turbo Pascal `{$N+}` coprocessor offset on
    /// floating point outputs.
    pub fn with_coprocessor(mut self) -> Self {
        self.coprocessor = true;
        self
    }

    #[wrappit]
    #[inline]
    fn step(&mut self) {
        self.seed = self.seed * PASCAL_MULTIPLIER + PASCAL_ADDEND;
    }

    /// `(seed - 1) * M^-1 mod 2^32`.
    #[wrappit]
    #[inline]
    fn step_back(&mut self) {
        self.seed = (self.seed - PASCAL_ADDEND) * PASCAL_INVERSE_MULTIPLIER;
    }
}

impl ReverseBitsStream for TurboPascalRandom {
    #[inline]
    fn next_bits(&mut self, bits: u32) -> u32 {
        self.step();
        self.seed >> (32 - bits)
    }

    #[inline]
    fn prev_bits(&mut self, bits: u32) -> u32 {
        let result = self.seed >> (32 - bits);
        self.step_back();
        result
    }

    #[inline]
    fn gauss_mut(&mut self) -> &mut GaussState {
        &mut self.gauss
    }

    fn set_seed_32(&mut self, seed: i32) {
        self.seed = seed as u32;
        self.gauss.reset();
    }

    fn set_seed_64(&mut self, seed: i64) {
        ReverseBitsStream::set_seed_32(self, seeds::fold_to_i32(seed));
    }

    fn set_seed_array(&mut self, seed: &[i32]) {
        ReverseBitsStream::set_seed_32(self, seeds::fold_slice_to_i32(seed));
    }

    /// `Random(l)`: multiply-high of one draw, no rejection.
    fn next_int_bounded(&mut self, bound: i32) -> i32 {
        assert!(bound > 0, "bound must be strictly positive");
        let next = self.next_bits(32) as u64;
        ((next * bound as u64) >> 32) as i32
    }

    fn prev_int_bounded(&mut self, bound: i32) -> i32 {
        assert!(bound > 0, "bound must be strictly positive");
        let prev = self.prev_bits(32) as u64;
        ((prev * bound as u64) >> 32) as i32
    }

    /// `RandomRange` style: one draw scaled over the full 64-bit width
    /// of the range, still with no rejection.
    fn next_int_range(&mut self, origin: i32, bound: i32) -> i32 {
        if origin < bound {
            let range = (bound as i64 - origin as i64) as u64;
            let next = self.next_bits(32) as u64;
            origin.wrapping_add(((next * range) >> 32) as i32)
        } else {
            self.next_int()
        }
    }

    fn prev_int_range(&mut self, origin: i32, bound: i32) -> i32 {
        if origin < bound {
            let range = (bound as i64 - origin as i64) as u64;
            let prev = self.prev_bits(32) as u64;
            origin.wrapping_add(((prev * range) >> 32) as i32)
        } else {
            self.prev_int()
        }
    }

    /// `Random`: the full seed word scaled to `[0, 1)`, or the
    /// coprocessor's `±0.5` offset reading of the same word.
    #[inline]
    fn next_double(&mut self) -> f64 {
        let next = self.next_bits(32);
        if self.coprocessor {
            // In Turbo Pascal the seed was a 32 bit signed integer.
            (next as i32) as f64 * DOUBLE_UNIT_32 + 0.5
        } else {
            next as f64 * DOUBLE_UNIT_32
        }
    }

    #[inline]
    fn prev_double(&mut self) -> f64 {
        let prev = self.prev_bits(32);
        if self.coprocessor {
            // In Turbo Pascal the seed was a 32 bit signed integer.
            (prev as i32) as f64 * DOUBLE_UNIT_32 + 0.5
        } else {
            prev as f64 * DOUBLE_UNIT_32
        }
    }

    #[inline]
    fn next_float(&mut self) -> f32 {
        ReverseBitsStream::next_double(self) as f32
    }

    #[inline]
    fn prev_float(&mut self) -> f32 {
        ReverseBitsStream::prev_double(self) as f32
    }
}

use super::{Error, RngCore, SeedableRng};

impl RngCore for TurboPascalRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32)
    }

    fn next_u64(&mut self) -> u64 {
        ReverseBitsStream::next_long(self) as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        ReverseBitsStream::next_bytes(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        Ok(self.fill_bytes(dest))
    }
}

impl SeedableRng for TurboPascalRandom {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        // Always use Little-Endian.
        TurboPascalRandom::from_64(i64::from_le_bytes(seed))
    }
}

#[cfg(test)] mod tests {
    use super::*;

    fn generator() -> TurboPascalRandom {
        TurboPascalRandom::from_32(0xC44002DCu32 as i32)
    }

    #[test]
    pub fn reference_vector_tests() {
        let mut r = generator();
        let expected = [12, 8, 11, 13, 12, 7, 3, 15, 2, 3];
        for &e in expected.iter() {
            assert_eq!(e, r.next_int_bounded(16));
        }

        let mut r = generator();
        let expected = [
            -845578675, -2088293502, -1339891317, -783150152, -964345191,
            1941516542, 936439031, -251921196, 703152165, 1070159034,
        ];
        for &e in expected.iter() {
            assert_eq!(e, r.next_int());
        }

        let mut r = generator();
        let expected = [
            0.8031233728397638,
            0.5137812797911465,
            0.6880322422366589,
            0.8176586460322142,
            0.7754708884749562,
            0.4520445461384952,
            0.21803170233033597,
            0.9413450257852674,
            0.16371537116356194,
            0.24916581669822335,
        ];
        for &e in expected.iter() {
            assert_eq!(e, r.next_double());
        }

        let mut r = generator();
        let expected = [
            -3631732753113339006i64,
            -5754789383197551688,
            -4141831055458356994,
            4021975016885976276,
            3020015553856754874,
            -8904021482262177232,
            -1975669623462997322,
            6926665487186659276,
            5403570775623280370,
            -4166240069301493336,
        ];
        for &e in expected.iter() {
            assert_eq!(e, r.next_long());
        }

        let mut r = generator();
        let expected = [2i64, 8, 14, 4, 10, 0, 6, 12, 2, 8];
        for &e in expected.iter() {
            assert_eq!(e, r.next_long_bounded(16));
        }

        let mut r = generator();
        let expected = [
            1527817682, 617118176, 1165570231, 1573567217, 1440781940,
            422802816, -313748783, 1962868074, -484708547, -215754667,
            628231149, -442848315, 1810384166, 1901073709, 181865279,
            1381745985, -78013412, 1258659168, 1436617142, -848949435,
        ];
        for &e in expected.iter() {
            assert_eq!(e, r.next_int_range(-1_000_000_000, i32::MAX));
        }
    }

    #[test]
    pub fn coprocessor_vector_tests() {
        let mut r = generator().with_coprocessor();
        let expected = [
            0.30312337283976376,
            0.013781279791146517,
            0.18803224223665893,
            0.31765864603221416,
            0.27547088847495615,
            0.9520445461384952,
            0.718031702330336,
            0.44134502578526735,
            0.6637153711635619,
            0.7491658166982234,
        ];
        for &e in expected.iter() {
            assert_eq!(e, r.next_double());
        }

        // Integer outputs are untouched by the flag.
        let mut plain = generator();
        let mut coproc = generator().with_coprocessor();
        for _ in 0..20 {
            assert_eq!(plain.next_int(), coproc.next_int());
        }
    }

    #[test]
    pub fn half_offset_seed_tests() {
        // This seed made Turbo Pascal 5/6 return 1.0 from Random; with
        // the two newer float paths it sits exactly on one half.
        let mut r = TurboPascalRandom::from_32(-1498392781);
        assert_eq!(0.5, r.next_double());

        let mut r = TurboPascalRandom::from_32(-1498392781).with_coprocessor();
        assert_eq!(0.0, r.next_double());
    }

    #[test]
    pub fn roundtrip_tests() {
        let mut r = generator();
        let snapshot = r.clone();

        let forward: Vec<i32> = (0..2459).map(|_| r.next_int()).collect();
        let backward: Vec<i32> = (0..2459).map(|_| r.prev_int()).collect();
        assert!(forward.iter().rev().eq(backward.iter()));
        assert!(r == snapshot);

        let forward: Vec<i32> = (0..2467).map(|_| r.next_int_bounded(1000)).collect();
        let backward: Vec<i32> = (0..2467).map(|_| r.prev_int_bounded(1000)).collect();
        assert!(forward.iter().rev().eq(backward.iter()));
        assert!(r == snapshot);

        let forward: Vec<i32> =
            (0..101).map(|_| r.next_int_range(-1000, 3000)).collect();
        let backward: Vec<i32> =
            (0..101).map(|_| r.prev_int_range(-1000, 3000)).collect();
        assert!(forward.iter().all(|&v| (-1000..3000).contains(&v)));
        assert!(forward.iter().rev().eq(backward.iter()));
        assert!(r == snapshot);

        let mut r = generator().with_coprocessor();
        let snapshot = r.clone();
        let forward: Vec<f64> = (0..2459).map(|_| r.next_double()).collect();
        let backward: Vec<f64> = (0..2459).map(|_| r.prev_double()).collect();
        assert!(forward.iter().all(|&v| (0.0..1.0).contains(&v)));
        assert!(forward.iter().rev().eq(backward.iter()));
        assert!(r == snapshot);
    }

    #[test]
    pub fn seed_fold_tests() {
        let mut a = TurboPascalRandom::from_32(0x12345678);
        let mut b = TurboPascalRandom::from_64(0x12345678);
        let mut c = TurboPascalRandom::from_array(&[0x12345678]);
        for _ in 0..100 {
            let e = a.next_int();
            assert_eq!(e, b.next_int());
            assert_eq!(e, c.next_int());
        }

        let mut a = TurboPascalRandom::from_64(0x1234567823456789);
        let mut b = TurboPascalRandom::from_array(&[0x12345678, 0x23456789]);
        for _ in 0..100 {
            assert_eq!(a.next_int(), b.next_int());
        }
    }

    #[test]
    #[should_panic(expected = "strictly positive")]
    pub fn bound_zero_panics() {
        generator().next_int_bounded(0);
    }
}
