use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use crate::bits::{ReverseBitsStream, DOUBLE_UNIT_53};
use crate::gauss::{GaussState, Rewind};
use crate::seeds;
use crate::{JAVA_ADDEND, JAVA_INVERSE_MULTIPLIER, JAVA_MULTIPLIER, JAVA_SEED_MASK};

// 1.0 / (1 << 24)
const FLOAT_UNIT_24: f32 = 1.0 / (1u32 << 24) as f32;

/// Reversible `java.util.Random`.
///
/// One 48-bit LCG word. A forward draw steps the word and returns its
/// top bits; a backward draw returns the top bits first and then steps
/// the word back with the modular inverse of the multiplier, so the
/// two directions consume the identical seed sequence in opposite
/// orders.
///
/// Doubles use Java's 26+27-bit split, floats a 24-bit draw, longs the
/// sign-propagating high-plus-low sum, and `next_gaussian` is the
/// Marsaglia polar method with the cached spare. [`py3k_floats`]
/// switches floats to truncated doubles, matching CPython's reading of
/// the same stream.
///
/// [`py3k_floats`]: JavaRandom::py3k_floats
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq)]
pub struct JavaRandom {
    /// The 48-bit LCG word, kept masked.
    seed: u64,
    gauss: GaussState,
    py3k_float: bool,
}

// As recommended, this Debug implementation does not expose internal state.
impl core::fmt::Debug for JavaRandom {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "JavaRandom {{}}")
    }
}

#[inline]
fn scramble(seed: i64) -> u64 {
    (seed as u64 ^ JAVA_MULTIPLIER) & JAVA_SEED_MASK
}

impl JavaRandom {
    /// Creates a generator from a 32-bit seed, widened the way Java
    /// widens it.
    pub fn from_32(seed: i32) -> Self {
        Self::from_64(seed as i64)
    }

    /// Creates a generator seeded exactly like `new Random(seed)`.
    pub fn from_64(seed: i64) -> Self {
        JavaRandom {
            seed: scramble(seed),
            gauss: GaussState::default(),
            py3k_float: false,
        }
    }

    /// Creates a generator from a word-array seed, folded through the
    /// mod-2^64 polynomial combine.
    pub fn from_array(seed: &[i32]) -> Self {
        Self::from_64(seeds::fold_slice_to_i64(seed))
    }

    /// Switches `next_float`/`prev_float` to truncated doubles, the
    /// composition CPython applies to this stream.
    pub fn py3k_floats(mut self) -> Self {
        self.py3k_float = true;
        self
    }

    /// Returns the seed that reproduces this generator's current
    /// position via [`from_64`].
    ///
    /// [`from_64`]: JavaRandom::from_64
    pub fn seed(&self) -> i64 {
        scramble(self.seed as i64) as i64
    }

    /// Advances the LCG word.
    #[wrappit]
    #[inline]
    fn step(&mut self) {
        self.seed = (self.seed * JAVA_MULTIPLIER + JAVA_ADDEND) & JAVA_SEED_MASK;
    }

    /// Steps the LCG word back: `(seed - A) * M^-1 mod 2^48`.
    #[wrappit]
    #[inline]
    fn step_back(&mut self) {
        self.seed = (self.seed - JAVA_ADDEND) * JAVA_INVERSE_MULTIPLIER & JAVA_SEED_MASK;
    }
}

impl ReverseBitsStream for JavaRandom {
    #[inline]
    fn next_bits(&mut self, bits: u32) -> u32 {
        self.step();
        (self.seed >> (48 - bits)) as u32
    }

    #[inline]
    fn prev_bits(&mut self, bits: u32) -> u32 {
        let result = (self.seed >> (48 - bits)) as u32;
        self.step_back();
        result
    }

    #[inline]
    fn gauss_mut(&mut self) -> &mut GaussState {
        &mut self.gauss
    }

    fn set_seed_32(&mut self, seed: i32) {
        ReverseBitsStream::set_seed_64(self, seed as i64);
    }

    fn set_seed_64(&mut self, seed: i64) {
        self.seed = scramble(seed);
        self.gauss.reset();
    }

    fn set_seed_array(&mut self, seed: &[i32]) {
        ReverseBitsStream::set_seed_64(self, seeds::fold_slice_to_i64(seed));
    }

    /// Java's `nextLong`: the low word is added sign-extended.
    #[inline]
    fn next_long(&mut self) -> i64 {
        let high = (self.next_bits(32) as i64) << 32;
        high.wrapping_add(self.next_bits(32) as i32 as i64)
    }

    #[inline]
    fn prev_long(&mut self) -> i64 {
        let low = self.prev_bits(32) as i32 as i64;
        low.wrapping_add((self.prev_bits(32) as i64) << 32)
    }

    /// Java's `nextDouble`: 26 high bits, 27 low bits.
    #[inline]
    fn next_double(&mut self) -> f64 {
        let high = (self.next_bits(26) as i64) << 27;
        (high + self.next_bits(27) as i64) as f64 * DOUBLE_UNIT_53
    }

    #[inline]
    fn prev_double(&mut self) -> f64 {
        let low = self.prev_bits(27) as i64;
        (low + ((self.prev_bits(26) as i64) << 27)) as f64 * DOUBLE_UNIT_53
    }

    #[inline]
    fn next_float(&mut self) -> f32 {
        if self.py3k_float {
            ReverseBitsStream::next_double(self) as f32
        } else {
            self.next_bits(24) as f32 * FLOAT_UNIT_24
        }
    }

    #[inline]
    fn prev_float(&mut self) -> f32 {
        if self.py3k_float {
            ReverseBitsStream::prev_double(self) as f32
        } else {
            self.prev_bits(24) as f32 * FLOAT_UNIT_24
        }
    }

    /// Bounded longs halve a full [`next_long`] draw and reject into
    /// redraws, the way the JDK's own stream support does; a power of
    /// two bound is a plain mask.
    ///
    /// [`next_long`]: ReverseBitsStream::next_long
    fn next_long_bounded(&mut self, bound: i64) -> i64 {
        assert!(bound > 0, "bound must be strictly positive");
        let mut r = ReverseBitsStream::next_long(self);
        let m = bound - 1;
        if (bound & m) == 0 {
            // i.e., bound is a power of 2
            r &= m;
        } else {
            let mut u = (r as u64 >> 1) as i64;
            loop {
                r = u % bound;
                if u.wrapping_sub(r).wrapping_add(m) >= 0 {
                    break;
                }
                u = (ReverseBitsStream::next_long(self) as u64 >> 1) as i64;
            }
        }
        r
    }

    fn prev_long_bounded(&mut self, bound: i64) -> i64 {
        assert!(bound > 0, "bound must be strictly positive");
        let mut r = ReverseBitsStream::prev_long(self);
        let m = bound - 1;
        if (bound & m) == 0 {
            // i.e., bound is a power of 2
            r &= m;
        } else {
            let mut u = (r as u64 >> 1) as i64;
            loop {
                r = u % bound;
                if u.wrapping_sub(r).wrapping_add(m) >= 0 {
                    break;
                }
                u = (ReverseBitsStream::prev_long(self) as u64 >> 1) as i64;
            }
        }
        r
    }

    /// Java's `nextGaussian`: Marsaglia polar method, two deviates per
    /// accepted uniform pair, one cached.
    fn next_gaussian(&mut self) -> f64 {
        if let Some(spare) = self.gauss.begin_sample() {
            return spare;
        }
        loop {
            let v1 = 2.0 * ReverseBitsStream::next_double(self) - 1.0;
            let v2 = 2.0 * ReverseBitsStream::next_double(self) - 1.0;
            let s = v1 * v1 + v2 * v2;
            if s < 1.0 && s != 0.0 {
                let multiplier = (-2.0 * s.ln() / s).sqrt();
                self.gauss.stash_spare(v2 * multiplier);
                return v1 * multiplier;
            }
        }
    }

    /// Replays the polar rejection loop on the backward stream; the
    /// radius test is symmetric, so the loop retires exactly the draws
    /// the forward loop consumed.
    fn undo_next_gaussian(&mut self) {
        if self.gauss.begin_undo() == Rewind::Pair {
            loop {
                let v1 = 2.0 * ReverseBitsStream::prev_double(self) - 1.0;
                let v2 = 2.0 * ReverseBitsStream::prev_double(self) - 1.0;
                let s = v1 * v1 + v2 * v2;
                if s < 1.0 && s != 0.0 {
                    return;
                }
            }
        }
    }
}

use super::{Error, RngCore, SeedableRng};

impl RngCore for JavaRandom {
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

impl SeedableRng for JavaRandom {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        // Always use Little-Endian.
        JavaRandom::from_64(i64::from_le_bytes(seed))
    }
}
