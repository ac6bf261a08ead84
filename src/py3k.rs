use crate::bits::{ReverseBitsStream, DOUBLE_UNIT_53};
use crate::gauss::GaussState;
use crate::mersenne::MersenneTwister;

/// Mersenne Twister with CPython 3 `random` module semantics.
///
/// The pool and twist are the reference MT19937 core; what differs is
/// how CPython composes outputs: doubles take a 27+26-bit split,
/// floats are truncated doubles, bounded values draw exactly
/// `bit_length(bound)` bits and reject overshoots (`_randbelow`), and
/// byte buffers follow `getrandbits` chunking where the trailing
/// partial chunk keeps the *top* of its draw.
///
/// Scalar seeds are routed through the array seeding the way CPython's
/// `init_by_array` is always used: a 32-bit seed is a one-word key, a
/// 64-bit seed a `[low, high]` key (high word dropped when zero).
#[derive(Clone, PartialEq)]
pub struct MersenneTwisterPy3k {
    mt: MersenneTwister,
}

// As recommended, this Debug implementation does not expose internal state.
impl core::fmt::Debug for MersenneTwisterPy3k {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "MersenneTwisterPy3k {{}}")
    }
}

impl MersenneTwisterPy3k {
    /// Creates a generator from a single 32-bit seed.
    pub fn from_32(seed: i32) -> Self {
        Self::from_array(&[seed])
    }

    /// Creates a generator from a 64-bit seed.
    pub fn from_64(seed: i64) -> Self {
        let mut py3k = Self::from_32(0);
        ReverseBitsStream::set_seed_64(&mut py3k, seed);
        py3k
    }

    /// Creates a generator from a word-array seed.
    ///
    /// Panics if `seed` is empty.
    pub fn from_array(seed: &[i32]) -> Self {
        MersenneTwisterPy3k { mt: MersenneTwister::from_array(seed) }
    }
}

impl ReverseBitsStream for MersenneTwisterPy3k {
    #[inline]
    fn next_bits(&mut self, bits: u32) -> u32 {
        self.mt.next_bits(bits)
    }

    #[inline]
    fn prev_bits(&mut self, bits: u32) -> u32 {
        self.mt.prev_bits(bits)
    }

    #[inline]
    fn gauss_mut(&mut self) -> &mut GaussState {
        self.mt.gauss_mut()
    }

    fn set_seed_32(&mut self, seed: i32) {
        ReverseBitsStream::set_seed_array(self, &[seed]);
    }

    fn set_seed_64(&mut self, seed: i64) {
        let high = (seed >> 32) as i32;
        if high == 0 {
            ReverseBitsStream::set_seed_array(self, &[seed as i32]);
        } else {
            ReverseBitsStream::set_seed_array(self, &[seed as i32, high]);
        }
    }

    fn set_seed_array(&mut self, seed: &[i32]) {
        ReverseBitsStream::set_seed_array(&mut self.mt, seed);
    }

    /// CPython `_randbelow`: draw `bit_length(bound)` bits, redraw
    /// until the value fits.
    fn next_int_bounded(&mut self, bound: i32) -> i32 {
        assert!(bound > 0, "bound must be strictly positive");
        let bit_length = 32 - (bound as u32).leading_zeros();
        loop {
            let bits = self.next_bits(bit_length) as i32;
            if bits < bound {
                return bits;
            }
        }
    }

    fn prev_int_bounded(&mut self, bound: i32) -> i32 {
        assert!(bound > 0, "bound must be strictly positive");
        let bit_length = 32 - (bound as u32).leading_zeros();
        loop {
            let bits = self.prev_bits(bit_length) as i32;
            if bits < bound {
                return bits;
            }
        }
    }

    /// `getrandbits(64)` layout: low word first.
    #[inline]
    fn next_long(&mut self) -> i64 {
        let low = self.next_bits(32) as i64;
        let high = (self.next_bits(32) as i64) << 32;
        high | low
    }

    #[inline]
    fn prev_long(&mut self) -> i64 {
        let high = (self.prev_bits(32) as i64) << 32;
        let low = self.prev_bits(32) as i64;
        high | low
    }

    /// `_randbelow` over up to 63 bits; the low word of a wide draw is
    /// consumed first, mirroring `getrandbits`.
    fn next_long_bounded(&mut self, bound: i64) -> i64 {
        assert!(bound > 0, "bound must be strictly positive");
        let bit_length = 64 - (bound as u64).leading_zeros();
        loop {
            let mut bits = self.next_bits(bit_length.min(32)) as i64;
            if bit_length > 32 {
                bits |= (self.next_bits(bit_length - 32) as i64) << 32;
            }
            if bits < bound {
                return bits;
            }
        }
    }

    fn prev_long_bounded(&mut self, bound: i64) -> i64 {
        assert!(bound > 0, "bound must be strictly positive");
        let bit_length = 64 - (bound as u64).leading_zeros();
        loop {
            let mut bits = 0;
            if bit_length > 32 {
                bits = (self.prev_bits(bit_length - 32) as i64) << 32;
            }
            bits |= self.prev_bits(bit_length.min(32)) as i64;
            if bits < bound {
                return bits;
            }
        }
    }

    /// `random_random`: 27 high bits, 26 low bits, 53-bit resolution.
    #[inline]
    fn next_double(&mut self) -> f64 {
        let high = (self.next_bits(27) as i64) << 26;
        let low = self.next_bits(26) as i64;
        (high + low) as f64 * DOUBLE_UNIT_53
    }

    #[inline]
    fn prev_double(&mut self) -> f64 {
        let low = self.prev_bits(26) as i64;
        let high = (self.prev_bits(27) as i64) << 26;
        (high + low) as f64 * DOUBLE_UNIT_53
    }

    #[inline]
    fn next_float(&mut self) -> f32 {
        ReverseBitsStream::next_double(self) as f32
    }

    #[inline]
    fn prev_float(&mut self) -> f32 {
        ReverseBitsStream::prev_double(self) as f32
    }

    /// `getrandbits` chunking: full little-endian words, then one draw
    /// whose *top* bits cover the 1-4 trailing bytes.
    fn next_bytes(&mut self, dest: &mut [u8]) {
        if dest.is_empty() {
            return;
        }
        let len = dest.len();
        let mut i = 0;
        while i + 4 < len {
            let rnd = self.next_bits(32);
            dest[i..i + 4].copy_from_slice(&rnd.to_le_bytes());
            i += 4;
        }
        let k = (len - i) as u32 * 8;
        let mut rnd = self.next_bits(32) >> (32 - k);
        while i < len {
            dest[i] = rnd as u8;
            rnd >>= 8;
            i += 1;
        }
    }

    fn prev_bytes(&mut self, dest: &mut [u8]) {
        let len = dest.len();
        let mut i = 0;
        let partial = len % 4;
        if partial != 0 {
            let mut rnd = self.prev_bits(32);
            while i < partial {
                dest[i] = (rnd >> 24) as u8;
                rnd <<= 8;
                i += 1;
            }
        }
        while i < len {
            let rnd = self.prev_bits(32);
            dest[i..i + 4].copy_from_slice(&rnd.to_be_bytes());
            i += 4;
        }
    }
}

use super::{Error, RngCore, SeedableRng};

impl RngCore for MersenneTwisterPy3k {
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

impl SeedableRng for MersenneTwisterPy3k {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        // Always use Little-Endian.
        MersenneTwisterPy3k::from_64(i64::from_le_bytes(seed))
    }
}
