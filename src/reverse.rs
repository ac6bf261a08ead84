use crate::bits::ReverseBitsStream;

/// Error for operations that have no correct inversion on a backend.
///
/// Returned instead of a plausible-looking wrong value; see
/// [`ReverseRandom::prev_gaussian`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unsupported {
    op: &'static str,
}

impl Unsupported {
    pub(crate) fn new(op: &'static str) -> Self {
        Unsupported { op }
    }
}

impl core::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "operation has no correct inversion: {}", self.op)
    }
}

impl std::error::Error for Unsupported {}

/// The full generation surface of a reversible generator: every
/// forward primitive of the origin platform paired with the operation
/// that walks it back.
///
/// For any instance, a sequence of forward calls followed by the same
/// sequence of operation types called backwards returns the forward
/// outputs in reverse order and restores the initial state.
///
/// Bit-stream shaped backends get this for free from
/// [`ReverseBitsStream`]; the subtractive generator implements it
/// directly.
pub trait ReverseRandom {
    fn set_seed_32(&mut self, seed: i32);
    fn set_seed_64(&mut self, seed: i64);
    fn set_seed_array(&mut self, seed: &[i32]);

    fn next_int(&mut self) -> i32;
    fn next_int_bounded(&mut self, bound: i32) -> i32;
    fn next_int_range(&mut self, origin: i32, bound: i32) -> i32;
    fn next_long(&mut self) -> i64;
    fn next_long_bounded(&mut self, bound: i64) -> i64;
    fn next_double(&mut self) -> f64;
    fn next_float(&mut self) -> f32;
    fn next_bool(&mut self) -> bool;
    fn next_bytes(&mut self, dest: &mut [u8]);
    fn next_gaussian(&mut self) -> f64;

    fn prev_int(&mut self) -> i32;
    fn prev_int_bounded(&mut self, bound: i32) -> i32;
    fn prev_int_range(&mut self, origin: i32, bound: i32) -> i32;
    fn prev_long(&mut self) -> i64;
    fn prev_long_bounded(&mut self, bound: i64) -> i64;
    fn prev_double(&mut self) -> f64;
    fn prev_float(&mut self) -> f32;
    fn prev_bool(&mut self) -> bool;
    fn prev_bytes(&mut self, dest: &mut [u8]);

    /// Undoes the effect of one [`next_gaussian`] call on the
    /// underlying stream. The deviate itself is not regenerated — see
    /// [`prev_gaussian`].
    ///
    /// [`next_gaussian`]: ReverseRandom::next_gaussian
    /// [`prev_gaussian`]: ReverseRandom::prev_gaussian
    fn undo_next_gaussian(&mut self);

    /// A value-returning reverse of [`next_gaussian`] does not exist:
    /// whether the preceding call consumed a fresh uniform pair or the
    /// cached spare is not recoverable from the state alone. Always
    /// fails; use [`undo_next_gaussian`] to rewind.
    ///
    /// [`next_gaussian`]: ReverseRandom::next_gaussian
    /// [`undo_next_gaussian`]: ReverseRandom::undo_next_gaussian
    fn prev_gaussian(&mut self) -> Result<f64, Unsupported> {
        Err(Unsupported::new("prev_gaussian"))
    }
}

impl<G: ReverseBitsStream> ReverseRandom for G {
    #[inline]
    fn set_seed_32(&mut self, seed: i32) {
        ReverseBitsStream::set_seed_32(self, seed)
    }

    #[inline]
    fn set_seed_64(&mut self, seed: i64) {
        ReverseBitsStream::set_seed_64(self, seed)
    }

    #[inline]
    fn set_seed_array(&mut self, seed: &[i32]) {
        ReverseBitsStream::set_seed_array(self, seed)
    }

    #[inline]
    fn next_int(&mut self) -> i32 {
        ReverseBitsStream::next_int(self)
    }

    #[inline]
    fn next_int_bounded(&mut self, bound: i32) -> i32 {
        ReverseBitsStream::next_int_bounded(self, bound)
    }

    #[inline]
    fn next_int_range(&mut self, origin: i32, bound: i32) -> i32 {
        ReverseBitsStream::next_int_range(self, origin, bound)
    }

    #[inline]
    fn next_long(&mut self) -> i64 {
        ReverseBitsStream::next_long(self)
    }

    #[inline]
    fn next_long_bounded(&mut self, bound: i64) -> i64 {
        ReverseBitsStream::next_long_bounded(self, bound)
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        ReverseBitsStream::next_double(self)
    }

    #[inline]
    fn next_float(&mut self) -> f32 {
        ReverseBitsStream::next_float(self)
    }

    #[inline]
    fn next_bool(&mut self) -> bool {
        ReverseBitsStream::next_bool(self)
    }

    #[inline]
    fn next_bytes(&mut self, dest: &mut [u8]) {
        ReverseBitsStream::next_bytes(self, dest)
    }

    #[inline]
    fn next_gaussian(&mut self) -> f64 {
        ReverseBitsStream::next_gaussian(self)
    }

    #[inline]
    fn prev_int(&mut self) -> i32 {
        ReverseBitsStream::prev_int(self)
    }

    #[inline]
    fn prev_int_bounded(&mut self, bound: i32) -> i32 {
        ReverseBitsStream::prev_int_bounded(self, bound)
    }

    #[inline]
    fn prev_int_range(&mut self, origin: i32, bound: i32) -> i32 {
        ReverseBitsStream::prev_int_range(self, origin, bound)
    }

    #[inline]
    fn prev_long(&mut self) -> i64 {
        ReverseBitsStream::prev_long(self)
    }

    #[inline]
    fn prev_long_bounded(&mut self, bound: i64) -> i64 {
        ReverseBitsStream::prev_long_bounded(self, bound)
    }

    #[inline]
    fn prev_double(&mut self) -> f64 {
        ReverseBitsStream::prev_double(self)
    }

    #[inline]
    fn prev_float(&mut self) -> f32 {
        ReverseBitsStream::prev_float(self)
    }

    #[inline]
    fn prev_bool(&mut self) -> bool {
        ReverseBitsStream::prev_bool(self)
    }

    #[inline]
    fn prev_bytes(&mut self, dest: &mut [u8]) {
        ReverseBitsStream::prev_bytes(self, dest)
    }

    #[inline]
    fn undo_next_gaussian(&mut self) {
        ReverseBitsStream::undo_next_gaussian(self)
    }
}
