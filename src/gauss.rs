#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

/// What an undo of the last `next_gaussian` call has to do to the
/// underlying uniform stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rewind {
    /// The pending sample consumed a fresh uniform pair; walk two
    /// uniform draws back.
    Pair,
    /// The pending sample only returned the cached spare; the pair is
    /// re-armed and the next undo rolls the uniforms back.
    Rearmed,
}

/// Gaussian pair cache plus undo parity.
///
/// Box-Muller style samplers produce deviates two at a time: one is
/// returned, the other is stashed as a spare for the next call. Undoing
/// a sample therefore has two distinct transitions, tracked here: an
/// odd number of pending samples means a uniform pair has to be rolled
/// back, an even number means the undo is free.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GaussState {
    spare: Option<f64>,
    rewind_pair: bool,
}

impl GaussState {
    /// Drops the cached spare and the undo parity. Called on every reseed.
    #[inline]
    pub fn reset(&mut self) {
        *self = GaussState::default();
    }

    /// Records one sample being drawn and yields the cached spare, if
    /// one is armed. `None` means the caller has to generate a fresh
    /// pair and stash the second deviate via [`stash_spare`].
    ///
    /// [`stash_spare`]: GaussState::stash_spare
    #[inline]
    pub fn begin_sample(&mut self) -> Option<f64> {
        self.rewind_pair = !self.rewind_pair;
        self.spare.take()
    }

    #[inline]
    pub fn stash_spare(&mut self, value: f64) {
        self.spare = Some(value);
    }

    /// Records one sample being undone and reports whether the caller
    /// has to walk the uniform stream back by a full pair.
    #[inline]
    pub fn begin_undo(&mut self) -> Rewind {
        if self.rewind_pair {
            self.reset();
            Rewind::Pair
        } else {
            self.rewind_pair = true;
            Rewind::Rearmed
        }
    }
}
