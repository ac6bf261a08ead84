use crate::reverse::ReverseRandom;
use super::{Error, RngCore};

/// Exposes a reversible generator's *backward* stream through the
/// standard one-directional [`RngCore`] interface: every draw taken
/// from a `Rewound` is a `prev_*` call on the wrapped generator.
///
/// Handy for feeding the reversed sequence to consumers that only
/// speak `RngCore`, e.g. to replay a recorded run in reverse.
pub struct Rewound<R: ReverseRandom> {
    rng: R,
}

impl<R: ReverseRandom> Rewound<R> {
    pub fn new(rng: R) -> Self {
        Rewound { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: ReverseRandom> RngCore for Rewound<R> {
    fn next_u32(&mut self) -> u32 {
        self.rng.prev_int() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.prev_long() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.prev_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        Ok(self.fill_bytes(dest))
    }
}
