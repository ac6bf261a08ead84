pub mod adaptor;
pub mod bits;
pub mod dotnet;
pub mod freepascal;
pub mod gauss;
pub mod java;
pub mod lcg;
pub mod mersenne;
pub mod pascal;
pub mod py3k;
pub mod reverse;
pub mod sampling;
pub mod seeds;

pub use adaptor::*;
pub use bits::*;
pub use dotnet::*;
pub use freepascal::*;
pub use java::*;
pub use mersenne::*;
pub use pascal::*;
pub use py3k::*;
pub use reverse::*;
pub use sampling::*;
pub use rand_core::*;

// Platform LCG constants. The inverse multipliers are the modular
// multiplicative inverses of the forward multipliers mod 2^48 / 2^32
// (see lcg::inverse_mod_pow2); stepping with them walks the sequence
// backwards.

// java.util.Random, 48-bit state.
pub const JAVA_MULTIPLIER: u64 = 0x5DEECE66D;
pub const JAVA_INVERSE_MULTIPLIER: u64 = 0xDFE05BCB1365;
pub const JAVA_ADDEND: u64 = 0xB;
pub const JAVA_SEED_MASK: u64 = (1 << 48) - 1;

// Turbo Pascal 7 / Delphi, 32-bit state.
pub const PASCAL_MULTIPLIER: u32 = 0x08088405;
pub const PASCAL_INVERSE_MULTIPLIER: u32 = 0xD94FA8CD;
pub const PASCAL_ADDEND: u32 = 0x1;
