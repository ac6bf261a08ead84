use wrapping_arithmetic::wrappit;

// Seed folding. Backends whose state is narrower than the seed the
// caller hands them collapse it with the polynomial combines below;
// all of them are deterministic, so every seed form keeps producing
// the same sequence.

/// Largest prime below 2^16; the classic polynomial base for folding
/// words into a 32-bit seed.
const PRIME_32: i32 = 65521;

/// Largest prime below 2^32, used for the 64-bit polynomial fold.
const PRIME_64: i64 = 4294967291;

/// Folds a 64-bit seed into 32 bits: `high * 65521 + low`.
#[wrappit]
pub fn fold_to_i32(seed: i64) -> i32 {
    let high = (seed >> 32) as i32;
    let low = (seed & 0xFFFF_FFFF) as i32;
    high * PRIME_32 + low
}

/// Folds a word slice into 32 bits with the prime-65521 polynomial.
#[wrappit]
pub fn fold_slice_to_i32(seed: &[i32]) -> i32 {
    let mut combined: i32 = 0;
    for &s in seed {
        combined = combined * PRIME_32 + s;
    }
    combined
}

/// Folds a word slice into 64 bits: pairs of words form 64-bit limbs
/// which are combined with the prime-4294967291 polynomial mod 2^64;
/// a trailing odd word is folded in sign-extended.
#[wrappit]
pub fn fold_slice_to_i64(seed: &[i32]) -> i64 {
    let mut result: i64 = 0;
    let end = (seed.len() / 2) * 2;
    for pair in seed[..end].chunks_exact(2) {
        let high = (pair[0] as u32 as i64) << 32;
        let low = pair[1] as u32 as i64;
        result = result * PRIME_64 + high | low;
    }
    if end != seed.len() {
        let low = seed[seed.len() - 1] as i64;
        result = result * PRIME_64 + low;
    }
    result
}
