use crate::gauss::{GaussState, Rewind};
use crate::reverse::ReverseRandom;

/// A normalized (mean 0, deviation 1) Gaussian sampler whose effect on
/// the underlying uniform source can be undone sample by sample.
pub trait ReverseNormalizedSampler {
    fn sample(&mut self) -> f64;

    /// Undoes one [`sample`] call: the uniform source and the pair
    /// cache end up exactly where they were before it.
    ///
    /// [`sample`]: ReverseNormalizedSampler::sample
    fn undo_sample(&mut self);
}

/// Trigonometric Box-Muller sampler over any reversible uniform source.
pub struct BoxMullerSampler<R: ReverseRandom> {
    rng: R,
    gauss: GaussState,
}

impl<R: ReverseRandom> BoxMullerSampler<R> {
    pub fn new(rng: R) -> Self {
        BoxMullerSampler { rng, gauss: GaussState::default() }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: ReverseRandom> ReverseNormalizedSampler for BoxMullerSampler<R> {
    fn sample(&mut self) -> f64 {
        if let Some(spare) = self.gauss.begin_sample() {
            return spare;
        }
        let x = self.rng.next_double();
        let y = self.rng.next_double();
        let alpha = 2.0 * core::f64::consts::PI * x;
        let r = (-2.0 * y.ln()).sqrt();
        self.gauss.stash_spare(r * alpha.sin());
        r * alpha.cos()
    }

    fn undo_sample(&mut self) {
        if self.gauss.begin_undo() == Rewind::Pair {
            self.rng.prev_double();
            self.rng.prev_double();
        }
    }
}

/// Marsaglia polar sampler over any reversible uniform source.
///
/// The rejection loop consumes a variable number of uniform pairs; the
/// undo replays it on the backward stream, and because the radius test
/// is symmetric in the pair it retires exactly the draws the forward
/// loop took.
pub struct MarsagliaPolarSampler<R: ReverseRandom> {
    rng: R,
    gauss: GaussState,
}

impl<R: ReverseRandom> MarsagliaPolarSampler<R> {
    pub fn new(rng: R) -> Self {
        MarsagliaPolarSampler { rng, gauss: GaussState::default() }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: ReverseRandom> ReverseNormalizedSampler for MarsagliaPolarSampler<R> {
    fn sample(&mut self) -> f64 {
        if let Some(spare) = self.gauss.begin_sample() {
            return spare;
        }
        loop {
            let v1 = 2.0 * self.rng.next_double() - 1.0;
            let v2 = 2.0 * self.rng.next_double() - 1.0;
            let s = v1 * v1 + v2 * v2;
            if s < 1.0 && s != 0.0 {
                let multiplier = (-2.0 * s.ln() / s).sqrt();
                self.gauss.stash_spare(v2 * multiplier);
                return v1 * multiplier;
            }
        }
    }

    fn undo_sample(&mut self) {
        if self.gauss.begin_undo() == Rewind::Pair {
            loop {
                let v1 = 2.0 * self.rng.prev_double() - 1.0;
                let v2 = 2.0 * self.rng.prev_double() - 1.0;
                let s = v1 * v1 + v2 * v2;
                if s < 1.0 && s != 0.0 {
                    return;
                }
            }
        }
    }
}

/// Scales a normalized sampler to a given mean and standard deviation.
pub struct GaussianSampler<S: ReverseNormalizedSampler> {
    normalized: S,
    mean: f64,
    standard_deviation: f64,
}

impl<S: ReverseNormalizedSampler> GaussianSampler<S> {
    pub fn new(normalized: S, mean: f64, standard_deviation: f64) -> Self {
        GaussianSampler { normalized, mean, standard_deviation }
    }

    pub fn sample(&mut self) -> f64 {
        self.mean + self.standard_deviation * self.normalized.sample()
    }

    pub fn undo_sample(&mut self) {
        self.normalized.undo_sample();
    }
}
