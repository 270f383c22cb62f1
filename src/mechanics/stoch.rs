//! Stochastic mechanics: uniform draws, Bernoulli trials, uniform picks.
//! Generic over `rand_core::RngCore` so callers inject a seeded generator
//! (`bevy_prng::WyRand` in the session and the tests).
use rand_core::RngCore;

/// Uniform f64 in [0, 1) from the top 53 bits.
#[inline]
pub fn unit<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    ((rng.next_u64() >> 11) as f64) / ((1u64 << 53) as f64)
}

/// Bernoulli(p). p = 1 always succeeds, p = 0 never does.
#[inline]
pub fn bernoulli<R: RngCore + ?Sized>(rng: &mut R, p: f64) -> bool {
    unit(rng) < p.clamp(0.0, 1.0)
}

/// floor(u * len), or None for an empty range.
#[inline]
pub fn pick_index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let i = (unit(rng) * len as f64) as usize;
    Some(i.min(len - 1))
}

/// Uniformly random element of `items`.
#[inline]
pub fn random_item<'a, T, R: RngCore + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    pick_index(rng, items.len()).map(|i| &items[i])
}
