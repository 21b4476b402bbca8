use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable random source injected into every subsystem that randomizes.
///
/// Nothing in the scene touches ambient global randomness: given the same
/// seed, star fields and jump intervals come out identical.
#[derive(Debug, Clone)]
pub struct SceneRng {
    inner: StdRng,
}

impl SceneRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Derive an independent stream for a child subsystem.
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.inner.r#gen())
    }

    /// Uniform sample in `[low, high)`. Returns `low` for an empty range.
    pub fn range(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        self.inner.gen_range(low..high)
    }

    /// Uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.inner.r#gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SceneRng::seeded(42);
        let mut b = SceneRng::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.range(1.0, 4.0), b.range(1.0, 4.0));
        }
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = SceneRng::seeded(7);
        for _ in 0..1000 {
            let v = rng.range(1.0, 4.0);
            assert!((1.0..4.0).contains(&v));
        }
    }

    #[test]
    fn empty_range_returns_low() {
        let mut rng = SceneRng::seeded(0);
        assert_eq!(rng.range(2.0, 2.0), 2.0);
    }

    #[test]
    fn forks_diverge_from_parent() {
        let mut parent = SceneRng::seeded(1);
        let mut child = parent.fork();
        assert_ne!(parent.unit(), child.unit());
    }
}
