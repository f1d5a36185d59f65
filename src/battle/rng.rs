use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<f64>, index: usize },
    Seeded(StdRng),
}

/// The one source of randomness a resolution draws from.
///
/// Every roll is a value in `[0, 100)`. Tests script the exact sequence; live
/// battles use a seeded generator so a replay with the same seed reproduces
/// the same battle.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    pub fn new_for_test<T: Into<f64>>(outcomes: Vec<T>) -> Self {
        Self {
            source: RngSource::Scripted {
                outcomes: outcomes.into_iter().map(Into::into).collect(),
                index: 0,
            },
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    /// Draw the next roll in `[0, 100)`.
    ///
    /// # Panics
    /// A scripted source panics when it runs out of outcomes.
    pub fn next_roll(&mut self, reason: &str) -> f64 {
        let outcome = match &mut self.source {
            RngSource::Scripted { outcomes, index } => {
                let Some(&outcome) = outcomes.get(*index) else {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                };
                *index += 1;
                outcome.clamp(0.0, 99.999_999)
            }
            RngSource::Seeded(rng) => rng.random::<f64>() * 100.0,
        };
        tracing::trace!(outcome, reason, "rng consumed");
        outcome
    }

    /// True with `percent`% probability.
    pub fn chance(&mut self, percent: impl Into<f64>, reason: &str) -> bool {
        let percent = percent.into();
        self.next_roll(reason) < percent
    }

    /// Uniform integer in `min..=max`.
    pub fn range_inclusive(&mut self, min: u8, max: u8, reason: &str) -> u8 {
        if max <= min {
            return min;
        }
        let span = (max - min) as f64 + 1.0;
        let offset = (self.next_roll(reason) / 100.0 * span) as u8;
        (min + offset).min(max)
    }

    /// Uniform index into a collection of `len` items.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        if len <= 1 {
            return 0;
        }
        let index = (self.next_roll(reason) / 100.0 * len as f64) as usize;
        index.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scripted_rolls_replay_in_order() {
        let mut rng = TurnRng::new_for_test(vec![10, 90]);
        assert_eq!(rng.next_roll("first"), 10.0);
        assert_eq!(rng.next_roll("second"), 90.0);
    }

    #[test]
    #[should_panic(expected = "TurnRng exhausted")]
    fn test_scripted_source_panics_when_empty() {
        let mut rng = TurnRng::new_for_test(Vec::<f64>::new());
        rng.next_roll("nothing left");
    }

    #[test]
    fn test_chance_is_strictly_below() {
        let mut rng = TurnRng::new_for_test(vec![30.0, 29.5]);
        assert!(!rng.chance(30, "at threshold"));
        assert!(rng.chance(30, "below threshold"));
    }

    #[test]
    fn test_range_and_index_stay_in_bounds() {
        let mut rng = TurnRng::new_for_test(vec![0.0, 99.99, 50.0, 99.99]);
        assert_eq!(rng.range_inclusive(2, 5, "low"), 2);
        assert_eq!(rng.range_inclusive(2, 5, "high"), 5);
        assert_eq!(rng.pick_index(4, "mid"), 2);
        assert_eq!(rng.pick_index(4, "last"), 3);
    }

    #[test]
    fn test_seeded_sources_are_reproducible() {
        let mut a = TurnRng::from_seed(7);
        let mut b = TurnRng::from_seed(7);
        for _ in 0..10 {
            let roll = a.next_roll("a");
            assert_eq!(roll, b.next_roll("b"));
            assert!((0.0..100.0).contains(&roll));
        }
    }
}
