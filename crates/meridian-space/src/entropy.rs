//! Entropy sources for position generation.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use rand::distributions::{Distribution, Uniform};
use thiserror::Error;

/// Errors reported by an [`EntropySource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntropyError {
    /// Count or bound was zero.
    #[error("invalid draw request: count {count}, bound {bound}")]
    InvalidRequest { count: usize, bound: u32 },

    /// The source has nothing left to give.
    #[error("entropy exhausted: {0}")]
    Exhausted(String),
}

/// Source of bounded random integers.
///
/// A draw returns exactly `count` values, each in `[0, bound)`. Callers
/// still verify the result, since implementations live outside this crate.
pub trait EntropySource: Send + Sync + fmt::Debug {
    /// Draw `count` independent uniform values in `[0, bound)`.
    fn draw_bounded(&self, count: usize, bound: u32) -> Result<Vec<u32>, EntropyError>;
}

fn check_request(count: usize, bound: u32) -> Result<(), EntropyError> {
    if count == 0 || bound == 0 {
        return Err(EntropyError::InvalidRequest { count, bound });
    }
    Ok(())
}

/// Entropy from the thread-local CSPRNG of the `rand` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngEntropy;

impl ThreadRngEntropy {
    pub fn new() -> Self {
        Self
    }
}

impl EntropySource for ThreadRngEntropy {
    fn draw_bounded(&self, count: usize, bound: u32) -> Result<Vec<u32>, EntropyError> {
        check_request(count, bound)?;
        let dist = Uniform::new(0, bound);
        let mut rng = rand::thread_rng();
        Ok((0..count).map(|_| dist.sample(&mut rng)).collect())
    }
}

/// Replays a queue of prepared draws, one per call.
///
/// Used for deterministic simulations and tests. Draws are handed out
/// verbatim, so a script can also feed malformed results to exercise the
/// generator's checks. Once the queue is empty every call fails with
/// [`EntropyError::Exhausted`].
#[derive(Debug, Default)]
pub struct ScriptedEntropy {
    draws: Mutex<VecDeque<Vec<u32>>>,
}

impl ScriptedEntropy {
    /// Create a source that replays `draws` in order.
    pub fn new<I>(draws: I) -> Self
    where
        I: IntoIterator<Item = Vec<u32>>,
    {
        Self {
            draws: Mutex::new(draws.into_iter().collect()),
        }
    }

    /// Queue another draw.
    pub fn push(&self, draw: Vec<u32>) {
        self.draws
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(draw);
    }

    /// Number of draws left.
    pub fn remaining(&self) -> usize {
        self.draws.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl EntropySource for ScriptedEntropy {
    fn draw_bounded(&self, count: usize, bound: u32) -> Result<Vec<u32>, EntropyError> {
        check_request(count, bound)?;
        self.draws
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| EntropyError::Exhausted("script has no draws left".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_rng_respects_bounds() {
        let source = ThreadRngEntropy::new();
        let draw = source.draw_bounded(1000, 7).unwrap();
        assert_eq!(draw.len(), 1000);
        assert!(draw.iter().all(|&v| v < 7));
    }

    #[test]
    fn thread_rng_bound_one_is_all_zero() {
        let draw = ThreadRngEntropy.draw_bounded(16, 1).unwrap();
        assert_eq!(draw, vec![0; 16]);
    }

    #[test]
    fn zero_count_or_bound_rejected() {
        let source = ThreadRngEntropy::new();
        assert_eq!(
            source.draw_bounded(0, 4),
            Err(EntropyError::InvalidRequest { count: 0, bound: 4 })
        );
        assert_eq!(
            source.draw_bounded(3, 0),
            Err(EntropyError::InvalidRequest { count: 3, bound: 0 })
        );

        let scripted = ScriptedEntropy::new([vec![1]]);
        assert!(scripted.draw_bounded(0, 4).is_err());
        assert_eq!(scripted.remaining(), 1);
    }

    #[test]
    fn scripted_replays_in_order_then_exhausts() {
        let source = ScriptedEntropy::new([vec![1, 3, 0]]);
        source.push(vec![2, 2, 2]);

        assert_eq!(source.draw_bounded(3, 4).unwrap(), vec![1, 3, 0]);
        assert_eq!(source.draw_bounded(3, 4).unwrap(), vec![2, 2, 2]);
        assert!(matches!(
            source.draw_bounded(3, 4),
            Err(EntropyError::Exhausted(_))
        ));
    }
}
