use crate::config::{CancellationFlag, Config, Strategy};
use crate::container::EditDistanceContainer;
use crate::error::Result;
use crate::hirschberg::Hirschberg;
use crate::myers::Myers;
use crate::wagner_fischer::WagnerFischer;
use crate::NestedSequence;
use std::fmt;
use std::sync::Arc;

/// Computes the edit distance between two nested sequences.
///
/// Inner sequences are the unit of comparison: two of them are equal when
/// they have the same length and equal elements in order.
pub trait EditDistanceAlgorithm<T: Eq + Clone> {
    fn calculate(&self, from: &NestedSequence<T>, to: &NestedSequence<T>) -> Result<EditDistanceContainer<T>>;
}

type CalculateFn<T> =
    dyn Fn(&NestedSequence<T>, &NestedSequence<T>) -> Result<EditDistanceContainer<T>> + Send + Sync;

/// Type-erased algorithm.
///
/// Holds a computation resolved at construction, so callers only depend on
/// the capability and never on the concrete strategy behind it.
///
/// ```
/// use seqdist::{AnyEditDistanceAlgorithm, Config, EditDistanceAlgorithm, Strategy};
///
/// let algorithm = AnyEditDistanceAlgorithm::with_config(Strategy::Hirschberg, Config::default())
///     .unwrap();
/// let from = vec![vec!['a'], vec!['b'], vec!['c']];
/// let to = vec![vec!['a'], vec!['x'], vec!['c']];
/// assert_eq!(algorithm.calculate(&from, &to).unwrap().distance(), 1);
/// ```
pub struct AnyEditDistanceAlgorithm<T> {
    calc: Arc<CalculateFn<T>>,
}

impl<T: Eq + Clone + 'static> AnyEditDistanceAlgorithm<T> {
    pub fn new<F>(calc: F) -> Self
    where
        F: Fn(&NestedSequence<T>, &NestedSequence<T>) -> Result<EditDistanceContainer<T>> + Send + Sync + 'static,
    {
        AnyEditDistanceAlgorithm { calc: Arc::new(calc) }
    }

    pub fn from_algorithm<A>(algorithm: A) -> Self
    where
        A: EditDistanceAlgorithm<T> + Send + Sync + 'static,
    {
        Self::new(move |from, to| algorithm.calculate(from, to))
    }

    /// Validates `config` for `strategy` and resolves it.
    pub fn with_config(strategy: Strategy, config: Config) -> Result<Self> {
        Self::with_cancellation(strategy, config, CancellationFlag::new())
    }

    pub fn with_cancellation(
        strategy: Strategy,
        config: Config,
        cancellation: CancellationFlag,
    ) -> Result<Self> {
        config.validate_for(strategy)?;
        tracing::debug!(strategy = strategy.name(), ?config, "resolving edit distance strategy");
        Ok(match strategy {
            Strategy::WagnerFischer => {
                Self::from_algorithm(WagnerFischer::new(config)?.with_cancellation(cancellation))
            }
            Strategy::Hirschberg => {
                Self::from_algorithm(Hirschberg::new(config)?.with_cancellation(cancellation))
            }
            Strategy::Myers => Self::from_algorithm(Myers::new(config)?.with_cancellation(cancellation)),
        })
    }
}

impl<T: Eq + Clone> EditDistanceAlgorithm<T> for AnyEditDistanceAlgorithm<T> {
    fn calculate(&self, from: &NestedSequence<T>, to: &NestedSequence<T>) -> Result<EditDistanceContainer<T>> {
        (self.calc)(from, to)
    }
}

impl<T: Eq + Clone + 'static> Default for AnyEditDistanceAlgorithm<T> {
    fn default() -> Self {
        Self::from_algorithm(WagnerFischer::default())
    }
}

impl<T> Clone for AnyEditDistanceAlgorithm<T> {
    fn clone(&self) -> Self {
        AnyEditDistanceAlgorithm {
            calc: Arc::clone(&self.calc),
        }
    }
}

impl<T> fmt::Debug for AnyEditDistanceAlgorithm<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyEditDistanceAlgorithm").finish_non_exhaustive()
    }
}
