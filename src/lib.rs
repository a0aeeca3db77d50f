//! Edit distance between nested sequences.
//!
//! Inputs are sequences of sequences (for example lines of tokens). The outer
//! sequences are aligned with whole inner sequences as the unit of comparison,
//! and every calculation returns both the distance and an edit script that
//! turns `from` into `to`.
//!
//! ```
//! use seqdist::{AnyEditDistanceAlgorithm, Config, EditDistanceAlgorithm, Strategy};
//!
//! let from = vec![vec!["let", "x"], vec!["x"]];
//! let to = vec![vec!["let", "y"], vec!["x"], vec!["y"]];
//!
//! let algorithm = AnyEditDistanceAlgorithm::with_config(Strategy::WagnerFischer, Config::default())?;
//! let result = algorithm.calculate(&from, &to)?;
//! assert_eq!(result.distance(), 2);
//! assert_eq!(result.apply(&from)?, to);
//! # Ok::<(), seqdist::EditDistanceError>(())
//! ```

pub mod algorithm;
pub mod config;
pub mod container;
pub mod error;
pub mod hirschberg;
pub mod myers;
pub mod wagner_fischer;

pub use algorithm::{AnyEditDistanceAlgorithm, EditDistanceAlgorithm};
pub use config::{CancellationFlag, Config, CostModel, Strategy, TieBreak};
pub use container::{EditDistanceContainer, EditOperation, OperationCounts};
pub use error::{EditDistanceError, Result};
pub use hirschberg::Hirschberg;
pub use myers::Myers;
pub use wagner_fischer::WagnerFischer;

/// An ordered list of elements, compared as a whole.
pub type Sequence<T> = Vec<T>;

/// The unit of input: a list of [`Sequence`]s, each compared as a whole.
///
/// Strategies take both sides as `&NestedSequence<T>`, which is `&[Vec<T>]`.
pub type NestedSequence<T> = [Sequence<T>];
