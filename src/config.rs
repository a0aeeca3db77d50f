use crate::error::{EditDistanceError, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Weights charged for each kind of non-matching operation.
/// A match is always free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    pub insert: u32,
    pub delete: u32,
    pub substitute: u32,
}

impl CostModel {
    pub const UNIT: CostModel = CostModel {
        insert: 1,
        delete: 1,
        substitute: 1,
    };

    pub fn new(insert: u32, delete: u32, substitute: u32) -> Self {
        CostModel {
            insert,
            delete,
            substitute,
        }
    }

    pub fn is_unit(&self) -> bool {
        *self == Self::UNIT
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Order in which equally cheap operations are preferred.
///
/// The order is applied while walking back from the end of both inputs to
/// their start, so it decides the last operation of the script first. With
/// `DeleteFirst`, a line replaced at equal cost by a delete and an insert
/// reads `Insert, Delete` in the final forward script.
///
/// ```
/// use seqdist::{Config, CostModel, EditDistanceAlgorithm, EditOperation, TieBreak, WagnerFischer};
///
/// let config = Config::default()
///     .with_cost(CostModel::new(1, 1, 2))
///     .with_tie_break(TieBreak::DeleteFirst);
/// let from = vec![vec!['a']];
/// let to = vec![vec!['b']];
/// let result = WagnerFischer::new(config)?.calculate(&from, &to)?;
/// assert!(matches!(result.operations()[0], EditOperation::Insert { .. }));
/// assert!(matches!(result.operations()[1], EditOperation::Delete { .. }));
/// # Ok::<(), seqdist::EditDistanceError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Substitute, then Delete, then Insert.
    #[default]
    SubstituteFirst,
    /// Delete, then Insert, then Substitute.
    DeleteFirst,
    /// Insert, then Delete, then Substitute.
    InsertFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Substitute,
    Delete,
    Insert,
}

impl TieBreak {
    pub(crate) fn order(self) -> [Step; 3] {
        match self {
            TieBreak::SubstituteFirst => [Step::Substitute, Step::Delete, Step::Insert],
            TieBreak::DeleteFirst => [Step::Delete, Step::Insert, Step::Substitute],
            TieBreak::InsertFirst => [Step::Insert, Step::Delete, Step::Substitute],
        }
    }
}

/// Which algorithm a facade resolves to at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Full-table dynamic programming; the reference implementation.
    #[default]
    WagnerFischer,
    /// Divide and conquer in linear space, same distance as `WagnerFischer`.
    Hirschberg,
    /// Greedy O(ND) diff. Not guaranteed minimal, needs `allow_approximate`.
    Myers,
}

impl Strategy {
    pub fn is_exact(self) -> bool {
        !matches!(self, Strategy::Myers)
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::WagnerFischer => "wagner_fischer",
            Strategy::Hirschberg => "hirschberg",
            Strategy::Myers => "myers",
        }
    }
}

/// Settings a strategy is built with.
///
/// ```
/// use seqdist::{Config, CostModel, TieBreak};
///
/// let config = Config::default()
///     .with_cost(CostModel::new(1, 1, 2))
///     .with_tie_break(TieBreak::DeleteFirst)
///     .with_max_cells(1_000_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cost: CostModel,
    pub tie_break: TieBreak,
    /// Ceiling on the workspace a single calculation may allocate, `None` for unlimited.
    pub max_cells: Option<u64>,
    /// Must be set before a non-minimal strategy can be selected.
    pub allow_approximate: bool,
}

impl Config {
    pub fn with_cost(mut self, cost: CostModel) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_max_cells(mut self, max_cells: u64) -> Self {
        self.max_cells = Some(max_cells);
        self
    }

    pub fn unlimited(mut self) -> Self {
        self.max_cells = None;
        self
    }

    pub fn allow_approximate(mut self, allow: bool) -> Self {
        self.allow_approximate = allow;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let cost = &self.cost;
        if cost.insert == 0 || cost.delete == 0 || cost.substitute == 0 {
            return Err(EditDistanceError::InvalidConfiguration(format!(
                "costs must be positive, got insert={} delete={} substitute={}",
                cost.insert, cost.delete, cost.substitute
            )));
        }
        if self.max_cells == Some(0) {
            return Err(EditDistanceError::InvalidConfiguration(
                "max_cells must be positive or unlimited".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates the configuration for a particular strategy.
    pub fn validate_for(&self, strategy: Strategy) -> Result<()> {
        self.validate()?;
        if !strategy.is_exact() && !self.allow_approximate {
            return Err(EditDistanceError::InvalidConfiguration(format!(
                "strategy `{}` may return non-minimal scripts; set allow_approximate to use it",
                strategy.name()
            )));
        }
        Ok(())
    }

    pub(crate) fn check_cells(&self, cells: u64) -> Result<()> {
        match self.max_cells {
            Some(max_cells) if cells > max_cells => {
                tracing::warn!(cells, max_cells, "rejecting input over the cell ceiling");
                Err(EditDistanceError::ResourceExceeded { cells, max_cells })
            }
            _ => Ok(()),
        }
    }
}

/// Number of cells in an `(n + 1) x (m + 1)` table, saturating on overflow.
pub(crate) fn table_cells(n: usize, m: usize) -> u64 {
    (n as u64)
        .saturating_add(1)
        .saturating_mul((m as u64).saturating_add(1))
}

/// Shared flag a caller raises to abort running calculations.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            tracing::debug!("calculation aborted by cancellation flag");
            Err(EditDistanceError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unit_and_unlimited() {
        let config = Config::default();
        assert!(config.cost.is_unit());
        assert_eq!(config.tie_break, TieBreak::SubstituteFirst);
        assert_eq!(config.max_cells, None);
        assert!(!config.allow_approximate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cost_rejected() {
        let config = Config::default().with_cost(CostModel::new(1, 0, 1));
        assert!(matches!(
            config.validate(),
            Err(EditDistanceError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_ceiling_rejected() {
        let config = Config::default().with_max_cells(0);
        assert!(config.validate().is_err());
        assert!(config.unlimited().validate().is_ok());
    }

    #[test]
    fn test_approximate_strategy_needs_flag() {
        let config = Config::default();
        assert!(config.validate_for(Strategy::WagnerFischer).is_ok());
        assert!(config.validate_for(Strategy::Hirschberg).is_ok());
        assert!(config.validate_for(Strategy::Myers).is_err());
        assert!(config
            .allow_approximate(true)
            .validate_for(Strategy::Myers)
            .is_ok());
    }

    #[test]
    fn test_check_cells() {
        let config = Config::default().with_max_cells(12);
        assert!(config.check_cells(12).is_ok());
        assert_eq!(
            config.check_cells(13),
            Err(EditDistanceError::ResourceExceeded {
                cells: 13,
                max_cells: 12
            })
        );
        assert_eq!(table_cells(3, 2), 12);
        assert_eq!(table_cells(usize::MAX, usize::MAX), u64::MAX);
        assert_eq!(table_cells(usize::MAX, 0), u64::MAX);
        assert_eq!(table_cells(0, usize::MAX), u64::MAX);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "cost": { "substitute": 2 },
            "tie_break": "insert_first",
            "max_cells": 4096
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.cost, CostModel::new(1, 1, 2));
        assert_eq!(config.tie_break, TieBreak::InsertFirst);
        assert_eq!(config.max_cells, Some(4096));
        assert!(!config.allow_approximate);
    }

    #[test]
    fn test_strategy_names() {
        let strategy: Strategy = serde_json::from_str("\"hirschberg\"").unwrap();
        assert_eq!(strategy, Strategy::Hirschberg);
        assert_eq!(serde_json::to_string(&Strategy::WagnerFischer).unwrap(), "\"wagner_fischer\"");
    }

    #[test]
    fn test_cancellation_is_shared() {
        let flag = CancellationFlag::new();
        let clone = flag.clone();
        assert!(flag.check().is_ok());
        clone.cancel();
        assert!(flag.is_cancelled());
        assert_eq!(flag.check(), Err(EditDistanceError::Cancelled));
    }
}
