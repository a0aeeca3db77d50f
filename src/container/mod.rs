mod types;
pub use types::*;

use crate::config::CostModel;
use crate::error::{EditDistanceError, Result};
use crate::{NestedSequence, Sequence};
use std::slice::Iter;

/// Index-free form of an operation, produced by the strategies before the
/// inner sequences are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Move {
    Match,
    Substitute,
    Delete,
    Insert,
}

impl Move {
    pub(crate) fn cost(self, cost: &CostModel) -> u64 {
        match self {
            Move::Match => 0,
            Move::Substitute => cost.substitute as u64,
            Move::Delete => cost.delete as u64,
            Move::Insert => cost.insert as u64,
        }
    }
}

impl<T> EditOperation<T> {
    pub fn is_match(&self) -> bool {
        matches!(self, EditOperation::Match { .. })
    }

    pub fn from_index(&self) -> Option<usize> {
        match self {
            EditOperation::Match { from_index, .. }
            | EditOperation::Substitute { from_index, .. }
            | EditOperation::Delete { from_index, .. } => Some(*from_index),
            EditOperation::Insert { .. } => None,
        }
    }

    pub fn to_index(&self) -> Option<usize> {
        match self {
            EditOperation::Match { to_index, .. }
            | EditOperation::Substitute { to_index, .. }
            | EditOperation::Insert { to_index, .. } => Some(*to_index),
            EditOperation::Delete { .. } => None,
        }
    }

    pub fn cost(&self, cost: &CostModel) -> u64 {
        self.as_move().cost(cost)
    }

    fn as_move(&self) -> Move {
        match self {
            EditOperation::Match { .. } => Move::Match,
            EditOperation::Substitute { .. } => Move::Substitute,
            EditOperation::Delete { .. } => Move::Delete,
            EditOperation::Insert { .. } => Move::Insert,
        }
    }
}

impl<T: Clone> EditDistanceContainer<T> {
    /// Attaches values and indices to a forward-ordered list of moves.
    ///
    /// The moves must consume `from` and `to` exactly; every strategy
    /// guarantees this.
    pub(crate) fn from_moves(
        from: &[Vec<T>],
        to: &[Vec<T>],
        moves: impl IntoIterator<Item = Move>,
        cost: &CostModel,
    ) -> Self {
        let mut i = 0;
        let mut j = 0;
        let mut distance = 0;
        let mut operations = Vec::new();
        for step in moves {
            distance += step.cost(cost);
            let operation = match step {
                Move::Match => {
                    i += 1;
                    j += 1;
                    EditOperation::Match {
                        from_index: i - 1,
                        to_index: j - 1,
                        value: from[i - 1].clone(),
                    }
                }
                Move::Substitute => {
                    i += 1;
                    j += 1;
                    EditOperation::Substitute {
                        from_index: i - 1,
                        to_index: j - 1,
                        from: from[i - 1].clone(),
                        to: to[j - 1].clone(),
                    }
                }
                Move::Delete => {
                    i += 1;
                    EditOperation::Delete {
                        from_index: i - 1,
                        value: from[i - 1].clone(),
                    }
                }
                Move::Insert => {
                    j += 1;
                    EditOperation::Insert {
                        to_index: j - 1,
                        value: to[j - 1].clone(),
                    }
                }
            };
            operations.push(operation);
        }
        debug_assert_eq!((i, j), (from.len(), to.len()));
        EditDistanceContainer {
            distance,
            operations,
        }
    }
}

impl<T> EditDistanceContainer<T> {
    pub fn distance(&self) -> u64 {
        self.distance
    }

    pub fn operations(&self) -> &[EditOperation<T>] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<EditOperation<T>> {
        self.operations
    }

    pub fn iter(&self) -> Iter<'_, EditOperation<T>> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// True when the script contains matches only.
    pub fn is_identity(&self) -> bool {
        self.operations.iter().all(EditOperation::is_match)
    }

    pub fn counts(&self) -> OperationCounts {
        self.operations
            .iter()
            .fold(OperationCounts::default(), |mut acc, op| {
                match op {
                    EditOperation::Match { .. } => acc.matches += 1,
                    EditOperation::Substitute { .. } => acc.substitutions += 1,
                    EditOperation::Delete { .. } => acc.deletions += 1,
                    EditOperation::Insert { .. } => acc.insertions += 1,
                }
                acc
            })
    }
}

impl<T: Eq + Clone> EditDistanceContainer<T> {
    /// Replays the script on `from`, returning the `to` sequence it was computed for.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdist::{EditDistanceAlgorithm, WagnerFischer};
    ///
    /// let from = vec![vec!["a"], vec!["b"]];
    /// let to = vec![vec!["b"], vec!["a"], vec!["c"]];
    /// let result = WagnerFischer::default().calculate(&from, &to).unwrap();
    /// assert_eq!(result.distance(), 2);
    /// assert_eq!(result.apply(&from), Ok(to));
    /// ```
    pub fn apply(&self, from: &NestedSequence<T>) -> Result<Vec<Sequence<T>>> {
        let mut result = Vec::new();
        let mut cursor = 0;

        for op in &self.operations {
            if let Some(from_index) = op.from_index() {
                let expected = match op {
                    EditOperation::Match { value, .. } | EditOperation::Delete { value, .. } => value,
                    EditOperation::Substitute { from, .. } => from,
                    EditOperation::Insert { .. } => unreachable!(),
                };
                if from_index != cursor {
                    return Err(mismatch(cursor, format!("operation expects index {}", from_index)));
                }
                match from.get(cursor) {
                    Some(actual) if actual == expected => cursor += 1,
                    Some(_) => return Err(mismatch(cursor, "value differs from the script".to_string())),
                    None => return Err(mismatch(cursor, "input ended early".to_string())),
                }
            }
            if let Some(to_index) = op.to_index() {
                if to_index != result.len() {
                    return Err(mismatch(
                        cursor,
                        format!("output index {} out of order, expected {}", to_index, result.len()),
                    ));
                }
            }
            match op {
                EditOperation::Match { value, .. } | EditOperation::Insert { value, .. } => {
                    result.push(value.clone())
                }
                EditOperation::Substitute { to, .. } => result.push(to.clone()),
                EditOperation::Delete { .. } => {}
            }
        }

        if cursor != from.len() {
            return Err(mismatch(
                cursor,
                format!("{} trailing entries not covered", from.len() - cursor),
            ));
        }
        Ok(result)
    }
}

fn mismatch(from_index: usize, reason: String) -> EditDistanceError {
    EditDistanceError::ScriptMismatch { from_index, reason }
}

impl<'a, T> IntoIterator for &'a EditDistanceContainer<T> {
    type Item = &'a EditOperation<T>;
    type IntoIter = Iter<'a, EditOperation<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}
